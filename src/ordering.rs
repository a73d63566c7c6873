//! Sort key derivation for date pre-sorting.

use crate::constants::columns;
use crate::error::Result;
use crate::extractor::field_parsers::{get_required_field, parse_required_date, parse_time};
use crate::reader::SourceRecord;
use chrono::{NaiveDateTime, NaiveTime};

/// Comparable observation timestamp of a record.
///
/// The header maps to the minimum timestamp so it sorts first. A blank time
/// counts as midnight here only; the extracted row keeps its time absent.
pub fn ordering_key(record: &SourceRecord) -> Result<NaiveDateTime> {
    if record.is_header() {
        return Ok(NaiveDateTime::MIN);
    }

    let date = parse_required_date(record, columns::DATE)?;
    let raw_time = get_required_field(record, columns::TIME)?;
    let time = if raw_time.is_empty() {
        NaiveTime::MIN
    } else {
        parse_time(record, columns::TIME, raw_time)?
    };

    Ok(date.and_time(time))
}

/// Stably sort records by observation timestamp, keeping file order on ties
pub fn sort_by_observation_time(records: Vec<SourceRecord>) -> Result<Vec<SourceRecord>> {
    let mut keyed = records
        .into_iter()
        .map(|record| Ok((ordering_key(&record)?, record)))
        .collect::<Result<Vec<_>>>()?;

    // sort_by_key is stable
    keyed.sort_by_key(|(key, _)| *key);

    Ok(keyed.into_iter().map(|(_, record)| record).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParserError;
    use chrono::NaiveDate;

    fn record(number: u64, date: &str, time: &str) -> SourceRecord {
        let mut fields = vec![""; 16];
        fields[columns::SUBMISSION_ID] = "S1";
        fields[columns::DATE] = date;
        fields[columns::TIME] = time;
        SourceRecord::from_fields(number, fields)
    }

    #[test]
    fn test_header_sorts_first() {
        let header = SourceRecord::from_fields(1, ["Date", "Time"]);
        assert_eq!(ordering_key(&header).unwrap(), NaiveDateTime::MIN);
    }

    #[test]
    fn test_blank_time_is_midnight() {
        let key = ordering_key(&record(2, "2023-05-10", "")).unwrap();
        assert_eq!(
            key,
            NaiveDate::from_ymd_opt(2023, 5, 10)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_time_is_combined() {
        let key = ordering_key(&record(2, "2023-05-10", "02:30 PM")).unwrap();
        assert_eq!(
            key,
            NaiveDate::from_ymd_opt(2023, 5, 10)
                .unwrap()
                .and_hms_opt(14, 30, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_malformed_date_propagates() {
        match ordering_key(&record(9, "10/05/2023", "")).unwrap_err() {
            ParserError::MalformedRecord { record, column, .. } => {
                assert_eq!(record, 9);
                assert_eq!(column, columns::DATE);
            }
            other => panic!("Expected MalformedRecord error, got {:?}", other),
        }
    }

    #[test]
    fn test_sort_is_stable() {
        let records = vec![
            SourceRecord::from_fields(1, ["header"]),
            record(2, "2023-05-10", "09:00 AM"),
            record(3, "2023-05-10", ""),
            record(4, "2023-05-09", "11:00 PM"),
            record(5, "2023-05-10", ""),
            record(6, "2023-05-10", "08:30 AM"),
        ];

        let sorted = sort_by_observation_time(records).unwrap();
        let order: Vec<u64> = sorted.iter().map(SourceRecord::number).collect();
        assert_eq!(order, vec![1, 4, 3, 5, 6, 2]);
    }
}
