//! Record extraction.
//!
//! Maps one raw export record onto an [`ObservationRow`] using the fixed
//! column layout in [`crate::constants::columns`]. The header record is
//! skipped; any other record either yields a row or fails the run.

pub mod field_parsers;

use crate::constants::{COMPLETE_CHECKLIST_FLAG, columns};
use crate::error::Result;
use crate::models::ObservationRow;
use crate::reader::SourceRecord;
use field_parsers::{
    get_optional_field, get_required_field, parse_asset_ids, parse_blankable_time,
    parse_nullable_string, parse_optional_number, parse_required_date, parse_required_f64,
    parse_required_string, parse_u32_or_zero,
};

/// Extract a typed row from a record, or `None` for the header
pub fn extract_row(record: &SourceRecord) -> Result<Option<ObservationRow>> {
    if record.is_header() {
        return Ok(None);
    }

    let row = ObservationRow {
        submission_id: parse_required_string(record, columns::SUBMISSION_ID)?,
        common_name: parse_required_string(record, columns::COMMON_NAME)?,
        scientific_name: parse_required_string(record, columns::SCIENTIFIC_NAME)?,
        taxon_order: parse_required_f64(record, columns::TAXON_ORDER)?,
        count: parse_required_string(record, columns::COUNT)?,
        subnational1_code: parse_nullable_string(record, columns::SUBNATIONAL1_CODE)?,
        subnational2_name: parse_nullable_string(record, columns::SUBNATIONAL2_NAME)?,
        location_id: parse_required_string(record, columns::LOCATION_ID)?,
        location_name: parse_required_string(record, columns::LOCATION_NAME)?,
        latitude: parse_required_f64(record, columns::LATITUDE)?,
        longitude: parse_required_f64(record, columns::LONGITUDE)?,
        date: parse_required_date(record, columns::DATE)?,
        time: parse_blankable_time(record, columns::TIME)?,
        protocol: parse_required_string(record, columns::PROTOCOL)?,
        duration_minutes: parse_u32_or_zero(record, columns::DURATION_MINUTES)?,
        complete_checklist: get_required_field(record, columns::COMPLETE_CHECKLIST)?
            == COMPLETE_CHECKLIST_FLAG,
        distance_km: parse_optional_number(record, columns::DISTANCE_KM)?,
        area_hectares: parse_optional_number(record, columns::AREA_HECTARES)?,
        party_size: parse_optional_number(record, columns::PARTY_SIZE)?,
        // Kept even when blank: an empty breeding code is not the same as no column
        breeding_code: get_optional_field(record, columns::BREEDING_CODE).map(str::to_string),
        asset_ids: parse_asset_ids(record, columns::ASSET_IDS)?,
    };

    Ok(Some(row))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParserError;
    use chrono::{NaiveDate, NaiveTime};

    const HEADER: &[&str] = &[
        "Submission ID",
        "Common Name",
        "Scientific Name",
        "Taxonomic Order",
        "Count",
        "State/Province",
        "County",
        "Location ID",
        "Location",
        "Latitude",
        "Longitude",
        "Date",
        "Time",
        "Protocol",
        "Duration (Min)",
        "All Obs Reported",
        "Distance Traveled (km)",
        "Area Covered (ha)",
        "Number of Observers",
        "Breeding Code",
        "Observation Details",
        "Checklist Comments",
        "ML Catalog Numbers",
    ];

    fn base_fields() -> Vec<&'static str> {
        vec![
            "S123456",
            "Atlantic Puffin",
            "Fratercula arctica",
            "6511",
            "3",
            "US-ME",
            "Lincoln",
            "L999",
            "Eastern Egg Rock",
            "43.86",
            "-69.38",
            "2023-07-04",
            "09:15 AM",
            "Traveling",
            "45",
            "1",
        ]
    }

    fn record(number: u64, fields: &[&str]) -> SourceRecord {
        SourceRecord::from_fields(number, fields.iter())
    }

    #[test]
    fn test_header_is_skipped() {
        let header = record(1, HEADER);
        assert!(extract_row(&header).unwrap().is_none());
    }

    #[test]
    fn test_required_columns_only() {
        let row = extract_row(&record(2, &base_fields())).unwrap().unwrap();

        assert_eq!(row.submission_id, "S123456");
        assert_eq!(row.scientific_name, "Fratercula arctica");
        assert_eq!(row.taxon_order, 6511.0);
        assert_eq!(row.subnational1_code.as_deref(), Some("US-ME"));
        assert_eq!(row.date, NaiveDate::from_ymd_opt(2023, 7, 4).unwrap());
        assert_eq!(row.time, NaiveTime::from_hms_opt(9, 15, 0));
        assert_eq!(row.duration_minutes, 45);
        assert!(row.complete_checklist);

        // Fewer than 17 columns: every optional field absent, no error
        assert!(row.distance_km.is_none());
        assert!(row.area_hectares.is_none());
        assert!(row.party_size.is_none());
        assert!(row.breeding_code.is_none());
        assert!(row.asset_ids.is_empty());
    }

    #[test]
    fn test_all_columns() {
        let mut fields = base_fields();
        fields.extend(["3.2", "", "4", "NY", "details", "comments", "123 456 789"]);
        let row = extract_row(&record(2, &fields)).unwrap().unwrap();

        assert_eq!(row.distance_km, Some(3.2));
        assert_eq!(row.area_hectares, None);
        assert_eq!(row.party_size, Some(4));
        assert_eq!(row.breeding_code.as_deref(), Some("NY"));
        assert_eq!(row.asset_ids, vec![123, 456, 789]);
    }

    #[test]
    fn test_blank_breeding_code_is_kept() {
        let mut fields = base_fields();
        fields.extend(["", "", "", ""]);
        let row = extract_row(&record(2, &fields)).unwrap().unwrap();

        assert_eq!(row.breeding_code.as_deref(), Some(""));
        assert!(row.distance_km.is_none());
        assert!(row.party_size.is_none());
    }

    #[test]
    fn test_empty_asset_column_is_empty_list() {
        let mut fields = base_fields();
        fields.extend(["", "", "", "", "", "", ""]);
        let row = extract_row(&record(2, &fields)).unwrap().unwrap();
        assert!(row.asset_ids.is_empty());
    }

    #[test]
    fn test_blank_time_and_duration() {
        let mut fields = base_fields();
        fields[12] = "";
        fields[14] = "";
        let row = extract_row(&record(2, &fields)).unwrap().unwrap();

        assert!(row.time.is_none());
        assert_eq!(row.duration_minutes, 0);
    }

    #[test]
    fn test_complete_checklist_flag() {
        for (raw, expected) in [("1", true), ("0", false), ("X", false), ("true", false)] {
            let mut fields = base_fields();
            fields[15] = raw;
            let row = extract_row(&record(2, &fields)).unwrap().unwrap();
            assert_eq!(row.complete_checklist, expected, "raw value {:?}", raw);
        }
    }

    #[test]
    fn test_non_numeric_count_is_kept() {
        let mut fields = base_fields();
        fields[4] = "X";
        let row = extract_row(&record(2, &fields)).unwrap().unwrap();
        assert_eq!(row.count, "X");
    }

    #[test]
    fn test_malformed_latitude() {
        let mut fields = base_fields();
        fields[9] = "north";
        match extract_row(&record(5, &fields)).unwrap_err() {
            ParserError::MalformedRecord {
                record,
                column,
                value,
                ..
            } => {
                assert_eq!(record, 5);
                assert_eq!(column, columns::LATITUDE);
                assert_eq!(value, "north");
            }
            other => panic!("Expected MalformedRecord error, got {:?}", other),
        }
    }

    #[test]
    fn test_short_record_fails() {
        let fields = base_fields();
        match extract_row(&record(3, &fields[..12])).unwrap_err() {
            ParserError::MalformedRecord { record, column, .. } => {
                assert_eq!(record, 3);
                assert_eq!(column, columns::TIME);
            }
            other => panic!("Expected MalformedRecord error, got {:?}", other),
        }
    }
}
