//! Source record reading.
//!
//! Wraps the `csv` tokenizer so the rest of the crate sees a lazy sequence
//! of numbered records. Records are numbered from 1 in file order and the
//! header is always record 1.

use crate::constants::HEADER_RECORD_NUMBER;
use crate::error::{ParserError, Result};
use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

/// One raw record with its position in the source
#[derive(Debug, Clone)]
pub struct SourceRecord {
    number: u64,
    fields: StringRecord,
}

impl SourceRecord {
    pub fn new(number: u64, fields: StringRecord) -> Self {
        Self { number, fields }
    }

    /// Build a record from plain string fields
    pub fn from_fields<I, S>(number: u64, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut record = StringRecord::new();
        for field in fields {
            record.push_field(field.as_ref());
        }
        Self::new(number, record)
    }

    /// 1-based record number
    pub fn number(&self) -> u64 {
        self.number
    }

    pub fn is_header(&self) -> bool {
        self.number == HEADER_RECORD_NUMBER
    }

    /// Number of fields in this record
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.fields.get(index)
    }
}

/// Lazy iterator over the numbered records of a source
pub struct SourceRecords<R> {
    inner: StringRecordsIntoIter<R>,
    next_number: u64,
}

impl<R: Read> SourceRecords<R> {
    /// Read records from any byte source
    pub fn from_reader(reader: R) -> Self {
        let inner = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader)
            .into_records();

        Self {
            inner,
            next_number: HEADER_RECORD_NUMBER,
        }
    }
}

impl<R: Read> Iterator for SourceRecords<R> {
    type Item = Result<SourceRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.inner.next()?;
        let number = self.next_number;
        self.next_number += 1;

        Some(
            result
                .map(|fields| SourceRecord::new(number, fields))
                .map_err(|source| ParserError::Tokenizer {
                    record: number,
                    source,
                }),
        )
    }
}

/// Open an export file for lazy record reading
pub fn open_records(path: &Path) -> Result<SourceRecords<BufReader<File>>> {
    let file = File::open(path).map_err(|source| ParserError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("Opened {} for reading", path.display());
    Ok(SourceRecords::from_reader(BufReader::new(file)))
}
