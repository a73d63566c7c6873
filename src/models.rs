//! Core data structures for eBird observations.
//!
//! Defines the typed observation row produced for each data record, the
//! identity key used to recognise the same observation twice, and the
//! summary returned from a parse run.

use crate::config::{DispatchMode, PreSort};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use std::time::Duration;

/// One species observation from an eBird export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationRow {
    pub submission_id: String,
    pub common_name: String,
    pub scientific_name: String,
    pub taxon_order: f64,
    /// Raw count, "X" when the observer only noted presence
    pub count: String,
    pub subnational1_code: Option<String>,
    pub subnational2_name: Option<String>,
    pub location_id: String,
    pub location_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub date: NaiveDate,
    /// `None` when no start time was recorded
    pub time: Option<NaiveTime>,
    pub protocol: String,
    pub duration_minutes: u32,
    pub complete_checklist: bool,
    pub distance_km: Option<f64>,
    pub area_hectares: Option<f64>,
    pub party_size: Option<u32>,
    /// `Some("")` when the column exists but is blank
    pub breeding_code: Option<String>,
    pub asset_ids: Vec<u64>,
}

impl ObservationRow {
    /// Observation date combined with its time, or start of day when no time was recorded
    pub fn date_time(&self) -> NaiveDateTime {
        match self.time {
            Some(time) => self.date.and_time(time),
            None => self.date.and_time(NaiveTime::MIN),
        }
    }

    /// Identity of this observation: species, location and timestamp
    pub fn identity(&self) -> ObservationKey<'_> {
        ObservationKey {
            scientific_name: &self.scientific_name,
            location_id: &self.location_id,
            date_time: self.date_time(),
        }
    }

    /// True if both rows describe the same observation
    pub fn is_same_observation(&self, other: &ObservationRow) -> bool {
        self.identity() == other.identity()
    }
}

impl PartialEq for ObservationRow {
    fn eq(&self, other: &Self) -> bool {
        self.is_same_observation(other)
    }
}

impl Eq for ObservationRow {}

impl Hash for ObservationRow {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

/// Borrowed identity of an observation, for deduplication
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObservationKey<'a> {
    pub scientific_name: &'a str,
    pub location_id: &'a str,
    pub date_time: NaiveDateTime,
}

/// Outcome of a successful parse run
#[derive(Debug, Clone)]
pub struct ParseSummary {
    /// Rows delivered to the handler (header excluded)
    pub rows_processed: u64,
    pub elapsed: Duration,
    pub dispatch_mode: DispatchMode,
    pub pre_sort: PreSort,
}

impl ParseSummary {
    /// Delivery throughput for the run
    pub fn rows_per_second(&self) -> f64 {
        let seconds = self.elapsed.as_secs_f64();
        if seconds == 0.0 {
            0.0
        } else {
            self.rows_processed as f64 / seconds
        }
    }
}
