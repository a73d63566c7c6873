//! Observation summary statistics.
//!
//! A thread-safe collector that can be fed from any dispatch mode and
//! reports totals once a run completes.

use crate::models::ObservationRow;
use chrono::NaiveDateTime;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// Owned identity of an observation
type IdentityKey = (String, String, NaiveDateTime);

#[derive(Debug, Default)]
struct SummaryState {
    rows: u64,
    observations: HashSet<IdentityKey>,
    checklists: HashSet<String>,
    complete_checklists: HashSet<String>,
    species: HashMap<String, u64>,
    first_seen: Option<NaiveDateTime>,
    last_seen: Option<NaiveDateTime>,
}

/// Collects totals across every delivered row
#[derive(Debug, Default)]
pub struct ObservationSummary {
    state: Mutex<SummaryState>,
}

/// Snapshot of collected totals
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryReport {
    pub rows: u64,
    /// Rows left after merging same species, location and time
    pub distinct_observations: usize,
    pub checklists: usize,
    pub complete_checklists: usize,
    pub species: usize,
    pub first_seen: Option<NaiveDateTime>,
    pub last_seen: Option<NaiveDateTime>,
    /// Most frequently reported species, by row count
    pub top_species: Vec<(String, u64)>,
}

impl ObservationSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one row to the totals
    pub fn record(&self, row: &ObservationRow) {
        let date_time = row.date_time();
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());

        state.rows += 1;
        state.observations.insert((
            row.scientific_name.clone(),
            row.location_id.clone(),
            date_time,
        ));
        state.checklists.insert(row.submission_id.clone());
        if row.complete_checklist {
            state.complete_checklists.insert(row.submission_id.clone());
        }
        *state.species.entry(row.common_name.clone()).or_insert(0) += 1;

        state.first_seen = Some(state.first_seen.map_or(date_time, |t| t.min(date_time)));
        state.last_seen = Some(state.last_seen.map_or(date_time, |t| t.max(date_time)));
    }

    /// Current totals, with up to `top` most reported species
    pub fn report(&self, top: usize) -> SummaryReport {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());

        let mut top_species: Vec<(String, u64)> = state
            .species
            .iter()
            .map(|(name, count)| (name.clone(), *count))
            .collect();
        top_species.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        top_species.truncate(top);

        SummaryReport {
            rows: state.rows,
            distinct_observations: state.observations.len(),
            checklists: state.checklists.len(),
            complete_checklists: state.complete_checklists.len(),
            species: state.species.len(),
            first_seen: state.first_seen,
            last_seen: state.last_seen,
            top_species,
        }
    }
}
