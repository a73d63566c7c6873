//! Configuration for a parse run.
//!
//! Selects the processing order and dispatch strategy, and bounds the
//! worker pool used for concurrent delivery.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How rows are handed to the handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DispatchMode {
    /// One row at a time, in stream order
    #[default]
    Sequential,
    /// Fan out to a bounded worker pool, no ordering guarantee
    Concurrent,
}

/// Ordering applied to records before dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PreSort {
    /// File order, records streamed lazily
    #[default]
    None,
    /// Whole file loaded and stably sorted by observation date and time
    Date,
}

impl fmt::Display for DispatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchMode::Sequential => write!(f, "sequential"),
            DispatchMode::Concurrent => write!(f, "concurrent"),
        }
    }
}

impl fmt::Display for PreSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreSort::None => write!(f, "none"),
            PreSort::Date => write!(f, "date"),
        }
    }
}

/// Parser configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Dispatch strategy
    pub dispatch_mode: DispatchMode,

    /// Pre-sort applied before dispatch
    pub pre_sort: PreSort,

    /// Worker pool size for concurrent dispatch (0 = available parallelism)
    pub workers: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            dispatch_mode: DispatchMode::Sequential,
            pre_sort: PreSort::None,
            workers: 0, // 0 = auto-detect
        }
    }
}

impl ParserConfig {
    /// Set the dispatch mode
    pub fn with_dispatch_mode(mut self, dispatch_mode: DispatchMode) -> Self {
        self.dispatch_mode = dispatch_mode;
        self
    }

    /// Set the pre-sort option
    pub fn with_pre_sort(mut self, pre_sort: PreSort) -> Self {
        self.pre_sort = pre_sort;
        self
    }

    /// Set a fixed worker count
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Worker pool size actually used for concurrent dispatch
    pub fn effective_workers(&self) -> usize {
        if self.workers > 0 {
            self.workers
        } else {
            num_cpus::get().max(1)
        }
    }
}
