//! eBird Parser Library
//!
//! Reads eBird "My Data" CSV exports into typed [`ObservationRow`] values and
//! hands each one to a caller-supplied handler.
//!
//! This library provides:
//! - Positional record extraction with optional trailing columns
//! - Optional stable pre-sort by observation date and time
//! - Sequential or bounded-concurrency delivery to the handler
//! - Fail-fast error reporting with record and column context
//!
//! ```no_run
//! use ebird_parser::{DispatchMode, ObservationParser, ParserConfig, PreSort};
//! use std::path::Path;
//!
//! # async fn example() -> ebird_parser::Result<()> {
//! let config = ParserConfig::default()
//!     .with_dispatch_mode(DispatchMode::Concurrent)
//!     .with_pre_sort(PreSort::Date);
//!
//! let summary = ObservationParser::new(config)
//!     .parse(Path::new("MyEBirdData.csv"), |row| {
//!         println!("{} at {}", row.common_name, row.location_name);
//!         Ok(())
//!     })
//!     .await?;
//!
//! println!("{} observations", summary.rows_processed);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod extractor;
pub mod models;
pub mod ordering;
pub mod pipeline;
pub mod progress;
pub mod reader;
pub mod summary;

pub use config::{DispatchMode, ParserConfig, PreSort};
pub use error::{HandlerError, HandlerResult, ParserError, Result};
pub use models::{ObservationKey, ObservationRow, ParseSummary};
pub use pipeline::{ObservationParser, PipelineState, parse_file};
pub use summary::{ObservationSummary, SummaryReport};
