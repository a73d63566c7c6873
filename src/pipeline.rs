//! Parse pipeline controller.
//!
//! Drives one run over an export: open the source, optionally load and sort
//! every record by observation time, then deliver each extracted row to the
//! caller's handler either one at a time or through a bounded worker pool.
//!
//! A run is all-or-nothing. The first malformed record or handler failure
//! aborts it and is returned to the caller; rows already delivered are not
//! reported back.

use crate::config::{DispatchMode, ParserConfig, PreSort};
use crate::error::{HandlerResult, ParserError, Result};
use crate::extractor::extract_row;
use crate::models::{ObservationRow, ParseSummary};
use crate::ordering::sort_by_observation_time;
use crate::progress::ProgressCounter;
use crate::reader::{SourceRecord, SourceRecords, open_records};

use futures::future;
use futures::stream::{self, StreamExt, TryStreamExt};
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio::task;
use tracing::{debug, error, info};

/// Lifecycle of a parse run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Loading,
    Sorting,
    Dispatching,
    Done,
    Failed,
}

/// Parser for eBird observation exports
#[derive(Debug)]
pub struct ObservationParser {
    config: ParserConfig,
    state: PipelineState,
}

impl ObservationParser {
    /// Create a parser with the given configuration
    pub fn new(config: ParserConfig) -> Self {
        Self {
            config,
            state: PipelineState::Idle,
        }
    }

    /// State reached by the most recent run
    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Parse an export file, handing every observation row to `handler`
    pub async fn parse<F>(&mut self, path: &Path, handler: F) -> Result<ParseSummary>
    where
        F: Fn(ObservationRow) -> HandlerResult + Send + Sync + 'static,
    {
        info!("Parsing {}...", path.display());
        self.transition(PipelineState::Loading);

        let records = match open_records(path) {
            Ok(records) => records,
            Err(e) => return Err(self.fail(e)),
        };

        self.run(records, handler).await
    }

    /// Parse export data from any reader
    pub async fn parse_reader<R, F>(&mut self, reader: R, handler: F) -> Result<ParseSummary>
    where
        R: Read + Send + 'static,
        F: Fn(ObservationRow) -> HandlerResult + Send + Sync + 'static,
    {
        self.transition(PipelineState::Loading);
        self.run(SourceRecords::from_reader(reader), handler).await
    }

    async fn run<R, F>(&mut self, records: SourceRecords<R>, handler: F) -> Result<ParseSummary>
    where
        R: Read + Send + 'static,
        F: Fn(ObservationRow) -> HandlerResult + Send + Sync + 'static,
    {
        let start_time = Instant::now();
        let counter = ProgressCounter::new();
        let handler = Arc::new(handler);

        let outcome = match self.config.pre_sort {
            PreSort::None => self.dispatch(records, handler, &counter).await,
            PreSort::Date => match self.load_sorted(records).await {
                Ok(sorted) => {
                    self.dispatch(sorted.into_iter().map(Ok), handler, &counter)
                        .await
                }
                Err(e) => Err(e),
            },
        };

        if let Err(e) = outcome {
            return Err(self.fail(e));
        }

        self.transition(PipelineState::Done);
        let summary = ParseSummary {
            rows_processed: counter.get(),
            elapsed: start_time.elapsed(),
            dispatch_mode: self.config.dispatch_mode,
            pre_sort: self.config.pre_sort,
        };

        info!(
            "Processed {} eBird observations in {:.2}s",
            summary.rows_processed,
            summary.elapsed.as_secs_f64()
        );
        Ok(summary)
    }

    /// Materialize every record and sort by observation time
    async fn load_sorted<R>(&mut self, records: SourceRecords<R>) -> Result<Vec<SourceRecord>>
    where
        R: Read + Send + 'static,
    {
        let start_time = Instant::now();
        let records = task::spawn_blocking(move || records.collect::<Result<Vec<_>>>()).await??;

        self.transition(PipelineState::Sorting);
        let sorted = task::spawn_blocking(move || sort_by_observation_time(records)).await??;

        info!(
            "Read and sorted {} eBird observations in {:.2}s",
            sorted.len().saturating_sub(1),
            start_time.elapsed().as_secs_f64()
        );
        Ok(sorted)
    }

    async fn dispatch<I, F>(
        &mut self,
        records: I,
        handler: Arc<F>,
        counter: &ProgressCounter,
    ) -> Result<()>
    where
        I: IntoIterator<Item = Result<SourceRecord>> + Send + 'static,
        F: Fn(ObservationRow) -> HandlerResult + Send + Sync + 'static,
    {
        self.transition(PipelineState::Dispatching);

        match self.config.dispatch_mode {
            DispatchMode::Sequential => {
                let counter = counter.clone();
                task::spawn_blocking(move || -> Result<()> {
                    for record in records {
                        deliver(&record?, handler.as_ref(), &counter)?;
                    }
                    Ok(())
                })
                .await?
            }
            DispatchMode::Concurrent => {
                let workers = self.config.effective_workers();
                debug!("Concurrent dispatch using {} workers", workers);

                // Records are read on a blocking thread; the send fails once
                // the stream below is dropped, which stops the reader.
                let (sender, receiver) = mpsc::channel(workers);
                let reader = task::spawn_blocking(move || {
                    for record in records {
                        if sender.blocking_send(record).is_err() {
                            break;
                        }
                    }
                });

                // Dropping the stream on the first error stops new records
                // being pulled; blocking tasks already running still finish.
                let outcome = stream::unfold(receiver, |mut receiver| async move {
                    receiver.recv().await.map(|record| (record, receiver))
                })
                .map(|record| {
                    let handler = Arc::clone(&handler);
                    let counter = counter.clone();
                    async move {
                        let record = record?;
                        let delivered: Result<()> = task::spawn_blocking(move || {
                            deliver(&record, handler.as_ref(), &counter)
                        })
                        .await?;
                        delivered
                    }
                })
                .buffer_unordered(workers)
                .try_for_each(|()| future::ok(()))
                .await;

                reader.await?;
                outcome
            }
        }
    }

    fn transition(&mut self, next: PipelineState) {
        debug!("Pipeline state {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    fn fail(&mut self, error: ParserError) -> ParserError {
        error!("Parse aborted: {}", error);
        self.transition(PipelineState::Failed);
        error
    }
}

impl Default for ObservationParser {
    fn default() -> Self {
        Self::new(ParserConfig::default())
    }
}

/// Parse an export file sequentially in file order
pub async fn parse_file<F>(path: &Path, handler: F) -> Result<ParseSummary>
where
    F: Fn(ObservationRow) -> HandlerResult + Send + Sync + 'static,
{
    ObservationParser::default().parse(path, handler).await
}

/// Extract one record and hand the row to the handler; the header is skipped
fn deliver<F>(record: &SourceRecord, handler: &F, counter: &ProgressCounter) -> Result<()>
where
    F: Fn(ObservationRow) -> HandlerResult + ?Sized,
{
    let Some(row) = extract_row(record)? else {
        return Ok(());
    };

    handler(row).map_err(|source| ParserError::Handler {
        record: record.number(),
        source,
    })?;
    counter.increment();
    Ok(())
}

#[cfg(test)]
mod tests;
