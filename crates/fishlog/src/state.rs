use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::conf::FishlogConfig;
use crate::parser::{LogParser, ParseError, ParseOutcome, RecordCache};
use crate::runtime::error::RunError;

/// Process-scoped state for one fishlog run.
///
/// Created at boot and torn down by [`Session::shutdown`]. The record cache
/// lives here and is passed to whatever drives repeated parses; each parse
/// still gets its own correlator.
pub struct Session {
    pub config: FishlogConfig,
    pub parser: Arc<LogParser>,
    pub cache: RecordCache,
    cancel: Arc<AtomicBool>,
}

impl Session {
    pub fn new(config: FishlogConfig) -> Self {
        let cache = RecordCache::new(config.cache_capacity);
        Self {
            config,
            parser: Arc::new(LogParser::new()),
            cache,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Flag polled by running parses at line boundaries
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }

    /// Run one parse pass on a blocking worker.
    ///
    /// The pass checks the cancel flag every `yield_interval` lines and
    /// stops with `RunError::Cancelled` once it is set.
    pub async fn parse(&self, text: String) -> Result<ParseOutcome, RunError> {
        let parser = Arc::clone(&self.parser);
        let cancel = Arc::clone(&self.cancel);
        let yield_every = self.config.yield_interval;

        let outcome = tokio::task::spawn_blocking(move || {
            parser.parse_with(&text, yield_every, |_| {
                if cancel.load(Ordering::Relaxed) {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            })
        })
        .await?;

        outcome.map_err(|err| match err {
            ParseError::Interrupted { line } => RunError::Cancelled { line: Some(line) },
            other => RunError::Parse(other),
        })
    }

    pub fn shutdown(&mut self) {
        let stats = self.cache.stats();
        tracing::info!(
            capacity = self.cache.capacity(),
            entries = stats.entries,
            hits = stats.hits,
            misses = stats.misses,
            evictions = stats.evictions,
            "Clearing record cache"
        );
        self.cache.clear();
    }
}
