//! Run — read inputs, parse through the cache, render reports.

use std::sync::atomic::Ordering;
use std::time::{Duration, Instant};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::{debug, info, warn};

use crate::conf::OutputFormat;
use crate::parser::{fingerprint, FishingRecord, ParseOutcome};
use crate::report::Report;
use crate::state::Session;
use super::error::RunError;

const STDIN_SOURCE: &str = "-";

/// Analyze every input in order, then tear the session down.
///
/// Ctrl-C is only intercepted while an input is being read or analyzed. It
/// raises the session cancel flag, so an in-flight parse stops at its next
/// line boundary, and the run ends with `RunError::Cancelled`. A flag that is
/// already set stops the run before the next input.
pub async fn run(mut session: Session, inputs: Vec<String>) -> Result<(), RunError> {
    let sources = if inputs.is_empty() {
        vec![STDIN_SOURCE.to_string()]
    } else {
        inputs
    };
    let multiple = sources.len() > 1;

    let mut stdout = tokio::io::stdout();
    let result = async {
        for source in &sources {
            if session.is_cancelled() {
                return Err(RunError::Cancelled { line: None });
            }

            let cancel = session.cancel_flag();
            let rendered = tokio::select! {
                rendered = read_and_analyze(&mut session, source) => rendered?,
                signal = tokio::signal::ctrl_c() => {
                    signal.map_err(RunError::Signal)?;
                    warn!(input = display_name(source), "Interrupt received, stopping");
                    cancel.store(true, Ordering::Relaxed);
                    return Err(RunError::Cancelled { line: None });
                }
            };

            if multiple && session.config.output == OutputFormat::Table {
                stdout
                    .write_all(format!("== {} ==\n", source).as_bytes())
                    .await
                    .map_err(RunError::Output)?;
            }
            stdout.write_all(rendered.as_bytes()).await.map_err(RunError::Output)?;
            stdout.write_all(b"\n").await.map_err(RunError::Output)?;
        }
        stdout.flush().await.map_err(RunError::Output)
    }
    .await;

    session.shutdown();
    result
}

/// Parse one input (or reuse a cached result) and render it per the config.
///
/// Empty or whitespace-only input is rejected here, before the parser.
pub async fn analyze(session: &mut Session, source: &str, text: String) -> Result<String, RunError> {
    if text.trim().is_empty() {
        return Err(RunError::EmptyInput {
            input: display_name(source).to_string(),
        });
    }

    let key = fingerprint(&text);
    let cached: Option<Vec<FishingRecord>> = session.cache.get(&key).map(<[FishingRecord]>::to_vec);

    let (records, stats) = match cached {
        Some(records) => {
            debug!(input = display_name(source), key = %key, "record cache hit");
            (records, None)
        }
        None => {
            let started = Instant::now();
            let outcome = session.parse(text).await?;
            log_outcome(source, &outcome, started.elapsed());

            if !outcome.records.is_empty() {
                session.cache.set(key, outcome.records.clone());
            }
            (outcome.records, Some(outcome.stats))
        }
    };

    if records.is_empty() {
        info!("No valid fishing records found in {}", display_name(source));
    }

    let report_config = &session.config.report;
    let report = Report::build(
        display_name(source),
        &records,
        report_config.view,
        report_config.sort,
        report_config.descending,
        &report_config.rod_filter(),
    )
    .with_stats(stats);

    match session.config.output {
        OutputFormat::Table => Ok(report.to_text()),
        OutputFormat::Json => Ok(report.to_json()?),
    }
}

async fn read_and_analyze(session: &mut Session, source: &str) -> Result<String, RunError> {
    let text = read_source(source).await?;
    analyze(session, source, text).await
}

async fn read_source(source: &str) -> Result<String, RunError> {
    let bytes = if source == STDIN_SOURCE {
        let mut buf = Vec::new();
        tokio::io::stdin()
            .read_to_end(&mut buf)
            .await
            .map_err(|source| RunError::Io {
                input: "stdin".to_string(),
                source,
            })?;
        buf
    } else {
        tokio::fs::read(source).await.map_err(|e| RunError::Io {
            input: source.to_string(),
            source: e,
        })?
    };

    // Keep going on stray non-UTF8 bytes; affected lines just fail to classify
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn log_outcome(source: &str, outcome: &ParseOutcome, elapsed: Duration) {
    let stats = &outcome.stats;
    let count = outcome.records.len();
    let secs = elapsed.as_secs_f64();

    if count > 1000 && secs > 0.0 {
        info!(
            "Parsed {} records from {} in {:.2}s ({:.0} records/s)",
            count,
            display_name(source),
            secs,
            count as f64 / secs
        );
    } else {
        info!("Parsed {} records from {} in {:.2}s", count, display_name(source), secs);
    }

    debug!(
        lines = stats.lines,
        hooks = stats.hooks,
        captures = stats.captures,
        losses = stats.losses,
        orphan_losses = stats.orphan_losses,
        superseded_hooks = stats.superseded_hooks,
        abandoned_hooks = stats.abandoned_hooks,
        skipped = stats.skipped(),
        "parse stats"
    );
}

fn display_name(source: &str) -> &str {
    if source == STDIN_SOURCE {
        "stdin"
    } else {
        source
    }
}
