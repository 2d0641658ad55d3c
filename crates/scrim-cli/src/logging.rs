//! JSON decision log for balancing runs.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::Level;
use tracing_appender::non_blocking::{NonBlockingBuilder, WorkerGuard};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::{LoggingConfig, ResolvedOutputs};

pub const DECISIONS_FILE: &str = "decisions.jsonl";

/// Keeps the background writer alive; dropping it flushes pending lines.
pub struct LoggingGuard {
    _worker: WorkerGuard,
    pub decisions_path: PathBuf,
}

/// Where the decision log lands: next to the markdown summary.
pub fn decisions_path(outputs: &ResolvedOutputs) -> PathBuf {
    log_dir(outputs).join(DECISIONS_FILE)
}

fn log_dir(outputs: &ResolvedOutputs) -> PathBuf {
    outputs
        .summary_md
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn filter_for(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = level.as_str().to_ascii_lowercase();
        EnvFilter::new(format!("warn,scrim_core={level},scrim_cli={level}"))
    })
}

/// Installs the JSON subscriber when structured logging is enabled.
pub fn init_logging(
    logging: &LoggingConfig,
    outputs: &ResolvedOutputs,
) -> Result<Option<LoggingGuard>> {
    if !logging.enable_structured {
        return Ok(None);
    }

    let dir = log_dir(outputs);
    fs::create_dir_all(&dir)
        .with_context(|| format!("creating log directory {}", dir.display()))?;

    let decisions_path = decisions_path(outputs);
    let file = File::create(&decisions_path)
        .with_context(|| format!("creating decision log {}", decisions_path.display()))?;

    let (writer, worker) = NonBlockingBuilder::default().lossy(false).finish(file);

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter_for(logging.level().unwrap_or(Level::INFO)))
        .json()
        .flatten_event(true)
        .with_current_span(false)
        .with_span_events(FmtSpan::NONE)
        .with_writer(writer)
        .finish();

    // A subscriber may already be installed when running under tests.
    let _ = tracing::subscriber::set_global_default(subscriber);

    Ok(Some(LoggingGuard {
        _worker: worker,
        decisions_path,
    }))
}
