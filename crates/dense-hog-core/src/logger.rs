//! Logging setup for binaries built on the `dense-hog-*` crates.
//!
//! Library code only talks to the `log` facade (or `tracing` with the
//! `tracing` feature). Binaries pick a backend once at startup. Both backends
//! write to stderr so stdout stays free for report output.

use std::fmt::Arguments;
use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

use log::{Level, LevelFilter, Log, Metadata, Record};

#[cfg(feature = "tracing")]
use tracing_subscriber::fmt::format::FmtSpan;
#[cfg(feature = "tracing")]
use tracing_subscriber::util::SubscriberInitExt;
#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, EnvFilter};

/// `[   0.012s DEBUG dense_hog_descriptor] message`
fn format_line(elapsed_s: f64, level: Level, target: &str, args: &Arguments<'_>) -> String {
    // Keep only the crate name; module paths make lines hard to scan.
    let target = target.split("::").next().unwrap_or(target);
    format!("[{elapsed_s:8.3}s {level:>5} {target}] {args}")
}

struct StderrLogger {
    level: LevelFilter,
    started: Instant,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(
            self.started.elapsed().as_secs_f64(),
            record.level(),
            record.target(),
            record.args(),
        );
        let _ = writeln!(std::io::stderr().lock(), "{line}");
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: OnceLock<StderrLogger> = OnceLock::new();

/// Install the stderr logger for `level`.
///
/// Only the first call installs a logger; later calls return `Ok(())`
/// without changing the level.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_some() {
        return Ok(());
    }
    let logger = LOGGER.get_or_init(|| StderrLogger {
        level,
        started: Instant::now(),
    });
    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(())
}

/// Install a stderr `tracing` subscriber filtered by `RUST_LOG` (default
/// `info`).
///
/// `json = true` emits one flattened JSON object per event; otherwise events
/// are human-readable with an uptime prefix. Span close events carry the
/// duration of each `#[instrument]`ed stage.
#[cfg(feature = "tracing")]
pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE);
    let installed = if json {
        builder.json().flatten_event(true).finish().try_init()
    } else {
        builder
            .with_timer(fmt::time::Uptime::default())
            .finish()
            .try_init()
    };
    // A subscriber installed earlier (tests, embedding apps) wins.
    let _ = installed;
}
