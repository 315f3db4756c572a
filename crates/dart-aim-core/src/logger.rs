//! Stderr logger for the `dart-aim` tools.
//!
//! Lines look like `[  0.412s  INFO analysis] message`: elapsed time since
//! installation, level and the last segment of the record's target.
//! `DART_AIM_LOG` (`error`..`trace`) overrides the level passed in.

use std::io::Write;
use std::str::FromStr;
use std::sync::OnceLock;
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record};

#[cfg(feature = "tracing")]
use tracing_subscriber::fmt::format::FmtSpan;
#[cfg(feature = "tracing")]
use tracing_subscriber::util::SubscriberInitExt;
#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable that overrides the requested level.
pub const LOG_ENV_VAR: &str = "DART_AIM_LOG";

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

        let target = short_target(record.target());
        let elapsed = self.started.elapsed().as_secs_f64();
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(
            stderr,
            "[{:7.3}s {:>5} {}] {}",
            elapsed,
            record.level(),
            target,
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// `dart_aim_analysis::analyzer` -> `analyzer`.
fn short_target(target: &str) -> &str {
    target.rsplit("::").next().unwrap_or(target)
}

fn resolve_level(requested: LevelFilter) -> LevelFilter {
    std::env::var(LOG_ENV_VAR)
        .ok()
        .and_then(|raw| LevelFilter::from_str(raw.trim()).ok())
        .unwrap_or(requested)
}

static LOGGER: OnceLock<StderrLogger> = OnceLock::new();

/// Install the stderr logger with the provided level filter.
///
/// Calling this more than once is a no-op after the first successful
/// initialization.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_none() {
        let level = resolve_level(level);
        let logger = LOGGER.get_or_init(|| StderrLogger {
            level,
            started: Instant::now(),
        });
        log::set_logger(logger)?;
        log::set_max_level(level);
    }
    Ok(())
}

/// Install a `tracing` subscriber filtered by `RUST_LOG` (default `info`).
#[cfg(feature = "tracing")]
pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if json {
        let _ = fmt()
            .with_env_filter(filter)
            .with_span_events(FmtSpan::CLOSE)
            .json()
            .flatten_event(true)
            .finish()
            .try_init();
    } else {
        let _ = fmt()
            .with_env_filter(filter)
            .with_span_events(FmtSpan::CLOSE)
            .with_timer(fmt::time::Uptime::default())
            .with_writer(std::io::stderr)
            .finish()
            .try_init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_target_keeps_last_segment() {
        assert_eq!(short_target("dart_aim_analysis::analyzer"), "analyzer");
        assert_eq!(short_target("dart_aim"), "dart_aim");
    }

    #[test]
    fn repeated_init_is_a_noop() {
        init_with_level(LevelFilter::Warn).expect("first init");
        init_with_level(LevelFilter::Trace).expect("second init");
    }
}
