//! Minimal stderr logger for the bundled binaries.
//!
//! The library only talks to the `log` facade; a binary calls [`init`] once
//! to see those records. The level comes from `CHESS_RULES_LOG` (`error`,
//! `warn`, `info`, `debug`, `trace` or `off`) and defaults to `warn`.

use std::io::Write;

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Environment variable holding the log level
pub const LOG_LEVEL_VAR: &str = "CHESS_RULES_LOG";

/// Writes `[LEVEL target] message` lines to stderr
#[derive(Debug)]
pub struct StderrLogger {
    level: LevelFilter,
}

impl StderrLogger {
    #[must_use]
    pub const fn new(level: LevelFilter) -> Self {
        StderrLogger { level }
    }
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(
            stderr,
            "[{:<5} {}] {}",
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Level named by `value`, or `warn` when it is missing or not a level
#[must_use]
pub fn level_from(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(LevelFilter::Warn)
}

/// Install a [`StderrLogger`] at the level from `CHESS_RULES_LOG`.
///
/// Fails if another logger is already installed.
pub fn init() -> Result<(), SetLoggerError> {
    let level = level_from(std::env::var(LOG_LEVEL_VAR).ok().as_deref());
    log::set_boxed_logger(Box::new(StderrLogger::new(level)))?;
    log::set_max_level(level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;

    #[test]
    fn test_level_from() {
        assert_eq!(level_from(None), LevelFilter::Warn);
        assert_eq!(level_from(Some("debug")), LevelFilter::Debug);
        assert_eq!(level_from(Some(" TRACE ")), LevelFilter::Trace);
        assert_eq!(level_from(Some("off")), LevelFilter::Off);
        assert_eq!(level_from(Some("loud")), LevelFilter::Warn);
    }

    #[test]
    fn test_enabled_respects_level() {
        let logger = StderrLogger::new(LevelFilter::Info);
        let info = Metadata::builder().level(Level::Info).build();
        let debug = Metadata::builder().level(Level::Debug).build();
        assert!(logger.enabled(&info));
        assert!(!logger.enabled(&debug));
    }
}
