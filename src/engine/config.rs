//! Engine configuration.
//!
//! Everything needed to start and drive an external engine: where the
//! program lives, how long it may think, how long the game waits for it,
//! and which UCI options to set after the handshake.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::uci::GoLimit;

/// Program started when no engine is configured
pub const DEFAULT_ENGINE_PROGRAM: &str = "stockfish";

/// Slack added on top of a `movetime` limit before a request times out
const REQUEST_SLACK_MS: u64 = 5_000;

/// Default wait for `uciok` / `readyok`
const DEFAULT_HANDSHAKE_TIMEOUT_MS: u64 = 5_000;

/// Error type for engine configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A flag that needs a value came last
    MissingValue { flag: String },
    /// A flag or option value could not be parsed
    InvalidValue { name: String, value: String },
    /// A command-line flag this configuration does not know
    UnknownFlag { flag: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingValue { flag } => write!(f, "{flag} needs a value"),
            ConfigError::InvalidValue { name, value } => {
                write!(f, "Invalid value '{value}' for {name}")
            }
            ConfigError::UnknownFlag { flag } => write!(f, "Unknown option {flag}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// How to start and drive an external UCI engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Engine executable
    pub program: PathBuf,
    /// Arguments passed to the executable
    pub args: Vec<String>,
    /// Thinking limit sent with every `go`
    pub limit: GoLimit,
    /// How long to wait for `bestmove` before giving up
    pub request_timeout: Duration,
    /// How long to wait for `uciok` and `readyok`
    pub handshake_timeout: Duration,
    /// UCI options sent with `setoption` after the handshake, in order
    pub options: Vec<(String, Option<String>)>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let limit = GoLimit::default();
        Self {
            program: PathBuf::from(DEFAULT_ENGINE_PROGRAM),
            args: Vec::new(),
            limit,
            request_timeout: default_request_timeout(limit),
            handshake_timeout: Duration::from_millis(DEFAULT_HANDSHAKE_TIMEOUT_MS),
            options: Vec::new(),
        }
    }
}

/// A `movetime` limit plus slack; a fixed minute for other limits
fn default_request_timeout(limit: GoLimit) -> Duration {
    match limit {
        GoLimit::MoveTime(ms) => Duration::from_millis(ms + REQUEST_SLACK_MS),
        GoLimit::Depth(_) | GoLimit::Infinite => Duration::from_secs(60),
    }
}

impl EngineConfig {
    #[must_use]
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Set the thinking limit; a `movetime` limit also moves the request
    /// timeout along with it.
    #[must_use]
    pub fn with_limit(mut self, limit: GoLimit) -> Self {
        self.limit = limit;
        self.request_timeout = default_request_timeout(limit);
        self
    }

    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_handshake_timeout(mut self, timeout: Duration) -> Self {
        self.handshake_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_option(mut self, name: impl Into<String>, value: Option<String>) -> Self {
        self.options.push((name.into(), value));
        self
    }

    /// Apply one named setting.
    ///
    /// `movetime`, `depth`, `timeout` and `handshake timeout` (milliseconds
    /// for the times) configure this crate; any other name is queued as a
    /// UCI option for the engine itself.
    pub fn apply_option(&mut self, name: &str, value: Option<&str>) -> Result<(), ConfigError> {
        let normalized = name.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "movetime" => {
                let ms = parse_value::<u64>(name, value)?;
                *self = std::mem::take(self).with_limit(GoLimit::MoveTime(ms));
            }
            "depth" => {
                let depth = parse_value::<u32>(name, value)?;
                *self = std::mem::take(self).with_limit(GoLimit::Depth(depth.max(1)));
            }
            "timeout" => {
                self.request_timeout = Duration::from_millis(parse_value(name, value)?);
            }
            "handshake timeout" => {
                self.handshake_timeout = Duration::from_millis(parse_value(name, value)?);
            }
            _ => {
                self.options
                    .push((name.trim().to_string(), value.map(str::to_string)));
            }
        }
        Ok(())
    }

    /// Build a configuration from command-line flags.
    ///
    /// Understands `--engine <path>`, `--engine-arg <arg>` (repeatable),
    /// `--movetime <ms>`, `--depth <n>`, `--timeout <ms>`,
    /// `--handshake-timeout <ms>` and `--option <name>=<value>` (repeatable).
    pub fn from_args<I, S>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut config = Self::default();
        let mut args = args.into_iter().map(Into::into);

        while let Some(flag) = args.next() {
            let mut value = || {
                args.next().ok_or_else(|| ConfigError::MissingValue {
                    flag: flag.clone(),
                })
            };
            match flag.as_str() {
                "--engine" => config.program = PathBuf::from(value()?),
                "--engine-arg" => config.args.push(value()?),
                "--movetime" => config.apply_option("movetime", Some(&value()?))?,
                "--depth" => config.apply_option("depth", Some(&value()?))?,
                "--timeout" => config.apply_option("timeout", Some(&value()?))?,
                "--handshake-timeout" => {
                    config.apply_option("handshake timeout", Some(&value()?))?;
                }
                "--option" => {
                    let raw = value()?;
                    let option = match raw.split_once('=') {
                        Some((name, v)) => (name.to_string(), Some(v.to_string())),
                        None => (raw, None),
                    };
                    config.options.push(option);
                }
                _ => return Err(ConfigError::UnknownFlag { flag: flag.clone() }),
            }
        }

        Ok(config)
    }
}

fn parse_value<T: std::str::FromStr>(name: &str, value: Option<&str>) -> Result<T, ConfigError> {
    let raw = value.unwrap_or("");
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        name: name.to_string(),
        value: raw.to_string(),
    })
}
