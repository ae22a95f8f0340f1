use std::env;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt as fmt_layer};

// Import CRATE_NAMES, which lists all crates in the workspace.
include!(concat!(env!("OUT_DIR"), "/constants.gen.rs"));

/// Controls the log format.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Auto detect the best format.
    ///
    /// This chooses [`LogFormat::Pretty`] for TTY, otherwise [`LogFormat::Simplified`].
    #[default]
    Auto,

    /// Pretty printing with colors.
    ///
    /// ```text
    ///  INFO spantag_decorators::engine: loaded 8 decoration rules
    /// ```
    Pretty,

    /// Simplified plain text output.
    ///
    /// ```text
    /// 2026-10-19T12:10:32.116Z  INFO spantag_decorators::engine: loaded 8 decoration rules
    /// ```
    Simplified,

    /// Dump out JSON lines.
    ///
    /// ```text
    /// {"timestamp":"2026-10-19T12:11:08.729716Z","level":"INFO","message":"loaded 8 decoration rules","target":"spantag_decorators::engine"}
    /// ```
    Json,
}

/// The maximum log level for spantag crates.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Logging is disabled.
    Off,
    /// Only errors are logged.
    Error,
    /// Warnings and errors are logged.
    Warn,
    /// The default level.
    #[default]
    Info,
    /// Also includes debug messages.
    Debug,
    /// Logs everything.
    Trace,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Off => "off",
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        };

        f.write_str(name)
    }
}

/// Error returned when parsing an unknown [`Level`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseLevelError;

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("expected one of off, error, warn, info, debug, trace")
    }
}

impl std::error::Error for ParseLevelError {}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "off" => Self::Off,
            "error" => Self::Error,
            "warn" | "warning" => Self::Warn,
            "info" => Self::Info,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => return Err(ParseLevelError),
        })
    }
}

/// Controls the logging system.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct LogConfig {
    /// The log level for spantag crates.
    pub level: Level,

    /// Controls the log output format.
    ///
    /// Defaults to [`LogFormat::Auto`], which detects the best format based on the TTY.
    pub format: LogFormat,

    /// When set to `true`, backtraces are forced on.
    ///
    /// Otherwise, backtraces can be enabled by setting the `RUST_BACKTRACE` variable to `full`.
    pub enable_backtraces: bool,
}

/// Builds the default filter directives for the given level.
///
/// Third-party crates log at most at `INFO`, all crates of this workspace log at `level`.
fn default_directives(level: Level) -> String {
    let third_party = level.min(Level::Info);
    let mut directives = third_party.to_string();

    for name in CRATE_NAMES {
        directives.push_str(&format!(",{name}={level}"));
    }

    directives
}

/// Initialize the logging system.
///
/// If `RUST_LOG` is set, its directives take precedence over the configured level. Log output is
/// written to standard error, so that it never mixes with program output.
///
/// # Example
///
/// ```
/// let log_config = spantag_log::LogConfig {
///     enable_backtraces: true,
///     ..Default::default()
/// };
///
/// spantag_log::init(&log_config);
/// ```
pub fn init(config: &LogConfig) {
    if config.enable_backtraces {
        // SAFETY: Called once during startup, before any other threads are spawned.
        unsafe { env::set_var("RUST_BACKTRACE", "full") };
    }

    let filter = match env::var(EnvFilter::DEFAULT_ENV) {
        Ok(_) => EnvFilter::from_default_env(),
        Err(_) => EnvFilter::new(default_directives(config.level)),
    };

    let layer: Box<dyn Layer<Registry> + Send + Sync> =
        match (config.format, console::user_attended_stderr()) {
            (LogFormat::Auto, true) | (LogFormat::Pretty, _) => fmt_layer::layer()
                .compact()
                .without_time()
                .with_ansi(true)
                .with_writer(std::io::stderr)
                .boxed(),
            (LogFormat::Auto, false) | (LogFormat::Simplified, _) => fmt_layer::layer()
                .with_ansi(false)
                .with_writer(std::io::stderr)
                .boxed(),
            (LogFormat::Json, _) => fmt_layer::layer()
                .json()
                .flatten_event(true)
                .with_current_span(false)
                .with_span_list(false)
                .with_writer(std::io::stderr)
                .boxed(),
        };

    tracing_subscriber::registry()
        .with(layer.with_filter(filter))
        .try_init()
        .ok();
}
