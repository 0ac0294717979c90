//! Logger initialization.
//!
//! Progress of a search is reported as one log line per domain decision
//! ("Checking x...", "x is a valid mail server"). The plain format keeps those
//! lines short and readable on a terminal; the JSON format emits one object
//! per line for log shippers.

use std::io::{IsTerminal, Write};

use chrono::{DateTime, SecondsFormat, Utc};
use colored::{ColoredString, Colorize};
use log::{Level, LevelFilter};

use crate::config::LogFormat;
use crate::error_handling::InitializationError;

/// Dependencies that log routine events (every NXDOMAIN, every parsed page)
/// at levels the search does not care about.
const QUIET_MODULES: &[(&str, LevelFilter)] = &[
    ("hickory_proto", LevelFilter::Error),
    ("hickory_resolver", LevelFilter::Warn),
    ("html5ever", LevelFilter::Error),
    ("selectors", LevelFilter::Warn),
    ("reqwest", LevelFilter::Info),
    ("hyper", LevelFilter::Info),
];

const CRATE_TARGET: &str = env!("CARGO_CRATE_NAME");

/// Initializes the logger with the specified level and format.
///
/// `RUST_LOG` is read first (so per-module filters still work) and `level`
/// then overrides the global level.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already
/// installed.
///
/// # Examples
///
/// ```bash
/// # Only the summary and warnings
/// mx_finder domains.txt --log-level warn
///
/// # Per-module filtering via RUST_LOG
/// RUST_LOG=hickory_resolver=debug mx_finder domains.txt --log-format json
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(level);
    for (module, filter) in QUIET_MODULES {
        builder.filter_module(module, (*filter).min(level));
    }

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{}",
                    json_line(Utc::now(), record.level(), record.target(), record.args())
                )
            });
        }
        LogFormat::Plain => {
            colored::control::set_override(std::io::stderr().is_terminal());
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{}",
                    plain_line(Utc::now(), record.level(), record.target(), record.args())
                )
            });
        }
    }

    builder.try_init()?;
    Ok(())
}

/// Module path relative to this crate (`""` for the crate root), or `None`
/// for records coming from dependencies.
fn crate_module(target: &str) -> Option<&str> {
    let rest = target.strip_prefix(CRATE_TARGET)?;
    if rest.is_empty() {
        Some(rest)
    } else {
        rest.strip_prefix("::")
    }
}

fn colored_level(level: Level) -> ColoredString {
    let label = format!("{level:<5}");
    match level {
        Level::Error => label.red().bold(),
        Level::Warn => label.yellow(),
        Level::Info => label.green(),
        Level::Debug => label.blue(),
        Level::Trace => label.dimmed(),
    }
}

/// `12:04:31 INFO  Checking example.com...`
///
/// Lines from this crate's modules show only the message; dependency lines
/// are tagged with their target.
fn plain_line(
    time: DateTime<Utc>,
    level: Level,
    target: &str,
    message: impl std::fmt::Display,
) -> String {
    let time = time.format("%H:%M:%S").to_string();
    match crate_module(target) {
        Some(_) => format!("{} {} {}", time.dimmed(), colored_level(level), message),
        None => format!(
            "{} {} [{}] {}",
            time.dimmed(),
            colored_level(level),
            target.cyan(),
            message
        ),
    }
}

/// `{"time":"...","level":"INFO","module":"search","message":"..."}`
fn json_line(
    time: DateTime<Utc>,
    level: Level,
    target: &str,
    message: impl std::fmt::Display,
) -> String {
    let module = match crate_module(target) {
        Some("") => CRATE_TARGET,
        Some(module) => module,
        None => target,
    };
    serde_json::json!({
        "time": time.to_rfc3339_opts(SecondsFormat::Millis, true),
        "level": level.as_str(),
        "module": module,
        "message": message.to_string(),
    })
    .to_string()
}
