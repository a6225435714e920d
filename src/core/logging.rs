//! Logging backend setup
//!
//! The queue system itself logs only through the `log` facade, and always as
//! advisory output — a missing or failed logger never blocks an operation.
//! This module wires a flexi_logger backend for binaries and tests that
//! embed the crate and want formatted output.

use std::path::Path;
use std::sync::{Mutex, OnceLock};

// Handle kept for runtime level changes; the logger itself is process-global.
static LOGGER_HANDLE: OnceLock<Mutex<flexi_logger::LoggerHandle>> = OnceLock::new();

/// Output format for [`init_logging`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Timestamped single-line text
    #[default]
    Text,
    /// One compact JSON object per record
    Json,
}

/// Logger configuration.
#[derive(Debug, Clone)]
pub struct LogOptions<'a> {
    /// Level spec string, e.g. `"info"` or `"postbox=trace"`
    pub level: &'a str,
    pub format: LogFormat,
    /// Colorize levels and timestamps (text format only)
    pub color: bool,
    /// Write to this file instead of stderr
    pub file: Option<&'a Path>,
}

impl Default for LogOptions<'static> {
    fn default() -> Self {
        Self {
            level: "info",
            format: LogFormat::Text,
            color: false,
            file: None,
        }
    }
}

/// Start the process-wide logger.
///
/// Call at most once per process; a second call fails inside flexi_logger.
pub fn init_logging(options: &LogOptions) -> Result<(), Box<dyn std::error::Error>> {
    use flexi_logger::{FileSpec, Logger};

    let mut logger = Logger::try_with_str(options.level)?;
    logger = match (options.format, options.color) {
        (LogFormat::Json, _) => logger.format(json_format),
        (LogFormat::Text, true) => logger.format(color_format),
        (LogFormat::Text, false) => logger.format(text_format),
    };
    if let Some(path) = options.file {
        logger = logger.log_to_file(FileSpec::try_from(path)?);
    }

    let handle = logger.start()?;
    let _ = LOGGER_HANDLE.set(Mutex::new(handle));
    Ok(())
}

/// Change the active level spec at runtime.
///
/// Format and output target are fixed at initialization; only the level can
/// move afterwards.
pub fn set_log_level(level: &str) -> Result<(), Box<dyn std::error::Error>> {
    let handle_mutex = LOGGER_HANDLE
        .get()
        .ok_or("logger not initialised; call init_logging first")?;
    let mut handle = handle_mutex
        .lock()
        .map_err(|_| "could not acquire logger handle lock")?;
    handle.parse_and_push_temp_spec(level)?;
    Ok(())
}

fn level_abbr(level: log::Level) -> &'static str {
    match level {
        log::Level::Error => "ERR",
        log::Level::Warn => "WRN",
        log::Level::Info => "INF",
        log::Level::Debug => "DBG",
        log::Level::Trace => "TRC",
    }
}

// "YYYY-MM-DD HH:mm:ss.fff INF message (queue/registry.rs:42)"
fn text_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "{} {} {} ({})",
        now.format("%Y-%m-%d %H:%M:%S%.3f"),
        level_abbr(record.level()),
        record.args(),
        format_target_as_path(record.target(), record.line())
    )
}

fn color_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    use colored::*;

    let level_colored = match record.level() {
        log::Level::Error => "ERR".red().bold(),
        log::Level::Warn => "WRN".yellow(),
        log::Level::Info => "INF".green(),
        log::Level::Debug => "DBG".blue(),
        log::Level::Trace => "TRC".magenta(),
    };

    write!(
        w,
        "{} {} {} ({})",
        now.format("%Y-%m-%d %H:%M:%S%.3f").to_string().dimmed(),
        level_colored,
        record.args(),
        format_target_as_path(record.target(), record.line()).dimmed()
    )
}

fn json_format(
    w: &mut dyn std::io::Write,
    now: &mut flexi_logger::DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    let json_obj = serde_json::json!({
        "timestamp": now.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
        "level": level_abbr(record.level()),
        "message": record.args().to_string(),
        "target": format_target_as_path(record.target(), record.line()),
    });

    match serde_json::to_string(&json_obj) {
        Ok(json_string) => w.write_all(json_string.as_bytes()),
        Err(_) => w.write_all(b"{\"error\":\"failed to serialize log record\"}"),
    }
}

// postbox::queue::registry -> queue/registry.rs:42
fn format_target_as_path(target: &str, line: Option<u32>) -> String {
    let path_like = match target.strip_prefix("postbox::") {
        Some(module_path) => module_path.replace("::", "/") + ".rs",
        None => target.replace("::", "/"),
    };
    match line {
        Some(line_num) => format!("{}:{}", path_like, line_num),
        None => path_like,
    }
}
