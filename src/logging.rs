use chrono::Local;
use log::{LevelFilter, Metadata, Record, SetLoggerError};
use std::collections::HashSet;
use std::io::{self, Write};
use std::sync::OnceLock;

/// Debug topics understood by `--debug-filter`
pub const DEBUG_TOPICS: [&str; 4] = ["plateau", "vehicle", "instructions", "mission"];

// Custom logger structure
#[derive(Debug)]
struct RoverLogger {
    level: LevelFilter,
    debug_filters: Option<HashSet<String>>,
}

impl RoverLogger {
    // Pulls "Vehicle N" out of a message so every line about a vehicle gets a [VNN] tag
    fn vehicle_context(target: &str, message: &str) -> Option<u32> {
        if let Some(id) = target
            .strip_prefix("vehicle_")
            .and_then(|s| s.parse::<u32>().ok())
        {
            return Some(id);
        }
        let start = message.find("Vehicle ")? + "Vehicle ".len();
        let rest = &message[start..];
        let end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
        rest[..end].parse::<u32>().ok()
    }

    fn format_record(&self, record: &Record) -> String {
        let level_color = match record.level() {
            log::Level::Error => "\x1B[31m", // Red
            log::Level::Warn => "\x1B[33m",  // Yellow
            log::Level::Info => "\x1B[32m",  // Green
            log::Level::Debug => "\x1B[36m", // Cyan
            log::Level::Trace => "\x1B[35m", // Magenta
        };
        let reset = "\x1B[0m";
        let timestamp = Local::now().format("%H:%M:%S%.3f");

        let message = record.args().to_string();
        let context = match Self::vehicle_context(record.target(), &message) {
            Some(id) => format!("[V{:02}] ", id),
            None => String::new(),
        };

        let mut output = format!(
            "{timestamp} {level_color}{level:5}{reset} {context}{target}: {message}",
            level = record.level(),
            target = record.target(),
        );
        if let Some(module_path) = record.module_path() {
            if module_path != record.target() {
                output.push_str(&format!(" [{}]", module_path));
            }
        }
        output
    }
}

impl log::Log for RoverLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        if metadata.level() > self.level {
            return false;
        }
        // Debug and trace output is limited to the requested topics
        if let Some(filters) = &self.debug_filters {
            if metadata.level() >= log::Level::Debug {
                return filters.iter().any(|f| metadata.target().starts_with(f.as_str()));
            }
        }
        true
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = self.format_record(record);
        // Status output owns stdout, so log lines go to stderr
        let mut stderr = io::stderr().lock();
        let _ = writeln!(stderr, "{}", line);
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

/// Log target for records about one vehicle, e.g. `vehicle_3`. It still
/// falls under the `vehicle` debug topic.
pub fn vehicle_target(id: impl std::fmt::Display) -> String {
    format!("vehicle_{}", id)
}

static LOGGER: OnceLock<RoverLogger> = OnceLock::new();

/// Parses a level name, falling back to `Info` for anything unknown
pub fn parse_level(name: &str) -> LevelFilter {
    match name.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

fn parse_filters(filter_str: &str) -> HashSet<String> {
    filter_str
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Installs the logger with optional comma-separated debug topics
pub fn init_logger(level: LevelFilter, debug_filter: Option<String>) -> Result<(), SetLoggerError> {
    let logger = LOGGER.get_or_init(|| RoverLogger {
        level,
        debug_filters: debug_filter.as_deref().map(parse_filters),
    });
    log::set_logger(logger).map(|()| log::set_max_level(level))
}

// Helper macros for specific debug topics
#[macro_export]
macro_rules! debug_plateau {
    ($($arg:tt)*) => {
        log::debug!(target: "plateau", "{}", format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_vehicle {
    (vehicle: $vehicle_id:expr, $($arg:tt)*) => {{
        let target = $crate::logging::vehicle_target($vehicle_id);
        log::debug!(target: target.as_str(), "{}", format_args!($($arg)*))
    }};
    ($($arg:tt)*) => {
        log::debug!(target: "vehicle", "{}", format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_instructions {
    ($($arg:tt)*) => {
        log::debug!(target: "instructions", "{}", format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_mission {
    ($($arg:tt)*) => {
        log::debug!(target: "mission", "{}", format_args!($($arg)*))
    };
}
