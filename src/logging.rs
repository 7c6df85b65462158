// logging.rs
// Timestamped console logging shared by the relay server and the game client

use chrono::Local;

/// Log level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warning,
    Error,
}

impl LogLevel {
    fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }
}

/// Build a log line: `YYYY-MM-DD HH:MM:SS - LEVEL - message`
pub fn format_line(level: LogLevel, message: &str) -> String {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    format!("{} - {} - {}", timestamp, level.as_str(), message)
}

/// Print a log message; errors go to stderr, everything else to stdout
pub fn log_message(level: LogLevel, message: &str) {
    let line = format_line(level, message);
    match level {
        LogLevel::Error => eprintln!("{line}"),
        _ => println!("{line}"),
    }
}

/// Log an info message
pub fn log_info(message: &str) {
    log_message(LogLevel::Info, message);
}

/// Log a warning message
pub fn log_warning(message: &str) {
    log_message(LogLevel::Warning, message);
}

/// Log an error message
pub fn log_error(message: &str) {
    log_message(LogLevel::Error, message);
}
