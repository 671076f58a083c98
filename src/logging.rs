//! Logging setup and serial session logs
//!
//! Two concerns live here: initializing the global tracing subscriber for
//! the tool itself, and appending raw serial exchanges to per-port session
//! files so a console run can be replayed afterwards.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use chrono::Local;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{ErrorExt, Result, SerConError};

/// Initialize the global logger
///
/// Console mode writes to stdout; file mode rotates daily under `log_dir`.
/// A `RUST_LOG` environment variable takes precedence over `level`.
///
/// # Arguments
///
/// * `log_dir` - The directory where log files will be stored
/// * `service_name` - Used as the log file name stem
/// * `level` - The log level (trace, debug, info, warn, error)
/// * `console` - Whether to log to console instead of a file
pub fn init_logger(
    log_dir: impl AsRef<Path>,
    service_name: &str,
    level: &str,
    console: bool,
) -> Result<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .map_err(|e| SerConError::config(format!("Invalid log level '{}': {}", level, e)))?,
    };

    if console {
        fmt()
            .with_env_filter(env_filter)
            .try_init()
            .map_err(|e| SerConError::config(format!("Failed to initialize logging: {}", e)))?;
    } else {
        std::fs::create_dir_all(&log_dir).io_error("Failed to create log directory")?;

        let file_appender = RollingFileAppender::new(
            Rotation::DAILY,
            log_dir,
            format!("{}.log", service_name),
        );

        fmt()
            .with_env_filter(env_filter)
            .with_writer(file_appender)
            .with_ansi(false)
            .try_init()
            .map_err(|e| SerConError::config(format!("Failed to initialize logging: {}", e)))?;
    }

    tracing::info!("Logger initialized for {}", service_name);
    Ok(())
}

/// Initialize logging for tests
pub fn init_test_logging() {
    let _ = fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init();
}

/// Log levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Convert LogLevel to string
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = SerConError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(SerConError::config(format!("Unknown log level: {}", s))),
        }
    }
}

/// Log one serial exchange to the per-port session file
///
/// Lines are appended to `<log_dir>/sessions/<name>/<date>.log` as
/// `[timestamp][direction] payload`, where `<name>` is the port
/// identifier flattened to a single path component (`/dev/ttyUSB0`
/// logs under `sessions/_dev_ttyUSB0/`). The payload is rendered as
/// text, lossily for bytes that are not valid UTF-8.
///
/// # Arguments
///
/// * `log_dir` - The directory where log files will be stored
/// * `port_id` - Identifier of the port the exchange happened on
/// * `direction` - The direction of the exchange ("send" or "receive")
/// * `payload` - The raw bytes exchanged
pub fn log_message(
    log_dir: impl AsRef<Path>,
    port_id: &str,
    direction: &str,
    payload: &[u8],
) -> Result<()> {
    let session_dir = log_dir
        .as_ref()
        .join("sessions")
        .join(port_dir_name(port_id));
    std::fs::create_dir_all(&session_dir).io_error("Failed to create session log directory")?;

    let date = Local::now().format("%Y-%m-%d").to_string();
    let filepath = session_dir.join(format!("{}.log", date));

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(filepath)
        .io_error("Failed to open session log")?;

    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S.%3f").to_string();
    writeln!(
        file,
        "[{}][{}] {}",
        timestamp,
        direction,
        String::from_utf8_lossy(payload)
    )?;

    Ok(())
}

// Port identifiers are device paths on most hosts (/dev/ttyUSB0).
// Flattened to one directory name so the session tree stays under
// sessions/.
fn port_dir_name(port_id: &str) -> String {
    let name: String = port_id
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | ':') { '_' } else { c })
        .collect();
    if name.is_empty() || name.bytes().all(|b| b == b'.') {
        "unnamed".to_string()
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_log_level_from_str() {
        assert_eq!("info".parse::<LogLevel>().unwrap(), LogLevel::Info);
        assert_eq!("DEBUG".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert_eq!("Warn".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert!("verbose".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_log_level_as_str() {
        assert_eq!(LogLevel::Trace.as_str(), "trace");
        assert_eq!(LogLevel::Error.as_str(), "error");
    }

    #[test]
    fn test_log_message() {
        let temp_dir = TempDir::new().unwrap();
        log_message(temp_dir.path(), "ttyUSB0", "send", b"errlog 0:DB").unwrap();
        log_message(temp_dir.path(), "ttyUSB0", "receive", b"OK 00000000").unwrap();

        let session_dir = temp_dir.path().join("sessions").join("ttyUSB0");
        let entries: Vec<_> = std::fs::read_dir(&session_dir).unwrap().collect();
        assert_eq!(entries.len(), 1);

        let content =
            std::fs::read_to_string(entries[0].as_ref().unwrap().path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("[send] errlog 0:DB"));
        assert!(lines[1].contains("[receive] OK 00000000"));
    }

    #[test]
    fn test_port_dir_name() {
        assert_eq!(port_dir_name("COM3"), "COM3");
        assert_eq!(port_dir_name("ttyUSB0"), "ttyUSB0");
        assert_eq!(port_dir_name("/dev/ttyUSB0"), "_dev_ttyUSB0");
        assert_eq!(port_dir_name("..\\..\\escape"), ".._.._escape");
        assert_eq!(port_dir_name(".."), "unnamed");
        assert_eq!(port_dir_name(""), "unnamed");
    }

    #[test]
    fn test_log_message_path_shaped_port_id() {
        let temp_dir = TempDir::new().unwrap();
        let log_dir = temp_dir.path().join("logs");
        log_message(&log_dir, "/dev/ttyUSB0", "send", b"errlog 0:DB").unwrap();

        // The absolute identifier must not redirect the session tree
        let session_dir = log_dir.join("sessions").join("_dev_ttyUSB0");
        let entries: Vec<_> = std::fs::read_dir(&session_dir).unwrap().collect();
        assert_eq!(entries.len(), 1);

        let content =
            std::fs::read_to_string(entries[0].as_ref().unwrap().path()).unwrap();
        assert!(content.contains("[send] errlog 0:DB"));
    }

    #[test]
    fn test_log_message_traversal_stays_under_sessions() {
        let temp_dir = TempDir::new().unwrap();
        let log_dir = temp_dir.path().join("logs");
        log_message(&log_dir, "../../escape", "send", b"x").unwrap();

        assert!(log_dir.join("sessions").join(".._.._escape").is_dir());
        assert!(!log_dir.join("escape").exists());
        assert!(!temp_dir.path().join("escape").exists());
    }

    #[test]
    fn test_log_message_non_utf8_payload() {
        let temp_dir = TempDir::new().unwrap();
        log_message(temp_dir.path(), "COM3", "receive", &[0xFF, 0xFE, 0x41]).unwrap();

        let session_dir = temp_dir.path().join("sessions").join("COM3");
        let entry = std::fs::read_dir(&session_dir).unwrap().next().unwrap().unwrap();
        let content = std::fs::read_to_string(entry.path()).unwrap();
        assert!(content.contains('A'));
    }

    #[test]
    fn test_separate_ports_get_separate_files() {
        let temp_dir = TempDir::new().unwrap();
        log_message(temp_dir.path(), "ttyUSB0", "send", b"a").unwrap();
        log_message(temp_dir.path(), "ttyUSB1", "send", b"b").unwrap();

        assert!(temp_dir.path().join("sessions").join("ttyUSB0").is_dir());
        assert!(temp_dir.path().join("sessions").join("ttyUSB1").is_dir());
    }
}
