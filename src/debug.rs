use parking_lot::Mutex;
/// Debug logging for clipsense
///
/// Controlled by DEBUG_LEVEL environment variable:
/// - 0 or unset: No debugging
/// - 1: Errors only
/// - 2: Info level (winning classifications)
/// - 3: Debug level (every detector vote)
/// - 4: Trace level (abstentions, stage-by-stage code scores)
///
/// All output goes to /tmp/clipsense_debug.log on Unix/macOS,
/// or %TEMP%\clipsense_debug.log on Windows, so it never mixes with the
/// CLI's stdout.
///
/// `init_log_bridge` additionally routes `log` crate records into the same
/// file, mirrored to stderr when `RUST_LOG` is set.
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::str::FromStr;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Debug level configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DebugLevel {
    Off = 0,
    Error = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl DebugLevel {
    fn from_env() -> Self {
        match std::env::var("DEBUG_LEVEL") {
            Ok(val) => Self::from_number(&val),
            Err(_) => DebugLevel::Off,
        }
    }

    fn from_number(val: &str) -> Self {
        val.trim().parse::<u8>().map_or(DebugLevel::Off, Self::from_u8)
    }

    fn from_u8(raw: u8) -> Self {
        match raw {
            1 => DebugLevel::Error,
            2 => DebugLevel::Info,
            3 => DebugLevel::Debug,
            4 => DebugLevel::Trace,
            _ => DebugLevel::Off,
        }
    }

    fn label(self) -> &'static str {
        match self {
            DebugLevel::Off => "OFF  ",
            DebugLevel::Error => "ERROR",
            DebugLevel::Info => "INFO ",
            DebugLevel::Debug => "DEBUG",
            DebugLevel::Trace => "TRACE",
        }
    }
}

impl From<log::Level> for DebugLevel {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => DebugLevel::Error,
            log::Level::Warn | log::Level::Info => DebugLevel::Info,
            log::Level::Debug => DebugLevel::Debug,
            log::Level::Trace => DebugLevel::Trace,
        }
    }
}

/// Path of the debug log file.
pub fn log_path() -> std::path::PathBuf {
    #[cfg(unix)]
    {
        std::path::PathBuf::from("/tmp/clipsense_debug.log")
    }
    #[cfg(not(unix))]
    {
        std::env::temp_dir().join("clipsense_debug.log")
    }
}

/// Global debug logger
struct DebugLogger {
    level: DebugLevel,
    file: Option<std::fs::File>,
    open_attempted: bool,
}

impl DebugLogger {
    fn new() -> Self {
        let mut logger = DebugLogger {
            level: current_level(),
            file: None,
            open_attempted: false,
        };
        if logger.level != DebugLevel::Off {
            logger.ensure_open();
        }
        logger
    }

    /// Open (and truncate) the log file once per process.
    fn ensure_open(&mut self) {
        if self.open_attempted {
            return;
        }
        self.open_attempted = true;
        // Silently fail if the log file can't be opened; logging must never
        // affect classification output.
        if let Ok(f) = OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(log_path())
        {
            self.file = Some(f);
            self.write_raw(&format!(
                "\n{}\nclipsense debug session started at {} (level={:?})\n{}\n",
                "=".repeat(80),
                get_timestamp(),
                self.level,
                "=".repeat(80)
            ));
        }
    }

    fn write_raw(&mut self, msg: &str) {
        if let Some(ref mut file) = self.file {
            let _ = file.write_all(msg.as_bytes());
            let _ = file.flush();
        }
    }

    fn write_line(&mut self, level: DebugLevel, category: &str, msg: &str) {
        if level == DebugLevel::Off {
            return;
        }
        self.write_raw(&format!(
            "[{}] [{}] [{}] {}\n",
            get_timestamp(),
            level.label(),
            category,
            msg
        ));
    }

    fn log(&mut self, level: DebugLevel, category: &str, msg: &str) {
        if level <= self.level {
            self.write_line(level, category, msg);
        }
    }
}

static LOGGER: OnceLock<Mutex<DebugLogger>> = OnceLock::new();

const LEVEL_UNSET: u8 = u8::MAX;

/// `DEBUG_LEVEL`, read once. Checked before the logger mutex so disabled
/// logging costs one atomic load.
static LEVEL: AtomicU8 = AtomicU8::new(LEVEL_UNSET);

fn current_level() -> DebugLevel {
    match LEVEL.load(Ordering::Relaxed) {
        LEVEL_UNSET => {
            let level = DebugLevel::from_env();
            LEVEL.store(level as u8, Ordering::Relaxed);
            level
        }
        raw => DebugLevel::from_u8(raw),
    }
}

fn get_logger() -> &'static Mutex<DebugLogger> {
    LOGGER.get_or_init(|| Mutex::new(DebugLogger::new()))
}

fn get_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

/// Check if debugging is enabled at given level
pub fn is_enabled(level: DebugLevel) -> bool {
    level != DebugLevel::Off && level <= current_level()
}

/// Log a message at specified level
pub fn log(level: DebugLevel, category: &str, msg: &str) {
    if !is_enabled(level) {
        return;
    }
    let mut logger = get_logger().lock();
    logger.log(level, category, msg);
}

/// Log formatted message
pub fn logf(level: DebugLevel, category: &str, args: fmt::Arguments) {
    if is_enabled(level) {
        log(level, category, &format!("{}", args));
    }
}

// ---------------------------------------------------------------------------
// `log` crate bridge
// ---------------------------------------------------------------------------

/// Set once the log level came from the CLI flag or `RUST_LOG`.
static LEVEL_OVERRIDDEN: AtomicBool = AtomicBool::new(false);

struct LogBridge {
    mirror_stderr: bool,
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let msg = record.args().to_string();
        get_logger()
            .lock()
            .write_line(record.level().into(), record.target(), &msg);
        if self.mirror_stderr {
            eprintln!("[{}] {}: {}", record.level(), record.target(), msg);
        }
    }

    fn flush(&self) {}
}

static BRIDGE: OnceLock<LogBridge> = OnceLock::new();

/// Route `log` records to the debug log file.
///
/// Level precedence: `cli_level`, then `RUST_LOG`, then `info` until
/// [`apply_config_log_level`] supplies the configured level. Calling this
/// more than once keeps the first logger.
pub fn init_log_bridge(cli_level: Option<log::LevelFilter>) {
    let env_level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|v| log::LevelFilter::from_str(v.trim()).ok());
    let level = cli_level.or(env_level);
    LEVEL_OVERRIDDEN.store(level.is_some(), Ordering::Relaxed);

    let bridge = BRIDGE.get_or_init(|| LogBridge {
        mirror_stderr: std::env::var_os("RUST_LOG").is_some(),
    });
    get_logger().lock().ensure_open();
    if log::set_logger(bridge).is_ok() {
        log::set_max_level(level.unwrap_or(log::LevelFilter::Info));
    }
}

/// Apply the level from the config file unless the CLI or `RUST_LOG` set one.
pub fn apply_config_log_level(level: log::LevelFilter) {
    if !LEVEL_OVERRIDDEN.load(Ordering::Relaxed) {
        log::set_max_level(level);
    }
}

// Convenience macros for logging
#[macro_export]
macro_rules! debug_error {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Error, $category, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_info {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Info, $category, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_log {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Debug, $category, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_trace {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Trace, $category, format_args!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_number() {
        assert_eq!(DebugLevel::from_number("0"), DebugLevel::Off);
        assert_eq!(DebugLevel::from_number(" 3 "), DebugLevel::Debug);
        assert_eq!(DebugLevel::from_number("9"), DebugLevel::Off);
        assert_eq!(DebugLevel::from_number("verbose"), DebugLevel::Off);
    }

    #[test]
    fn test_log_level_mapping() {
        assert_eq!(DebugLevel::from(log::Level::Warn), DebugLevel::Info);
        assert_eq!(DebugLevel::from(log::Level::Trace), DebugLevel::Trace);
    }

    #[test]
    fn test_level_from_u8_round_trip() {
        for level in [
            DebugLevel::Off,
            DebugLevel::Error,
            DebugLevel::Info,
            DebugLevel::Debug,
            DebugLevel::Trace,
        ] {
            assert_eq!(DebugLevel::from_u8(level as u8), level);
        }
        assert_eq!(DebugLevel::from_u8(LEVEL_UNSET), DebugLevel::Off);
    }

    #[test]
    fn test_is_enabled_reads_cached_level() {
        let level = current_level();
        assert_eq!(LEVEL.load(Ordering::Relaxed), level as u8);
        assert!(!is_enabled(DebugLevel::Off));
        assert_eq!(is_enabled(DebugLevel::Error), level >= DebugLevel::Error);
        assert_eq!(is_enabled(DebugLevel::Trace), level == DebugLevel::Trace);
    }

    #[test]
    fn test_levels_are_ordered() {
        assert!(DebugLevel::Error < DebugLevel::Info);
        assert!(DebugLevel::Debug < DebugLevel::Trace);
    }
}
