use chrono::Local;
use log::{Level, LevelFilter, Metadata, Record};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

/// Appends timestamped records to a file.
pub struct Logger {
    file: Mutex<std::fs::File>,
    level: Level,
}

impl Logger {
    pub fn new(log_file: &Path, level: Level) -> std::io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_file)?;

        Ok(Self {
            file: Mutex::new(file),
            level,
        })
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Ok(mut file) = self.file.lock() {
            let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
            // A failed log write has nowhere to be reported.
            let _ = writeln!(
                file,
                "{} [{}] {}: {}",
                timestamp,
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

pub fn level_for(debug: bool) -> Level {
    if debug {
        Level::Debug
    } else {
        Level::Info
    }
}

/// Installs the file logger when `log_file` is set, `env_logger` otherwise.
pub fn init(debug: bool, log_file: Option<&Path>) -> anyhow::Result<()> {
    let level = level_for(debug);
    match log_file {
        Some(path) => {
            let logger = Logger::new(path, level)?;
            log::set_boxed_logger(Box::new(logger))?;
            log::set_max_level(level.to_level_filter());
        }
        None => {
            env_logger::Builder::new()
                .filter_level(LevelFilter::Warn)
                .filter_module("tro_dashboard", level.to_level_filter())
                .parse_default_env()
                .try_init()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Log;
    use std::fs;

    #[test]
    fn test_file_logger_respects_level() {
        let path = std::env::temp_dir().join(format!("tro-dashboard-log-{}.log", std::process::id()));
        let logger = Logger::new(&path, Level::Info).unwrap();

        logger.log(
            &Record::builder()
                .level(Level::Info)
                .target("tro_dashboard::dashboard")
                .args(format_args!("token info loaded"))
                .build(),
        );
        logger.log(
            &Record::builder()
                .level(Level::Debug)
                .target("tro_dashboard::dashboard")
                .args(format_args!("raw body"))
                .build(),
        );
        logger.flush();

        let contents = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert!(contents.contains("[INFO] tro_dashboard::dashboard: token info loaded"));
        assert!(!contents.contains("raw body"));
    }

    #[test]
    fn test_level_for_debug_flag() {
        assert_eq!(level_for(true), Level::Debug);
        assert_eq!(level_for(false), Level::Info);
    }
}
