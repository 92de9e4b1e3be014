use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::{Level, LevelFilter, Log, Metadata, Record};

use crate::config::Config;

/// Append-only file backend for the `log` facade: timestamped plain-text
/// lines. Write failures are swallowed; a logging problem must never break
/// a launch.
struct FileLogger {
    path: PathBuf,
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Debug
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
            let _ = writeln!(file, "{timestamp} | {:5} | {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

/// Install the logging backend picked by configuration: the append-only file
/// logger when enabled, stderr via env_logger otherwise.
pub fn init(config: &Config) -> Result<()> {
    if !config.enable_log {
        env_logger::init();
        return Ok(());
    }

    if let Some(parent) = config.log_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    log::set_boxed_logger(Box::new(FileLogger {
        path: config.log_path.clone(),
    }))
    .context("logger already installed")?;
    log::set_max_level(LevelFilter::Debug);
    Ok(())
}
