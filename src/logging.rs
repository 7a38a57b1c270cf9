//! File logging for the dashboard. The terminal belongs to the UI, so log
//! records go to a file instead of stderr.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

use crate::config::LoggingConfig;

/// Optional log4rs file that replaces the built-in configuration.
pub const LOG4RS_FILE: &str = "config/log4rs.yaml";

const PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} {l:<5} {t} - {m}{n}";

/// Installs the global logger.
///
/// `config/log4rs.yaml` under `root` wins when present; otherwise records at
/// `logging.level` and above are appended to `logging.file`.
pub fn init(root: &Path, logging: &LoggingConfig) -> Result<()> {
    let custom = root.join(LOG4RS_FILE);
    if custom.exists() {
        log4rs::init_file(&custom, Default::default())
            .with_context(|| format!("failed to load {}", custom.display()))?;
        return Ok(());
    }

    let config = file_config(root, logging)?;
    log4rs::init_config(config).context("failed to install logger")?;
    Ok(())
}

/// Builds the default configuration: one file appender feeding the root logger.
pub fn file_config(root: &Path, logging: &LoggingConfig) -> Result<Config> {
    let path = root.join(&logging.file);
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create log dir: {}", dir.display()))?;
    }
    let appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build(&path)
        .with_context(|| format!("failed to open log file: {}", path.display()))?;

    Config::builder()
        .appender(Appender::builder().build("file", Box::new(appender)))
        .build(Root::builder().appender("file").build(logging.level_filter()))
        .context("invalid logging configuration")
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use log::LevelFilter;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn file_config_creates_log_directory() {
        let dir = tempdir().unwrap();
        let logging = LoggingConfig {
            level: String::from("debug"),
            file: PathBuf::from("logs/nested/voicecraft.log"),
        };

        let config = file_config(dir.path(), &logging).unwrap();

        assert!(dir.path().join("logs/nested/voicecraft.log").exists());
        assert_eq!(config.root().level(), LevelFilter::Debug);
        assert_eq!(config.appenders().len(), 1);
    }
}
