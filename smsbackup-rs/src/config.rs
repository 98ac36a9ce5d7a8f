use crate::backup::WriterOptions;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub backup: BackupConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackupConfig {
    /// Name written into the `File Created By` comment
    pub generator: String,
    /// Largest attachment accepted for MMS export, in bytes (unset = no limit)
    pub attachment_limit: Option<usize>,
    /// Directory holding attachment part files
    pub attachment_dir: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| crate::error::BackupError::Config(e.to_string()))?;

        toml::from_str(&content)
            .map_err(|e| crate::error::BackupError::Config(e.to_string()))
    }

    pub fn default() -> Self {
        Self {
            backup: BackupConfig {
                generator: "Signal".to_string(),
                attachment_limit: None,
                attachment_dir: "./parts".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
            },
        }
    }
}

impl BackupConfig {
    pub fn writer_options(&self) -> WriterOptions {
        WriterOptions {
            generator: self.generator.clone(),
            attachment_limit: self.attachment_limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[backup]
generator = "smsbackup"
attachment_limit = 1000000
attachment_dir = "/var/lib/parts"

[logging]
level = "debug"
format = "json"
"#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.backup.generator, "smsbackup");
        assert_eq!(config.backup.attachment_limit, Some(1_000_000));
        assert_eq!(config.logging.format, "json");

        let options = config.backup.writer_options();
        assert_eq!(options.generator, "smsbackup");
        assert_eq!(options.attachment_limit, Some(1_000_000));
    }

    #[test]
    fn test_attachment_limit_is_optional() {
        let config: Config = toml::from_str(
            r#"
[backup]
generator = "Signal"
attachment_dir = "parts"

[logging]
level = "info"
format = "pretty"
"#,
        )
        .unwrap();

        assert_eq!(config.backup.attachment_limit, None);
    }

    #[test]
    fn test_missing_file() {
        let result = Config::from_file("/nonexistent/smsbackup.toml");
        assert!(matches!(result, Err(crate::error::BackupError::Config(_))));
    }
}
