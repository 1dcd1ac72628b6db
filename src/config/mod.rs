use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    /// Default filter for diagnostics; `HOLICAL_LOG` wins when set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Make `resolve` hide inherited rows as if `--own-only` were passed.
    #[serde(default)]
    pub own_only: bool,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}
fn default_separator_char() -> String {
    "-".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            log_level: default_log_level(),
            own_only: false,
            separator_char: default_separator_char(),
        }
    }
}

impl Config {
    /// `~/.holical`, or `%APPDATA%\holical` on Windows.
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("holical")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".holical")
        }
    }

    pub fn config_file() -> PathBuf {
        Self::config_dir().join("holical.conf")
    }

    pub fn database_file() -> PathBuf {
        Self::config_dir().join("holical.sqlite")
    }

    /// Load the configuration file, or defaults if there is none yet.
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;
        let mut cfg: Config = serde_yaml::from_str(&content)?;
        cfg.database = expand_tilde(&cfg.database).to_string_lossy().to_string();
        if cfg.separator_char.is_empty() {
            cfg.separator_char = default_separator_char();
        }
        Ok(cfg)
    }

    /// Create the config directory, the config file (skipped in test mode)
    /// and an empty database file. Returns the database path.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();
        let db_path = match custom_db {
            Some(name) => {
                let p = expand_tilde(&name);
                if p.is_absolute() { p } else { dir.join(p) }
            }
            None => Self::database_file(),
        };

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        if !is_test {
            fs::create_dir_all(&dir)?;
            let config = Config {
                database: db_path.to_string_lossy().to_string(),
                ..Config::default()
            };
            let yaml = serde_yaml::to_string(&config)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {}", Self::config_file().display());
        }

        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        Ok(db_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let cfg = Config::load_from(Path::new("/nonexistent/holical.conf")).unwrap();
        assert_eq!(cfg.log_level, "warn");
        assert!(!cfg.own_only);
        assert_eq!(cfg.separator_char, "-");
    }

    #[test]
    fn omitted_fields_fall_back_to_defaults() {
        let path = std::env::temp_dir().join("holical_cfg_defaults.conf");
        fs::write(&path, "database: /tmp/x.sqlite\n").unwrap();

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.database, "/tmp/x.sqlite");
        assert_eq!(cfg.log_level, "warn");
        assert_eq!(cfg.separator_char, "-");

        fs::remove_file(&path).ok();
    }

    #[test]
    fn broken_yaml_is_a_config_error() {
        let path = std::env::temp_dir().join("holical_cfg_broken.conf");
        fs::write(&path, "database: [unterminated\n").unwrap();

        assert!(matches!(Config::load_from(&path), Err(AppError::Config(_))));

        fs::remove_file(&path).ok();
    }
}
