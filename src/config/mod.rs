use crate::errors::{AppError, AppResult};
use crate::models::Category;
use crate::utils::path::expand_tilde;
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

pub mod migrate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    /// Signed-in identity; empty means signed out.
    #[serde(default)]
    pub user: String,
    #[serde(default = "default_category")]
    pub default_category: String,
    #[serde(default = "default_week_start")]
    pub week_start: String,
    #[serde(default = "default_recent_sessions")]
    pub recent_sessions: usize,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_category() -> String {
    Category::default().label().to_string()
}
fn default_week_start() -> String {
    "sunday".to_string()
}
fn default_recent_sessions() -> usize {
    3
}
fn default_separator_char() -> String {
    "-".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self::with_database(default_database())
    }
}

impl Config {
    fn with_database(database: String) -> Self {
        Self {
            database,
            user: String::new(),
            default_category: default_category(),
            week_start: default_week_start(),
            recent_sessions: default_recent_sessions(),
            separator_char: default_separator_char(),
        }
    }

    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("servicelog")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".servicelog")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("servicelog.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("servicelog.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if path.exists() {
            let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
            Self::from_yaml(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_yaml(content: &str) -> AppResult<Self> {
        let mut cfg: Config =
            serde_yaml::from_str(content).map_err(|e| AppError::Config(e.to_string()))?;
        cfg.database = expand_tilde(&cfg.database).to_string_lossy().to_string();
        Ok(cfg)
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Week start as a weekday: "sunday" or "monday".
    pub fn week_start_day(&self) -> AppResult<Weekday> {
        match self.week_start.trim().to_lowercase().as_str() {
            "sunday" | "sun" => Ok(Weekday::Sun),
            "monday" | "mon" => Ok(Weekday::Mon),
            other => Err(AppError::Config(format!(
                "week_start must be 'sunday' or 'monday', got '{other}'"
            ))),
        }
    }

    pub fn default_category(&self) -> AppResult<Category> {
        Category::from_code(&self.default_category).ok_or_else(|| {
            AppError::Config(format!(
                "default_category '{}' is not a known category",
                self.default_category
            ))
        })
    }

    /// Messages for every key whose value cannot be used.
    pub fn invalid_values(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if let Err(e) = self.week_start_day() {
            problems.push(e.to_string());
        }
        if let Err(e) = self.default_category() {
            problems.push(e.to_string());
        }
        if self.separator_char.is_empty() {
            problems.push("separator_char must not be empty".to_string());
        }
        problems
    }

    pub fn separator(&self) -> char {
        self.separator_char.chars().next().unwrap_or('-')
    }

    /// Initialize configuration and database location.
    /// Returns the database path that was configured.
    pub fn init_all(custom_name: Option<String>, user: Option<String>, is_test: bool) -> AppResult<String> {
        let dir = Self::config_dir();
        if !is_test {
            fs::create_dir_all(&dir)?;
        }

        // DB name: user provided or default
        let db_path = match custom_name {
            Some(name) => {
                let p = expand_tilde(&name);
                if p.is_absolute() { p } else { dir.join(p) }
            }
            None => dir.join("servicelog.sqlite"),
        };

        let mut config = Self::with_database(db_path.to_string_lossy().to_string());
        if let Some(u) = user {
            config.user = u;
        }

        // Write config file
        if !is_test {
            let yaml = config.to_yaml()?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        Ok(config.database)
    }
}
