use crate::errors::{AppError, AppResult};
use crate::utils::path::resolve_db_path;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

pub mod migrate; // use submodule at src/config/migrate.rs

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    /// Identity the CLI acts as (matched against `employees.user_id`).
    #[serde(default = "default_user")]
    pub user: String,
    /// Roles of that identity ("HR Manager", "System Manager", ...).
    #[serde(default = "default_roles")]
    pub roles: Vec<String>,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
}

fn default_user() -> String {
    "Administrator".to_string()
}
fn default_roles() -> Vec<String> {
    vec!["System Manager".to_string()]
}
fn default_separator_char() -> String {
    "-".to_string()
}

impl Default for Config {
    fn default() -> Self {
        let db_path = Self::database_file();
        Self {
            database: db_path.to_string_lossy().to_string(),
            user: default_user(),
            roles: default_roles(),
            separator_char: default_separator_char(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = std::env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rpayclock")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".rpayclock")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rpayclock.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rpayclock.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if path.exists() {
            let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
            serde_yaml::from_str(&content).map_err(|e| AppError::Config(e.to_string()))
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> AppResult<()> {
        let yaml = serde_yaml::to_string(self).map_err(|_| AppError::ConfigSave)?;
        let mut file = fs::File::create(Self::config_file())?;
        file.write_all(yaml.as_bytes())?;
        Ok(())
    }

    /// Initialize configuration and database files.
    /// Returns the database path that was set up.
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> AppResult<String> {
        let dir = Self::config_dir();

        // DB name: user provided or default
        let db_path = match custom_name {
            Some(name) => resolve_db_path(&name, &dir),
            None => dir.join("rpayclock.sqlite"),
        };

        // Write config file
        if !is_test {
            fs::create_dir_all(&dir)?;
            let config = Config {
                database: db_path.to_string_lossy().to_string(),
                ..Config::default()
            };
            config.save()?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        // Create empty DB file if not exists
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        Ok(db_path.to_string_lossy().to_string())
    }

    /// Names of the keys missing from the config file on disk.
    pub fn missing_fields() -> io::Result<Vec<String>> {
        let path = Self::config_file();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&path)?;
        let value: serde_yaml::Value = serde_yaml::from_str(&content)
            .map_err(|e| io::Error::other(format!("invalid YAML: {}", e)))?;

        let Some(map) = value.as_mapping() else {
            return Ok(vec!["database".into(), "user".into(), "roles".into()]);
        };

        Ok(["database", "user", "roles", "separator_char"]
            .iter()
            .filter(|k| !map.contains_key(serde_yaml::Value::String(k.to_string())))
            .map(|k| k.to_string())
            .collect())
    }
}
