use crate::core::ledger::maintenance::{
    DEFAULT_DUE_THRESHOLD_KM, DEFAULT_SERVICE_INTERVAL_KM, DEFAULT_URGENT_THRESHOLD_KM,
};
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Keys written by `init`; `config --check` reports the ones missing from
/// an older file.
pub const KNOWN_KEYS: [&str; 6] = [
    "database",
    "service_interval_km",
    "due_threshold_km",
    "urgent_threshold_km",
    "access_password",
    "separator_char",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_service_interval")]
    pub service_interval_km: i64,
    #[serde(default = "default_due_threshold")]
    pub due_threshold_km: i64,
    #[serde(default = "default_urgent_threshold")]
    pub urgent_threshold_km: i64,
    /// Shared password for the optional access gate. Not a security
    /// boundary: it is stored in clear text next to the database.
    #[serde(default)]
    pub access_password: Option<String>,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_service_interval() -> i64 {
    DEFAULT_SERVICE_INTERVAL_KM
}
fn default_due_threshold() -> i64 {
    DEFAULT_DUE_THRESHOLD_KM
}
fn default_urgent_threshold() -> i64 {
    DEFAULT_URGENT_THRESHOLD_KM
}
fn default_separator_char() -> String {
    "-".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            service_interval_km: default_service_interval(),
            due_threshold_km: default_due_threshold(),
            urgent_threshold_km: default_urgent_threshold(),
            access_password: None,
            separator_char: default_separator_char(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("fleetlog")
        } else {
            let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
            home.join(".fleetlog")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("fleetlog.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("fleetlog.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)?;
        let cfg: Config = serde_yaml::from_str(&content).map_err(|e| {
            AppError::Config(format!("cannot parse {}: {}", path.display(), e))
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.service_interval_km <= 0 {
            return Err(AppError::Config(
                "service_interval_km must be greater than zero".into(),
            ));
        }
        if self.urgent_threshold_km > self.due_threshold_km {
            return Err(AppError::Config(format!(
                "urgent_threshold_km ({}) cannot exceed due_threshold_km ({})",
                self.urgent_threshold_km, self.due_threshold_km
            )));
        }
        Ok(())
    }

    /// Keys from `KNOWN_KEYS` that are absent in the given YAML document.
    pub fn missing_keys(yaml: &str) -> AppResult<Vec<&'static str>> {
        let value: serde_yaml::Value = serde_yaml::from_str(yaml)?;
        let map = value
            .as_mapping()
            .ok_or_else(|| AppError::Config("configuration is not a YAML mapping".into()))?;

        Ok(KNOWN_KEYS
            .iter()
            .copied()
            .filter(|k| !map.contains_key(serde_yaml::Value::String(k.to_string())))
            .collect())
    }

    /// Initialize configuration and database files.
    ///
    /// In test mode the configuration file is not written, so the user's
    /// real config stays untouched.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();
        if !is_test {
            fs::create_dir_all(&dir)?;
        }

        let db_path = match custom_db {
            Some(name) => {
                let p = Path::new(&name);
                if p.is_absolute() {
                    p.to_path_buf()
                } else {
                    dir.join(p)
                }
            }
            None => Self::database_file(),
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        if !is_test {
            let yaml = serde_yaml::to_string(&config)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {}", Self::config_file().display());
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        Ok(config)
    }
}
