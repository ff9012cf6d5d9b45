use crate::errors::{AppError, AppResult};
use crate::ui::messages::warning;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub mod migrate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_block_type")]
    pub default_block_type: String,
    #[serde(default = "default_export_format")]
    pub default_export_format: String,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
    #[serde(default = "default_show_weekday")]
    pub show_weekday: String,
    #[serde(default = "default_pdf_title")]
    pub pdf_title: String,
}

pub(crate) fn default_block_type() -> String {
    "activity".to_string()
}
pub(crate) fn default_export_format() -> String {
    "pdf".to_string()
}
pub(crate) fn default_separator_char() -> String {
    "-".to_string()
}
pub(crate) fn default_show_weekday() -> String {
    "None".to_string()
}
pub(crate) fn default_pdf_title() -> String {
    "Itinerary".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self::with_database(Self::database_file())
    }
}

impl Config {
    fn with_database(db_path: PathBuf) -> Self {
        Self {
            database: db_path.to_string_lossy().to_string(),
            default_block_type: default_block_type(),
            default_export_format: default_export_format(),
            separator_char: default_separator_char(),
            show_weekday: default_show_weekday(),
            pdf_title: default_pdf_title(),
        }
    }

    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("ritinerary")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".ritinerary")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("ritinerary.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("ritinerary.sqlite")
    }

    /// Load configuration from file, or return defaults if not found.
    /// A file that cannot be read or parsed also falls back to defaults,
    /// with a warning.
    pub fn load() -> Self {
        match Self::load_from(&Self::config_file()) {
            Ok(Some(cfg)) => cfg,
            Ok(None) => Config::default(),
            Err(e) => {
                warning(format!("{} ({}), using defaults", AppError::ConfigLoad, e));
                Config::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> AppResult<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)?;
        Ok(Some(serde_yaml::from_str(&content)?))
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        let yaml = serde_yaml::to_string(self).map_err(|_| AppError::ConfigSave)?;
        let mut file = fs::File::create(path)?;
        file.write_all(yaml.as_bytes())?;
        Ok(())
    }

    /// Resolves the database path given on the command line: absolute paths
    /// are kept, bare names land in the config directory.
    pub fn resolve_db_path(name: &str) -> PathBuf {
        let p = Path::new(name);
        if p.is_absolute() || p.components().count() > 1 {
            p.to_path_buf()
        } else {
            Self::config_dir().join(p)
        }
    }

    /// Initialize configuration and database files.
    /// Returns the configuration that was written (or would have been, in
    /// test mode).
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> AppResult<Self> {
        let db_path = match custom_name {
            Some(name) => Self::resolve_db_path(&name),
            None => Self::database_file(),
        };

        if let Some(parent) = db_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let config = Self::with_database(db_path.clone());

        if !is_test {
            fs::create_dir_all(Self::config_dir())?;
            config.save_to(&Self::config_file())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_optional_keys_take_defaults() {
        let cfg: Config = serde_yaml::from_str("database: /tmp/x.sqlite\n").unwrap();
        assert_eq!(cfg.default_block_type, "activity");
        assert_eq!(cfg.default_export_format, "pdf");
        assert_eq!(cfg.separator_char, "-");
        assert_eq!(cfg.show_weekday, "None");
        assert_eq!(cfg.pdf_title, "Itinerary");
    }

    #[test]
    fn relative_db_names_go_to_config_dir() {
        assert_eq!(
            Config::resolve_db_path("trip.sqlite"),
            Config::config_dir().join("trip.sqlite")
        );
        assert_eq!(
            Config::resolve_db_path("/tmp/trip.sqlite"),
            PathBuf::from("/tmp/trip.sqlite")
        );
    }
}
