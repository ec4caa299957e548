use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub type SettingsResult<T> = Result<T, SettingsError>;

#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    InvalidRatio(f64),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "I/O error: {}", e),
            SettingsError::Parse(e) => write!(f, "Malformed settings file: {}", e),
            SettingsError::InvalidRatio(r) => {
                write!(f, "train_ratio must be between 0.0 and 1.0, got {}", r)
            }
        }
    }
}

impl std::error::Error for SettingsError {}

impl From<std::io::Error> for SettingsError {
    fn from(error: std::io::Error) -> Self {
        SettingsError::Io(error)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(error: serde_json::Error) -> Self {
        SettingsError::Parse(error)
    }
}

/// Persistent defaults for split runs. Command-line flags take precedence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Fraction of samples assigned to the train subset
    #[serde(default = "default_train_ratio")]
    pub train_ratio: f64,

    /// Fixed shuffle seed; `None` draws from OS entropy
    #[serde(default)]
    pub seed: Option<u64>,

    /// Directory for log files; `None` logs to stdout only
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

fn default_train_ratio() -> f64 {
    0.8
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            train_ratio: default_train_ratio(),
            seed: None,
            log_dir: None,
        }
    }
}

impl Settings {
    /// `settings.json` under the platform config directory
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "yolo-split").map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load settings from `path`. A missing file yields defaults; an
    /// unreadable or malformed one is an error the caller decides about.
    pub fn load(path: &Path) -> SettingsResult<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };

        let settings: Settings = serde_json::from_str(&contents)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> SettingsResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        info!("Settings saved to: {:?}", path);
        Ok(())
    }

    pub fn validate(&self) -> SettingsResult<()> {
        if !(0.0..=1.0).contains(&self.train_ratio) {
            return Err(SettingsError::InvalidRatio(self.train_ratio));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();
        assert_eq!(settings.train_ratio, 0.8);
        assert!(settings.seed.is_none());
        assert!(settings.log_dir.is_none());
    }

    #[test]
    fn test_settings_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = Settings {
            train_ratio: 0.7,
            seed: Some(42),
            log_dir: Some(PathBuf::from("logs")),
        };

        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();

        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Settings::load(&dir.path().join("absent.json")).unwrap();
        assert_eq!(loaded, Settings::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "seed": 7 }"#).unwrap();

        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded.train_ratio, 0.8);
        assert_eq!(loaded.seed, Some(7));
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(Settings::load(&path), Err(SettingsError::Parse(_))));
    }

    #[test]
    fn test_out_of_range_ratio_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "train_ratio": 1.5 }"#).unwrap();

        assert!(matches!(
            Settings::load(&path),
            Err(SettingsError::InvalidRatio(_))
        ));
    }
}
