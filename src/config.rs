use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::quickstack::animation::AnimationSettings;
use crate::quickstack::deposit::QuickStackOptions;
use crate::quickstack::range::{self, QuickStackRange};

pub const SETTINGS_FILE: &str = "config.yaml";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("usage: quickstack <root> [scenario-file]")]
    Usage,
    #[error("read {path} failed: {message}")]
    Read { path: PathBuf, message: String },
    #[error("parse {path} failed: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("write {path} failed: {message}")]
    Write { path: PathBuf, message: String },
}

#[derive(Debug)]
pub struct AppConfig {
    pub root: PathBuf,
    pub scenario: Option<PathBuf>,
    pub log_level: Option<log::LevelFilter>,
}

impl AppConfig {
    pub fn from_args(args: &[String]) -> Result<Self, ConfigError> {
        if args.len() < 2 {
            return Err(ConfigError::Usage);
        }
        let root = Path::new(&args[1]).to_path_buf();
        let scenario = args.get(2).map(PathBuf::from);
        let log_level = std::env::var("QUICKSTACK_LOG_LEVEL")
            .ok()
            .and_then(|value| value.trim().parse::<log::LevelFilter>().ok());
        Ok(Self {
            root,
            scenario,
            log_level,
        })
    }
}

/// User-facing settings, persisted as YAML next to the data root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub quick_stack_range: String,
    pub quick_stack_animation_enabled: bool,
    pub quick_stack_animation_item_speed: f32,
    pub quick_stack_animation_stack_speed: f32,
    pub auto_organize_enabled: bool,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quick_stack_range: range::DEFAULT_RANGE.to_string(),
            quick_stack_animation_enabled: true,
            quick_stack_animation_item_speed: 1.0,
            quick_stack_animation_stack_speed: 1.0,
            auto_organize_enabled: true,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Loads `<root>/config.yaml`, falling back to defaults when the file does not exist.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let path = root.join(SETTINGS_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(&path).map_err(|err| ConfigError::Read {
            path: path.clone(),
            message: err.to_string(),
        })?;
        Self::from_yaml(&text).map_err(|message| ConfigError::Parse { path, message })
    }

    pub fn from_yaml(text: &str) -> Result<Self, String> {
        let settings: Settings = serde_yaml::from_str(text).map_err(|err| err.to_string())?;
        Ok(settings.constrained())
    }

    pub fn save(&self, root: &Path) -> Result<(), ConfigError> {
        let path = root.join(SETTINGS_FILE);
        let text = serde_yaml::to_string(self).map_err(|err| ConfigError::Write {
            path: path.clone(),
            message: err.to_string(),
        })?;
        std::fs::write(&path, text).map_err(|err| ConfigError::Write {
            path,
            message: err.to_string(),
        })
    }

    /// Clamps speeds and normalizes the range string. Never fails.
    pub fn constrained(mut self) -> Self {
        self.quick_stack_range = range::validate_and_constrain(&self.quick_stack_range);
        let animation = self.animation();
        self.quick_stack_animation_item_speed = animation.item_speed;
        self.quick_stack_animation_stack_speed = animation.stack_speed;
        self
    }

    pub fn range(&self) -> QuickStackRange {
        QuickStackRange::from_config(&self.quick_stack_range)
    }

    pub fn animation(&self) -> AnimationSettings {
        AnimationSettings {
            item_speed: self.quick_stack_animation_item_speed,
            stack_speed: self.quick_stack_animation_stack_speed,
        }
        .constrained()
    }

    pub fn quick_stack_options(&self) -> QuickStackOptions {
        QuickStackOptions {
            range: self.range(),
            animate: self.quick_stack_animation_enabled,
            animation: self.animation(),
        }
    }

    pub fn log_level(&self) -> log::LevelFilter {
        self.log_level
            .trim()
            .parse()
            .unwrap_or(log::LevelFilter::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn from_args_requires_root() {
        assert_eq!(
            AppConfig::from_args(&args(&["quickstack"])).unwrap_err(),
            ConfigError::Usage
        );
        let config = AppConfig::from_args(&args(&["quickstack", "data", "scene.yaml"])).unwrap();
        assert_eq!(config.root, PathBuf::from("data"));
        assert_eq!(config.scenario, Some(PathBuf::from("scene.yaml")));
    }

    #[test]
    fn missing_fields_use_defaults() {
        let settings = Settings::from_yaml("quick_stack_range: Global\n").unwrap();
        assert_eq!(settings.range(), QuickStackRange::Global);
        assert!(settings.quick_stack_animation_enabled);
        assert_eq!(settings.animation(), AnimationSettings::default());
    }

    #[test]
    fn malformed_values_are_constrained_not_rejected() {
        let settings = Settings::from_yaml(concat!(
            "quick_stack_range: '40'\n",
            "quick_stack_animation_item_speed: 100.0\n",
            "quick_stack_animation_stack_speed: 0.0\n",
        ))
        .unwrap();
        assert_eq!(settings.quick_stack_range, "15");
        assert_eq!(settings.quick_stack_animation_item_speed, 4.0);
        assert_eq!(settings.quick_stack_animation_stack_speed, 0.25);
        let settings = Settings::from_yaml("quick_stack_range: everywhere\n").unwrap();
        assert_eq!(settings.range(), QuickStackRange::Tiles(5));
    }

    #[test]
    fn log_level_falls_back_to_info() {
        let mut settings = Settings::default();
        settings.log_level = "debug".to_string();
        assert_eq!(settings.log_level(), log::LevelFilter::Debug);
        settings.log_level = "chatty".to_string();
        assert_eq!(settings.log_level(), log::LevelFilter::Info);
    }

    #[test]
    fn save_then_load_round_trips() {
        let root = std::env::temp_dir()
            .join(format!("quickstack-settings-test-{}", std::process::id()));
        std::fs::create_dir_all(&root).unwrap();
        let mut settings = Settings::default();
        settings.quick_stack_range = "Location".to_string();
        settings.quick_stack_animation_stack_speed = 2.0;
        settings.save(&root).unwrap();
        let loaded = Settings::load(&root).unwrap();
        assert_eq!(loaded, settings);
        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let root = std::env::temp_dir()
            .join(format!("quickstack-settings-missing-{}", std::process::id()));
        assert_eq!(Settings::load(&root).unwrap(), Settings::default());
    }

    #[test]
    fn save_failure_reports_write() {
        let root = std::env::temp_dir()
            .join(format!("quickstack-settings-no-dir-{}", std::process::id()))
            .join("missing");
        match Settings::default().save(&root) {
            Err(ConfigError::Write { path, message }) => {
                assert_eq!(path, root.join(SETTINGS_FILE));
                assert!(!message.is_empty());
            }
            other => panic!("expected write error, got {:?}", other),
        }
    }
}
