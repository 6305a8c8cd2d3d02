//! Global settings for logging and chart rendering defaults.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::sync::{LazyLock, RwLock};

use crate::error::LabResult;
use crate::utility::get_file_path;

/// Default settings
fn default_settings() -> HashMap<String, SettingValue> {
    let mut settings = HashMap::new();

    // Log settings
    settings.insert("log.level".to_string(), SettingValue::Int(20)); // INFO level
    settings.insert("log.console".to_string(), SettingValue::Bool(true));
    settings.insert("log.file".to_string(), SettingValue::Bool(false));

    // Chart settings
    settings.insert("chart.width".to_string(), SettingValue::Int(640));
    settings.insert("chart.height".to_string(), SettingValue::Int(480));
    settings.insert("chart.font_size".to_string(), SettingValue::Int(12));
    settings.insert("chart.title".to_string(), SettingValue::String("macro_lab".to_string()));

    settings
}

/// Setting value types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl SettingValue {
    /// Get as string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            SettingValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as i64
    pub fn as_int(&self) -> Option<i64> {
        match self {
            SettingValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as f64
    pub fn as_float(&self) -> Option<f64> {
        match self {
            SettingValue::Float(f) => Some(*f),
            SettingValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Get as bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// Global settings container
pub struct Settings {
    settings: RwLock<HashMap<String, SettingValue>>,
}

impl Settings {
    /// Create settings from defaults merged with the settings file
    pub fn new() -> Self {
        let mut settings = default_settings();

        if let Some(file_settings) = load_settings_from_file() {
            settings.extend(file_settings);
        }

        Self {
            settings: RwLock::new(settings),
        }
    }

    /// Create settings from defaults only
    pub fn with_defaults() -> Self {
        Self {
            settings: RwLock::new(default_settings()),
        }
    }

    /// Get a setting value
    pub fn get(&self, key: &str) -> Option<SettingValue> {
        self.settings.read().ok()?.get(key).cloned()
    }

    /// Get a string setting
    pub fn get_string(&self, key: &str) -> Option<String> {
        self.get(key).and_then(|v| v.as_str().map(|s| s.to_string()))
    }

    /// Get an integer setting
    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(|v| v.as_int())
    }

    /// Get a float setting
    pub fn get_float(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(|v| v.as_float())
    }

    /// Get a bool setting
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(|v| v.as_bool())
    }

    /// Set a setting value
    pub fn set(&self, key: impl Into<String>, value: SettingValue) {
        if let Ok(mut settings) = self.settings.write() {
            settings.insert(key.into(), value);
        }
    }

    /// Update settings from a map
    pub fn update(&self, new_settings: HashMap<String, SettingValue>) {
        if let Ok(mut settings) = self.settings.write() {
            settings.extend(new_settings);
        }
    }

    /// Chart size in pixels, falling back to defaults for missing or invalid entries
    pub fn chart_size(&self) -> (u32, u32) {
        let width = self
            .get_int("chart.width")
            .and_then(|w| u32::try_from(w).ok())
            .filter(|w| *w > 0)
            .unwrap_or(640);
        let height = self
            .get_int("chart.height")
            .and_then(|h| u32::try_from(h).ok())
            .filter(|h| *h > 0)
            .unwrap_or(480);
        (width, height)
    }

    /// Get all settings as HashMap
    pub fn get_all(&self) -> HashMap<String, SettingValue> {
        self.settings
            .read()
            .map(|settings| settings.clone())
            .unwrap_or_default()
    }

    /// Save settings to file
    pub fn save(&self) -> LabResult<()> {
        let filepath = get_file_path(SETTING_FILENAME);
        let json = serde_json::to_string_pretty(&self.get_all())?;
        fs::write(filepath, json)?;
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

/// Setting filename
const SETTING_FILENAME: &str = "macro_lab_setting.json";

/// Load settings from JSON file
fn load_settings_from_file() -> Option<HashMap<String, SettingValue>> {
    let filepath = get_file_path(SETTING_FILENAME);
    if filepath.exists() {
        let content = fs::read_to_string(filepath).ok()?;
        serde_json::from_str(&content).ok()
    } else {
        None
    }
}

/// Global settings instance
pub static SETTINGS: LazyLock<Settings> = LazyLock::new(Settings::new);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setting_value_types() {
        let s = SettingValue::String("test".to_string());
        assert_eq!(s.as_str(), Some("test"));

        let i = SettingValue::Int(42);
        assert_eq!(i.as_int(), Some(42));
        assert_eq!(i.as_float(), Some(42.0));

        let f = SettingValue::Float(0.5);
        assert_eq!(f.as_float(), Some(0.5));
        assert_eq!(f.as_int(), None);

        let b = SettingValue::Bool(true);
        assert_eq!(b.as_bool(), Some(true));
    }

    #[test]
    fn test_default_settings() {
        let settings = Settings::with_defaults();
        assert_eq!(settings.get_int("log.level"), Some(20));
        assert_eq!(settings.get_bool("log.file"), Some(false));
        assert_eq!(settings.chart_size(), (640, 480));
    }

    #[test]
    fn test_chart_size_ignores_invalid_values() {
        let settings = Settings::with_defaults();
        settings.set("chart.width", SettingValue::Int(-5));
        settings.set("chart.height", SettingValue::String("tall".to_string()));
        assert_eq!(settings.chart_size(), (640, 480));

        settings.set("chart.width", SettingValue::Int(1200));
        assert_eq!(settings.chart_size(), (1200, 480));
    }

    #[test]
    fn test_update_from_settings_file_json() {
        let json = r#"{"chart.width": 800, "log.console": false, "chart.title": "inpc"}"#;
        let parsed: HashMap<String, SettingValue> = serde_json::from_str(json).unwrap();

        let settings = Settings::with_defaults();
        settings.update(parsed);
        assert_eq!(settings.get_int("chart.width"), Some(800));
        assert_eq!(settings.get_bool("log.console"), Some(false));
        assert_eq!(settings.get_string("chart.title"), Some("inpc".to_string()));
    }
}
