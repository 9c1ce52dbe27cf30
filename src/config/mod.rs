//! Persisted preferences: active locale, period matching policy and the
//! forecast tunables.

use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use dirs::home_dir;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{TrackerError, TrackerResult};
use crate::forecast::ForecastConfig;
use crate::period::{MatchPolicy, DEFAULT_LOCALE};

const DEFAULT_DIR_NAME: &str = ".month_status";
const HOME_ENV: &str = "MONTH_STATUS_HOME";
const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    #[serde(default)]
    pub match_policy: MatchPolicy,
    #[serde(default)]
    pub forecast: ForecastConfig,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.into(),
            currency: "ARS".into(),
            match_policy: MatchPolicy::default(),
            forecast: ForecastConfig::default(),
            ui_color_enabled: Self::default_ui_color_enabled(),
        }
    }
}

impl Config {
    pub fn default_ui_color_enabled() -> bool {
        true
    }

    /// Rejects weights and thresholds the engine cannot use meaningfully.
    pub fn validate(&self) -> TrackerResult<()> {
        let forecast = &self.forecast;
        for (label, weight) in [
            ("baseline_weight", forecast.baseline_weight),
            ("recent_weight", forecast.recent_weight),
        ] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(TrackerError::Config(format!(
                    "{label} must be a non-negative number"
                )));
            }
        }
        if forecast.recent_window_days == 0 {
            return Err(TrackerError::Config(
                "recent_window_days must be at least 1".into(),
            ));
        }
        if forecast.baseline_weight + forecast.recent_weight <= 0.0 {
            return Err(TrackerError::Config(
                "baseline_weight and recent_weight must not both be zero".into(),
            ));
        }
        let thresholds = &forecast.confidence;
        if thresholds.low_days > thresholds.medium_days
            || thresholds.low_active_days > thresholds.medium_active_days
        {
            return Err(TrackerError::Config(
                "low confidence thresholds must not exceed medium thresholds".into(),
            ));
        }
        Ok(())
    }
}

/// Application data directory, `$MONTH_STATUS_HOME` or `~/.month_status`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Loads and stores [`Config`] as pretty-printed JSON.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Manager rooted at [`app_data_dir`].
    pub fn from_env() -> Self {
        Self::with_base_dir(app_data_dir())
    }

    /// The directory is created on the first [`ConfigManager::save`].
    pub fn with_base_dir(base: PathBuf) -> Self {
        Self::new(base.join(CONFIG_FILE))
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Reads the stored config; a missing file yields the defaults.
    pub fn load(&self) -> TrackerResult<Config> {
        if !self.config_path.exists() {
            debug!(path = %self.config_path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.config_path)?;
        let config: Config = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> TrackerResult<()> {
        config.validate()?;
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.config_path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.config_path)?;
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> TrackerResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tmp_path_appends_suffix() {
        let tmp = tmp_path(Path::new("/data/config.json"));
        assert_eq!(tmp, PathBuf::from("/data/config.json.tmp"));
    }

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        config.validate().expect("defaults validate");
        assert_eq!(config.locale, "es");
        assert_eq!(config.match_policy, MatchPolicy::AnyLanguage);
    }

    #[test]
    fn rejects_negative_weights() {
        let mut config = Config::default();
        config.forecast.recent_weight = -0.1;
        assert!(matches!(config.validate(), Err(TrackerError::Config(_))));
    }

    #[test]
    fn rejects_zero_recent_window() {
        let mut config = Config::default();
        config.forecast.recent_window_days = 0;
        assert!(matches!(config.validate(), Err(TrackerError::Config(_))));
    }

    #[test]
    fn rejects_all_zero_weights() {
        let mut config = Config::default();
        config.forecast.baseline_weight = 0.0;
        config.forecast.recent_weight = 0.0;
        assert!(matches!(config.validate(), Err(TrackerError::Config(_))));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let json = r#"{
            "locale": "en-US",
            "currency": "USD",
            "match_policy": "active_locale",
            "forecast": { "recent_window_days": 10 }
        }"#;
        let config: Config = serde_json::from_str(json).expect("parse config");
        assert_eq!(config.match_policy, MatchPolicy::ActiveLocale);
        assert_eq!(config.forecast.recent_window_days, 10);
        assert_eq!(config.forecast.baseline_weight, 0.65);
        assert_eq!(config.forecast.confidence.medium_days, 12);
        assert!(config.ui_color_enabled);
    }
}
