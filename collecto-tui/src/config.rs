//! Configuration loading.
//!
//! Values are layered, later sources winning:
//! 1. built-in defaults
//! 2. the TOML file (`collecto.toml` unless `--config` is given)
//! 3. environment variables prefixed with `COLLECTO_`, nested keys split on `__`
//!    (`COLLECTO_LOCATION__LATITUDE=44.84`)

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Result, ensure};
use collecto_core::{DEFAULT_FALLBACK_CITY, GeoPoint, Locale};
use collecto_provider_nominatim::DEFAULT_BASE_URL;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

/// Configuration file looked up in the working directory.
pub(crate) const DEFAULT_CONFIG_FILE: &str = "collecto.toml";

const ENV_PREFIX: &str = "COLLECTO_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Config {
    /// Zone dataset to load instead of the bundled one.
    pub dataset_path: Option<PathBuf>,
    /// Language of weekday names.
    pub locale: Locale,
    /// Where scan counters are saved.
    pub stats_path: PathBuf,
    /// Log file used while the terminal UI runs; logging is off there without it.
    pub log_file: Option<PathBuf>,
    pub location: LocationConfig,
    pub geocoder: GeocoderConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct LocationConfig {
    /// Device latitude; position lookups are unavailable unless both coordinates are set.
    pub latitude: Option<f64>,
    /// Device longitude.
    pub longitude: Option<f64>,
    /// Timeout of position and geocoding requests, in seconds.
    pub timeout_secs: u64,
    /// City shown when reverse geocoding fails.
    pub fallback_city: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct GeocoderConfig {
    /// Nominatim instance.
    pub base_url: String,
    /// User agent sent with every request; public instances require a descriptive one.
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset_path: None,
            locale: Locale::default(),
            stats_path: PathBuf::from("collecto-stats.json"),
            log_file: None,
            location: LocationConfig::default(),
            geocoder: GeocoderConfig::default(),
        }
    }
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            latitude: None,
            longitude: None,
            timeout_secs: 15,
            fallback_city: DEFAULT_FALLBACK_CITY.to_owned(),
        }
    }
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            user_agent: concat!("collecto/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }
}

impl Config {
    /// Load and validate configuration from `path`, or from [`DEFAULT_CONFIG_FILE`].
    ///
    /// A missing file is not an error; defaults and environment still apply.
    pub(crate) fn load_from(path: Option<&Path>) -> Result<Self> {
        let file = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;

        config.validate()?;
        Ok(config)
    }

    /// Reject values that cannot work.
    pub(crate) fn validate(&self) -> Result<()> {
        let location = &self.location;
        ensure!(
            location.latitude.is_some() == location.longitude.is_some(),
            "location.latitude and location.longitude must be set together"
        );
        if let Some(point) = self.position() {
            ensure!(point.is_valid(), "location {point} is out of range");
        }
        ensure!(location.timeout_secs > 0, "location.timeout_secs must be positive");
        ensure!(
            !self.geocoder.base_url.trim().is_empty(),
            "geocoder.base_url must not be empty"
        );
        Ok(())
    }

    /// Configured device position.
    pub(crate) fn position(&self) -> Option<GeoPoint> {
        Some(GeoPoint::new(self.location.latitude?, self.location.longitude?))
    }

    pub(crate) fn timeout(&self) -> Duration {
        Duration::from_secs(self.location.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok(), "defaults must validate");
        assert_eq!(config.position(), None);
        assert_eq!(config.timeout(), Duration::from_secs(15));
        assert_eq!(config.locale, Locale::English);
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("collecto.toml");
        fs::write(
            &path,
            r#"
locale = "fr"
stats_path = "/tmp/stats.json"

[location]
latitude = 44.837789
longitude = -0.57918
fallback_city = "Bordeaux"
"#,
        )
        .expect("write config");

        let config = Config::load_from(Some(&path)).expect("config loads");
        assert_eq!(config.locale, Locale::French);
        assert_eq!(config.stats_path, PathBuf::from("/tmp/stats.json"));
        assert_eq!(config.position(), Some(GeoPoint::new(44.837_789, -0.579_18)));
        assert_eq!(config.location.fallback_city, "Bordeaux");
        assert_eq!(config.location.timeout_secs, 15);
    }

    #[test]
    fn half_a_position_is_rejected() {
        let mut config = Config::default();
        config.location.latitude = Some(44.8);
        assert!(config.validate().is_err(), "latitude alone must be rejected");
    }

    #[test]
    fn out_of_range_position_is_rejected() {
        let mut config = Config::default();
        config.location.latitude = Some(95.0);
        config.location.longitude = Some(0.0);
        assert!(config.validate().is_err(), "latitude 95 must be rejected");
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let mut config = Config::default();
        config.location.timeout_secs = 0;
        assert!(config.validate().is_err(), "zero timeout must be rejected");
    }
}
