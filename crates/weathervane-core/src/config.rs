use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

const APP_DIR: &str = "weathervane";
const CONFIG_FILE: &str = "config.toml";
const ENV_PREFIX: &str = "WEATHERVANE";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single finding from [`Config::validate`]
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Errors block startup, warnings are only logged.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigIssue>,
    pub warnings: Vec<ConfigIssue>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigIssue {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigIssue {
            field: field.into(),
            message: message.into(),
        });
    }

    /// All errors joined with "; ", empty when valid
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(ConfigIssue::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub weather: WeatherConfig,
    pub geocoding: GeocodingConfig,
    pub location: LocationConfig,
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
}

/// OpenWeatherMap settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// Usually supplied through `WEATHERVANE_WEATHER__API_KEY`
    pub api_key: Option<String>,
    pub base_url: String,
    /// Language for descriptions and weekday names
    pub lang: String,
    pub timeout_seconds: u64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openweathermap.org".to_string(),
            lang: "ru".to_string(),
            timeout_seconds: 10,
        }
    }
}

/// OpenCage reverse-geocoding settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocodingConfig {
    pub api_key: Option<String>,
    pub base_url: String,
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.opencagedata.com".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationConfig {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// City shown when no position is available
    pub default_city: Option<String>,
}

impl LocationConfig {
    pub fn has_position(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub show_hourly: bool,
    /// How many 3-hour samples to print
    pub hourly_limit: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_hourly: true,
            hourly_limit: 8,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter; `RUST_LOG` takes precedence
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load from the default location, writing a default file on first run.
    pub fn load() -> Result<Self> {
        let path = Self::default_path()?;

        if !path.exists() {
            let config = Self::default();
            config.save_to(&path)?;
            tracing::info!("Created default config at {}", path.display());
        }

        Self::load_from(&path)
    }

    /// Load from an explicit file, layering `WEATHERVANE_*` environment
    /// variables on top (`WEATHERVANE_WEATHER__API_KEY` sets `weather.api_key`).
    pub fn load_from(path: &Path) -> Result<Self> {
        Self::load_with_env(path, Self::environment())
    }

    fn environment() -> ::config::Environment {
        ::config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    fn load_with_env(path: &Path, env: ::config::Environment) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!("Config file not found: {}", path.display());
        }

        let settings = ::config::Config::builder()
            .add_source(::config::File::from(path).format(::config::FileFormat::Toml))
            .add_source(env)
            .build()
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        settings
            .try_deserialize()
            .context("Failed to parse config file")
    }

    /// Validate, failing on errors and logging warnings.
    ///
    /// Call after logging is initialized so the warnings are visible.
    pub fn validated(&self) -> Result<ValidationResult> {
        let validation = self.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok(validation)
    }

    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        validate_url(&self.weather.base_url, "weather.base_url", &mut result);
        validate_url(&self.geocoding.base_url, "geocoding.base_url", &mut result);

        if !has_key(&self.weather.api_key) {
            result.add_warning(
                "weather.api_key",
                "No weather API key; set WEATHERVANE_WEATHER__API_KEY to fetch forecasts",
            );
        }
        if !has_key(&self.geocoding.api_key) {
            result.add_warning(
                "geocoding.api_key",
                "No geocoding API key; positions cannot be resolved to a city",
            );
        }

        if self.weather.lang.trim().is_empty() {
            result.add_error("weather.lang", "Language must not be empty");
        }

        if self.weather.timeout_seconds == 0 {
            result.add_error("weather.timeout_seconds", "Timeout must be greater than 0");
        } else if self.weather.timeout_seconds > 120 {
            result.add_warning(
                "weather.timeout_seconds",
                "Timeout is unusually long (>120 seconds)",
            );
        }

        match (self.location.latitude, self.location.longitude) {
            (Some(lat), _) if !(-90.0..=90.0).contains(&lat) => {
                result.add_error("location.latitude", "Latitude must be within -90..=90");
            }
            (_, Some(lon)) if !(-180.0..=180.0).contains(&lon) => {
                result.add_error("location.longitude", "Longitude must be within -180..=180");
            }
            (Some(_), None) | (None, Some(_)) => {
                result.add_warning(
                    "location",
                    "Latitude and longitude must both be set; position ignored",
                );
            }
            _ => {}
        }

        if matches!(&self.location.default_city, Some(city) if city.trim().is_empty()) {
            result.add_warning("location.default_city", "Default city is blank");
        }

        if self.display.show_hourly && self.display.hourly_limit == 0 {
            result.add_warning("display.hourly_limit", "Hourly forecast enabled but limit is 0");
        }

        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            result.add_error(
                "logging.level",
                format!(
                    "Unknown level '{}', expected one of {}",
                    self.logging.level,
                    LOG_LEVELS.join(", ")
                ),
            );
        }

        result
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// `<config dir>/weathervane/config.toml`
    pub fn default_path() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join(APP_DIR);

        Ok(dir.join(CONFIG_FILE))
    }
}

fn has_key(key: &Option<String>) -> bool {
    key.as_deref().is_some_and(|k| !k.trim().is_empty())
}

fn validate_url(value: &str, field: &str, result: &mut ValidationResult) {
    let url = match Url::parse(value) {
        Ok(url) => url,
        Err(e) => {
            result.add_error(field, format!("Invalid URL: {}", e));
            return;
        }
    };

    if url.scheme() != "http" && url.scheme() != "https" {
        result.add_error(
            field,
            format!("URL must use http or https scheme, got: {}", url.scheme()),
        );
    }
    if url.host().is_none() {
        result.add_error(field, "URL must have a host");
    }
    if url.port() == Some(0) {
        result.add_error(field, "Port cannot be 0");
    }
}
