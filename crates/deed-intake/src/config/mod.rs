use std::env;
use std::fmt;
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }

    /// Log level applied when `APP_LOG_LEVEL` is not set.
    const fn default_log_level(self) -> &'static str {
        match self {
            Self::Development => "debug",
            Self::Test | Self::Production => "info",
        }
    }
}

/// Which extraction backend feeds structured deeds into the pipeline.
///
/// Selected once at the application boundary and passed in explicitly;
/// the intake core never reads ambient environment state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractorBackend {
    /// Offline canned extractor, the default for development and demos.
    Stub,
}

impl ExtractorBackend {
    fn from_str(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "stub" | "offline" => Ok(Self::Stub),
            other => Err(ConfigError::UnknownExtractor(other.to_string())),
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub intake: IntakeConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );
        let log_level = env::var("APP_LOG_LEVEL")
            .unwrap_or_else(|_| environment.default_log_level().to_string());

        let counties_path = PathBuf::from(
            env::var("DEED_COUNTIES_PATH").unwrap_or_else(|_| "data/counties.csv".to_string()),
        );
        let extractor = ExtractorBackend::from_str(
            &env::var("DEED_EXTRACTOR").unwrap_or_else(|_| "stub".to_string()),
        )?;

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            intake: IntakeConfig {
                counties_path,
                extractor,
            },
        })
    }
}

/// Settings for the intake run itself.
#[derive(Debug, Clone)]
pub struct IntakeConfig {
    pub counties_path: PathBuf,
    pub extractor: ExtractorBackend,
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    UnknownExtractor(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnknownExtractor(value) => {
                write!(f, "DEED_EXTRACTOR '{value}' is not a known backend")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("DEED_COUNTIES_PATH");
        env::remove_var("DEED_EXTRACTOR");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.telemetry.log_level, "debug");
        assert_eq!(config.intake.counties_path, PathBuf::from("data/counties.csv"));
        assert_eq!(config.intake.extractor, ExtractorBackend::Stub);
    }

    #[test]
    fn environment_drives_the_default_log_level() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ENV", "production");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.environment, AppEnvironment::Production);
        assert_eq!(config.telemetry.log_level, "info");

        env::set_var("APP_LOG_LEVEL", "trace");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.telemetry.log_level, "trace");
        reset_env();
    }

    #[test]
    fn rejects_unknown_extractor_backend() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("DEED_EXTRACTOR", "gpt-psychic");
        let error = AppConfig::load().expect_err("expected config error");
        assert!(matches!(error, ConfigError::UnknownExtractor(value) if value == "gpt-psychic"));
        reset_env();
    }

    #[test]
    fn accepts_overridden_counties_path() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("DEED_COUNTIES_PATH", "/srv/reference/counties.csv");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(
            config.intake.counties_path,
            PathBuf::from("/srv/reference/counties.csv")
        );
        reset_env();
    }
}
