//! Configuration loaded from the environment and validated up front.

use auth_core::{AppError, OptionStrExt};
use auth_telemetry::TelemetryConfig;
use clap::Parser;
use tracing::info;

use crate::emulator::{AUTH_EMULATOR_HOST_VAR, EmulatorSettings};
use crate::endpoint::ApiEndpoint;

/// Name reported as the program name to the argument parser.
const APP_NAME: &str = "auth-admin";

/// Admin client configuration.
///
/// All values come from environment variables; the flags exist so embedding
/// binaries can flatten this into their own CLI.
#[derive(Debug, Clone, Parser)]
#[command(name = APP_NAME, about = "Identity admin client configuration")]
pub struct AdminConfig {
    /// Auth emulator address as `host:port` (no scheme)
    #[arg(long, env = "FIREBASE_AUTH_EMULATOR_HOST")]
    pub emulator_host: Option<String>,

    /// Google Cloud project owning the user accounts
    #[arg(long, env = "GOOGLE_CLOUD_PROJECT")]
    pub project_id: Option<String>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(long, env = "LOG_LEVEL", default_value = "INFO")]
    pub log_level: String,

    /// Use JSON log format
    #[arg(long, env = "JSON_LOGS", default_value = "false")]
    pub json_logs: bool,
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Parse(#[from] clap::Error),
    #[error("Invalid FIREBASE_AUTH_EMULATOR_HOST: \"{0}\". It must follow the format \"host:port\"")]
    EmulatorHostIsUrl(String),
    #[error("Project id must not be blank")]
    BlankProjectId,
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        Self::InvalidArgument(error.to_string())
    }
}

impl AdminConfig {
    /// Load from the process environment and validate.
    ///
    /// # Errors
    /// Returns `ConfigError` if a variable fails to parse or validate.
    pub fn init() -> Result<Self, ConfigError> {
        let config = Self::try_parse_from([APP_NAME])?;
        config.validate()?;
        if let Some(host) = config.emulator_host.non_blank() {
            info!(host = %host, "Using auth emulator");
        }
        Ok(config)
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(host) = self.emulator_host.non_blank()
            && host.contains("//")
        {
            return Err(ConfigError::EmulatorHostIsUrl(host));
        }
        if self.project_id.is_some() && self.project_id.non_blank().is_none() {
            return Err(ConfigError::BlankProjectId);
        }
        Ok(())
    }

    /// Emulator settings to inject into endpoint resolution.
    ///
    /// # Errors
    /// Returns `AppError::InvalidArgument` if the emulator host is a URL.
    pub fn emulator(&self) -> Result<EmulatorSettings, AppError> {
        EmulatorSettings::from_value(self.emulator_host.as_deref())
    }

    /// Resolved API endpoint for this configuration.
    ///
    /// # Errors
    /// Same as [`AdminConfig::emulator`].
    pub fn endpoint(&self) -> Result<ApiEndpoint, AppError> {
        Ok(ApiEndpoint::resolve(&self.emulator()?))
    }

    /// Trimmed project id, if configured.
    #[must_use]
    pub fn project_id(&self) -> Option<String> {
        self.project_id.non_blank()
    }

    #[must_use]
    pub fn telemetry(&self) -> TelemetryConfig {
        TelemetryConfig {
            log_level: self.log_level.clone(),
            json_logs: self.json_logs,
        }
    }
}

#[cfg(test)]
mod tests {
    use env_lock::lock_env;

    use super::*;

    fn test_config() -> AdminConfig {
        AdminConfig {
            emulator_host: None,
            project_id: Some("demo-project".to_string()),
            log_level: "INFO".to_string(),
            json_logs: false,
        }
    }

    #[test]
    fn valid_config_passes_validation() {
        assert!(test_config().validate().is_ok());
    }

    #[test]
    fn emulator_url_fails() {
        let mut config = test_config();
        config.emulator_host = Some(" http://localhost:9099 ".to_string());
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmulatorHostIsUrl(host)) if host == "http://localhost:9099"
        ));
        let err = AppError::from(config.validate().unwrap_err());
        assert!(err.is_invalid_argument());
        assert!(config.emulator().is_err());
    }

    #[test]
    fn blank_project_id_fails() {
        let mut config = test_config();
        config.project_id = Some("   ".to_string());
        assert!(matches!(
            config.validate(),
            Err(ConfigError::BlankProjectId)
        ));
    }

    #[test]
    fn endpoint_follows_emulator_host() {
        let mut config = test_config();
        assert!(!config.endpoint().unwrap().is_emulated());

        config.emulator_host = Some("localhost:9099".to_string());
        let endpoint = config.endpoint().unwrap();
        assert!(endpoint.is_emulated());
        assert_eq!(
            endpoint.base_url(),
            "http://localhost:9099/identitytoolkit.googleapis.com/v1"
        );
    }

    #[test]
    fn telemetry_mirrors_log_settings() {
        let mut config = test_config();
        config.log_level = "DEBUG".to_string();
        config.json_logs = true;
        let telemetry = config.telemetry();
        assert_eq!(telemetry.log_level, "DEBUG");
        assert!(telemetry.json_logs);
    }

    #[test]
    fn init_reads_environment() {
        let _guard = lock_env([
            (AUTH_EMULATOR_HOST_VAR, Some("localhost:9099".to_owned())),
            ("GOOGLE_CLOUD_PROJECT", Some(" demo ".to_owned())),
            ("LOG_LEVEL", None::<String>),
            ("JSON_LOGS", Some("true".to_owned())),
        ]);
        let config = AdminConfig::init().unwrap();
        assert_eq!(config.emulator_host.as_deref(), Some("localhost:9099"));
        assert_eq!(config.project_id().as_deref(), Some("demo"));
        assert_eq!(config.log_level, "INFO");
        assert!(config.json_logs);
    }

    #[test]
    fn init_defaults_without_environment() {
        let _guard = lock_env([
            (AUTH_EMULATOR_HOST_VAR, None::<String>),
            ("GOOGLE_CLOUD_PROJECT", None::<String>),
            ("LOG_LEVEL", None::<String>),
            ("JSON_LOGS", None::<String>),
        ]);
        let config = AdminConfig::init().unwrap();
        assert!(config.emulator_host.is_none());
        assert!(config.project_id().is_none());
        assert!(!config.json_logs);
        assert!(!config.emulator().unwrap().is_emulated());
    }

    #[test]
    fn init_rejects_emulator_url() {
        let _guard = lock_env([
            (AUTH_EMULATOR_HOST_VAR, Some("http://localhost:9099".to_owned())),
            ("GOOGLE_CLOUD_PROJECT", None::<String>),
            ("LOG_LEVEL", None::<String>),
            ("JSON_LOGS", None::<String>),
        ]);
        assert!(matches!(
            AdminConfig::init(),
            Err(ConfigError::EmulatorHostIsUrl(_))
        ));
    }
}
