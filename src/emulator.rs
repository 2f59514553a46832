//! Auth emulator detection.
//!
//! When `FIREBASE_AUTH_EMULATOR_HOST` holds a `host:port`, requests go to the
//! local emulator instead of the production identity toolkit.

use auth_core::{AppError, StrExt};
use tracing::debug;

/// Environment variable naming the emulator `host:port`.
pub const AUTH_EMULATOR_HOST_VAR: &str = "FIREBASE_AUTH_EMULATOR_HOST";

/// Path the emulator serves the v1 identity toolkit API under.
const EMULATOR_V1_PATH: &str = "identitytoolkit.googleapis.com/v1";

/// Resolved emulator setting, captured once and passed where needed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmulatorSettings {
    host: Option<String>,
}

impl EmulatorSettings {
    /// Resolve from the process environment.
    ///
    /// # Errors
    /// Returns `AppError::InvalidArgument` if the variable holds a URL
    /// rather than a bare `host:port`.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_value(std::env::var(AUTH_EMULATOR_HOST_VAR).ok().as_deref())
    }

    /// Resolve from a raw variable value. Blank values mean "not emulated".
    ///
    /// # Errors
    /// Returns `AppError::InvalidArgument` if the trimmed value contains `//`.
    pub fn from_value(value: Option<&str>) -> Result<Self, AppError> {
        let Some(host) = value.and_then(StrExt::non_blank) else {
            return Ok(Self::default());
        };
        if host.contains("//") {
            return Err(AppError::invalid_argument(format!(
                "Invalid {AUTH_EMULATOR_HOST_VAR}: \"{host}\". It must follow the format \"host:port\""
            )));
        }
        debug!(host, "Auth emulator configured");
        Ok(Self {
            host: Some(host.to_string()),
        })
    }

    /// The emulator `host:port`, if any.
    #[must_use]
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// Base URL of the emulated v1 API.
    ///
    /// Example: `http://localhost:9099/identitytoolkit.googleapis.com/v1`
    #[must_use]
    pub fn v1_url(&self) -> Option<String> {
        self.host
            .as_deref()
            .map(|host| format!("http://{host}/{EMULATOR_V1_PATH}"))
    }

    #[must_use]
    pub const fn is_emulated(&self) -> bool {
        self.host.is_some()
    }
}

/// Read the emulator host from the environment.
///
/// # Errors
/// Returns `AppError::InvalidArgument` if the value is a URL, not `host:port`.
pub fn get_emulator_host() -> Result<Option<String>, AppError> {
    Ok(EmulatorSettings::from_env()?.host)
}

/// Emulator v1 API base URL, or `None` when not emulated.
///
/// # Errors
/// Same as [`get_emulator_host`].
pub fn get_emulator_v1_url() -> Result<Option<String>, AppError> {
    Ok(EmulatorSettings::from_env()?.v1_url())
}

/// Whether requests should target the emulator.
///
/// # Errors
/// Same as [`get_emulator_host`]; the host must resolve to answer.
pub fn is_emulated() -> Result<bool, AppError> {
    Ok(EmulatorSettings::from_env()?.is_emulated())
}
