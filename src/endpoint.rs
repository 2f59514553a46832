//! Identity toolkit API endpoint resolution.
//!
//! The client resolves the endpoint once per request-building pass: the
//! emulator when one is configured, production otherwise.

use auth_core::{AppError, StrExt};

use crate::emulator::EmulatorSettings;

/// Production v1 API base URL.
pub const PRODUCTION_V1_URL: &str = "https://identitytoolkit.googleapis.com/v1";

/// Bearer token the emulator accepts in place of an OAuth access token.
const EMULATOR_BEARER: &str = "owner";

/// Account operations addressed under a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountAction {
    Create,
    Update,
    Lookup,
    Delete,
}

impl AccountAction {
    const fn path(self) -> &'static str {
        match self {
            Self::Create => "accounts",
            Self::Update => "accounts:update",
            Self::Lookup => "accounts:lookup",
            Self::Delete => "accounts:delete",
        }
    }
}

/// Base URL for identity toolkit requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoint {
    base_url: String,
    emulated: bool,
}

impl ApiEndpoint {
    /// Pick the emulator or the production endpoint.
    #[must_use]
    pub fn resolve(emulator: &EmulatorSettings) -> Self {
        match emulator.v1_url() {
            Some(base_url) => Self {
                base_url,
                emulated: true,
            },
            None => Self {
                base_url: PRODUCTION_V1_URL.to_string(),
                emulated: false,
            },
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub const fn is_emulated(&self) -> bool {
        self.emulated
    }

    /// Token to send as `Authorization: Bearer` when talking to the emulator.
    #[must_use]
    pub const fn emulator_bearer(&self) -> Option<&'static str> {
        if self.emulated {
            Some(EMULATOR_BEARER)
        } else {
            None
        }
    }

    /// Example: `https://identitytoolkit.googleapis.com/v1/projects/my-project`
    ///
    /// # Errors
    /// Returns `AppError::InvalidArgument` if `project_id` is blank or
    /// contains a path separator.
    pub fn project_url(&self, project_id: &str) -> Result<String, AppError> {
        let project_id = project_id
            .non_blank()
            .filter(|id| !id.contains('/'))
            .ok_or_else(|| AppError::invalid_argument("project_id must be a non-empty string"))?;
        Ok(format!("{}/projects/{project_id}", self.base_url))
    }

    /// URL for an account operation under `project_id`.
    ///
    /// # Errors
    /// Same as [`ApiEndpoint::project_url`].
    pub fn accounts_url(
        &self,
        project_id: &str,
        action: AccountAction,
    ) -> Result<String, AppError> {
        Ok(format!("{}/{}", self.project_url(project_id)?, action.path()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emulated() -> ApiEndpoint {
        ApiEndpoint::resolve(&EmulatorSettings::from_value(Some("localhost:9099")).unwrap())
    }

    #[test]
    fn production_by_default() {
        let endpoint = ApiEndpoint::resolve(&EmulatorSettings::default());
        assert_eq!(endpoint.base_url(), PRODUCTION_V1_URL);
        assert!(!endpoint.is_emulated());
        assert_eq!(endpoint.emulator_bearer(), None);
    }

    #[test]
    fn emulator_when_configured() {
        let endpoint = emulated();
        assert_eq!(
            endpoint.base_url(),
            "http://localhost:9099/identitytoolkit.googleapis.com/v1"
        );
        assert!(endpoint.is_emulated());
        assert_eq!(endpoint.emulator_bearer(), Some("owner"));
    }

    #[test]
    fn account_urls() {
        let endpoint = ApiEndpoint::resolve(&EmulatorSettings::default());
        assert_eq!(
            endpoint.accounts_url("demo", AccountAction::Create).unwrap(),
            "https://identitytoolkit.googleapis.com/v1/projects/demo/accounts"
        );
        assert_eq!(
            emulated()
                .accounts_url("demo", AccountAction::Update)
                .unwrap(),
            "http://localhost:9099/identitytoolkit.googleapis.com/v1/projects/demo/accounts:update"
        );
        assert!(
            endpoint
                .accounts_url(" demo ", AccountAction::Lookup)
                .unwrap()
                .ends_with("/projects/demo/accounts:lookup")
        );
    }

    #[test]
    fn blank_project_is_rejected() {
        let endpoint = emulated();
        assert!(endpoint.project_url("").is_err());
        assert!(endpoint.project_url("  ").is_err());
        assert!(endpoint.accounts_url("a/b", AccountAction::Delete).is_err());
    }
}
