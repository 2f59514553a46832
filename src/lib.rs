//! Identity admin client: input validation and endpoint resolution.
//!
//! Validates user-management input before it is sent to the identity toolkit
//! API, builds the request payloads, and decides whether requests go to the
//! local auth emulator or to production. No network I/O happens here.

pub mod config;
pub mod emulator;
pub mod endpoint;
pub mod users;

// Re-export the validation surface from core for convenience
pub use auth_core::{
    AppError, KeyValue, Textual, Truthy, to_boolean, validate_custom_claims,
    validate_display_name, validate_email, validate_password, validate_phone_number,
    validate_photo_url, validate_uid, validate_url,
};
pub use auth_telemetry::{TelemetryConfig, setup_telemetry};
pub use config::{AdminConfig, ConfigError};
pub use emulator::{
    AUTH_EMULATOR_HOST_VAR, EmulatorSettings, get_emulator_host, get_emulator_v1_url, is_emulated,
};
pub use endpoint::{AccountAction, ApiEndpoint};
pub use users::{
    CreateUserPayload, CreateUserRequest, FieldUpdate, SetCustomClaimsPayload,
    SetCustomClaimsRequest, UpdateUserPayload, UpdateUserRequest,
};
