//! Core library with error handling and field validation.
//!
//! This crate provides the pure, I/O-free pieces of the admin client:
//! - Error types for invalid caller input
//! - Input capability traits (`Textual`, `KeyValue`, `Truthy`)
//! - Field validators for user-management requests
//! - Web URL well-formedness checking

pub mod error;
pub mod input;
pub mod str_ext;
pub mod uri;
pub mod validation;

pub use error::{AppError, InternalExt};
pub use input::{KeyValue, Textual, Truthy};
pub use str_ext::{OptionStrExt, StrExt};
pub use uri::validate_url;
pub use validation::{
    to_boolean, validate_custom_claims, validate_display_name, validate_email, validate_password,
    validate_phone_number, validate_photo_url, validate_uid,
};
