//! Field validators for user-management requests.
//!
//! Every validator has the same shape: an absent optional value passes
//! through as `None`; an absent required value, or a present value that
//! breaks a rule, fails with [`AppError::InvalidArgument`]; a valid value is
//! returned unchanged. Validators never normalize their input.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::error::AppError;
use crate::input::{KeyValue, Textual, Truthy};
use crate::str_ext::StrExt;
use crate::uri::validate_url;

/// Maximum uid length in characters.
pub const MAX_UID_LENGTH: usize = 128;
/// Minimum password length in characters.
pub const MIN_PASSWORD_LENGTH: usize = 6;

static E164: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+[0-9]{1,14}$")
        .unwrap_or_else(|error| panic!("phone pattern failed to compile: {error}"))
});

/// Build an `InvalidArgument` error for `field`, logging the rejected rule.
fn rejected(field: &'static str, description: impl Into<String>) -> AppError {
    let description = description.into();
    debug!(field, reason = %description, "Field rejected");
    AppError::InvalidArgument(description)
}

/// Optional/required gate. Null counts as absent. `None` means the value is
/// absent and optional, so the validator passes it through untouched.
fn present<'a, T: ?Sized>(
    value: Option<&'a T>,
    is_null: fn(&T) -> bool,
    required: bool,
) -> Option<Option<&'a T>> {
    match value.filter(|value| !is_null(value)) {
        None if !required => None,
        other => Some(other),
    }
}

/// Validate a user identifier: text of 1 to 128 characters.
///
/// # Errors
/// Returns `AppError::InvalidArgument` if the uid is missing while required,
/// not textual, empty, or longer than [`MAX_UID_LENGTH`].
pub fn validate_uid<T: Textual + ?Sized>(
    uid: Option<&T>,
    required: bool,
) -> Result<Option<&T>, AppError> {
    let Some(uid) = present(uid, Textual::is_null, required) else {
        return Ok(None);
    };
    let text = uid
        .and_then(Textual::as_text)
        .ok_or_else(|| rejected("uid", "uid must be a string"))?;
    if !(1..=MAX_UID_LENGTH).contains(&text.char_len()) {
        return Err(rejected(
            "uid",
            format!("uid must be non-empty with no more than {MAX_UID_LENGTH} chars"),
        ));
    }
    Ok(uid)
}

/// Validate an email address.
///
/// Only the shape `local@domain` is checked: exactly one `@` with text on
/// both sides. `a@b` is valid.
///
/// # Errors
/// Returns `AppError::InvalidArgument` if the email is missing while
/// required, not a non-empty string, or malformed.
pub fn validate_email<T: Textual + ?Sized>(
    email: Option<&T>,
    required: bool,
) -> Result<Option<&T>, AppError> {
    let Some(email) = present(email, Textual::is_null, required) else {
        return Ok(None);
    };
    let text = email
        .and_then(Textual::as_text)
        .filter(|text| !text.is_empty())
        .ok_or_else(|| rejected("email", "email must be a non-empty string"))?;
    let well_formed = text.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty() && !domain.is_empty() && !domain.contains('@')
    });
    if !well_formed {
        return Err(rejected("email", "email is malformed"));
    }
    Ok(email)
}

/// Validate a phone number in E.164 form: `+` followed by 1 to 14 digits.
///
/// # Errors
/// Returns `AppError::InvalidArgument` if the phone number is missing while
/// required, not textual, or not E.164.
pub fn validate_phone_number<T: Textual + ?Sized>(
    phone_number: Option<&T>,
    required: bool,
) -> Result<Option<&T>, AppError> {
    let Some(phone_number) = present(phone_number, Textual::is_null, required) else {
        return Ok(None);
    };
    let text = phone_number
        .and_then(Textual::as_text)
        .ok_or_else(|| rejected("phone_number", "phone_number must be a non-empty string"))?;
    if !E164.is_match(text) {
        return Err(rejected(
            "phone_number",
            "phone_number must be an E.164 identifier",
        ));
    }
    Ok(phone_number)
}

/// Validate a password: text of at least six characters, any charset.
///
/// # Errors
/// Returns `AppError::InvalidArgument` if the password is missing while
/// required, not textual, or shorter than [`MIN_PASSWORD_LENGTH`].
pub fn validate_password<T: Textual + ?Sized>(
    password: Option<&T>,
    required: bool,
) -> Result<Option<&T>, AppError> {
    let Some(password) = present(password, Textual::is_null, required) else {
        return Ok(None);
    };
    let text = password
        .and_then(Textual::as_text)
        .ok_or_else(|| rejected("password", "password must be a string"))?;
    if text.char_len() < MIN_PASSWORD_LENGTH {
        return Err(rejected(
            "password",
            format!("password must be at least {MIN_PASSWORD_LENGTH} characters long"),
        ));
    }
    Ok(password)
}

/// Validate a photo URL with [`validate_url`].
///
/// # Errors
/// Returns `AppError::InvalidArgument` if the URL is missing while required,
/// not a non-empty string, or not a well-formed web URL.
pub fn validate_photo_url<T: Textual + ?Sized>(
    photo_url: Option<&T>,
    required: bool,
) -> Result<Option<&T>, AppError> {
    let Some(photo_url) = present(photo_url, Textual::is_null, required) else {
        return Ok(None);
    };
    let text = photo_url
        .and_then(Textual::as_text)
        .filter(|text| !text.is_empty())
        .ok_or_else(|| rejected("photo_url", "photo_url must be a valid url"))?;
    if !validate_url(text) {
        return Err(rejected("photo_url", "photo_url must be a valid url"));
    }
    Ok(photo_url)
}

/// Validate a display name: any non-empty text.
///
/// # Errors
/// Returns `AppError::InvalidArgument` if the name is missing while
/// required or not a non-empty string.
pub fn validate_display_name<T: Textual + ?Sized>(
    display_name: Option<&T>,
    required: bool,
) -> Result<Option<&T>, AppError> {
    let Some(display_name) = present(display_name, Textual::is_null, required) else {
        return Ok(None);
    };
    display_name
        .and_then(Textual::as_text)
        .filter(|text| !text.is_empty())
        .ok_or_else(|| rejected("display_name", "display_name must be a non-empty string"))?;
    Ok(display_name)
}

/// Validate custom claims: any string-keyed mapping.
///
/// Reserved claim names and the payload size limit are enforced by the
/// remote API, not here.
///
/// # Errors
/// Returns `AppError::InvalidArgument` if the claims are missing while
/// required or not a mapping.
pub fn validate_custom_claims<T: KeyValue + ?Sized>(
    custom_claims: Option<&T>,
    required: bool,
) -> Result<Option<&T>, AppError> {
    let Some(custom_claims) = present(custom_claims, KeyValue::is_null, required) else {
        return Ok(None);
    };
    if !custom_claims.is_some_and(KeyValue::is_mapping) {
        return Err(rejected("custom_claims", "custom_claims must be a mapping"));
    }
    Ok(custom_claims)
}

/// Coerce a flag value to a strict boolean.
///
/// Absent and null stay `None`; `false` is `false`; anything else is `true`.
#[must_use]
pub fn to_boolean<T: Truthy + ?Sized>(value: Option<&T>) -> Option<bool> {
    value.and_then(Truthy::truthiness)
}
