//! User-management request payloads.
//!
//! Requests arrive loosely typed (usually straight from JSON), every field is
//! run through its validator, and the result is a payload in the shape the
//! identity toolkit `accounts` endpoints expect. Nothing here talks to the
//! network.

use auth_core::{
    AppError, InternalExt, Textual, to_boolean, validate_custom_claims, validate_display_name,
    validate_email, validate_password, validate_phone_number, validate_photo_url, validate_uid,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

/// Attribute names understood by `deleteAttribute`.
mod attributes {
    pub const DISPLAY_NAME: &str = "DISPLAY_NAME";
    pub const PHOTO_URL: &str = "PHOTO_URL";
}

/// Provider id removed through `deleteProvider` when the phone number is cleared.
const PHONE_PROVIDER: &str = "phone";

/// Claims sent when a caller clears custom claims.
const EMPTY_CLAIMS: &str = "{}";

/// Change to a clearable attribute in an update.
///
/// When deserialized, a missing key is [`FieldUpdate::Keep`], an explicit
/// `null` is [`FieldUpdate::Remove`], and anything else is
/// [`FieldUpdate::Set`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    #[default]
    Keep,
    Set(T),
    Remove,
}

impl<T> FieldUpdate<T> {
    fn to_set(&self) -> Option<&T> {
        match self {
            Self::Set(value) => Some(value),
            Self::Keep | Self::Remove => None,
        }
    }

    const fn is_remove(&self) -> bool {
        matches!(self, Self::Remove)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for FieldUpdate<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Self::Set(value),
            None => Self::Remove,
        })
    }
}

fn owned<T: Textual + ?Sized>(value: Option<&T>) -> Option<String> {
    value.and_then(Textual::as_text).map(str::to_string)
}

/// Encode validated claims as the JSON string `customAttributes` carries.
fn encode_claims(claims: &Value) -> Result<String, AppError> {
    serde_json::to_string(claims).internal("Failed to encode custom claims")
}

/// Request to create a user. Every field is optional; the API assigns a uid
/// when none is given.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CreateUserRequest {
    pub uid: Option<Value>,
    pub display_name: Option<Value>,
    pub email: Option<Value>,
    pub email_verified: Option<Value>,
    pub phone_number: Option<Value>,
    pub photo_url: Option<Value>,
    pub password: Option<Value>,
    pub disabled: Option<Value>,
}

/// Body for `accounts` (create).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_verified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
}

impl CreateUserRequest {
    #[must_use]
    pub fn uid(mut self, uid: &str) -> Self {
        self.uid = Some(uid.into());
        self
    }

    #[must_use]
    pub fn email(mut self, email: &str) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn password(mut self, password: &str) -> Self {
        self.password = Some(password.into());
        self
    }

    #[must_use]
    pub fn display_name(mut self, display_name: &str) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    #[must_use]
    pub fn phone_number(mut self, phone_number: &str) -> Self {
        self.phone_number = Some(phone_number.into());
        self
    }

    #[must_use]
    pub fn photo_url(mut self, photo_url: &str) -> Self {
        self.photo_url = Some(photo_url.into());
        self
    }

    #[must_use]
    pub fn email_verified(mut self, email_verified: bool) -> Self {
        self.email_verified = Some(email_verified.into());
        self
    }

    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = Some(disabled.into());
        self
    }

    /// Validate every field and build the request body.
    ///
    /// # Errors
    /// Returns `AppError::InvalidArgument` for the first field that fails
    /// validation, in declaration order.
    pub fn to_payload(&self) -> Result<CreateUserPayload, AppError> {
        let payload = CreateUserPayload {
            local_id: owned(validate_uid(self.uid.as_ref(), false)?),
            display_name: owned(validate_display_name(self.display_name.as_ref(), false)?),
            email: owned(validate_email(self.email.as_ref(), false)?),
            email_verified: to_boolean(self.email_verified.as_ref()),
            phone_number: owned(validate_phone_number(self.phone_number.as_ref(), false)?),
            photo_url: owned(validate_photo_url(self.photo_url.as_ref(), false)?),
            password: owned(validate_password(self.password.as_ref(), false)?),
            disabled: to_boolean(self.disabled.as_ref()),
        };
        debug!(uid = ?payload.local_id, "Create user payload built");
        Ok(payload)
    }
}

/// Request to update an existing user.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UpdateUserRequest {
    pub uid: Option<Value>,
    pub display_name: FieldUpdate<Value>,
    pub photo_url: FieldUpdate<Value>,
    pub phone_number: FieldUpdate<Value>,
    pub email: Option<Value>,
    pub email_verified: Option<Value>,
    pub password: Option<Value>,
    pub disabled: Option<Value>,
    pub custom_claims: Option<Value>,
}

/// Body for `accounts:update`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserPayload {
    pub local_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_verified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_user: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_attributes: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub delete_attribute: Vec<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub delete_provider: Vec<&'static str>,
}

impl UpdateUserRequest {
    #[must_use]
    pub fn new(uid: &str) -> Self {
        Self {
            uid: Some(uid.into()),
            ..Self::default()
        }
    }

    /// Validate every field and build the request body.
    ///
    /// # Errors
    /// Returns `AppError::InvalidArgument` if the uid is missing or any field
    /// fails validation, and `AppError::Internal` if the claims cannot be
    /// encoded.
    pub fn to_payload(&self) -> Result<UpdateUserPayload, AppError> {
        let local_id = owned(validate_uid(self.uid.as_ref(), true)?).unwrap_or_default();

        let mut delete_attribute = Vec::new();
        if self.display_name.is_remove() {
            delete_attribute.push(attributes::DISPLAY_NAME);
        }
        if self.photo_url.is_remove() {
            delete_attribute.push(attributes::PHOTO_URL);
        }
        let delete_provider = if self.phone_number.is_remove() {
            vec![PHONE_PROVIDER]
        } else {
            Vec::new()
        };

        let custom_attributes = validate_custom_claims(self.custom_claims.as_ref(), false)?
            .map(encode_claims)
            .transpose()?;

        let payload = UpdateUserPayload {
            display_name: owned(validate_display_name(self.display_name.to_set(), false)?),
            photo_url: owned(validate_photo_url(self.photo_url.to_set(), false)?),
            phone_number: owned(validate_phone_number(self.phone_number.to_set(), false)?),
            email: owned(validate_email(self.email.as_ref(), false)?),
            email_verified: to_boolean(self.email_verified.as_ref()),
            password: owned(validate_password(self.password.as_ref(), false)?),
            disable_user: to_boolean(self.disabled.as_ref()),
            custom_attributes,
            delete_attribute,
            delete_provider,
            local_id,
        };
        debug!(uid = %payload.local_id, "Update user payload built");
        Ok(payload)
    }
}

/// Request to replace a user's custom claims.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SetCustomClaimsRequest {
    pub uid: Option<Value>,
    /// `None` or `null` clears the claims.
    pub custom_claims: Option<Value>,
}

/// Body for `accounts:update` when only claims change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetCustomClaimsPayload {
    pub local_id: String,
    pub custom_attributes: String,
}

impl SetCustomClaimsRequest {
    /// Validate and build the request body.
    ///
    /// # Errors
    /// Returns `AppError::InvalidArgument` if the uid is missing or invalid or
    /// the claims are not a mapping, and `AppError::Internal` if the claims
    /// cannot be encoded.
    pub fn to_payload(&self) -> Result<SetCustomClaimsPayload, AppError> {
        let local_id = owned(validate_uid(self.uid.as_ref(), true)?).unwrap_or_default();
        let custom_attributes = match validate_custom_claims(self.custom_claims.as_ref(), false)? {
            Some(claims) => encode_claims(claims)?,
            None => EMPTY_CLAIMS.to_string(),
        };
        Ok(SetCustomClaimsPayload {
            local_id,
            custom_attributes,
        })
    }
}
