use app_error::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const FULL_NAME_FIELD: &str = "fullName";
pub const EMAIL_FIELD: &str = "email";
pub const PHONE_FIELD: &str = "phone";

/// Required fields of a lamaran, in schema order. Validation messages are
/// always reported in this order.
pub const LAMARAN_REQUIRED_FIELDS: [&str; 3] = [FULL_NAME_FIELD, EMAIL_FIELD, PHONE_FIELD];

pub fn required_field_message(path: &str) -> String {
  format!("Path `{}` is required.", path)
}

/// A submission that has passed validation and is ready to be written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LamaranParams {
  pub full_name: String,
  pub email: String,
  pub phone: String,
}

impl LamaranParams {
  pub fn new(
    full_name: impl Into<String>,
    email: impl Into<String>,
    phone: impl Into<String>,
  ) -> Self {
    Self {
      full_name: full_name.into(),
      email: email.into(),
      phone: phone.into(),
    }
  }

  /// Checks that every required field is non-empty. Used by stores to enforce
  /// the schema on their side of the boundary.
  pub fn check_required(&self) -> Result<(), AppError> {
    let fields = [
      (FULL_NAME_FIELD, &self.full_name),
      (EMAIL_FIELD, &self.email),
      (PHONE_FIELD, &self.phone),
    ];
    let messages = fields
      .iter()
      .filter(|(_, value)| value.is_empty())
      .map(|(path, _)| required_field_message(path))
      .collect::<Vec<_>>();

    if messages.is_empty() {
      Ok(())
    } else {
      Err(AppError::SchemaValidation(messages))
    }
  }
}

/// A lamaran as stored, with its store-assigned identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AFLamaran {
  #[serde(rename = "_id", alias = "id")]
  pub id: Uuid,
  pub full_name: String,
  pub email: String,
  pub phone: String,
  pub created_at: DateTime<Utc>,
}

impl AFLamaran {
  pub fn from_params(id: Uuid, params: LamaranParams, created_at: DateTime<Utc>) -> Self {
    Self {
      id,
      full_name: params.full_name,
      email: params.email,
      phone: params.phone,
      created_at,
    }
  }
}
