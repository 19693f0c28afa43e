use chrono::{DateTime, Utc};
use database_entity::dto::AFLamaran;
use sqlx::FromRow;
use uuid::Uuid;

/// Represent the row of the af_lamaran table
#[derive(Debug, Clone, FromRow)]
pub struct AFLamaranRow {
  pub lamaran_id: Uuid,
  pub full_name: String,
  pub email: String,
  pub phone: String,
  pub created_at: DateTime<Utc>,
}

impl From<AFLamaranRow> for AFLamaran {
  fn from(value: AFLamaranRow) -> Self {
    Self {
      id: value.lamaran_id,
      full_name: value.full_name,
      email: value.email,
      phone: value.phone,
      created_at: value.created_at,
    }
  }
}
