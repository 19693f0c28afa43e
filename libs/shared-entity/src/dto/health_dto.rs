use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const HEALTHY: &str = "healthy";
pub const UNKNOWN: &str = "unknown";

/// Body of the health endpoint. `database` is one of `connected`,
/// `connecting` or `disconnected`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
  pub status: String,
  pub timestamp: DateTime<Utc>,
  pub database: String,
  pub db_host: String,
  pub db_name: String,
}
