use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

pub const EMPTY_BODY_MESSAGE: &str = "Request body cannot be empty";
pub const TIMEOUT_MESSAGE: &str = "Database operation timed out. Please try again.";

#[derive(Debug, Error)]
pub enum AppError {
  #[error("{}", EMPTY_BODY_MESSAGE)]
  EmptyBody,

  /// One message per offending field, in schema order.
  #[error("{}", .0.join(", "))]
  SchemaValidation(Vec<String>),

  #[error("Invalid request:{0}")]
  InvalidRequest(String),

  #[error("Save operation timed out after {} seconds", .0.as_secs())]
  Timeout(Duration),

  #[error("{0}")]
  Store(String),

  #[error(transparent)]
  Internal(#[from] anyhow::Error),
}

impl AppError {
  pub fn is_timeout(&self) -> bool {
    matches!(self, AppError::Timeout(_))
  }

  pub fn is_schema_validation(&self) -> bool {
    matches!(self, AppError::SchemaValidation(_))
  }

  /// HTTP status this error is reported with.
  pub fn status(&self) -> u16 {
    match self {
      AppError::EmptyBody => 400,
      AppError::SchemaValidation(_) => 400,
      AppError::InvalidRequest(_) => 400,
      AppError::Timeout(_) => 500,
      AppError::Store(_) => 500,
      AppError::Internal(_) => 500,
    }
  }

  /// The `errorType` field of the failure payload. An empty body is rejected
  /// before any record is built, so it carries no type.
  pub fn error_type(&self) -> Option<ErrorType> {
    match self {
      AppError::EmptyBody => None,
      AppError::SchemaValidation(_) => Some(ErrorType::ValidationError),
      AppError::InvalidRequest(_) => Some(ErrorType::InvalidRequest),
      AppError::Timeout(_) => Some(ErrorType::TimeoutError),
      AppError::Store(_) => Some(ErrorType::StoreError),
      AppError::Internal(_) => Some(ErrorType::InternalError),
    }
  }

  /// The message shown to the client. Timeouts are reported with a fixed
  /// retry hint instead of the internal description.
  pub fn user_message(&self) -> String {
    match self {
      AppError::Timeout(_) => TIMEOUT_MESSAGE.to_string(),
      other => other.to_string(),
    }
  }
}

#[derive(Eq, PartialEq, Copy, Debug, Clone, Serialize, Deserialize)]
pub enum ErrorType {
  ValidationError,
  InvalidRequest,
  TimeoutError,
  StoreError,
  InternalError,
}

/// Body of every failed response.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AppErrorResponse {
  pub success: bool,
  pub message: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub error_type: Option<ErrorType>,
}

impl From<&AppError> for AppErrorResponse {
  fn from(value: &AppError) -> Self {
    Self {
      success: false,
      message: value.user_message(),
      error_type: value.error_type(),
    }
  }
}

#[cfg(feature = "sqlx_error")]
impl From<sqlx::Error> for AppError {
  fn from(value: sqlx::Error) -> Self {
    match &value {
      sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
        // not_null_violation, check_violation
        Some("23502") | Some("23514") => {
          AppError::SchemaValidation(vec![db_err.message().to_string()])
        },
        _ => AppError::Store(value.to_string()),
      },
      _ => AppError::Store(value.to_string()),
    }
  }
}

#[cfg(feature = "actix_web_error")]
impl actix_web::error::ResponseError for AppError {
  fn status_code(&self) -> actix_web::http::StatusCode {
    actix_web::http::StatusCode::from_u16(self.status())
      .unwrap_or(actix_web::http::StatusCode::INTERNAL_SERVER_ERROR)
  }

  fn error_response(&self) -> actix_web::HttpResponse {
    actix_web::HttpResponse::build(self.status_code()).json(AppErrorResponse::from(self))
  }
}
