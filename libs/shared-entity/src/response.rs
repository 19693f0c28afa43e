use serde::{Deserialize, Serialize};
use std::borrow::Cow;

pub use app_error::{AppErrorResponse, ErrorType};

/// Body of every successful response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppResponse<T> {
  pub success: bool,

  #[serde(default)]
  pub message: Cow<'static, str>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub data: Option<T>,
}

impl<T> AppResponse<T> {
  #[allow(non_snake_case)]
  pub fn Ok() -> Self {
    Self {
      success: true,
      message: Cow::Borrowed(""),
      data: None,
    }
  }

  pub fn with_data(mut self, data: T) -> Self {
    self.data = Some(data);
    self
  }

  pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
    self.message = message.into();
    self
  }

  pub fn into_data(self) -> Option<T> {
    self.data
  }
}
