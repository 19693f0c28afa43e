use app_error::AppError;
use database::lamaran::LamaranStore;
use database_entity::dto::{AFLamaran, LamaranParams};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{error, info, instrument, warn};

/// Writes validated submissions to a [LamaranStore], waiting at most
/// `submit_timeout` for the store to acknowledge.
///
/// On timeout the caller gets [AppError::Timeout] but the insert keeps running
/// in its own task and may still be persisted afterwards. The store is never
/// asked to cancel it.
#[derive(Clone)]
pub struct LamaranWriter {
  store: Arc<dyn LamaranStore>,
  submit_timeout: Duration,
}

impl LamaranWriter {
  pub fn new(store: Arc<dyn LamaranStore>, submit_timeout: Duration) -> Self {
    Self {
      store,
      submit_timeout,
    }
  }

  #[instrument(level = "debug", skip_all, err)]
  pub async fn submit(&self, params: LamaranParams) -> Result<AFLamaran, AppError> {
    let store = self.store.clone();
    let insert = tokio::spawn(async move { store.insert_lamaran(params).await });

    match timeout(self.submit_timeout, insert).await {
      Ok(Ok(Ok(lamaran))) => {
        info!("Saved lamaran: {}", lamaran.id);
        Ok(lamaran)
      },
      Ok(Ok(Err(err))) => Err(classify_store_error(err)),
      Ok(Err(err)) => {
        error!("Lamaran insert task failed: {}", err);
        Err(AppError::Store(err.to_string()))
      },
      Err(_) => {
        warn!(
          "Lamaran insert did not finish within {:?}, abandoning",
          self.submit_timeout
        );
        Err(AppError::Timeout(self.submit_timeout))
      },
    }
  }
}

/// Schema failures keep their shape; everything else becomes a store error.
fn classify_store_error(err: AppError) -> AppError {
  match err {
    AppError::SchemaValidation(_) | AppError::Store(_) => err,
    other => AppError::Store(other.to_string()),
  }
}
