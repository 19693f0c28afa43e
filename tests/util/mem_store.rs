use app_error::AppError;
use async_trait::async_trait;
use database::connection::{ConnectionInfo, ConnectionStatus};
use database::lamaran::{new_lamaran_record, LamaranStore};
use database_entity::dto::{AFLamaran, LamaranParams};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use uuid::Uuid;

/// In-memory [LamaranStore] whose latency, failures and reported connection
/// status can be scripted per test.
pub struct MemLamaranStore {
  delay: Duration,
  failure: Option<String>,
  status: ConnectionStatus,
  records: Mutex<HashMap<Uuid, AFLamaran>>,
}

impl Default for MemLamaranStore {
  fn default() -> Self {
    Self {
      delay: Duration::ZERO,
      failure: None,
      status: ConnectionStatus::Connected,
      records: Mutex::new(HashMap::new()),
    }
  }
}

impl MemLamaranStore {
  pub fn with_delay(mut self, delay: Duration) -> Self {
    self.delay = delay;
    self
  }

  pub fn with_failure(mut self, message: &str) -> Self {
    self.failure = Some(message.to_string());
    self
  }

  pub fn with_status(mut self, status: ConnectionStatus) -> Self {
    self.status = status;
    self
  }

  pub fn len(&self) -> usize {
    self.records.lock().unwrap().len()
  }

  pub fn get(&self, id: &Uuid) -> Option<AFLamaran> {
    self.records.lock().unwrap().get(id).cloned()
  }
}

#[async_trait]
impl LamaranStore for MemLamaranStore {
  async fn insert_lamaran(&self, params: LamaranParams) -> Result<AFLamaran, AppError> {
    tokio::time::sleep(self.delay).await;
    if let Some(message) = &self.failure {
      return Err(AppError::Store(message.clone()));
    }
    params.check_required()?;
    let lamaran = new_lamaran_record(params);
    self
      .records
      .lock()
      .unwrap()
      .insert(lamaran.id, lamaran.clone());
    Ok(lamaran)
  }

  async fn select_lamaran(&self, lamaran_id: &Uuid) -> Result<Option<AFLamaran>, AppError> {
    Ok(self.get(lamaran_id))
  }

  fn connection_status(&self) -> ConnectionStatus {
    self.status
  }

  fn connection_info(&self) -> ConnectionInfo {
    ConnectionInfo {
      host: Some("memory".to_string()),
      database_name: Some("lamaran_test".to_string()),
    }
  }
}
