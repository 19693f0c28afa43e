use crate::biz::lamaran::LamaranWriter;
use crate::config::config::Config;
use database::lamaran::LamaranStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub config: Arc<Config>,
  pub lamaran_store: Arc<dyn LamaranStore>,
  pub lamaran_writer: LamaranWriter,
}

impl AppState {
  /// The store handle is shared by every worker for the whole lifetime of the
  /// process.
  pub fn new(config: Config, lamaran_store: Arc<dyn LamaranStore>) -> Self {
    let lamaran_writer =
      LamaranWriter::new(lamaran_store.clone(), config.lamaran.submit_timeout);
    Self {
      config: Arc::new(config),
      lamaran_store,
      lamaran_writer,
    }
  }
}
