use crate::connection::{spawn_keep_connected, ConnectionInfo, ConnectionStatus};
use crate::lamaran::lamaran_db_ops::{self, is_undefined_table, lamaran_error};
use app_error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use database_entity::dto::{AFLamaran, LamaranParams};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, OnceCell};
use tracing::warn;
use uuid::Uuid;

pub type DatabaseResult<T, E = AppError> = core::result::Result<T, E>;

/// Persistence for lamaran records.
///
/// Implementors own the connection lifecycle and enforce the lamaran schema on
/// their side: [LamaranStore::insert_lamaran] must either persist the whole
/// record and assign it an id, or persist nothing.
#[async_trait]
pub trait LamaranStore: Send + Sync + 'static {
  /// Writes a new record and returns it with the store-assigned id and
  /// creation time. Schema violations are reported as
  /// [AppError::SchemaValidation], everything else as [AppError::Store].
  async fn insert_lamaran(&self, params: LamaranParams) -> DatabaseResult<AFLamaran>;

  async fn select_lamaran(&self, lamaran_id: &Uuid) -> DatabaseResult<Option<AFLamaran>>;

  fn connection_status(&self) -> ConnectionStatus;

  fn connection_info(&self) -> ConnectionInfo;
}

/// [LamaranStore] backed by a lazily connected postgres pool.
///
/// The af_lamaran table is created by whichever comes first: the reconnect
/// task's first successful check or the first read/write through the store.
pub struct PgLamaranStore {
  pg_pool: PgPool,
  table: LamaranTable,
  status: watch::Receiver<ConnectionStatus>,
  info: ConnectionInfo,
}

impl PgLamaranStore {
  /// Must be called inside a tokio runtime: it spawns the reconnect task that
  /// keeps [LamaranStore::connection_status] up to date.
  pub fn new(pg_pool: PgPool, info: ConnectionInfo, retry_interval: Duration) -> Self {
    let table = LamaranTable::default();
    let status = spawn_keep_connected(pg_pool.clone(), table.clone(), retry_interval);
    Self {
      pg_pool,
      table,
      status,
      info,
    }
  }

  async fn insert_once(
    &self,
    lamaran_id: &Uuid,
    params: &LamaranParams,
  ) -> Result<AFLamaran, sqlx::Error> {
    self.table.ensure(&self.pg_pool).await?;
    lamaran_db_ops::insert_lamaran(&self.pg_pool, lamaran_id, params).await
  }
}

/// Tracks whether af_lamaran has been created through this pool. Shared
/// between the store and its reconnect task.
#[derive(Clone, Default)]
pub struct LamaranTable(Arc<OnceCell<()>>);

impl LamaranTable {
  /// Creates the table on the first call that reaches the database.
  /// Concurrent callers wait for that call instead of racing on the DDL.
  pub async fn ensure(&self, pg_pool: &PgPool) -> Result<(), sqlx::Error> {
    self
      .0
      .get_or_try_init(|| lamaran_db_ops::create_lamaran_table_if_not_exists(pg_pool))
      .await?;
    Ok(())
  }
}

#[async_trait]
impl LamaranStore for PgLamaranStore {
  async fn insert_lamaran(&self, params: LamaranParams) -> DatabaseResult<AFLamaran> {
    params.check_required()?;
    let lamaran_id = Uuid::new_v4();
    match self.insert_once(&lamaran_id, &params).await {
      Ok(lamaran) => Ok(lamaran),
      Err(err) if is_undefined_table(&err) => {
        warn!("af_lamaran is missing, recreating it");
        lamaran_db_ops::create_lamaran_table_if_not_exists(&self.pg_pool).await?;
        lamaran_db_ops::insert_lamaran(&self.pg_pool, &lamaran_id, &params)
          .await
          .map_err(lamaran_error)
      },
      Err(err) => Err(lamaran_error(err)),
    }
  }

  async fn select_lamaran(&self, lamaran_id: &Uuid) -> DatabaseResult<Option<AFLamaran>> {
    self.table.ensure(&self.pg_pool).await?;
    match lamaran_db_ops::select_lamaran(&self.pg_pool, lamaran_id).await {
      Err(err) if is_undefined_table(&err) => Ok(None),
      result => Ok(result?),
    }
  }

  fn connection_status(&self) -> ConnectionStatus {
    *self.status.borrow()
  }

  fn connection_info(&self) -> ConnectionInfo {
    self.info.clone()
  }
}

/// Builds the record a store returns for `params`, assigning a fresh id and
/// the current time. Useful for stores that do not generate these themselves.
pub fn new_lamaran_record(params: LamaranParams) -> AFLamaran {
  AFLamaran::from_params(Uuid::new_v4(), params, Utc::now())
}
