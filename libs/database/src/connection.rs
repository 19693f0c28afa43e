use crate::lamaran::lamaran_db_ops::ping;
use crate::lamaran::LamaranTable;
use app_error::AppError;
use serde::Serialize;
use sqlx::PgPool;
use std::fmt::Display;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
  Connecting,
  Connected,
  Disconnected,
}

impl ConnectionStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      ConnectionStatus::Connecting => "connecting",
      ConnectionStatus::Connected => "connected",
      ConnectionStatus::Disconnected => "disconnected",
    }
  }
}

impl Display for ConnectionStatus {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Where the store points at, reported by the health endpoint.
#[derive(Debug, Clone, Default)]
pub struct ConnectionInfo {
  pub host: Option<String>,
  pub database_name: Option<String>,
}

/// Spawns a task that keeps probing the pool, creating the lamaran table on the
/// first successful connection unless a store call already did. It retries
/// forever with a fixed interval and stops once every receiver of the returned
/// channel is dropped.
pub fn spawn_keep_connected(
  pg_pool: PgPool,
  table: LamaranTable,
  retry_interval: Duration,
) -> watch::Receiver<ConnectionStatus> {
  let (status_tx, status_rx) = watch::channel(ConnectionStatus::Connecting);
  tokio::spawn(keep_connected(pg_pool, table, retry_interval, status_tx));
  status_rx
}

async fn keep_connected(
  pg_pool: PgPool,
  table: LamaranTable,
  retry_interval: Duration,
  status_tx: watch::Sender<ConnectionStatus>,
) {
  while !status_tx.is_closed() {
    let result = check_connection(&pg_pool, &table).await;
    match result {
      Ok(()) => {
        let prev = status_tx.send_replace(ConnectionStatus::Connected);
        if prev != ConnectionStatus::Connected {
          info!("Connected to postgres");
        }
      },
      Err(err) => {
        let prev = status_tx.send_replace(ConnectionStatus::Disconnected);
        if prev == ConnectionStatus::Connected {
          warn!("Postgres disconnected: {}", err);
        } else {
          error!("Postgres connection error: {}", err);
        }
        info!("Retrying postgres connection in {:?}", retry_interval);
      },
    }
    sleep(retry_interval).await;
  }
}

async fn check_connection(pg_pool: &PgPool, table: &LamaranTable) -> Result<(), AppError> {
  ping(pg_pool).await?;
  table.ensure(pg_pool).await?;
  Ok(())
}
