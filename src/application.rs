use actix_web::{dev::Server, web, web::Data, App, HttpServer};
use anyhow::Error;
use database::connection::ConnectionInfo;
use database::lamaran::PgLamaranStore;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_actix_web::TracingLogger;

use crate::api::{health_scope, lamaran_scope};
use crate::config::config::{Config, DatabaseSetting};
use crate::middleware::cors_mw::lamaran_cors;
use crate::middleware::request_id::RequestIdMiddleware;
use crate::state::AppState;

pub struct Application {
  port: u16,
  server: Server,
}

impl Application {
  pub async fn build(config: Config, state: AppState) -> Result<Self, Error> {
    let address = format!("{}:{}", config.application.host, config.application.port);
    let listener = TcpListener::bind(&address)?;
    let port = listener.local_addr()?.port();
    info!("Server started at {}", listener.local_addr()?);
    info!(
      "Submit endpoint: {}/submit-lamaran",
      config.application.route_prefix
    );
    let server = run(listener, state)?;
    Ok(Self { port, server })
  }

  pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
    self.server.await
  }

  pub fn port(&self) -> u16 {
    self.port
  }
}

pub fn run(listener: TcpListener, state: AppState) -> Result<Server, Error> {
  let setting = state.config.application.clone();
  let server = HttpServer::new(move || {
    App::new()
      .wrap(lamaran_cors(&setting.cors))
      .wrap(RequestIdMiddleware)
      .wrap(TracingLogger::default())
      .app_data(web::PayloadConfig::new(setting.body_limit))
      .app_data(Data::new(state.clone()))
      .service(health_scope(&setting.route_prefix))
      .service(lamaran_scope(&setting.route_prefix))
  })
  .listen(listener)?
  .run();
  Ok(server)
}

/// Creates the process-wide store. The pool connects lazily, so this succeeds
/// even when the database is down; the store keeps retrying in the background.
pub async fn init_state(config: &Config) -> Result<AppState, Error> {
  let options = config.db_settings.pg_connect_options()?;
  let pg_pool = get_connection_pool(&config.db_settings)?;
  let info = ConnectionInfo {
    host: Some(options.get_host().to_string()),
    database_name: options.get_database().map(ToString::to_string),
  };
  let store = PgLamaranStore::new(pg_pool, info, config.db_settings.retry_interval);
  Ok(AppState::new(config.clone(), Arc::new(store)))
}

fn get_connection_pool(setting: &DatabaseSetting) -> Result<PgPool, Error> {
  info!("Connecting to postgres database with setting: {}", setting);
  let pg_pool = PgPoolOptions::new()
    .max_connections(setting.max_connections)
    .acquire_timeout(Duration::from_secs(5))
    .max_lifetime(Duration::from_secs(30 * 60))
    .idle_timeout(Duration::from_secs(30))
    .connect_lazy_with(setting.pg_connect_options()?);
  Ok(pg_pool)
}
