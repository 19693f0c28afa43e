use tracing::subscriber::set_global_default;
use tracing::Subscriber;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter};

use crate::config::config::Environment;

/// Targets that follow the configured log level.
const LOG_TARGETS: [&str; 6] = [
  "actix_web",
  "tracing_actix_web",
  "lamaran_service",
  "database",
  "app_error",
  "sqlx",
];

/// Builds one filter directive per crate we care about.
pub fn make_filters(level: &str) -> Vec<String> {
  LOG_TARGETS
    .iter()
    .map(|target| format!("{}={}", target, level))
    .collect()
}

/// Register a subscriber as global default to process span data.
///
/// It should only be called once!
pub fn init_subscriber(app_env: &Environment, filters: Vec<String>) -> Result<(), anyhow::Error> {
  let env_filter = if filters.is_empty() {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
  } else {
    EnvFilter::new(filters.join(","))
  };

  match app_env {
    Environment::Local => {
      let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_thread_ids(false)
        .with_ansi(true)
        .with_target(false)
        .with_file(false)
        .pretty()
        .finish()
        .with(env_filter);
      set_global_default(subscriber)?;
    },
    Environment::Production => {
      set_global_default(json_subscriber(env_filter, std::io::stdout))?;
    },
  }
  Ok(())
}

/// Bunyan JSON lines written to `sink`. The formatting layer is the only one
/// writing, so every event appears once.
fn json_subscriber<W>(env_filter: EnvFilter, sink: W) -> impl Subscriber + Send + Sync
where
  W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
  let formatting_layer = BunyanFormattingLayer::new("lamaran_service".to_string(), sink);
  tracing_subscriber::registry()
    .with(env_filter)
    .with(JsonStorageLayer)
    .with(formatting_layer)
}
