use lamaran_service::application::{init_state, Application};
use lamaran_service::config::config::get_configuration;
use lamaran_service::telemetry::{init_subscriber, make_filters};
use tracing::info;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  // Load .env before reading any configuration from the environment.
  let dotenv = dotenvy::dotenv();

  let level = std::env::var("RUST_LOG").unwrap_or("info".to_string());
  println!("Lamaran service with RUST_LOG={}", level);
  let conf =
    get_configuration().map_err(|e| anyhow::anyhow!("Failed to read configuration: {}", e))?;
  init_subscriber(&conf.app_env, make_filters(&level))?;

  match dotenv {
    Ok(path) => info!("Loaded environment from {}", path.display()),
    Err(err) => info!("No .env file loaded: {}", err),
  }
  info!("Running in {} environment", conf.app_env.as_str());

  let state = init_state(&conf)
    .await
    .map_err(|e| anyhow::anyhow!("Failed to initialize application state: {}", e))?;
  let application = Application::build(conf, state).await?;
  application.run_until_stopped().await?;

  Ok(())
}
