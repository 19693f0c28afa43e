use crate::state::AppState;
use actix_web::web::{Data, Json};
use actix_web::{web, Scope};
use chrono::Utc;
use shared_entity::dto::health_dto::{HealthResponse, HEALTHY, UNKNOWN};

/// Always answers 200; the store state is reported in the body.
pub fn health_scope(prefix: &str) -> Scope {
  web::scope(&format!("{}/health", prefix))
    .service(web::resource("").route(web::get().to(health_handler)))
}

async fn health_handler(state: Data<AppState>) -> Json<HealthResponse> {
  let info = state.lamaran_store.connection_info();
  Json(HealthResponse {
    status: HEALTHY.to_string(),
    timestamp: Utc::now(),
    database: state.lamaran_store.connection_status().to_string(),
    db_host: info.host.unwrap_or_else(|| UNKNOWN.to_string()),
    db_name: info.database_name.unwrap_or_else(|| UNKNOWN.to_string()),
  })
}
