use actix_cors::Cors;
use actix_web::http::header;

use crate::config::config::CorsSetting;

/// Requests whose `Origin` is outside the allow-list are rejected by the
/// middleware before reaching any handler.
pub fn lamaran_cors(setting: &CorsSetting) -> Cors {
  let cors = match setting {
    CorsSetting::AnyOrigin => Cors::default().allow_any_origin(),
    CorsSetting::AllowList(origins) => origins
      .iter()
      .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin)),
  };

  cors
    .supports_credentials()
    .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
    .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE])
    .max_age(3600)
}
