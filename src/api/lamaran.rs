use crate::biz::lamaran::validate_lamaran;
use crate::state::AppState;
use actix_web::http::StatusCode;
use actix_web::web::{Bytes, Data};
use actix_web::{web, HttpMessage, HttpRequest, HttpResponse, Scope};
use app_error::AppError;
use serde_json::map::Entry;
use serde_json::{Map, Value};
use shared_entity::dto::lamaran_dto::LAMARAN_SAVED_MESSAGE;
use shared_entity::response::AppResponse;
use tracing::debug;

pub fn lamaran_scope(prefix: &str) -> Scope {
  web::scope(&format!("{}/submit-lamaran", prefix))
    .service(web::resource("").route(web::post().to(submit_lamaran_handler)))
}

#[tracing::instrument(skip(req, state, body), err)]
async fn submit_lamaran_handler(
  req: HttpRequest,
  body: Bytes,
  state: Data<AppState>,
) -> Result<HttpResponse, AppError> {
  debug!(
    "Received submission of {} bytes ({})",
    body.len(),
    req.content_type()
  );
  let payload = parse_body(req.content_type(), &body)?;
  let params = validate_lamaran(payload.as_ref())?;
  let lamaran = state.lamaran_writer.submit(params).await?;
  Ok(
    AppResponse::Ok()
      .with_message(LAMARAN_SAVED_MESSAGE)
      .with_data(lamaran)
      .into_http_response(StatusCode::CREATED),
  )
}

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Decodes a submission body according to its content type: HTML form
/// bodies are url-decoded, everything else is read as JSON. A blank body
/// yields `None`, which validation treats as empty.
pub fn parse_body(content_type: &str, body: &[u8]) -> Result<Option<Value>, AppError> {
  if body.iter().all(u8::is_ascii_whitespace) {
    return Ok(None);
  }
  if content_type.eq_ignore_ascii_case(FORM_CONTENT_TYPE) {
    return parse_form(body).map(Some);
  }
  serde_json::from_slice(body)
    .map(Some)
    .map_err(|err| AppError::InvalidRequest(format!("malformed JSON body: {}", err)))
}

/// A key sent more than once becomes an array of its values.
fn parse_form(body: &[u8]) -> Result<Value, AppError> {
  let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(body)
    .map_err(|err| AppError::InvalidRequest(format!("malformed form body: {}", err)))?;

  let mut document = Map::new();
  for (key, value) in pairs {
    match document.entry(key) {
      Entry::Vacant(entry) => {
        entry.insert(Value::String(value));
      },
      Entry::Occupied(mut entry) => match entry.get_mut() {
        Value::Array(values) => values.push(Value::String(value)),
        existing => {
          let first = existing.take();
          *existing = Value::Array(vec![first, Value::String(value)]);
        },
      },
    }
  }
  Ok(Value::Object(document))
}
