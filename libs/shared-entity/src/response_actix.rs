use crate::response::AppResponse;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;

impl<T> AppResponse<T>
where
  T: Serialize,
{
  pub fn into_http_response(self, status: StatusCode) -> HttpResponse {
    HttpResponse::build(status).json(self)
  }
}
