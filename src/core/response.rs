use actix_web::{http::StatusCode, HttpResponse};
use serde::Serialize;

/// Content type carried by every JSON body this service sends
pub const JSON_UTF8: &str = "application/json; charset=utf-8";

/// Build a JSON response with an explicit UTF-8 charset
pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> HttpResponse {
    HttpResponse::build(status).content_type(JSON_UTF8).json(body)
}
