use actix_web::http::{header, Method, StatusCode};
use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::Value;

use crate::core::error::AppError;
use crate::core::json_response;
use crate::modules::checkout::services::CheckoutService;
use crate::modules::orders::CheckoutRequest;

pub const CREATE_PAYMENT_PATH: &str = "/api/create-payment";

/// Create an order and a payment for it
/// POST /api/create-payment
pub async fn create_payment(
    service: web::Data<CheckoutService>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let payload = parse_body(&body)?;
    let request = CheckoutRequest::from_json(&payload)?;

    let payment = service.checkout(request).await?;

    Ok(json_response(StatusCode::OK, &payment))
}

/// CORS preflight
/// OPTIONS on any path
pub async fn preflight() -> HttpResponse {
    HttpResponse::NoContent()
        .insert_header((header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"))
        .insert_header((header::ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"))
        .finish()
}

/// Everything that is not `POST /api/create-payment`
pub async fn fallback(req: HttpRequest) -> Result<HttpResponse, AppError> {
    if req.method() == Method::OPTIONS {
        return Ok(preflight().await);
    }

    Err(AppError::NotFound)
}

// Empty body reads as `{}`.
fn parse_body(body: &[u8]) -> Result<Value, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Default::default()));
    }

    serde_json::from_slice(body).map_err(AppError::MalformedRequest)
}

/// Configure checkout routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource(CREATE_PAYMENT_PATH)
            .route(web::post().to(create_payment))
            .default_service(web::to(fallback)),
    );
}
