use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures_util::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;

use super::request_id::RequestIdValue;
use crate::core::AppError;

/// Logs every error response with full detail.
///
/// Callers only ever see the error's message; the variant, its source chain
/// and the request id end up in the server log.
pub struct ErrorLogger;

impl<S, B> Transform<S, ServiceRequest> for ErrorLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = ErrorLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ErrorLoggerMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct ErrorLoggerMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for ErrorLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let request_id = req
            .extensions()
            .get::<RequestIdValue>()
            .map(|id| id.0.clone())
            .unwrap_or_default();

        Box::pin(async move {
            let result = service.call(req).await;

            match &result {
                Ok(res) => {
                    if let Some(err) = res.response().error() {
                        log_error(&request_id, res.status().as_u16(), err);
                    }
                }
                Err(err) => {
                    tracing::error!(request_id = %request_id, error = ?err, "Request error");
                }
            }

            result
        })
    }
}

/// Server errors at error level with their debug form, client errors at debug
pub fn log_error(request_id: &str, status: u16, err: &Error) {
    let detail = match err.as_error::<AppError>() {
        Some(app_error) => format!("{app_error:?}"),
        None => format!("{err:?}"),
    };

    if status >= 500 {
        tracing::error!(
            request_id = %request_id,
            status,
            error = %err,
            detail = %detail,
            "Request failed"
        );
    } else {
        tracing::debug!(
            request_id = %request_id,
            status,
            error = %err,
            "Request rejected"
        );
    }
}
