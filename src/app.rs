use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    http::header,
    middleware::DefaultHeaders,
    web, App,
};

use crate::middleware::{ErrorLogger, RequestId};
use crate::modules::checkout::{self, controllers::fallback, CheckoutService};

/// Application with every route and middleware the server runs with.
///
/// Every response, error or not, carries `Access-Control-Allow-Origin: *`.
pub fn create_app(
    service: web::Data<CheckoutService>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(service)
        .wrap(DefaultHeaders::new().add((header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")))
        .wrap(ErrorLogger)
        .wrap(RequestId)
        .configure(checkout::configure)
        .default_service(web::to(fallback))
}
