pub mod models;
pub mod services;

pub use services::{PaymentGateway, PaymentResponse, YooKassaClient};
