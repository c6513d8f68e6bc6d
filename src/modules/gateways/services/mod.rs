pub mod gateway_trait;
pub mod yookassa;

pub use gateway_trait::{PaymentGateway, PaymentResponse};
pub use yookassa::{YooKassaClient, IDEMPOTENCE_KEY_HEADER};
