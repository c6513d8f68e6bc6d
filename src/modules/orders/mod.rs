// Orders module

pub mod models;
pub mod repositories;

pub use models::{CheckoutRequest, Order, MISSING_CONTACT_MESSAGE};
pub use repositories::{JsonOrderStore, StoreError};
