pub mod order;

pub use order::{CheckoutRequest, Order, MISSING_CONTACT_MESSAGE};
