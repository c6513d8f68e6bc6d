pub mod json_order_store;

pub use json_order_store::{JsonOrderStore, StoreError};
