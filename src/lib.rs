//! Checkout intake service library
//!
//! Accepts a checkout request, records the order locally and opens a
//! YooKassa payment for it, returning the payer's redirect URL.

pub mod app;
pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;

// Re-export commonly used types
pub use app::create_app;
pub use modules::checkout;
pub use modules::gateways;
pub use modules::orders;
