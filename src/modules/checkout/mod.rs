pub mod controllers;
pub mod services;

pub use controllers::configure;
pub use services::CheckoutService;
