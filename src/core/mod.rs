pub mod currency;
pub mod error;
pub mod response;
pub mod traits;

pub use currency::Currency;
pub use error::{AppError, Result};
pub use response::{json_response, JSON_UTF8};
