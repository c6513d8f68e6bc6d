use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::{AppError, Result};

pub const MISSING_CONTACT_MESSAGE: &str = "Email and phone are required";

/// A submitted checkout, as persisted in the order document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub email: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Stamp a validated checkout request with the current time
    pub fn new(request: CheckoutRequest) -> Self {
        Self {
            email: request.email,
            phone: request.phone,
            created_at: Utc::now(),
        }
    }
}

/// Contact details extracted from a checkout body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRequest {
    pub email: String,
    pub phone: String,
}

impl CheckoutRequest {
    /// Extract trimmed `email` and `phone` strings from a JSON body.
    ///
    /// Non-string values and non-object bodies count as missing fields.
    pub fn from_json(payload: &Value) -> Result<Self> {
        let field = |name: &str| {
            payload
                .get(name)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };

        match (field("email"), field("phone")) {
            (Some(email), Some(phone)) => Ok(Self { email, phone }),
            _ => Err(AppError::validation(MISSING_CONTACT_MESSAGE)),
        }
    }
}
