use serde::{Deserialize, Serialize};

use crate::config::PaymentConfig;
use crate::core::Currency;
use crate::modules::orders::Order;

/// Money as the gateway expects it: a fixed-scale decimal string plus currency
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Amount {
    pub value: String,
    pub currency: Currency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfirmationType {
    Redirect,
}

#[derive(Debug, Clone, Serialize)]
pub struct Confirmation {
    #[serde(rename = "type")]
    pub kind: ConfirmationType,
    pub return_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Customer {
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReceiptItem {
    pub description: String,
    pub quantity: String,
    pub amount: Amount,
    pub vat_code: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct Receipt {
    pub customer: Customer,
    pub items: Vec<ReceiptItem>,
}

/// Body of `POST /payments`
#[derive(Debug, Clone, Serialize)]
pub struct CreatePaymentRequest {
    pub amount: Amount,
    pub capture: bool,
    pub description: String,
    pub confirmation: Confirmation,
    pub receipt: Receipt,
}

impl CreatePaymentRequest {
    /// Single-step captured payment for one order, with a one-line receipt
    /// mirroring the top-level amount.
    pub fn for_order(order: &Order, payment: &PaymentConfig) -> Self {
        let amount = Amount {
            value: payment.currency.format_amount(payment.amount),
            currency: payment.currency,
        };

        Self {
            amount: amount.clone(),
            capture: true,
            description: payment.description.clone(),
            confirmation: Confirmation {
                kind: ConfirmationType::Redirect,
                return_url: payment.return_url.clone(),
            },
            receipt: Receipt {
                customer: Customer {
                    email: order.email.clone(),
                    phone: order.phone.clone(),
                },
                items: vec![ReceiptItem {
                    description: payment.description.clone(),
                    quantity: "1.00".to_string(),
                    amount,
                    vat_code: payment.vat_code,
                }],
            },
        }
    }
}

/// Fields read from a successful `POST /payments` response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePaymentResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub confirmation: Option<ConfirmationResponse>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfirmationResponse {
    #[serde(default)]
    pub confirmation_url: Option<String>,
}

/// Error object returned with non-2xx statuses
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub description: Option<String>,
}
