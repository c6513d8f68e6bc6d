use crate::core::Result;
use crate::modules::orders::Order;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Payment gateway able to open a payment for a recorded order
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a payment and return where the payer should be redirected
    async fn create_payment(&self, order: &Order) -> Result<PaymentResponse>;

    /// Get gateway name
    fn name(&self) -> &str;
}

/// Payment created by the gateway.
///
/// Fields the gateway omitted stay absent and are left out of the JSON body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    /// Gateway-assigned payment identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,

    /// Redirect URL where the payer completes payment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmation_url: Option<String>,
}
