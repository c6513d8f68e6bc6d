use std::sync::Arc;

use tracing::{error, info};

use crate::core::traits::Repository;
use crate::core::Result;
use crate::modules::gateways::{PaymentGateway, PaymentResponse};
use crate::modules::orders::{CheckoutRequest, Order};

/// Records an order, then opens a payment for it
pub struct CheckoutService {
    orders: Arc<dyn Repository<Order>>,
    gateway: Arc<dyn PaymentGateway>,
}

impl CheckoutService {
    pub fn new(orders: Arc<dyn Repository<Order>>, gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { orders, gateway }
    }

    /// The order is persisted before the gateway is called, so a failed
    /// payment still leaves a record of the attempt.
    pub async fn checkout(&self, request: CheckoutRequest) -> Result<PaymentResponse> {
        let order = Order::new(request);
        self.orders.append(order.clone()).await?;

        info!(
            created_at = %order.created_at.to_rfc3339(),
            gateway = %self.gateway.name(),
            "Order recorded, creating payment"
        );

        match self.gateway.create_payment(&order).await {
            Ok(payment) => Ok(payment),
            Err(e) => {
                error!(
                    gateway = %self.gateway.name(),
                    error = %e,
                    "Failed to create payment"
                );
                Err(e)
            }
        }
    }
}
