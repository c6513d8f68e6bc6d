use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::gateway_trait::{PaymentGateway, PaymentResponse};
use crate::config::{GatewayConfig, PaymentConfig};
use crate::core::{AppError, Result};
use crate::modules::gateways::models::{ApiErrorBody, CreatePaymentRequest, CreatePaymentResponse};
use crate::modules::orders::Order;

/// Header YooKassa uses to deduplicate retried requests
pub const IDEMPOTENCE_KEY_HEADER: &str = "Idempotence-Key";

/// YooKassa payment gateway client
///
/// API Documentation: https://yookassa.ru/developers/api#create_payment
///
/// Transient failures (connect errors, timeouts, 5xx, 429) are retried with
/// exponential backoff. Retries replay the same `Idempotence-Key`, so the
/// gateway treats them as one payment.
pub struct YooKassaClient {
    client: ClientWithMiddleware,
    gateway: GatewayConfig,
    payment: PaymentConfig,
}

impl YooKassaClient {
    /// Build the HTTPS client; fails with `UnsupportedRuntime` when no TLS
    /// backend can be initialised.
    pub fn new(gateway: GatewayConfig, payment: PaymentConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(gateway.timeout)
            .user_agent(concat!("checkout-intake/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::UnsupportedRuntime(e.to_string()))?;

        let retry_policy = ExponentialBackoff::builder()
            .retry_bounds(Duration::from_millis(200), Duration::from_secs(2))
            .build_with_max_retries(gateway.max_retries);

        let client = ClientBuilder::new(http)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self {
            client,
            gateway,
            payment,
        })
    }

    fn payments_url(&self) -> String {
        format!("{}/payments", self.gateway.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl PaymentGateway for YooKassaClient {
    async fn create_payment(&self, order: &Order) -> Result<PaymentResponse> {
        let (shop_id, secret_key) = self.gateway.credentials()?;

        let request = CreatePaymentRequest::for_order(order, &self.payment);
        let body = serde_json::to_vec(&request)
            .map_err(|e| AppError::gateway(format!("failed to encode payment request: {e}")))?;

        // A new key per checkout; retries below reuse it.
        let idempotence_key = Uuid::new_v4().to_string();

        debug!(
            url = %self.payments_url(),
            idempotence_key = %idempotence_key,
            amount = %request.amount.value,
            currency = %request.amount.currency,
            "Creating YooKassa payment"
        );

        let response = self
            .client
            .post(self.payments_url())
            .basic_auth(shop_id, Some(secret_key))
            .header(IDEMPOTENCE_KEY_HEADER, idempotence_key.as_str())
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| transport_error(&e))?;

        let status = response.status();
        let response_body = response
            .text()
            .await
            .map_err(|e| AppError::gateway(format!("failed to read response: {e}")))?;

        if !status.is_success() {
            let description = describe_failure(status, &response_body);
            warn!(
                status = status.as_u16(),
                idempotence_key = %idempotence_key,
                description = %description,
                "YooKassa rejected payment"
            );
            return Err(AppError::Gateway(description));
        }

        let created: CreatePaymentResponse = serde_json::from_str(&response_body)
            .map_err(|e| AppError::gateway(format!("failed to parse response: {e}")))?;

        let payment = PaymentResponse {
            payment_id: created.id,
            confirmation_url: created.confirmation.and_then(|c| c.confirmation_url),
        };

        info!(
            payment_id = payment.payment_id.as_deref().unwrap_or("<none>"),
            idempotence_key = %idempotence_key,
            "YooKassa payment created"
        );

        Ok(payment)
    }

    fn name(&self) -> &str {
        "yookassa"
    }
}

/// Gateway's `description` field, or the HTTP status text when the body has none
fn describe_failure(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|error| error.description)
        .filter(|description| !description.is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| status.as_u16().to_string())
        })
}

fn transport_error(err: &reqwest_middleware::Error) -> AppError {
    match err {
        reqwest_middleware::Error::Reqwest(e) if e.is_timeout() => {
            AppError::gateway("request timed out")
        }
        reqwest_middleware::Error::Reqwest(e) if e.is_connect() => {
            AppError::gateway(format!("gateway unreachable: {e}"))
        }
        _ => AppError::gateway(format!("request failed: {err}")),
    }
}
