// Test Application Helpers
//
// Builds the real application (routes, middleware, JSON order store,
// YooKassa client) against a temporary data directory and a fake gateway.

use actix_web::web;
use checkout_intake::config::Config;
use checkout_intake::modules::checkout::CheckoutService;
use checkout_intake::modules::gateways::YooKassaClient;
use checkout_intake::modules::orders::JsonOrderStore;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

use super::gateway_sandbox::FakeGateway;

pub const TEST_SHOP_ID: &str = "506751";
pub const TEST_SECRET_KEY: &str = "test_secret_key";

/// Everything one test needs; the data directory lives as long as this does
pub struct TestContext {
    pub data_dir: TempDir,
    pub store: Arc<JsonOrderStore>,
    pub gateway: FakeGateway,
    pub config: Config,
}

impl TestContext {
    /// Context with credentials set and default pricing
    pub async fn new() -> Self {
        Self::with_env(&[]).await
    }

    /// Context with extra or overriding environment variables
    pub async fn with_env(overrides: &[(&str, &str)]) -> Self {
        let gateway = FakeGateway::start();
        let data_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = test_config(&gateway.base_url(), data_dir.path(), overrides);

        let store = Arc::new(JsonOrderStore::new(config.storage.orders_path()));
        store
            .ensure_ready()
            .await
            .expect("Failed to prepare order store");

        Self {
            data_dir,
            store,
            gateway,
            config,
        }
    }

    /// Checkout service wired to the fake gateway through the real client
    pub fn service(&self) -> web::Data<CheckoutService> {
        let client = YooKassaClient::new(self.config.gateway.clone(), self.config.payment.clone())
            .expect("Failed to build YooKassa client");
        web::Data::new(CheckoutService::new(self.store.clone(), Arc::new(client)))
    }
}

/// Resolve a `Config` from a fixed variable set instead of the process environment
pub fn test_config(gateway_url: &str, data_dir: &Path, overrides: &[(&str, &str)]) -> Config {
    let mut vars: HashMap<String, String> = HashMap::from([
        ("YOOKASSA_SHOP_ID".to_string(), TEST_SHOP_ID.to_string()),
        ("YOOKASSA_SECRET_KEY".to_string(), TEST_SECRET_KEY.to_string()),
        ("YOOKASSA_API_URL".to_string(), gateway_url.to_string()),
        ("YOOKASSA_TIMEOUT_SECS".to_string(), "5".to_string()),
        ("YOOKASSA_MAX_RETRIES".to_string(), "2".to_string()),
        ("DATA_DIR".to_string(), data_dir.display().to_string()),
        ("PRICE_AMOUNT".to_string(), "1990.00".to_string()),
        ("ORDER_DESCRIPTION".to_string(), "Consultation".to_string()),
        (
            "PAYMENT_RETURN_URL".to_string(),
            "https://shop.example/thank-you.html".to_string(),
        ),
    ]);
    for (key, value) in overrides {
        vars.insert(key.to_string(), value.to_string());
    }

    Config::from_lookup(move |key| vars.get(key).cloned()).expect("Invalid test configuration")
}
