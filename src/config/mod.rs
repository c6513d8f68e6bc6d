use crate::core::{AppError, Currency, Result};
use rust_decimal::Decimal;
use std::env;
use std::str::FromStr;
use std::time::Duration;

pub mod server;
pub mod storage;

pub use server::ServerConfig;
pub use storage::StorageConfig;

pub const SHOP_ID_VAR: &str = "YOOKASSA_SHOP_ID";
pub const SECRET_KEY_VAR: &str = "YOOKASSA_SECRET_KEY";

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub gateway: GatewayConfig,
    pub payment: PaymentConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_format: LogFormat,
}

/// YooKassa connection settings
#[derive(Clone)]
pub struct GatewayConfig {
    pub shop_id: Option<String>,
    pub secret_key: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
    pub max_retries: u32,
}

/// What a checkout charges for
#[derive(Debug, Clone)]
pub struct PaymentConfig {
    pub amount: Decimal,
    pub currency: Currency,
    pub description: String,
    pub vat_code: u8,
    pub return_url: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolve configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_format = match var(&lookup, "LOG_FORMAT").as_deref() {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(AppError::configuration(format!(
                    "Invalid LOG_FORMAT: {other} (expected pretty or json)"
                )))
            }
        };

        Ok(Config {
            app: AppConfig { log_format },
            server: ServerConfig::from_lookup(&lookup)?,
            storage: StorageConfig::from_lookup(&lookup),
            gateway: GatewayConfig {
                shop_id: var(&lookup, SHOP_ID_VAR),
                secret_key: var(&lookup, SECRET_KEY_VAR),
                base_url: var(&lookup, "YOOKASSA_API_URL")
                    .unwrap_or_else(|| "https://api.yookassa.ru/v3".to_string()),
                timeout: Duration::from_secs(parse_var(&lookup, "YOOKASSA_TIMEOUT_SECS", 15)?),
                max_retries: parse_var(&lookup, "YOOKASSA_MAX_RETRIES", 2)?,
            },
            payment: PaymentConfig {
                amount: parse_var(&lookup, "PRICE_AMOUNT", Decimal::new(199000, 2))?,
                currency: parse_var(&lookup, "PRICE_CURRENCY", Currency::RUB)?,
                description: var(&lookup, "ORDER_DESCRIPTION")
                    .unwrap_or_else(|| "Order payment".to_string()),
                vat_code: parse_var(&lookup, "VAT_CODE", 1)?,
                return_url: var(&lookup, "PAYMENT_RETURN_URL")
                    .unwrap_or_else(|| "http://localhost:3000/thank-you.html".to_string()),
            },
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.gateway.credentials()?;

        if self.gateway.timeout.is_zero() {
            return Err(AppError::configuration(
                "YOOKASSA_TIMEOUT_SECS must be greater than 0",
            ));
        }

        self.payment
            .currency
            .validate_amount(self.payment.amount)
            .map_err(|e| AppError::configuration(format!("Invalid PRICE_AMOUNT: {e}")))?;

        // YooKassa receipt VAT codes
        if !(1..=12).contains(&self.payment.vat_code) {
            return Err(AppError::configuration(format!(
                "VAT_CODE must be between 1 and 12, got {}",
                self.payment.vat_code
            )));
        }

        Ok(())
    }
}

impl GatewayConfig {
    /// Shop identifier and secret key, both required to call the gateway
    pub fn credentials(&self) -> Result<(&str, &str)> {
        match (self.shop_id.as_deref(), self.secret_key.as_deref()) {
            (Some(shop_id), Some(secret_key)) => Ok((shop_id, secret_key)),
            _ => Err(AppError::configuration(format!(
                "{SHOP_ID_VAR} and {SECRET_KEY_VAR} must be set"
            ))),
        }
    }
}

// Keeps the secret out of logs.
impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("shop_id", &self.shop_id)
            .field("secret_key", &self.secret_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

/// Trimmed, non-empty value of `key`
pub(crate) fn var<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub(crate) fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match var(lookup, key) {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|_| AppError::configuration(format!("Invalid {key}: {raw}"))),
    }
}
