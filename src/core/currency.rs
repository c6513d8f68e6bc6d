use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Currencies accepted by the payment gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Russian Ruble
    RUB,
    /// US Dollar
    USD,
    /// Euro
    EUR,
}

impl Currency {
    /// Returns the decimal scale the gateway expects for this currency
    pub fn scale(&self) -> u32 {
        match self {
            Currency::RUB | Currency::USD | Currency::EUR => 2,
        }
    }

    /// Rounds a decimal value to the appropriate scale for this currency
    pub fn round(&self, amount: Decimal) -> Decimal {
        amount.round_dp(self.scale())
    }

    /// Validates that a price is positive and fits the currency scale
    pub fn validate_amount(&self, amount: Decimal) -> Result<(), String> {
        if amount <= Decimal::ZERO {
            return Err(format!("{} amount must be greater than zero", self));
        }

        if amount.normalize().scale() > self.scale() {
            return Err(format!(
                "{} amounts must have at most {} decimal places, got {}",
                self,
                self.scale(),
                amount
            ));
        }

        Ok(())
    }

    /// Formats an amount as the gateway's decimal string, e.g. `1990.00`
    pub fn format_amount(&self, amount: Decimal) -> String {
        format!(
            "{:.width$}",
            self.round(amount),
            width = self.scale() as usize
        )
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Currency::RUB => write!(f, "RUB"),
            Currency::USD => write!(f, "USD"),
            Currency::EUR => write!(f, "EUR"),
        }
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "RUB" => Ok(Currency::RUB),
            "USD" => Ok(Currency::USD),
            "EUR" => Ok(Currency::EUR),
            _ => Err(format!("Invalid currency: {}", s)),
        }
    }
}
