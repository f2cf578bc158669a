//! Amount parsing and currency conversion

use super::currency::CurrencyRateProvider;
use anyhow::{Result, bail};
use tracing::{debug, instrument};

/// Parses user input into a non-negative finite amount. The whole input
/// must be a number; trailing text or grouping commas are rejected.
pub fn parse_amount(text: &str) -> Result<f64> {
    match text.trim().parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount >= 0.0 => Ok(amount),
        _ => bail!("Invalid amount: Please enter a valid positive number"),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyPair {
    pub from: String,
    pub to: String,
}

impl CurrencyPair {
    pub fn new(from: &str, to: &str) -> Self {
        Self {
            from: from.trim().to_uppercase(),
            to: to.trim().to_uppercase(),
        }
    }

    pub fn swap(self) -> Self {
        Self {
            from: self.to,
            to: self.from,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub amount: f64,
    pub from: String,
    pub to: String,
    pub rate: f64,
    pub value: f64,
}

#[instrument(skip(provider))]
pub async fn convert(
    amount: f64,
    pair: &CurrencyPair,
    provider: &(dyn CurrencyRateProvider + Send + Sync),
) -> Result<Conversion> {
    let rate = provider.get_rate(&pair.from, &pair.to).await?;
    let value = amount * rate;
    debug!(rate, value, "Converted amount");

    Ok(Conversion {
        amount,
        from: pair.from.clone(),
        to: pair.to.clone(),
        rate,
        value,
    })
}
