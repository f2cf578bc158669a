use super::ui;
use crate::core::config::DefaultsConfig;
use crate::core::conversion::{self, parse_amount};
use crate::core::format::{format_amount, format_rate_line};
use crate::core::{Conversion, CurrencyList, CurrencyListProvider, CurrencyPair, CurrencyRateProvider};
use anyhow::{Result, bail};
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

/// Inputs of a single conversion as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct ConvertRequest {
    pub amount: String,
    pub from: Option<String>,
    pub to: Option<String>,
    pub swap: bool,
}

/// Picks the currency pair for `request`. Explicit codes must be listed by
/// the provider; a default target that is not listed falls back to the
/// first listed code.
pub fn resolve_pair(
    currencies: &CurrencyList,
    request: &ConvertRequest,
    defaults: &DefaultsConfig,
) -> Result<CurrencyPair> {
    let from = request
        .from
        .as_deref()
        .unwrap_or(&defaults.from)
        .trim()
        .to_uppercase();
    if !currencies.contains(&from) {
        bail!("Unknown currency code: {from}");
    }

    let to = match request.to.as_deref() {
        Some(to) => {
            let to = to.trim().to_uppercase();
            if !currencies.contains(&to) {
                bail!("Unknown currency code: {to}");
            }
            to
        }
        None => {
            let preferred = defaults.to.trim().to_uppercase();
            let resolved = currencies.resolve_target(&preferred).to_string();
            if resolved != preferred {
                warn!(%preferred, %resolved, "Default target currency not offered");
            }
            resolved
        }
    };

    let pair = CurrencyPair::new(&from, &to);
    Ok(if request.swap { pair.swap() } else { pair })
}

/// Renders the result block shown after a conversion.
pub fn render_conversion(conversion: &Conversion, last_update: Option<DateTime<Utc>>) -> String {
    let mut output = format!("{}\n", ui::style_text("Result", ui::StyleType::Title));
    output.push_str(&format!(
        "{} {}\n",
        ui::style_text(&format_amount(conversion.value), ui::StyleType::Value),
        ui::style_text(&conversion.to, ui::StyleType::Label)
    ));
    output.push_str(&format_rate_line(
        &conversion.from,
        &conversion.to,
        conversion.rate,
    ));

    if let Some(updated) = last_update {
        output.push('\n');
        output.push_str(&ui::style_text(
            &format!("Rates updated {}", updated.format("%Y-%m-%d %H:%M UTC")),
            ui::StyleType::Subtle,
        ));
    }
    output
}

pub async fn run(
    list_provider: &(dyn CurrencyListProvider + Send + Sync),
    rate_provider: &(dyn CurrencyRateProvider + Send + Sync),
    request: &ConvertRequest,
    defaults: &DefaultsConfig,
) -> Result<()> {
    let amount = parse_amount(&request.amount)?;

    let pb = ui::new_spinner("Loading currencies...");
    let currencies = list_provider.fetch_currencies().await;
    pb.finish_and_clear();
    let currencies = currencies?;
    debug!(count = currencies.len(), "Loaded currency list");

    let pair = resolve_pair(&currencies, request, defaults)?;

    let pb = ui::new_spinner(&format!("Converting {} to {}...", pair.from, pair.to));
    let conversion = conversion::convert(amount, &pair, rate_provider).await;
    pb.finish_and_clear();
    let conversion = conversion?;

    let last_update = rate_provider.last_updated(&pair.from).await;
    println!("{}", render_conversion(&conversion, last_update));
    Ok(())
}
