//! Currency list and rate abstractions

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;

#[async_trait]
pub trait CurrencyRateProvider: Send + Sync {
    async fn get_rate(&self, from: &str, to: &str) -> Result<f64>;

    /// When the provider last refreshed rates for `base`, if it says so.
    async fn last_updated(&self, _base: &str) -> Option<DateTime<Utc>> {
        None
    }
}

#[async_trait]
pub trait CurrencyListProvider: Send + Sync {
    async fn fetch_currencies(&self) -> Result<CurrencyList>;
}

/// Currencies offered by a provider, keyed by ISO 4217 code, in the order
/// the provider sent them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurrencyList {
    names: IndexMap<String, String>,
}

impl CurrencyList {
    /// Builds a list from bare codes. Names come from the built-in table,
    /// or repeat the code when it is not known.
    pub fn from_codes<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = codes
            .into_iter()
            .map(|code| {
                let code = code.as_ref().trim().to_uppercase();
                let name = currency_name(&code).map_or_else(|| code.clone(), str::to_string);
                (code, name)
            })
            .filter(|(code, _)| !code.is_empty())
            .collect();
        Self { names }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.names.contains_key(code)
    }

    pub fn name(&self, code: &str) -> Option<&str> {
        self.names.get(code).map(String::as_str)
    }

    pub fn sorted_codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.names.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    /// Codes whose code or name contains `query`, ignoring case.
    /// A blank query matches everything.
    pub fn filter(&self, query: &str) -> Vec<&str> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.sorted_codes();
        }
        self.sorted_codes()
            .into_iter()
            .filter(|code| {
                code.to_lowercase().contains(&query)
                    || self
                        .name(code)
                        .is_some_and(|name| name.to_lowercase().contains(&query))
            })
            .collect()
    }

    /// Returns `preferred` when it is listed, otherwise the first code the
    /// provider sent (the base currency for open.er-api).
    pub fn resolve_target<'a>(&'a self, preferred: &'a str) -> &'a str {
        if self.contains(preferred) {
            return preferred;
        }
        self.names
            .first()
            .map_or(preferred, |(code, _)| code.as_str())
    }
}

/// English names for commonly traded currencies.
pub fn currency_name(code: &str) -> Option<&'static str> {
    let name = match code {
        "AED" => "UAE Dirham",
        "ARS" => "Argentine Peso",
        "AUD" => "Australian Dollar",
        "BDT" => "Bangladeshi Taka",
        "BGN" => "Bulgarian Lev",
        "BHD" => "Bahraini Dinar",
        "BRL" => "Brazilian Real",
        "CAD" => "Canadian Dollar",
        "CHF" => "Swiss Franc",
        "CLP" => "Chilean Peso",
        "CNY" => "Chinese Renminbi",
        "COP" => "Colombian Peso",
        "CZK" => "Czech Koruna",
        "DKK" => "Danish Krone",
        "DZD" => "Algerian Dinar",
        "EGP" => "Egyptian Pound",
        "ETB" => "Ethiopian Birr",
        "EUR" => "Euro",
        "GBP" => "Pound Sterling",
        "GHS" => "Ghanaian Cedi",
        "HKD" => "Hong Kong Dollar",
        "HUF" => "Hungarian Forint",
        "IDR" => "Indonesian Rupiah",
        "ILS" => "Israeli New Shekel",
        "INR" => "Indian Rupee",
        "ISK" => "Icelandic Krona",
        "JPY" => "Japanese Yen",
        "KES" => "Kenyan Shilling",
        "KRW" => "South Korean Won",
        "KWD" => "Kuwaiti Dinar",
        "LKR" => "Sri Lanka Rupee",
        "MAD" => "Moroccan Dirham",
        "MXN" => "Mexican Peso",
        "MYR" => "Malaysian Ringgit",
        "NGN" => "Nigerian Naira",
        "NOK" => "Norwegian Krone",
        "NPR" => "Nepalese Rupee",
        "NZD" => "New Zealand Dollar",
        "OMR" => "Omani Rial",
        "PEN" => "Peruvian Sol",
        "PHP" => "Philippine Peso",
        "PKR" => "Pakistani Rupee",
        "PLN" => "Polish Zloty",
        "QAR" => "Qatari Riyal",
        "RON" => "Romanian Leu",
        "RSD" => "Serbian Dinar",
        "RUB" => "Russian Ruble",
        "SAR" => "Saudi Riyal",
        "SEK" => "Swedish Krona",
        "SGD" => "Singapore Dollar",
        "THB" => "Thai Baht",
        "TRY" => "Turkish Lira",
        "TWD" => "New Taiwan Dollar",
        "TZS" => "Tanzanian Shilling",
        "UAH" => "Ukrainian Hryvnia",
        "UGX" => "Ugandan Shilling",
        "USD" => "United States Dollar",
        "VND" => "Vietnamese Dong",
        "XAF" => "Central African CFA Franc",
        "XOF" => "West African CFA Franc",
        "ZAR" => "South African Rand",
        "ZMW" => "Zambian Kwacha",
        _ => return None,
    };
    Some(name)
}
