//! Rates request form models

use serde::Serialize;

/// Selections the user has made before submitting a rates request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub base_currency: String,
    pub quote_currency: String,
    /// Quotes tradable against `base_currency`, in catalog order
    pub available_quotes: Vec<String>,
    /// Explicit ticker; takes precedence over base + quote when set
    pub ticker: Option<String>,
    /// Label of the chosen interval option
    pub interval: Option<String>,
    pub no_of_rows: Option<u32>,
}

impl FormState {
    pub fn ticker(&self) -> String {
        match &self.ticker {
            Some(ticker) => ticker.clone(),
            None => format!("{}{}", self.base_currency, self.quote_currency),
        }
    }
}

/// Body of `POST /get-rates/`
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RatesRequest {
    pub ticker: String,
    pub interval: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_of_rows: Option<u32>,
}
