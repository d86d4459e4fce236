use lazy_static::lazy_static;
use crate::models::form::FormState;
use crate::models::interval::IntervalOption;

/// Pairs offered by the interactive view
pub const AVAILABLE_PAIRS: [&str; 54] = [
    "EURUSD", "GBPUSD", "USDJPY", "USDCHF", "AUDUSD", "NZDUSD", "USDCAD",
    "EURGBP", "EURJPY", "EURCHF", "EURAUD", "EURNZD", "EURCAD", "GBPJPY",
    "GBPCHF", "GBPAUD", "GBPNZD", "GBPCAD", "CHFJPY", "AUDJPY", "AUDCHF",
    "AUDNZD", "AUDCAD", "NZDJPY", "CADCHF", "CADJPY", "XAGUSD", "XAUUSD",
    "NZDCAD", "NZDCHF", "EURHUF", "EURNOK", "EURPLN", "EURSEK", "EURTRY",
    "USDDKK", "USDCZK", "USDMXN", "USDHUF", "USDNOK", "USDPLN", "USDSEK",
    "EURHKD", "USDSGD", "SGDJPY", "USDHKD", "USDCNH", "USDTRY", "EURMXN",
    "GBPMXN", "USDZAR", "EURZAR", "GBPZAR", "ZARJPY",
];

lazy_static! {
    /// First three letters of every pair, first-seen order, no repeats
    pub static ref BASE_CURRENCIES: Vec<&'static str> = {
        let mut bases: Vec<&'static str> = Vec::new();
        for pair in AVAILABLE_PAIRS {
            let base: &'static str = &pair[..3];
            if !bases.contains(&base) {
                bases.push(base);
            }
        }
        bases
    };
}

/// Quote currencies tradable against `base`, in catalog order
pub fn quotes_for(base: &str) -> Vec<String> {
    AVAILABLE_PAIRS
        .iter()
        .filter(|pair| pair.starts_with(base))
        .map(|pair| pair[3..].to_string())
        .collect()
}

/// Fresh form with the first base currency and its first quote selected
pub fn initial_form() -> FormState {
    let base = BASE_CURRENCIES.first().copied().unwrap_or_default();
    let available_quotes = quotes_for(base);
    FormState {
        base_currency: base.to_string(),
        quote_currency: available_quotes.first().cloned().unwrap_or_default(),
        available_quotes,
        ..FormState::default()
    }
}

/// Pick a base currency; the quote resets to the first one available for it
pub fn select_base(form: &mut FormState, base: &str) -> Result<(), String> {
    let base = base.trim().to_uppercase();
    if !BASE_CURRENCIES.iter().any(|b| *b == base) {
        return Err(format!(
            "❌ Unknown base currency '{}'. Available: {}",
            base,
            BASE_CURRENCIES.join(", ")
        ));
    }

    let quotes = quotes_for(&base);
    form.quote_currency = quotes.first().cloned().unwrap_or_default();
    form.available_quotes = quotes;
    form.base_currency = base;
    form.ticker = None;
    Ok(())
}

pub fn select_quote(form: &mut FormState, quote: &str) -> Result<(), String> {
    let quote = quote.trim().to_uppercase();
    if !form.available_quotes.contains(&quote) {
        return Err(format!(
            "❌ {} cannot be quoted against {}. Available: {}",
            quote,
            form.base_currency,
            form.available_quotes.join(", ")
        ));
    }
    form.quote_currency = quote;
    form.ticker = None;
    Ok(())
}

/// Set an explicit ticker. Checked against the API's list when one has been loaded.
pub fn select_ticker(form: &mut FormState, ticker: &str, known: &[String]) -> Result<(), String> {
    let ticker = ticker.trim().to_uppercase();
    if ticker.is_empty() {
        return Err("❌ Ticker cannot be empty".to_string());
    }
    if !known.is_empty() && !known.contains(&ticker) {
        return Err(format!("❌ Ticker '{}' is not offered by the server", ticker));
    }
    form.ticker = Some(ticker);
    Ok(())
}

/// Pick an interval by its option label
pub fn select_interval(
    form: &mut FormState,
    label: &str,
    options: &[IntervalOption],
) -> Result<(), String> {
    let label = label.trim();
    if !options.is_empty() && !options.iter().any(|o| o.label == label) {
        let labels: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();
        return Err(format!(
            "❌ Unknown interval '{}'. Available: {}",
            label,
            labels.join(", ")
        ));
    }
    form.interval = Some(label.to_string());
    Ok(())
}

/// Default the interval to the first option, as the options request does
pub fn apply_default_interval(form: &mut FormState, options: &[IntervalOption]) {
    if let Some(first) = options.first() {
        form.interval = Some(first.label.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(label: &str, value: &str) -> IntervalOption {
        IntervalOption {
            label: label.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn test_base_currencies_are_unique_and_ordered() {
        assert_eq!(BASE_CURRENCIES[0], "EUR");
        assert_eq!(BASE_CURRENCIES[1], "GBP");
        assert_eq!(BASE_CURRENCIES[2], "USD");
        let mut sorted = BASE_CURRENCIES.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), BASE_CURRENCIES.len());
        assert!(BASE_CURRENCIES.contains(&"XAU"));
    }

    #[test]
    fn test_initial_form_selects_first_pair() {
        let form = initial_form();
        assert_eq!(form.base_currency, "EUR");
        assert_eq!(form.quote_currency, "USD");
        assert_eq!(form.ticker(), "EURUSD");
        assert_eq!(form.available_quotes, quotes_for("EUR"));
        assert_eq!(form.ticker, None);
        assert_eq!(form.interval, None);
    }

    #[test]
    fn test_select_base_resets_quote() {
        let mut form = initial_form();
        select_base(&mut form, "gbp").unwrap();
        assert_eq!(form.quote_currency, "USD");
        assert_eq!(
            form.available_quotes,
            vec!["USD", "JPY", "CHF", "AUD", "NZD", "CAD", "MXN", "ZAR"]
        );

        select_quote(&mut form, "jpy").unwrap();
        assert_eq!(form.ticker(), "GBPJPY");

        select_base(&mut form, "ZAR").unwrap();
        assert_eq!(form.ticker(), "ZARJPY");
    }

    #[test]
    fn test_rejects_unknown_currencies() {
        let mut form = initial_form();
        assert!(select_base(&mut form, "BTC").is_err());
        assert!(select_quote(&mut form, "EUR").is_err());
        assert_eq!(form.ticker(), "EURUSD");
    }

    #[test]
    fn test_ticker_override() {
        let mut form = initial_form();
        let known = vec!["EURUSD".to_string(), "XAUUSD".to_string()];

        select_ticker(&mut form, "xauusd", &known).unwrap();
        assert_eq!(form.ticker(), "XAUUSD");
        assert!(select_ticker(&mut form, "BTCUSD", &known).is_err());

        select_base(&mut form, "USD").unwrap();
        assert_eq!(form.ticker(), "USDJPY");
    }

    #[test]
    fn test_interval_selection() {
        let options = vec![option("Within 2 days", "1"), option("Within 2 Months", "16408")];
        let mut form = initial_form();

        apply_default_interval(&mut form, &options);
        assert_eq!(form.interval.as_deref(), Some("Within 2 days"));

        select_interval(&mut form, "Within 2 Months", &options).unwrap();
        assert_eq!(form.interval.as_deref(), Some("Within 2 Months"));
        assert!(select_interval(&mut form, "Within 9 years", &options).is_err());
    }
}
