use crate::models::interval::ViewKind;
use crate::models::session::ViewState;
use crate::services::pair_service::{self, BASE_CURRENCIES};
use crate::services::rates_service::{self, RatesSummary};
use crate::utils::table::Table;
use crate::App;
use super::require_view;

/// GET the ticker and interval options and default the interval to the first one
pub async fn options(app: &mut App) -> Result<(), String> {
    require_view(app, ViewState::Main, "options")?;

    let options = app.client.get_options().await.map_err(|e| {
        tracing::error!("Failed to load options: {}", e);
        format!("❌ Failed to load options: {}", e)
    })?;

    app.options = options;
    pair_service::apply_default_interval(&mut app.form, &app.options.intervals);

    let mut table = Table::new(vec!["Interval", "Value"]);
    for option in &app.options.intervals {
        table.add_row(vec![option.label.as_str(), option.value.as_str()]);
    }
    println!("{}", table.render());
    if app.view == ViewKind::Static {
        println!("Tickers: {}", app.options.tickers.join(", "));
    }
    println!("Selected interval: {}", app.form.interval.as_deref().unwrap_or("-"));
    Ok(())
}

pub fn pairs(app: &mut App) -> Result<(), String> {
    require_view(app, ViewState::Main, "pairs")?;
    println!("Base currencies: {}", BASE_CURRENCIES.join(", "));
    println!(
        "Quotes for {}: {}",
        app.form.base_currency,
        app.form.available_quotes.join(", ")
    );
    println!("Selected pair: {}", app.form.ticker());
    Ok(())
}

pub fn base(app: &mut App, args: &[&str]) -> Result<(), String> {
    require_view(app, ViewState::Main, "base")?;
    let currency = args.first().ok_or("❌ Usage: `base <CCY>`")?;
    pair_service::select_base(&mut app.form, currency)?;
    println!(
        "Base {} selected, quote reset to {} ({})",
        app.form.base_currency,
        app.form.quote_currency,
        app.form.ticker()
    );
    Ok(())
}

pub fn quote(app: &mut App, args: &[&str]) -> Result<(), String> {
    require_view(app, ViewState::Main, "quote")?;
    let currency = args.first().ok_or("❌ Usage: `quote <CCY>`")?;
    pair_service::select_quote(&mut app.form, currency)?;
    println!("Selected pair: {}", app.form.ticker());
    Ok(())
}

pub fn ticker(app: &mut App, args: &[&str]) -> Result<(), String> {
    require_view(app, ViewState::Main, "ticker")?;
    let ticker = args.first().ok_or("❌ Usage: `ticker <TICKER>`")?;
    pair_service::select_ticker(&mut app.form, ticker, &app.options.tickers)?;
    println!("Selected ticker: {}", app.form.ticker());
    Ok(())
}

/// Interval labels contain spaces, so the whole argument list is the label
pub fn interval(app: &mut App, args: &[&str]) -> Result<(), String> {
    require_view(app, ViewState::Main, "interval")?;
    if args.is_empty() {
        return Err("❌ Usage: `interval <label>`".to_string());
    }
    let label = args.join(" ");
    pair_service::select_interval(&mut app.form, &label, &app.options.intervals)?;
    println!("Selected interval: {}", label);
    Ok(())
}

pub fn rows(app: &mut App, args: &[&str]) -> Result<(), String> {
    require_view(app, ViewState::Main, "rows")?;
    let rows = args
        .first()
        .ok_or("❌ Usage: `rows <n>`")?
        .parse::<u32>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or("❌ Rows must be a positive whole number")?;
    app.form.no_of_rows = Some(rows);
    println!("Requesting {} rows", rows);
    Ok(())
}

pub async fn submit(app: &mut App) -> Result<(), String> {
    require_view(app, ViewState::Main, "submit")?;
    if app.loading {
        return Err("⏳ A request is already in progress".to_string());
    }

    app.loading = true;
    let result = rates_service::submit(
        &app.client,
        &mut app.board,
        app.view,
        &app.form,
        &app.options.intervals,
        &app.labels,
    )
    .await;
    app.loading = false;

    let summary = result?;
    print_summary(&summary);
    Ok(())
}

fn print_summary(summary: &RatesSummary) {
    println!(
        "📈 {} ({}, axis in {}s)",
        summary.ticker, summary.interval, summary.unit
    );

    let chart_path = |label: &str| {
        summary
            .board
            .charts
            .iter()
            .find(|c| c.label == label)
            .map(|c| c.path.display().to_string())
            .unwrap_or_else(|| "(no points)".to_string())
    };

    match &summary.projection {
        Some(projection) => {
            let mut table = Table::new(vec!["Model", "Message", "Chart"]);
            for (label, message) in projection.messages.iter() {
                let chart = chart_path(label.as_str());
                table.add_row(vec![label.as_str(), message.as_str(), chart.as_str()]);
            }
            println!("{}", table.render());

            let tally = &projection.tally;
            println!(
                "Trend analysis: {} up, {} down, {} neutral",
                tally.uptrend, tally.downtrend, tally.neutral
            );
            if let Some(path) = &summary.board.trend_chart {
                println!("Trend chart: {}", path.display());
            }
            if !projection.majority_message.is_empty() {
                println!("🧭 {}", projection.majority_message);
            }
        }
        None => println!("Chart: {}", chart_path(summary.ticker.as_str())),
    }
}
