use crate::api::forex::ForexApiClient;
use crate::models::chart::Projection;
use crate::models::form::{FormState, RatesRequest};
use crate::models::interval::{IntervalOption, TimeUnit, ViewKind};
use crate::services::chart_service::{ChartBoard, RenderedBoard};
use crate::services::{interval_service, projection_service};

/// Outcome of one successful submission
#[derive(Debug)]
pub struct RatesSummary {
    pub ticker: String,
    pub interval: String,
    pub unit: TimeUnit,
    /// `None` for the bare historical/predicted shape
    pub projection: Option<Projection>,
    pub board: RenderedBoard,
}

/// Build the request body and axis unit for the current form.
///
/// The interactive view sends the option label itself; the static view sends the
/// option's value. The unit comes from whichever descriptor was sent.
pub fn build_request(
    view: ViewKind,
    form: &FormState,
    options: &[IntervalOption],
) -> Result<(RatesRequest, TimeUnit), String> {
    let label = form
        .interval
        .clone()
        .or_else(|| options.first().map(|o| o.label.clone()))
        .ok_or_else(|| "❌ No interval selected. Run `options` or `interval <label>` first".to_string())?;

    let ticker = form.ticker();
    if ticker.trim().is_empty() {
        return Err("❌ No ticker selected".to_string());
    }

    let interval = match view {
        ViewKind::Interactive => label,
        ViewKind::Static => match options.iter().find(|o| o.label == label) {
            Some(option) => option.value.clone(),
            None => label,
        },
    };

    let unit = interval_service::time_unit_for(view, &interval);
    let request = RatesRequest {
        ticker,
        interval,
        no_of_rows: form.no_of_rows,
    };
    Ok((request, unit))
}

/// Fetch rates for the form, project them and redraw the chart board.
///
/// Nothing on the board changes unless every step succeeds.
pub async fn submit(
    client: &ForexApiClient,
    board: &mut ChartBoard,
    view: ViewKind,
    form: &FormState,
    options: &[IntervalOption],
    labels: &[String],
) -> Result<RatesSummary, String> {
    let (request, unit) = build_request(view, form, options)?;
    tracing::info!(
        "📈 Requesting rates for {} (interval {}, rows {:?})",
        request.ticker,
        request.interval,
        request.no_of_rows
    );

    let payload = client.get_rates(&request).await.map_err(|e| {
        tracing::error!("Rates request for {} failed: {}", request.ticker, e);
        format!("❌ Failed to fetch rates: {}", e)
    })?;

    if payload.is_single_series() {
        let dataset = projection_service::project_single(&payload);
        let rendered = board
            .render_single(&request.ticker, &dataset, unit)
            .map_err(|e| {
                tracing::error!("Failed to render chart for {}: {}", request.ticker, e);
                format!("❌ Failed to render chart: {}", e)
            })?;

        return Ok(RatesSummary {
            ticker: request.ticker,
            interval: request.interval,
            unit,
            projection: None,
            board: rendered,
        });
    }

    let projection = projection_service::project(&payload, labels).map_err(|e| {
        tracing::error!("Rates response for {} rejected: {}", request.ticker, e);
        format!("❌ Invalid rates response: {}", e)
    })?;

    let rendered = board.render(&projection, unit).map_err(|e| {
        tracing::error!("Failed to render charts for {}: {}", request.ticker, e);
        format!("❌ Failed to render charts: {}", e)
    })?;

    Ok(RatesSummary {
        ticker: request.ticker,
        interval: request.interval,
        unit,
        projection: Some(projection),
        board: rendered,
    })
}
