use chrono::{DateTime, Utc};
use plotters::coord::Shift;
use plotters::element::Pie;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};
use crate::models::chart::{ChartDataset, Projection, TrendTally, HISTORICAL_TRACE, PREDICTED_TRACE};
use crate::models::interval::TimeUnit;
use crate::models::rates::Trend;

/// Directory under the output root that always holds the latest complete board
pub const CURRENT_DIR: &str = "current";
pub const TREND_CHART_FILE: &str = "trend_summary.png";
/// Holds the previous board while a new one is moved into place
const RETIRED_DIR: &str = ".retired";

const HISTORICAL_COLOR: RGBColor = RGBColor(75, 192, 192);
const PREDICTED_COLOR: RGBColor = RGBColor(255, 99, 132);

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Failed to prepare chart directory {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed to draw {chart}: {message}")]
    Draw { chart: String, message: String },
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> ChartError + '_ {
    move |source| ChartError::Io {
        path: path.display().to_string(),
        source,
    }
}

/// One rendered line chart
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedChart {
    pub label: String,
    pub path: PathBuf,
}

/// Files produced by one submission
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedBoard {
    pub dir: PathBuf,
    pub charts: Vec<RenderedChart>,
    pub trend_chart: Option<PathBuf>,
    /// Labels whose dataset had no points
    pub skipped: Vec<String>,
}

impl RenderedBoard {
    /// Move every path from `from` to `to`
    fn rebase(mut self, from: &Path, to: &Path) -> Self {
        let move_path = |p: &PathBuf| match p.strip_prefix(from) {
            Ok(rel) => to.join(rel),
            Err(_) => p.clone(),
        };
        for chart in &mut self.charts {
            chart.path = move_path(&chart.path);
        }
        self.trend_chart = self.trend_chart.as_ref().map(move_path);
        self.dir = to.to_path_buf();
        self
    }
}

/// The single chart surface of the client.
///
/// Each render draws into a fresh staging directory and only replaces
/// `<out_dir>/current` once every chart has been drawn. A failed render
/// removes its staging directory and leaves the previous board alone.
#[derive(Debug)]
pub struct ChartBoard {
    out_dir: PathBuf,
    width: u32,
    height: u32,
    generation: u64,
}

impl ChartBoard {
    pub fn new(out_dir: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            out_dir: out_dir.into(),
            width,
            height,
            generation: 0,
        }
    }

    pub fn current_dir(&self) -> PathBuf {
        self.out_dir.join(CURRENT_DIR)
    }

    /// Draw one line chart per labelled dataset plus the trend summary pie
    pub fn render(
        &mut self,
        projection: &Projection,
        unit: TimeUnit,
    ) -> Result<RenderedBoard, ChartError> {
        let size = (self.width, self.height);
        self.render_with(|staging| {
            let mut board = RenderedBoard::default();

            for (index, (label, dataset)) in projection.datasets.iter().enumerate() {
                if dataset.is_empty() {
                    warn!("Series '{}' has no points, skipping its chart", label);
                    board.skipped.push(label.to_string());
                    continue;
                }
                let path = staging.join(chart_file_name(index, label));
                draw_to_file(&path, size, label, |root| draw_dataset(root, label, dataset, unit))?;
                board.charts.push(RenderedChart {
                    label: label.to_string(),
                    path,
                });
            }

            let pie_path = staging.join(TREND_CHART_FILE);
            draw_to_file(&pie_path, size, "trend summary", |root| {
                draw_trend_summary(root, &projection.tally)
            })?;
            board.trend_chart = Some(pie_path);

            Ok(board)
        })
    }

    /// Draw a single bridged dataset, as the static page shows it
    pub fn render_single(
        &mut self,
        title: &str,
        dataset: &ChartDataset,
        unit: TimeUnit,
    ) -> Result<RenderedBoard, ChartError> {
        let size = (self.width, self.height);
        self.render_with(|staging| {
            let mut board = RenderedBoard::default();
            if dataset.is_empty() {
                warn!("Rates response for {} has no points", title);
                board.skipped.push(title.to_string());
                return Ok(board);
            }

            let path = staging.join(chart_file_name(0, title));
            draw_to_file(&path, size, title, |root| draw_dataset(root, title, dataset, unit))?;
            board.charts.push(RenderedChart {
                label: title.to_string(),
                path,
            });
            Ok(board)
        })
    }

    /// Acquire a staging directory, draw into it, then swap it in as `current`
    fn render_with<F>(&mut self, draw: F) -> Result<RenderedBoard, ChartError>
    where
        F: FnOnce(&Path) -> Result<RenderedBoard, ChartError>,
    {
        fs::create_dir_all(&self.out_dir).map_err(io_error(&self.out_dir))?;

        // Removed on drop unless renamed into place below
        let staging = tempfile::Builder::new()
            .prefix(".staging-")
            .tempdir_in(&self.out_dir)
            .map_err(io_error(&self.out_dir))?;

        let board = draw(staging.path())?;

        let current = self.current_dir();
        swap_in(staging.path(), &current, &self.out_dir.join(RETIRED_DIR))?;

        self.generation += 1;
        info!(
            "Chart board #{} ready in {} ({} charts)",
            self.generation,
            current.display(),
            board.charts.len()
        );

        Ok(board.rebase(staging.path(), &current))
    }
}

/// Replace `current` with `staged`.
///
/// The old board is parked at `retired` until the new one is in place, and put
/// back if the move fails.
fn swap_in(staged: &Path, current: &Path, retired: &Path) -> Result<(), ChartError> {
    if retired.exists() {
        fs::remove_dir_all(retired).map_err(io_error(retired))?;
    }

    let parked = current.exists();
    if parked {
        fs::rename(current, retired).map_err(io_error(current))?;
    }

    if let Err(source) = fs::rename(staged, current) {
        if parked {
            if let Err(e) = fs::rename(retired, current) {
                warn!("Failed to restore previous board from {}: {}", retired.display(), e);
            }
        }
        return Err(io_error(current)(source));
    }

    if parked {
        if let Err(e) = fs::remove_dir_all(retired) {
            warn!("Failed to remove previous board {}: {}", retired.display(), e);
        }
    }
    Ok(())
}

/// `chart_03_neural_network_predictor.png`
pub fn chart_file_name(index: usize, label: &str) -> String {
    let slug: String = label
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    format!("chart_{:02}_{}.png", index, slug.trim_matches('_'))
}

fn draw_to_file<F>(path: &Path, size: (u32, u32), chart: &str, draw: F) -> Result<(), ChartError>
where
    F: FnOnce(DrawingArea<BitMapBackend, Shift>) -> Result<(), String>,
{
    debug!("Drawing {} to {}", chart, path.display());
    let root = BitMapBackend::new(path, size).into_drawing_area();
    draw(root).map_err(|message| ChartError::Draw {
        chart: chart.to_string(),
        message,
    })
}

/// Time span of the axis. A single instant is widened by one unit each way.
///
/// `None` when the axis is empty or sits too close to the edge of the
/// representable time range to leave room for tick arithmetic.
pub fn time_range(axis: &[DateTime<Utc>], unit: TimeUnit) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let min = *axis.iter().min()?;
    let max = *axis.iter().max()?;
    let (start, end) = if min == max {
        (
            min.checked_sub_signed(unit.step())?,
            max.checked_add_signed(unit.step())?,
        )
    } else {
        (min, max)
    };

    // One span of headroom on each side
    let span = end - start;
    start.checked_sub_signed(span)?;
    end.checked_add_signed(span)?;
    Some((start, end))
}

/// Price span of both traces with 10% padding
pub fn price_range(dataset: &ChartDataset) -> Option<(f64, f64)> {
    let values: Vec<f64> = dataset
        .historical
        .iter()
        .copied()
        .chain(dataset.predicted.iter().flatten().copied())
        .filter(|v| v.is_finite())
        .collect();
    if values.is_empty() {
        return None;
    }

    let min_price = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max_price = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let spread = max_price - min_price;
    let padding = if spread.abs() < 1e-10 {
        max_price.abs() * 0.05 + 1e-4
    } else {
        spread * 0.1
    };
    Some((min_price - padding, max_price + padding))
}

fn draw_dataset<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    title: &str,
    dataset: &ChartDataset,
    unit: TimeUnit,
) -> Result<(), String> {
    root.fill(&WHITE)
        .map_err(|e| format!("Failed to fill canvas: {}", e))?;

    let (x_min, x_max) = time_range(&dataset.axis, unit).ok_or("Time axis is empty or out of range")?;
    let (y_min, y_max) = price_range(dataset).ok_or("No finite prices to plot")?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 30).into_font())
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(|e| format!("Failed to build chart: {}", e))?;

    let format = unit.label_format();
    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc("Price")
        .x_labels(8)
        .x_label_formatter(&|dt: &DateTime<Utc>| dt.format(format).to_string())
        .y_label_formatter(&|v: &f64| format!("{:.5}", v))
        .draw()
        .map_err(|e| format!("Failed to draw mesh: {}", e))?;

    // The historical trace may be empty when the server only sent predictions
    let historical = dataset.historical_points();
    if !historical.is_empty() {
        chart
            .draw_series(LineSeries::new(historical, HISTORICAL_COLOR.stroke_width(2)))
            .map_err(|e| format!("Failed to draw historical prices: {}", e))?
            .label(HISTORICAL_TRACE)
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], HISTORICAL_COLOR));
    }

    let predicted = dataset.predicted_points();
    if !predicted.is_empty() {
        chart
            .draw_series(DashedLineSeries::new(
                predicted,
                5,
                5,
                PREDICTED_COLOR.stroke_width(2),
            ))
            .map_err(|e| format!("Failed to draw predicted prices: {}", e))?
            .label(PREDICTED_TRACE)
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], PREDICTED_COLOR));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(|e| format!("Failed to draw legend: {}", e))?;

    root.present()
        .map_err(|e| format!("Failed to render chart: {}", e))?;
    Ok(())
}

pub fn trend_color(trend: Trend) -> RGBColor {
    match trend {
        Trend::Uptrend => RGBColor(0x4B, 0xC0, 0xC0),
        Trend::Downtrend => RGBColor(0xFF, 0x63, 0x84),
        Trend::Neutral => RGBColor(0xFF, 0xCE, 0x56),
    }
}

/// Non-empty tally buckets in display order
pub fn trend_slices(tally: &TrendTally) -> Vec<(Trend, usize)> {
    Trend::ALL
        .iter()
        .map(|trend| (*trend, tally.count(*trend)))
        .filter(|(_, count)| *count > 0)
        .collect()
}

fn draw_trend_summary<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    tally: &TrendTally,
) -> Result<(), String> {
    root.fill(&WHITE)
        .map_err(|e| format!("Failed to fill canvas: {}", e))?;
    let area = root
        .titled("Trend Analysis", ("sans-serif", 30))
        .map_err(|e| format!("Failed to draw title: {}", e))?;

    let (width, height) = area.dim_in_pixel();
    let center = ((width / 2) as i32, (height / 2) as i32);
    let slices = trend_slices(tally);

    if slices.is_empty() {
        area.draw(&Text::new("No series", center, ("sans-serif", 24).into_font()))
            .map_err(|e| format!("Failed to draw placeholder: {}", e))?;
    } else {
        let radius = f64::from(width.min(height)) * 0.35;
        let sizes: Vec<f64> = slices.iter().map(|(_, count)| *count as f64).collect();
        let colors: Vec<RGBColor> = slices.iter().map(|(trend, _)| trend_color(*trend)).collect();
        let labels: Vec<String> = slices
            .iter()
            .map(|(trend, count)| format!("{} ({})", trend.display_name(), count))
            .collect();

        let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
        pie.label_style(("sans-serif", 20).into_font());
        area.draw(&pie)
            .map_err(|e| format!("Failed to draw pie: {}", e))?;
    }

    root.present()
        .map_err(|e| format!("Failed to render chart: {}", e))?;
    Ok(())
}
