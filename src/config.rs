use clap::Parser;
use std::path::PathBuf;
use crate::api::forex::ForexApiClient;
use crate::models::interval::ViewKind;
use crate::services::projection_service::DEFAULT_ALGORITHM_NAMES;

#[derive(Parser, Debug, Clone)]
#[command(name = "fxpredict", version, about = "Terminal client for the forex prediction API")]
pub struct Args {
    /// Base URL of the prediction API
    #[arg(long, env = "FOREX_API_URL", default_value = ForexApiClient::DEFAULT_BASE_URL)]
    pub api_url: String,

    /// Directory the chart board is written to
    #[arg(long, env = "FOREX_CHART_DIR", default_value = "charts")]
    pub chart_dir: PathBuf,

    /// File holding the logged-in flag
    #[arg(long, env = "FOREX_STATE_FILE", default_value = ".fxpredict_session.json")]
    pub state_file: PathBuf,

    /// Client flavour: interactive or static
    #[arg(long, env = "FOREX_VIEW", default_value = "interactive")]
    pub view: ViewKind,

    #[arg(long, env = "FOREX_CHART_WIDTH", default_value_t = 1024)]
    pub chart_width: u32,

    #[arg(long, env = "FOREX_CHART_HEIGHT", default_value_t = 768)]
    pub chart_height: u32,

    /// Names given to series by position, comma-separated
    #[arg(long, env = "FOREX_ALGORITHM_LABELS", value_delimiter = ',')]
    pub algorithm_labels: Vec<String>,
}

impl Args {
    /// Configured labels, or the built-in algorithm names when none are set
    pub fn labels(&self) -> Vec<String> {
        let labels: Vec<String> = self
            .algorithm_labels
            .iter()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect();

        if labels.is_empty() {
            DEFAULT_ALGORITHM_NAMES.iter().map(|l| l.to_string()).collect()
        } else {
            labels
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["fxpredict"]).unwrap();
        assert_eq!(args.chart_dir, PathBuf::from("charts"));
        assert_eq!(args.chart_width, 1024);
        assert_eq!(args.chart_height, 768);
        assert_eq!(args.labels().len(), DEFAULT_ALGORITHM_NAMES.len());
    }

    #[test]
    fn test_label_override_and_view() {
        let args = Args::try_parse_from([
            "fxpredict",
            "--view",
            "static",
            "--algorithm-labels",
            "Model A, Model B,,",
        ])
        .unwrap();
        assert_eq!(args.view, ViewKind::Static);
        assert_eq!(args.labels(), vec!["Model A".to_string(), "Model B".to_string()]);
    }

    #[test]
    fn test_rejects_unknown_view() {
        assert!(Args::try_parse_from(["fxpredict", "--view", "desktop"]).is_err());
    }
}
