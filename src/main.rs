use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod commands;
mod config;
mod models;
mod services;
mod utils;

use api::forex::{ForexApiClient, OptionsResponse};
use models::form::FormState;
use models::interval::ViewKind;
use services::chart_service::ChartBoard;
use services::pair_service;
use services::session_service::SessionModel;
use utils::storage::LoginFlagStore;

/// Everything the command loop reads and mutates
pub struct App {
    pub client: ForexApiClient,
    pub session: SessionModel,
    pub form: FormState,
    pub options: OptionsResponse,
    pub board: ChartBoard,
    pub view: ViewKind,
    pub labels: Vec<String>,
    /// Set while a rates request is outstanding
    pub loading: bool,
}

impl App {
    pub fn new(args: &config::Args) -> Result<Self, String> {
        let client = ForexApiClient::with_base_url(args.api_url.clone())
            .map_err(|e| format!("Failed to create API client: {}", e))?;
        let session = SessionModel::init(LoginFlagStore::new(&args.state_file));
        let board = ChartBoard::new(&args.chart_dir, args.chart_width, args.chart_height);

        Ok(Self {
            client,
            session,
            form: pair_service::initial_form(),
            options: OptionsResponse::default(),
            board,
            view: args.view,
            labels: args.labels(),
            loading: false,
        })
    }
}

fn init_tracing() {
    let mut filter = EnvFilter::from_default_env();
    match "fxpredict=debug".parse() {
        Ok(directive) => filter = filter.add_directive(directive),
        Err(e) => eprintln!("Ignoring log directive: {}", e),
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    let args = config::Args::parse();
    init_tracing();

    info!("📈 Starting fxpredict v{}", env!("CARGO_PKG_VERSION"));
    debug!("Configuration: {:?}", args);

    let mut app = match App::new(&args) {
        Ok(app) => app,
        Err(e) => {
            error!("{}", e);
            return;
        }
    };

    info!(
        "API at {}, {} view, charts in {}",
        app.client.base_url(),
        app.view,
        app.board.current_dir().display()
    );
    commands::on_enter_view(&mut app).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        commands::print_prompt(&app);
        match lines.next_line().await {
            Ok(Some(line)) => {
                if let commands::Flow::Quit = commands::handle_line(&mut app, &line).await {
                    break;
                }
            }
            Ok(None) => break,
            Err(e) => {
                warn!("Failed to read input: {}", e);
                break;
            }
        }
    }

    info!("👋 Bye");
}
