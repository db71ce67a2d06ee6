use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self as crossterm_event, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    Terminal,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::{io, time::Duration};
use tokio::sync::Mutex;
use tracing::{error, info};

mod app;
mod config;
mod constants;
mod error;
mod generation;
mod hedera;
mod logging;
mod storage;
mod transactions;
mod ui;
mod utils;
mod wallet;

use app::{App, Services};
use config::Config;
use constants::BALANCE_REFRESH_SECS;
use utils::NetworkState;

/// Generate AI artwork and mint it as an NFT on Hedera.
#[derive(Parser, Debug)]
#[command(name = "civicminter", version, about)]
struct Cli {
    /// Config file layered over ~/.civicminter/config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Network to start on (testnet, mainnet, previewnet)
    #[arg(short, long)]
    network: Option<String>,

    /// Use the in-process mock wallet instead of the wallet bridge
    #[arg(long)]
    mock_wallet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    config.apply_cli(cli.network.as_deref(), cli.mock_wallet)?;
    logging::init(&config.log_file, "info")?;
    info!(network = %config.network, "starting civicminter");

    let network_state = NetworkState::from_name(&config.network).unwrap_or_default();
    let services = Services::from_config(&config, &network_state)
        .context("failed to set up external services")?;
    let wallet = Arc::clone(&services.wallet);
    let events = wallet.init().await.context("failed to start the wallet connector")?;

    let app = Arc::new(Mutex::new(App::new(config, services)));
    let listener = app::spawn_wallet_listener(Arc::clone(&app), events);

    // Set up the terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, Arc::clone(&app)).await;

    // Restore the terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if app.lock().await.session.is_some() {
        if let Err(e) = wallet.disconnect().await {
            error!(error = %e, "failed to disconnect wallet on exit");
        }
    }
    listener.abort();

    if let Err(err) = &result {
        error!(error = ?err, "application error");
        eprintln!("{:?}", err);
    }
    info!("civicminter stopped");

    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: Arc<Mutex<App>>,
) -> Result<()> {
    let refresh_interval = Duration::from_secs(BALANCE_REFRESH_SECS);

    loop {
        let refresh_due = {
            let mut app_guard = app.lock().await;
            terminal.draw(|f| ui::draw(f, &mut app_guard))?;
            if app_guard.should_quit {
                return Ok(());
            }
            app_guard.session.is_some()
                && app_guard
                    .last_balance_refresh
                    .map_or(true, |at| at.elapsed() >= refresh_interval)
        };

        if refresh_due {
            App::refresh_balance(&app).await;
        }

        if crossterm_event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = crossterm_event::read()? {
                let command = {
                    let app_guard = app.lock().await;
                    app::map_key(&app_guard, key)
                };
                if let Some(command) = command {
                    app::dispatch(&app, command).await;
                }
            }
        }
    }
}
