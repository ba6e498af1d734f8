use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event};
use tokio::sync::mpsc::{self, UnboundedSender};

use network::actions::OptimisticActionExecutor;
use network::api::ApiClient;
use network::app::{handlers, App, Completion, Effect};
use network::config::ConfigManager;
use network::logging::{self, LogConfig};
use network::server_config::{ConnectionOverrides, ConnectionSettings};
use network::terminal::{self, Tui};
use network::ui;

/// Network - a keyboard-driven client for the Network social feed
#[derive(Parser)]
#[command(name = "network")]
#[command(about = "Browse and post to a Network server from the terminal")]
#[command(version)]
struct Cli {
    /// Server URL to connect to
    #[arg(long, short, env = "NETWORK_SERVER_URL")]
    server: Option<String>,

    /// Username the session belongs to
    #[arg(long, short, env = "NETWORK_USER")]
    user: Option<String>,

    /// Session cookie value for an authenticated user
    #[arg(long, env = "NETWORK_SESSION")]
    session: Option<String>,

    /// CSRF token sent with state-changing requests
    #[arg(long, env = "NETWORK_CSRF_TOKEN")]
    csrf_token: Option<String>,

    /// Location to open, e.g. /all, /following or /profile/alice
    #[arg(long, default_value = "/all")]
    path: String,

    /// Enable verbose logging
    #[arg(long, short)]
    verbose: bool,

    /// Save the resolved connection settings to ~/.network/config.json
    #[arg(long)]
    save: bool,
}

// Load environment variables from a .env file so NETWORK_* can be set without arguments
fn load_env() {
    let _ = dotenv::dotenv();
}

/// Run an effect off the UI thread and hand its completion back to the loop
fn spawn_effects(effects: Vec<Effect>, executor: &OptimisticActionExecutor, tx: &UnboundedSender<Completion>) {
    for effect in effects {
        let executor = executor.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let completion = effect.run(&executor).await;
            // The receiver only goes away on shutdown
            let _ = tx.send(completion);
        });
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before parsing so clap sees the variables
    load_env();
    let cli = Cli::parse();

    let log_config = if cli.verbose {
        LogConfig::verbose()
    } else {
        LogConfig::default()
    };
    logging::init_logging(&log_config)?;

    let config_manager = ConfigManager::new()?;
    let saved = match config_manager.load() {
        Ok(saved) => saved,
        Err(e) => {
            log::warn!("Ignoring unreadable config file: {:#}", e);
            None
        }
    };

    let overrides = ConnectionOverrides {
        server_url: cli.server,
        username: cli.user,
        session_id: cli.session,
        csrf_token: cli.csrf_token,
    };
    let settings = ConnectionSettings::resolve(&overrides, saved.as_ref());
    log::info!("Connecting to {} ({})", settings.server_url, settings.server_description());

    if cli.save {
        config_manager.save(&settings.to_config())?;
    }

    let session = Arc::new(settings.session());
    let api = Arc::new(ApiClient::new(settings.server_url.clone(), session.clone()));

    let mut app = App::new(api, session, &cli.path, log_config);
    app.color_scheme = settings.color_scheme;
    app.server_label = settings.server_description();

    let mut tui = terminal::init()?;
    let outcome = run_event_loop(&mut tui, &mut app);
    terminal::finish(outcome, terminal::restore)?;
    log::info!("Exiting");

    Ok(())
}

/// Draw, read keys and apply completions until the app stops running
fn run_event_loop(tui: &mut Tui, app: &mut App) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Completion>();
    let executor = app.executor.clone();
    spawn_effects(app.start(), &executor, &tx);

    while app.running {
        app.tick(Instant::now());
        tui.draw(|frame| ui::render(app, frame))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                let effects = handlers::handle_key_event(app, key);
                spawn_effects(effects, &executor, &tx);
            }
        }

        while let Ok(completion) = rx.try_recv() {
            let effects = app.apply(completion);
            spawn_effects(effects, &executor, &tx);
        }
    }

    Ok(())
}
