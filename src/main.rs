use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{info, warn};
use quote_machine_core::{Config, FavoritesStore, FileStorage, MemoryStorage};

mod app;
mod handler;
mod tui;
mod ui;

use app::App;
use tui::{EventHandler, Tui};

#[derive(Parser)]
#[command(name = "quotes", version)]
#[command(about = "Random quotes with accent colors and a saved favorites panel")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Quote API endpoint
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Directory for saved quotes and the log file
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Minimum accent contrast against white
    #[arg(long, global = true)]
    min_contrast: Option<f64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the resolved configuration
    Config {
        /// Write the resolved configuration to the config file
        #[arg(long)]
        save: bool,
    },
    /// Print saved quotes
    Favorites,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    match cli.command {
        Some(Commands::Config { save }) => {
            if save {
                config.save()?;
            }
            print_config(&config)
        }
        Some(Commands::Favorites) => print_favorites(&config),
        None => run(config).await,
    }
}

/// File config, then environment, then command-line flags
fn resolve_config(cli: &Cli) -> Result<Config> {
    // Logging is not up yet and the TUI will own the screen, so say it now
    let file_config = Config::load().unwrap_or_else(|e| {
        eprintln!("warning: ignoring config file ({:#}), using defaults", e);
        Config::new()
    });
    merge_config(file_config.with_env_overrides(), cli)
}

fn merge_config(config: Config, cli: &Cli) -> Result<Config> {
    let config = config.with_overrides(cli.endpoint.clone(), cli.data_dir.clone(), cli.min_contrast);
    config.validate()?;
    Ok(config)
}

fn print_config(config: &Config) -> Result<()> {
    println!("config file:  {}", Config::get_config_path()?.display());
    println!("endpoint:     {}", config.endpoint());
    println!("min contrast: {}", config.min_contrast());
    println!("data dir:     {}", config.data_dir()?.display());
    Ok(())
}

fn print_favorites(config: &Config) -> Result<()> {
    let store = open_favorites(config);
    if store.is_empty() {
        println!("No saved quotes.");
        return Ok(());
    }

    for (i, quote) in store.list().iter().enumerate() {
        println!("{}. \"{}\"", i + 1, quote.text);
        println!("   - {}", quote.author);
    }
    Ok(())
}

/// Favorites on disk, or in memory for this session if no data dir is available
fn open_favorites(config: &Config) -> FavoritesStore {
    match config.data_dir() {
        Ok(dir) => FavoritesStore::new(FileStorage::new(dir)),
        Err(e) => {
            warn!("{}; saved quotes will not outlive this session", e);
            FavoritesStore::new(MemoryStorage::new())
        }
    }
}

/// Route logs to a file: stderr is owned by the terminal UI
fn init_logging(data_dir: &Path) {
    let file = std::fs::create_dir_all(data_dir).and_then(|_| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(data_dir.join("quote-machine.log"))
    });

    if let Ok(file) = file {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init();
    }
}

async fn run(config: Config) -> Result<()> {
    if let Ok(dir) = config.data_dir() {
        init_logging(&dir);
    }
    info!("Starting with endpoint {}", config.endpoint());

    let favorites = open_favorites(&config);

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = EventHandler::new();
    let mut app = App::new(&config, favorites, events.sender());

    let result = run_loop(&mut terminal, &mut app, &mut events).await;

    // Stop input/tick tasks before handing the terminal back
    drop(events);
    tui::restore()?;
    info!("Shutting down");
    result
}

async fn run_loop(terminal: &mut Tui, app: &mut App, events: &mut EventHandler) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        match events.next().await {
            Some(event) => handler::handle_event(app, event),
            None => break,
        }
    }
    Ok(())
}
