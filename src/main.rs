use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::EnvFilter;

use connect_four::config::AppConfig;
use connect_four::replay::{replay, ReplayStep};
use connect_four::ui::App;

/// Two-player Connect Four with optional square and four-corners wins.
#[derive(Parser)]
#[command(name = "connect_four", about = "Play Connect Four in the terminal")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect_four.toml")]
    config: PathBuf,

    /// Override board width (columns)
    #[arg(long)]
    width: Option<usize>,

    /// Override board height (rows)
    #[arg(long)]
    height: Option<usize>,

    /// Turn the 2x2 square win on or off at session start (bare flag = on)
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    square: Option<bool>,

    /// Turn the four-corners win on or off at session start (bare flag = on)
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    four_corners: Option<bool>,

    /// Where the terminal UI writes its log
    #[arg(long, default_value = "connect_four.log")]
    log_file: PathBuf,

    /// Play these 0-based columns headlessly and print the result;
    /// `n` starts the next round (e.g. `3,4,3,4,3,4,3,n,0,0`)
    #[arg(long, value_delimiter = ',')]
    moves: Option<Vec<ReplayStep>>,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    let headless = cli.moves.is_some();
    init_tracing(headless, &cli.log_file)?;

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    apply_overrides(&cli, &mut config);
    config.validate().context("invalid command-line overrides")?;

    info!(
        width = config.board.width,
        height = config.board.height,
        square = config.rules.square,
        four_corners = config.rules.four_corners,
        "starting session"
    );

    let mut controller = config.controller().context("building session from config")?;
    match cli.moves {
        Some(moves) => {
            let stdout = io::stdout();
            replay(&mut controller, &moves, &mut stdout.lock()).context("writing replay")
        }
        None => run_tui(App::new(controller)).context("running terminal UI"),
    }
}

/// Command-line values win over the config file.
fn apply_overrides(cli: &Cli, config: &mut AppConfig) {
    if let Some(width) = cli.width {
        config.board.width = width;
    }
    if let Some(height) = cli.height {
        config.board.height = height;
    }
    if let Some(square) = cli.square {
        config.rules.square = square;
    }
    if let Some(four_corners) = cli.four_corners {
        config.rules.four_corners = four_corners;
    }
}

/// Headless runs log to stderr; the TUI logs to a file so output does not
/// tear the screen.
fn init_tracing(headless: bool, log_file: &Path) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if headless {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .with_target(false)
            .init();
    } else {
        let file = std::fs::File::create(log_file)
            .with_context(|| format!("creating log file {}", log_file.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Arc::new(file))
            .with_ansi(false)
            .init();
    }
    Ok(())
}

fn run_tui(mut app: App) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal even if the app errored
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res
}
