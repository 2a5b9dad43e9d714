use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tesser_terminal::input::load_file;
use tesser_terminal::ui::{FeedWindow, RenderMode};
use tesser_terminal::{Script, Session, Settings};

/// Play the Tesser landing-page terminal feed
#[derive(Parser, Debug)]
#[command(name = "tesser-terminal", version, about)]
struct Args {
    /// JSON or CSV script to play instead of the built-in one
    #[arg(long)]
    script: Option<PathBuf>,

    /// Playback speed multiplier (0.1 to 10)
    #[arg(long)]
    speed: Option<f64>,

    /// Number of visible lines
    #[arg(long)]
    capacity: Option<usize>,

    /// Disable colours
    #[arg(long)]
    no_color: bool,

    /// Keep the feed on screen after the script finishes, until Ctrl-C
    #[arg(long)]
    hold: bool,

    /// Persist the effective speed, capacity and colour settings
    #[arg(long)]
    save_settings: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so they never interleave with the feed
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let mut settings = Settings::load();
    if let Some(speed) = args.speed {
        settings.speed = speed;
    }
    if let Some(capacity) = args.capacity {
        settings.capacity = capacity;
    }
    if args.no_color {
        settings.color = false;
    }
    let script = match &args.script {
        Some(path) => load_file(path)
            .with_context(|| format!("Failed to load script {}", path.display()))?,
        None => Script::landing(),
    };

    let stdout = io::stdout();
    let mode = if stdout.is_terminal() {
        RenderMode::Live { color: settings.color }
    } else {
        RenderMode::Plain
    };
    let mut window = FeedWindow::new(stdout, mode);

    let mut session = Session::new(script, settings.playback_config())?;
    // only persist settings a session accepted
    if args.save_settings {
        let path = settings.save()?;
        info!("Saved settings to {}", path.display());
    }

    let mut progress_rx = session.subscribe();
    session.start()?;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        let progress = *progress_rx.borrow_and_update();
        window.set_width(crossterm::terminal::size().ok().map(|(cols, _)| cols));
        window.render(&session.snapshot())?;
        if progress.is_exhausted() && !args.hold {
            break;
        }

        tokio::select! {
            changed = progress_rx.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            _ = &mut ctrl_c => {
                info!("Interrupted");
                break;
            }
        }
    }

    session.stop();
    Ok(())
}
