mod app;
mod carousel;
mod config;
mod constants;
mod gallery;
mod input;
mod names;
mod player;
mod surface;
mod theme;
mod ui;

use anyhow::{Context, Result, bail};
use clap::Parser;
use directories::ProjectDirs;
use ratatui::{
  DefaultTerminal,
  crossterm::event::{self, Event, KeyEventKind},
};
use std::time::{Duration, Instant};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use app::App;
use constants::constants;

// --- CLI ---

#[derive(Parser, Debug)]
#[command(author, version = env!("CARGO_PKG_VERSION"), about = "Terminal video-gallery carousel", long_about = None)]
struct Args {
  /// Gallery category to open
  category: Option<String>,

  /// Number of phase segments a filename needs before it's formatted as a
  /// multi-phase label
  #[arg(short, long, default_value_t = 2)]
  phases: usize,

  /// Gallery config source: a file path or an http(s) URL
  #[arg(short, long)]
  config: Option<String>,

  /// List the categories in the config and exit
  #[arg(long)]
  list: bool,
}

// --- Logging ---

/// Route tracing output to a file in the platform data dir — the terminal
/// itself belongs to ratatui. Filter via RUST_LOG, default `info`.
fn init_tracing() -> Option<WorkerGuard> {
  let proj_dirs = ProjectDirs::from("", "", "reel")?;
  let log_dir = proj_dirs.data_local_dir();
  std::fs::create_dir_all(log_dir).ok()?;

  let appender = tracing_appender::rolling::never(log_dir, "reel.log");
  let (writer, guard) = tracing_appender::non_blocking(appender);
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_writer(writer)
    .with_ansi(false)
    .init();
  Some(guard)
}

// --- Main ---

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();
  let _log_guard = init_tracing();
  let config_source = args.config.clone().unwrap_or_else(|| constants().default_config_source.clone());

  if args.list {
    let config = gallery::load_config(&config_source).await?;
    let mut names: Vec<&String> = config.keys().collect();
    names.sort();
    for name in names {
      println!("{}", name);
    }
    return Ok(());
  }

  let Some(category) = args.category else {
    bail!("missing gallery category (try --list to see what's available)");
  };

  let default_hook = std::panic::take_hook();
  std::panic::set_hook(Box::new(move |info| {
    ratatui::restore();
    default_hook(info);
  }));

  let mut terminal = ratatui::init();
  let result = run(&mut terminal, category, args.phases, config_source).await;
  ratatui::restore();
  result
}

async fn run(terminal: &mut DefaultTerminal, category: String, phases: usize, config_source: String) -> Result<()> {
  let mut app = App::new(category, phases, config_source);
  info!("reel started");

  loop {
    let now = Instant::now();
    app.check_pending();
    app.tick(now);
    app.flush_player().await.context("Failed to apply player commands")?;
    app.poll_player(now);
    app.expire_error();

    terminal.draw(|frame| ui::ui(frame, &mut app))?;

    if event::poll(Duration::from_millis(constants().poll_ms))? {
      match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
          input::handle_key_event(&mut app, key).await?;
        }
        _ => {}
      }
    }

    if app.should_quit {
      break;
    }
  }

  app.player.stop().await?;
  Ok(())
}
