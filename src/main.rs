//! media-deck - terminal media library driven by keyboard and hand gestures
//!
//! A menu of three panels (media player, text viewer, image viewer) plus a
//! loopback listener that turns command tokens from an external gesture
//! detector into panel actions.

mod camera;
mod config;
mod core;
mod data;
mod frontend;
mod gesture;
mod recent_files;
mod sound;
mod widgets;

use anyhow::{Context, Result};
use clap::{Parser as ClapParser, Subcommand};
use std::path::PathBuf;

#[derive(ClapParser)]
#[command(name = "media-deck")]
#[command(about = "Gesture-controlled terminal media library", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Custom data directory (default: ~/.media-deck)
    /// Can also be set via MEDIA_DECK_DIR environment variable
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Port for the gesture listener on 127.0.0.1 (default: 9999)
    #[arg(short = 'p', long)]
    gesture_port: Option<u16>,

    /// Run without the gesture listener
    #[arg(long)]
    no_gesture: bool,

    /// Files to open at startup, each in the panel matching its extension
    #[arg(value_name = "FILES")]
    files: Vec<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved configuration and exit
    CheckConfig,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let data_dir = config::Config::resolve_data_dir(cli.data_dir.as_deref())?;
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data directory {:?}", data_dir))?;

    // TUI apps can't log to stdout, so we write to a file
    // (use RUST_LOG env var to control level, e.g. RUST_LOG=debug)
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(config::Config::log_path(&data_dir))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false) // No color codes in log file
        .init();

    tracing::info!("Using data directory {:?}", data_dir);

    let mut config = config::Config::load_with_options(&data_dir, cli.config.as_deref())?;
    if let Some(port) = cli.gesture_port {
        config.gesture.port = port;
    }

    if let Some(Commands::CheckConfig) = cli.command {
        println!("# data directory: {}", data_dir.display());
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    run_tui(config, !cli.no_gesture, cli.files)
}

/// Run TUI frontend
fn run_tui(config: config::Config, gestures: bool, files: Vec<PathBuf>) -> Result<()> {
    // Use tokio runtime for the gesture socket and camera process
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async_run_tui(config, gestures, files))
}

/// Async TUI main loop with gesture input
async fn async_run_tui(config: config::Config, gestures: bool, files: Vec<PathBuf>) -> Result<()> {
    use core::AppCore;
    use frontend::{Frontend, TuiFrontend};
    use gesture::{GestureListener, GestureMessage};
    use tokio::sync::mpsc;

    let (gesture_tx, mut gesture_rx) = mpsc::unbounded_channel::<GestureMessage>();

    let port = config.gesture.port;
    let read_timeout = config.gesture_read_timeout();
    let poll_timeout = config.poll_timeout();

    // Bind failure is not fatal; the app just runs without gestures
    let listener_handle = if gestures {
        match GestureListener::bind(port).await {
            Ok(listener) => Some(tokio::spawn(GestureListener::run(
                listener,
                gesture_tx,
                read_timeout,
            ))),
            Err(e) => {
                tracing::error!("{:#}; continuing without gesture input", e);
                None
            }
        }
    } else {
        tracing::info!("Gesture listener disabled");
        None
    };

    let mut app_core = AppCore::new(config);
    if listener_handle.is_none() {
        app_core.ui.status_text = String::from("Gesture input unavailable");
    }
    for path in &files {
        app_core.open_file(path);
    }

    let mut frontend = TuiFrontend::new()?;
    frontend.set_poll_timeout(poll_timeout);

    // Track time for periodic repaints
    let mut last_refresh = std::time::Instant::now();

    // Main event loop
    while app_core.running {
        // Poll for frontend events (keyboard, mouse, resize, paste)
        let events = frontend.poll_events()?;
        for event in events {
            handle_frontend_event(&mut app_core, event);
        }

        // Gesture tokens, each handled to completion before the next
        while let Ok(msg) = gesture_rx.try_recv() {
            match msg {
                GestureMessage::Listening(addr) => app_core.set_gesture_listening(addr),
                GestureMessage::Command(token) => app_core.handle_gesture(&token),
            }
        }

        app_core.tick();

        // Force render every second for clocks and the camera indicator
        if last_refresh.elapsed().as_secs() >= 1 {
            app_core.needs_render = true;
            last_refresh = std::time::Instant::now();
        }

        // Render if needed
        if app_core.needs_render {
            frontend.render(&mut app_core)?;
            app_core.needs_render = false;
        }

        // No sleep needed - event::poll() timeout already limits frame rate to ~60 FPS
    }

    app_core.shutdown();

    // Cleanup
    frontend.cleanup()?;

    if let Some(handle) = listener_handle {
        handle.abort();
        let _ = handle.await;
    }

    Ok(())
}

fn handle_frontend_event(app_core: &mut core::AppCore, event: frontend::FrontendEvent) {
    use frontend::FrontendEvent;

    match event {
        FrontendEvent::Key { code, modifiers } => app_core.handle_key(code, modifiers),
        FrontendEvent::Mouse { kind, modifiers } => app_core.handle_mouse(kind, modifiers),
        FrontendEvent::Resize => app_core.needs_render = true,
        FrontendEvent::Paste { text } => app_core.handle_paste(&text),
    }
}
