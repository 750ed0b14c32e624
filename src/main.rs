mod analytics;
mod app;
mod colors;
mod constants;
mod context;
mod editor;
mod error;
mod input;
mod layout;
mod location;
mod logging;
mod measure;
mod network;
mod playback;
mod settings;
mod source;
mod ui;

use std::io::stdout;
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use crossterm::{
    ExecutableCommand,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use tokio::sync::mpsc;

use analytics::TracingAnalytics;
use app::App;
use constants::{EVENT_POLL_INTERVAL, EVENT_RECV_TIMEOUT, PLAYBACK_TICK_INTERVAL};
use context::ViewContext;
use error::AppError;
use input::InputHandler;
use layout::LayoutVariant;
use location::Location;
use settings::Settings;
use source::{FrameSource, Recording};

/// Inspect a recorded session: replay timeline, resizable layout and the
/// network requests it made.
#[derive(Debug, Parser)]
#[command(name = "replayview", version, about)]
struct Args {
    /// Load the recording from a JSON file
    #[arg(long, conflicts_with_all = ["url", "mock"])]
    file: Option<PathBuf>,

    /// Fetch the recording from an HTTP endpoint
    #[arg(long, conflicts_with = "mock")]
    url: Option<String>,

    /// Use the built-in sample recording (the default without --file/--url)
    #[arg(long)]
    mock: bool,

    /// Layout: topbar, sidebar_left, no_video or video_only
    #[arg(long)]
    layout: Option<String>,

    /// Organization slug reported with analytics events
    #[arg(long)]
    org: Option<String>,

    /// Project id reported with analytics events
    #[arg(long)]
    project: Option<String>,

    /// Headers and bodies were captured, show them in the detail drawer
    #[arg(long)]
    network_details: bool,

    /// Log file path (defaults to the user cache directory)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn source(&self) -> FrameSource {
        match (&self.file, &self.url) {
            (Some(path), _) => FrameSource::File(path.clone()),
            (None, Some(url)) => FrameSource::Url(url.clone()),
            (None, None) => FrameSource::Mock,
        }
    }
}

/// Events that can occur in the app
enum AppEvent {
    /// Terminal input event
    Terminal(Event),
    /// Recording finished loading
    Loaded(Recording),
    /// Recording failed to load
    LoadFailed(String),
    /// Playback clock tick
    Tick,
}

/// Spawns a task to load the recording
fn spawn_loader(tx: mpsc::Sender<AppEvent>, source: FrameSource) {
    tokio::spawn(async move {
        let event = match source.load().await {
            Ok(recording) => AppEvent::Loaded(recording),
            Err(e) => AppEvent::LoadFailed(e.to_string()),
        };
        let _ = tx.send(event).await;
    });
}

/// Spawns a thread to read terminal events and forward them to the event channel
fn spawn_terminal_reader(tx: mpsc::Sender<AppEvent>) {
    std::thread::spawn(move || loop {
        match event::poll(EVENT_POLL_INTERVAL) {
            Ok(true) => {
                if let Ok(evt) = event::read()
                    && tx.blocking_send(AppEvent::Terminal(evt)).is_err()
                {
                    break;
                }
            }
            Ok(false) => {}
            Err(_) => {
                std::thread::sleep(EVENT_POLL_INTERVAL);
            }
        }
    });
}

/// Spawns a task that drives the playback clock
fn spawn_ticker(tx: mpsc::Sender<AppEvent>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(PLAYBACK_TICK_INTERVAL);
        loop {
            interval.tick().await;
            if tx.send(AppEvent::Tick).await.is_err() {
                break;
            }
        }
    });
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    let log_path = args.log_file.clone().unwrap_or_else(logging::default_log_path);
    let _log_guard = logging::init(&log_path, args.verbose)?;

    let mut settings = Settings::load();
    if let Some(layout) = &args.layout {
        settings.layout = layout.parse::<LayoutVariant>()?;
    }

    let context = ViewContext {
        organization: args
            .org
            .clone()
            .or_else(|| settings.organization.clone())
            .unwrap_or_else(|| ViewContext::default().organization),
        project_id: args
            .project
            .clone()
            .or_else(|| settings.project.clone())
            .unwrap_or_else(|| ViewContext::default().project_id),
        network_details: args.network_details || settings.features.network_details,
        ..ViewContext::default()
    };
    let location = Location::for_replay(&context.replay_id)?;
    let source = args.source();
    tracing::info!(source = %source.describe(), layout = %settings.layout, "starting");

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    // Run app
    let app = App::new(settings, context, location, Box::new(TracingAnalytics));
    let result = run_app(&mut terminal, app, source).await;

    // Restore terminal
    stdout().execute(DisableMouseCapture)?;
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    source: FrameSource,
) -> Result<(), AppError> {
    let mut input_handler = InputHandler::new();
    let (tx, mut rx) = mpsc::channel::<AppEvent>(32);

    app.set_loading_status(format!("Loading {}...", source.describe()));
    spawn_loader(tx.clone(), source.clone());
    spawn_terminal_reader(tx.clone());
    spawn_ticker(tx.clone());

    loop {
        let size = terminal.size()?;
        let area = Rect::new(0, 0, size.width, size.height);
        // Remeasure before drawing so a resize is applied to this frame.
        app.sync(area);

        terminal.draw(|frame| {
            ui::render(frame, &app);
        })?;

        if let Ok(Some(event)) = tokio::time::timeout(EVENT_RECV_TIMEOUT, rx.recv()).await {
            handle_app_event(event, &mut app, &mut input_handler, area);
        }

        if app.should_quit {
            break;
        }

        if app.retry_requested {
            app.retry_requested = false;
            app.set_loading_status(format!("Loading {}...", source.describe()));
            spawn_loader(tx.clone(), source.clone());
        }
    }

    tracing::info!("exiting");
    Ok(())
}

fn handle_app_event(event: AppEvent, app: &mut App, input_handler: &mut InputHandler, area: Rect) {
    match event {
        AppEvent::Terminal(Event::Key(key)) => {
            input_handler.handle_key(key, app);
        }
        AppEvent::Terminal(Event::Mouse(mouse)) => {
            input_handler.handle_mouse(mouse, app, area);
        }
        AppEvent::Terminal(_) => {}
        AppEvent::Loaded(recording) => {
            app.set_ready(recording);
        }
        AppEvent::LoadFailed(message) => {
            app.set_error(message);
        }
        AppEvent::Tick => {
            app.tick(Instant::now());
        }
    }
}
