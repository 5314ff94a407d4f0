use std::fs::{self, File};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::EnvFilter;

use processpro::app::App;
use processpro::config::{self, Config};
use processpro::core::NotifyLevel;
use processpro::domain::RoomId;
use processpro::modules::export;
use processpro::state::{Tab, ViewState};
use processpro::ui;

#[derive(Debug, Parser)]
#[command(
    name = "processpro",
    version,
    about = "ProcessPro: process planning dashboards and team chat in the terminal"
)]
struct Args {
    /// Config file (default: ~/.config/processpro/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Tab to open on start: dashboard or chat
    #[arg(long)]
    tab: Option<Tab>,

    /// Chat room id to select on start
    #[arg(long)]
    room: Option<u32>,

    /// Display name of the current user
    #[arg(long)]
    user: Option<String>,

    /// Write the message log and dashboard data to <DIR> and exit
    #[arg(long, value_name = "DIR")]
    export: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let (config, config_error) = match config::load(args.config.as_deref()) {
        Ok(config) => (config, None),
        Err(err) => (Config::default(), Some(err)),
    };

    init_tracing(&config);
    if let Some(err) = config_error.as_ref() {
        tracing::warn!(error = %err, "using default config");
    }

    let state = initial_state(&args, &config);

    if let Some(dir) = args.export.as_deref() {
        let summary = export::export_all(dir, &state, Local::now())
            .with_context(|| format!("export to {} failed", dir.display()))?;
        println!(
            "Wrote {} messages to {}",
            summary.message_count,
            summary.messages_path.display()
        );
        println!("Wrote dashboard data to {}", summary.dashboard_path.display());
        return Ok(());
    }

    let mut app = App::new(state, config.export_dir());
    if let Some(err) = config_error {
        app.set_status(format!("Config ignored: {err}"), NotifyLevel::Warn);
    }

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "terminal loop failed");
        eprintln!("{err:?}");
    }

    tracing::info!(messages = app.state.log.len(), "exit");
    Ok(())
}

fn initial_state(args: &Args, config: &Config) -> ViewState {
    let mut profile = config.profile();
    if let Some(user) = args.user.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        profile.user_name = user.to_string();
    }

    let tab = args.tab.unwrap_or(config.default_tab);
    let room = args.room.map(RoomId).unwrap_or_else(|| config.default_room());

    ViewState::new(profile).select_tab(tab).select_room(room)
}

/// Log to a file so the alternate screen stays clean. PROCESSPRO_LOG
/// overrides the configured level.
fn init_tracing(config: &Config) {
    let Some(path) = config::log_path() else {
        return;
    };
    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    let Ok(file) = File::options().create(true).append(true).open(&path) else {
        return;
    };

    let filter = EnvFilter::try_from_env("PROCESSPRO_LOG")
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init();
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let tick_rate = Duration::from_millis(200);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui::draw(f, app))?;
        if app.should_quit {
            return Ok(());
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => app.handle_key(key),
                Event::Mouse(mouse) => {
                    let size = terminal.size().unwrap_or_default();
                    app.handle_mouse(mouse, size);
                }
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick();
            last_tick = Instant::now();
        }
    }
}
