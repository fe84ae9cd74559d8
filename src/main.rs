use std::io;
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::runtime::Runtime;

use guidebot::app::{App, InputMode, StatusLevel};
use guidebot::config::{self, Config};
use guidebot::core::Action;
use guidebot::domain::dashboard::{ChannelNotifier, DashboardController, DrainSettings};
use guidebot::infrastructure::logging;
use guidebot::ui;

#[derive(Debug, Parser)]
#[command(
    name = "guidebot",
    version,
    about = "Guidebot: control panel for a simulated guide robot"
)]
struct Args {
    /// Config file (defaults to $GUIDEBOT_CONFIG or ~/.config/guidebot/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seconds between battery drain ticks
    #[arg(long)]
    tick_secs: Option<u64>,

    /// Battery drained per tick, in percent
    #[arg(long)]
    drain: Option<f64>,

    /// Starting battery level, in percent
    #[arg(long)]
    battery: Option<f64>,

    /// Log file (defaults to the data directory)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(log_path) = args.log_file.clone().or_else(config::log_path) {
        if let Err(err) = logging::init(&log_path) {
            eprintln!("logging disabled: {err:#}");
        }
    }

    let (config, config_warning) = match config::load(args.config.as_deref()) {
        Ok(config) => (config, None),
        Err(err) => {
            tracing::warn!(error = %err, "config rejected, using defaults");
            (Config::default(), Some(format!("Config ignored: {err}")))
        }
    };
    let config = apply_overrides(config, &args)?;

    let runtime = Runtime::new()?;
    let (notify_tx, notify_rx) = mpsc::channel();
    let controller = DashboardController::start(
        config.initial_state(),
        ChannelNotifier::new(notify_tx),
        config.drain_settings(),
        runtime.handle(),
    );

    let mut app = App::new(controller, notify_rx, config.toast_duration());
    if let Some(warning) = config_warning {
        app.set_status(warning, StatusLevel::Warn);
    }

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app, config.tick_rate());
    app.shutdown();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "ui loop failed");
        eprintln!("{err:?}");
    }

    Ok(())
}

fn apply_overrides(mut config: Config, args: &Args) -> Result<Config> {
    if let Some(tick_secs) = args.tick_secs {
        config.battery.tick_secs = tick_secs;
    }
    if let Some(drain) = args.drain {
        config.battery.drain_per_tick = drain;
    }
    if let Some(battery) = args.battery {
        config.battery.initial_level = battery;
    }
    config.validate()?;

    let DrainSettings { period, per_tick } = config.drain_settings();
    tracing::info!(
        period_secs = period.as_secs(),
        per_tick,
        initial_level = config.battery.initial_level,
        "drain settings"
    );
    Ok(config)
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    tick_rate: Duration,
) -> Result<()> {
    let mut last_tick = Instant::now();

    loop {
        app.sync_context();
        terminal.draw(|f| ui::draw(f, app))?;
        if app.should_quit {
            return Ok(());
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => handle_key(app, key),
                Event::Resize(_, _) => {}
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick();
            last_tick = Instant::now();
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if app.help_open {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')) {
            app.apply_action(Action::CloseOverlay);
        }
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Command => handle_command_mode(app, key),
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), mods) if mods.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true
        }
        (KeyCode::Char('q') | KeyCode::Esc, _) => app.apply_action(Action::Quit),
        _ => app.dispatch_key(key),
    }
}

fn handle_command_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.exit_command(),
        KeyCode::Enter => app.apply_command(),
        KeyCode::Backspace => {
            app.command.input.pop();
        }
        KeyCode::Char(ch) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                return;
            }
            app.command.input.push(ch);
        }
        _ => {}
    }
}
