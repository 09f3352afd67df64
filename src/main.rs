use std::time::Duration;

use clap::Parser;
use color_eyre::Result;
use ratatui::DefaultTerminal;

use wordsweep::api::{Dispatcher, HttpBackend};
use wordsweep::app::App;
use wordsweep::cli::Args;
use wordsweep::config::{self, ConfigResult};

/// How long to wait for a key before checking for API responses
const EVENT_POLL_INTERVAL: Duration = Duration::from_millis(50);

fn main() -> Result<()> {
    // Install color-eyre panic hook for better error messages
    color_eyre::install()?;

    let args = Args::parse();

    #[cfg(debug_assertions)]
    init_logging();

    let ConfigResult { config, warning } = match &args.config {
        Some(path) => ConfigResult {
            config: config::load_explicit_config(path)?,
            warning: None,
        },
        None => config::load_config(),
    };

    // Fail on a bad URL before the terminal is taken over
    let settings = args.resolve(&config)?;
    log::info!(
        "Using backend {} (shuffle: {})",
        settings.base_url,
        settings.shuffle
    );

    let backend = HttpBackend::new(settings.base_url)?;
    let mut app = App::new(Dispatcher::spawn(backend), settings.shuffle);

    if let Some(warning) = warning {
        app.set_notice(warning);
    }
    if let Some(query) = &args.query {
        app.search_for(query);
    }

    // Initialize terminal (handles raw mode, alternate screen, etc.)
    let terminal = ratatui::init();

    let result = run(terminal, &mut app);

    // Restore terminal (automatic cleanup)
    ratatui::restore();

    result
}

fn run(mut terminal: DefaultTerminal, app: &mut App) -> Result<()> {
    loop {
        app.tick();

        terminal.draw(|frame| app.render(frame))?;

        app.handle_events(EVENT_POLL_INTERVAL)?;

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}

/// Send `log` output to a file, only when RUST_LOG is set
///
/// The terminal belongs to the UI, so nothing may go to stderr.
#[cfg(debug_assertions)]
fn init_logging() {
    use std::fs::{self, OpenOptions};

    if std::env::var_os("RUST_LOG").is_none() {
        return;
    }
    let (Some(dir), Some(path)) = (config::config_dir(), config::log_path()) else {
        return;
    };
    if fs::create_dir_all(&dir).is_err() {
        return;
    }

    if let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) {
        let _ = env_logger::Builder::from_default_env()
            .target(env_logger::Target::Pipe(Box::new(file)))
            .try_init();
    }
}
