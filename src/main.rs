//! Binary entry point: resolve configuration, start logging, bring up the
//! service (store + sidecar), run the Ratatui event loop, then shut down.
use std::fs::{self, OpenOptions};
use std::io;
use std::sync::Mutex;

use rhythm_game_picker::{run_app, App, Config, PickerService};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let config = Config::resolve()?;
    init_logging(&config);

    let mut app = App::new(PickerService::startup(&config));
    let result = run_app(&mut app);
    app.into_service().shutdown();
    result
}

/// Log to a file in the data directory since the TUI owns the terminal. If the
/// file cannot be opened, logs are discarded rather than aborting startup.
fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false);

    let log_file = fs::create_dir_all(&config.data_dir).and_then(|_| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(config.log_path())
    });

    match log_file {
        Ok(file) => builder.with_writer(Mutex::new(file)).init(),
        Err(_) => builder.with_writer(io::sink).init(),
    }
}
