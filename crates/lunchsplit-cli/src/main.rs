use clap::Parser;
use lunchsplit_cli::config::ConfigSource;
use lunchsplit_cli::{App, Cli, LunchSplitConfig, is_user_error, logging};
use std::process::ExitCode;
use tracing::{debug, error, warn};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let user_error = is_user_error(&err);
            error!(user_error, "{err:#}");
            eprintln!("Error: {err:#}");
            if user_error { ExitCode::from(2) } else { ExitCode::FAILURE }
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => LunchSplitConfig::load_from(path)?,
        None => LunchSplitConfig::load()?,
    }
    .apply_env_overrides()?;

    logging::init(&config.logging, cli.verbose)?;

    match &config.source {
        ConfigSource::Missing(path) => {
            warn!(
                path = %path.display(),
                "Configuration file not found. Using default configuration."
            )
        }
        ConfigSource::File(path) => debug!(path = %path.display(), "Configuration file read"),
        ConfigSource::Defaults => {}
    }
    config.log_summary();

    let mut app = App::open(config)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    app.run(cli.command, &mut out)
}
