// ABOUTME: Entry point: parse arguments, load settings, run the update and map failures to exit codes
// ABOUTME: Designed errors print remediation guidance; anything else exits with status 1

mod ansible;
mod app;
mod cli;
mod error;
mod logging;
mod prompt;
mod settings;
mod ssh;

use anyhow::Result;
use app::Outcome;
use clap::Parser;
use cli::Cli;
use error::UpdateError;
use prompt::{AutoConfirm, Confirm, LinePrompt};
use settings::Settings;
use ssh::{RemoteCommand, ShellLauncher};
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    if cli.init_settings {
        return match init_settings(&cli) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => report(&err, &Settings::default()),
        };
    }

    let settings = match load_settings(&cli) {
        Ok(settings) => settings,
        Err(err) => return report(&err, &Settings::default()),
    };

    match run(&cli, &settings) {
        Ok(outcome) => {
            tracing::debug!("Finished: {:?}", outcome);
            ExitCode::SUCCESS
        }
        Err(err) => report(&err, &settings),
    }
}

fn init_settings(cli: &Cli) -> Result<()> {
    let path = match &cli.settings {
        Some(path) => path.clone(),
        None => Settings::default_settings_path()?,
    };

    Settings::save_default_settings(&path)?;
    println!("Wrote default settings to {}", path.display());
    Ok(())
}

fn load_settings(cli: &Cli) -> Result<Settings> {
    let mut settings = Settings::load(cli.settings.as_deref())?;
    settings.expand_paths()?;
    settings.validate()?;
    Ok(settings)
}

fn run(cli: &Cli, settings: &Settings) -> Result<Outcome> {
    let config_path = cli.config_path(settings);
    let command = app::prepare_command(settings, &config_path)?;

    let mut confirm: Box<dyn Confirm> = if cli.yes {
        Box::new(AutoConfirm)
    } else {
        Box::new(LinePrompt::stdio())
    };

    app::execute(
        &command,
        cli.dry_run,
        &mut confirm,
        &mut ShellLauncher::new(),
        &mut io::stdout(),
    )
}

fn report(err: &anyhow::Error, settings: &Settings) -> ExitCode {
    eprintln!("Error: {err:#}");

    match err.downcast_ref::<UpdateError>() {
        Some(update_err) => {
            if let Some(guidance) = update_err.guidance(&RemoteCommand::manual_template(settings))
            {
                eprintln!("\n{guidance}");
            }
            ExitCode::from(update_err.exit_code() as u8)
        }
        None => ExitCode::FAILURE,
    }
}
