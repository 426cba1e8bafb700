//! Command dispatch for the colourtree binary

use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::demo::{demo_source, run_demo};
use crate::application::error_ext::read_script;
use crate::application::{Outcome, ScriptRunner, DEMOS};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Run { script }) => run_script(cli, script),
        Some(Commands::Demo { name, print }) => demo(cli, name, *print),
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Show => config_show(cli),
            ConfigCommands::Path => config_path(cli),
        },
        Some(Commands::Completion { shell }) => {
            completion(*shell);
            Ok(())
        }
        None => Err(CliError::Usage(
            "no command given, see `colourtree --help`".to_string(),
        )),
    }
}

/// Settings from config layers, with command line flags on top.
fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if cli.verify_each {
        settings.verify_each = true;
    }
    debug!(?settings, "settings loaded");
    Ok(settings)
}

#[instrument(skip(cli))]
fn run_script(cli: &Cli, script: &Path) -> CliResult<()> {
    let settings = load_settings(cli)?;
    let source = read_script(script)?;
    let outcomes = ScriptRunner::new(settings.run_settings()).run_source(&source)?;
    print_outcomes(&outcomes);
    Ok(())
}

#[instrument(skip(cli))]
fn demo(cli: &Cli, name: &str, print: bool) -> CliResult<()> {
    let source = demo_source(name).ok_or_else(|| {
        CliError::InvalidArgs(format!(
            "unknown demo '{}', available: {}",
            name,
            DEMOS.iter().map(|(n, _)| *n).join(", ")
        ))
    })?;
    if print {
        output::info(source.trim_end());
        return Ok(());
    }
    let settings = load_settings(cli)?;
    output::header(&format!("demo: {}", name));
    let outcomes = run_demo(source, settings.run_settings())?;
    print_outcomes(&outcomes);
    Ok(())
}

fn print_outcomes(outcomes: &[Outcome]) {
    for outcome in outcomes {
        match outcome {
            Outcome::Shown(_) => output::info(outcome),
            Outcome::Checked { uniform: false, .. } => output::failure(outcome),
            Outcome::Checked { .. } | Outcome::Expected { .. } | Outcome::Verified => {
                output::success(outcome)
            }
            _ => output::action("tree", outcome),
        }
    }
}

fn config_show(cli: &Cli) -> CliResult<()> {
    let settings = load_settings(cli)?;
    output::info(settings.to_toml()?.trim_end());
    Ok(())
}

fn config_path(cli: &Cli) -> CliResult<()> {
    match global_config_path() {
        Some(path) if path.exists() => output::action("global", &path.display()),
        Some(path) => output::action("global", &format!("{} (not present)", path.display())),
        None => output::action("global", "no config directory on this platform"),
    }
    if let Some(local) = &cli.config {
        output::action("local", &local.display());
    }
    Ok(())
}

fn completion(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}
