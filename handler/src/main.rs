use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use jelly_core::{Dispatcher, OsLauncher, builders};
use log::{error, info};

mod config;
mod logging;
mod protocol;

use config::Config;

/// Protocol handler that turns jelly-player:// URIs into media player
/// launches.
#[derive(Parser)]
#[command(
    name = "jelly-handler",
    version,
    about = "Decodes jelly-player:// URIs and launches the configured media players",
    arg_required_else_help = true,
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Raw URI handed over by the OS protocol launch.
    #[arg(value_name = "URI")]
    uri: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Register the URI scheme with the OS and remember a player executable.
    Install {
        /// Target identifier the executable is used for (e.g. mpv).
        #[arg(long)]
        player: String,
        /// Scheme to register.
        #[arg(long, default_value = "jelly-player")]
        scheme: String,
        /// Full path to the player executable.
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },
    /// Remove the URI scheme registration.
    Uninstall {
        /// Scheme to unregister.
        #[arg(long, default_value = "jelly-player")]
        scheme: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match config::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error loading configuration: {err:#}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(err) = logging::init(&config) {
        eprintln!("error setting up logging: {err:#}");
        return ExitCode::FAILURE;
    }

    match (cli.command, cli.uri) {
        (Some(Command::Install { player, scheme, path }), _) => {
            run_to_exit(install(config, &player, &scheme, path))
        }
        (Some(Command::Uninstall { scheme }), _) => run_to_exit(uninstall(&scheme)),
        (None, Some(uri)) => match handle(&config, &uri) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                // Typically launched by the OS with no console attached; the
                // log is the only place this will be seen.
                error!("{err:#}");
                ExitCode::from(2)
            }
        },
        // arg_required_else_help guarantees one of the arms above matched.
        (None, None) => unreachable!("clap enforces a uri or a subcommand"),
    }
}

fn run_to_exit(result: Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Decode the URI payload and dispatch every instruction in it. Payload
/// errors abort before anything launches; per-instruction failures are
/// handled inside the dispatcher.
fn handle(config: &Config, raw: &str) -> Result<()> {
    info!("raw uri: {raw}");

    let payload = jelly_core::split_scheme(raw, &config.scheme)?;
    let instructions = jelly_core::decode_instructions(payload)?;
    info!("decoded {} instruction(s)", instructions.len());

    let delay = Duration::from_millis(config.launch_delay_ms);
    let mut dispatcher = Dispatcher::new(&config.players, &config.user_agents, delay, OsLauncher);
    let summary = dispatcher.run(&instructions);
    info!(
        "dispatched {} of {} instruction(s)",
        summary.launched,
        instructions.len()
    );
    Ok(())
}

/// Persist the player path, then register the scheme so the OS starts
/// routing `<scheme>://` launches here.
fn install(mut config: Config, player: &str, scheme: &str, path: PathBuf) -> Result<()> {
    if !path.is_file() {
        bail!("player executable not found at {}", path.display());
    }
    if builders::builder_for(player).is_none() {
        let mut known: Vec<_> = builders::known_targets().collect();
        known.sort_unstable();
        bail!(
            "unknown player target {player:?}; supported: {}",
            known.join(", ")
        );
    }

    config.scheme = scheme.to_owned();
    config.players.insert(player.to_owned(), path);
    config::save(&config).context("failed to save configuration")?;

    protocol::install(scheme).context("failed to register the scheme")?;
    println!("Protocol installed: {scheme}");
    Ok(())
}

fn uninstall(scheme: &str) -> Result<()> {
    protocol::uninstall(scheme).context("failed to remove the scheme registration")?;
    println!("Protocol uninstalled: {scheme}");
    Ok(())
}
