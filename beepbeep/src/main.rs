use anyhow::Result;
use beepbeep::alert::AlertBackend;
use beepbeep::commands::{config_cmd, scan, update_check, watch};
use beepbeep::config::{Config, ConfigOverrides};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "beepbeep")]
#[command(about = "Beeps when a new commander shows up in your instance", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to config.toml (defaults to <config dir>/beepbeep/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Watch the history directory and beep on new arrivals (default)
    Watch(WatchArgs),

    /// Show every history log and who is currently in it
    Scan {
        /// CommanderHistory directory to scan
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check whether a newer version has been published
    CheckUpdate,

    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Args, Default)]
struct WatchArgs {
    /// CommanderHistory directory to watch
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Minimum seconds between two alerts
    #[arg(long)]
    cooldown: Option<u64>,

    /// Seconds between two polls
    #[arg(long)]
    poll_interval: Option<u64>,

    /// How to raise alerts
    #[arg(long, value_enum)]
    alert: Option<AlertBackend>,

    /// Skip the startup update check
    #[arg(long)]
    no_update_check: bool,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Write a config file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let command = cli
        .command
        .unwrap_or_else(|| Commands::Watch(WatchArgs::default()));

    match command {
        Commands::Watch(args) => {
            let config = Config::load(cli.config.as_deref())?.apply(ConfigOverrides {
                history_dir: args.dir,
                cooldown_secs: args.cooldown,
                poll_interval_secs: args.poll_interval,
                alert: args.alert,
                no_update_check: args.no_update_check,
            });
            watch::execute(config)
        }
        Commands::Scan { dir, json } => {
            let config = Config::load(cli.config.as_deref())?.apply(ConfigOverrides {
                history_dir: dir,
                ..ConfigOverrides::default()
            });
            scan::execute(config, json)
        }
        Commands::CheckUpdate => update_check::execute(),
        Commands::Config { command } => match command {
            ConfigCommands::Show => config_cmd::show(&Config::load(cli.config.as_deref())?),
            ConfigCommands::Init { force } => config_cmd::init(cli.config, force),
        },
    }
}
