use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use vertical_stepper::app::App;
use vertical_stepper::config::Config;
use vertical_stepper::inspect::inspect;
use vertical_stepper::logging;
use vertical_stepper::ui::install_panic_hook;

#[derive(Parser)]
#[command(name = "stepper")]
#[command(about = "Walk through a multi-step flow in the terminal")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long)]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved state of every step as JSON
    Inspect {
        /// Make this step current before resolving
        #[arg(long, allow_negative_numbers = true)]
        current: Option<isize>,

        /// Pretty-print the JSON
        #[arg(short, long)]
        pretty: bool,
    },

    /// Write the default configuration to the state directory
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (needed for logging setup)
    let config = Config::load(cli.config.as_deref())?;

    let is_tui_mode = cli.command.is_none();
    let logging_handle = logging::init_logging(&config, is_tui_mode, cli.debug)?;

    match cli.command {
        Some(Commands::Inspect { current, pretty }) => cmd_inspect(&config, current, pretty)?,
        Some(Commands::Init { force }) => cmd_init(&config, force)?,
        None => run_tui(config, logging_handle.log_file_path)?,
    }

    Ok(())
}

fn run_tui(config: Config, log_file_path: Option<PathBuf>) -> Result<()> {
    install_panic_hook();

    let mut app = App::new(config);
    let result = app.run();

    logging::report_log_file(log_file_path.as_deref());
    result
}

fn cmd_inspect(config: &Config, current: Option<isize>, pretty: bool) -> Result<()> {
    let report = inspect(config.build_context(), current);
    println!("{}", report.to_json(pretty)?);
    Ok(())
}

fn cmd_init(config: &Config, force: bool) -> Result<()> {
    let path = config.config_file_path();
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    Config::default().save_to(&path)?;
    tracing::info!(path = %path.display(), "wrote default config");
    println!("Wrote {}", path.display());
    Ok(())
}
