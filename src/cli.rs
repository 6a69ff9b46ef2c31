//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;
use layerpack::output::OutputConfig;

/// Layerpack - Resolve packages from layered repositories
#[derive(Parser, Debug)]
#[command(name = "layerpack")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the packages of the layered repository
    Ls(commands::ls::LsArgs),
    /// Show the merged configuration for a package version
    Show(commands::show::ShowArgs),
    /// Render the deployment descriptor for a package version
    Render(commands::render::RenderArgs),
    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        env_logger::Builder::new()
            .parse_filters(&self.log_level)
            .format_timestamp(None)
            .try_init()
            .ok();

        let output = OutputConfig::from_env_and_flag(&self.color);

        match self.command {
            Commands::Ls(args) => commands::ls::execute(args, &output),
            Commands::Show(args) => commands::show::execute(args),
            Commands::Render(args) => commands::render::execute(args),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}
