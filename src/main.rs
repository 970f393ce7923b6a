//! csp-checker - builds and runs the CSP checker container.
//!
//! `start` makes sure the image exists (building it from the tool directory
//! if needed) and then runs it against the given domains. The wrapper exits
//! with the container's exit code.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::process::ExitCode;

use csp_checker::commands::{self, show::ShowTarget, start::StartOptions};
use csp_checker::config::Config;
use csp_checker::runtime::DockerCli;
use csp_checker::{logging, CheckerError, ImageTag};

#[derive(Parser)]
#[command(name = "csp-checker")]
#[command(about = "Run the csp-checker container from its own repo dir")]
#[command(
    after_help = "QUICK START:\n  csp-checker preflight             Check docker and the build context\n  csp-checker build                 Build the checker image\n  csp-checker start example.org     Check a domain (builds the image if missing)"
)]
struct Cli {
    /// Log debug output (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the checker image from the tool directory
    Build {
        /// Image tag to build (default: csp-checker:latest)
        #[arg(long)]
        tag: Option<ImageTag>,
    },

    /// Run the CSP checker against domains
    Start(RunArgs),

    /// Run preflight checks (docker, Dockerfile, .env)
    Preflight {
        /// Fail if any checks fail (exit code 1)
        #[arg(long)]
        strict: bool,
    },

    /// Show information
    Show {
        #[command(subcommand)]
        what: ShowCommand,
    },
}

#[derive(Subcommand)]
enum ShowCommand {
    /// Show current configuration
    Config,
    /// Print the `docker run` command `start` would execute
    Command(RunArgs),
}

#[derive(Args)]
struct RunArgs {
    /// Image tag to run (default: csp-checker:latest)
    #[arg(long)]
    tag: Option<ImageTag>,

    /// Only show one example per type/policy inside the checker
    #[arg(long)]
    short: bool,

    /// One or more domains whose network block failures should be ignored.
    /// End the list with `--` when domains follow.
    #[arg(long, num_args = 0.., value_name = "DOMAIN")]
    ignore_network_blocks_from: Vec<String>,

    /// Pass the tool's .env to the container when no domains are given (deprecated)
    #[arg(long)]
    env_file_fallback: bool,

    /// Domains to check
    domains: Vec<String>,
}

impl RunArgs {
    fn into_options(self, config: &Config) -> StartOptions {
        StartOptions {
            tag: self.tag.unwrap_or_else(|| config.default_tag.clone()),
            domains: self.domains,
            short_mode: self.short,
            ignore_network_blocks_from: self.ignore_network_blocks_from,
            env_file_fallback: self.env_file_fallback,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let code = e
                .downcast_ref::<CheckerError>()
                .map(CheckerError::exit_code)
                .unwrap_or(1);
            eprintln!("Error: {:#}", e);
            ExitCode::from(code)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::from_environment()?;
    let runtime = DockerCli::new(config.runtime.as_str());

    match cli.command {
        Commands::Build { tag } => {
            let tag = tag.unwrap_or_else(|| config.default_tag.clone());
            commands::cmd_build(&runtime, &config, &tag)?;
        }

        Commands::Start(args) => {
            commands::cmd_start(&runtime, &config, &args.into_options(&config))?;
        }

        Commands::Preflight { strict } => {
            commands::cmd_preflight(&config, strict)?;
        }

        Commands::Show { what } => {
            let target = match what {
                ShowCommand::Config => ShowTarget::Config,
                ShowCommand::Command(args) => {
                    ShowTarget::Command(args.into_options(&config).request(&config))
                }
            };
            commands::cmd_show(&config, target)?;
        }
    }

    Ok(())
}
