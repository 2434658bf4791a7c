//! # gxb CLI Entry Point
//!
//! Parses arguments with clap and routes them to the command handlers.
//!
//! ## Commands
//!
//! - `build` - cross-compile the project for every selected target
//! - `list` - show the targets the toolchain supports
//! - `completion` - print shell completions

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use std::path::PathBuf;
use std::time::Duration;

use gxb::commands::{self, DEFAULT_QUERY_TIMEOUT};
use gxb::config::Overrides;
use gxb::toolchain::Toolchain;

#[derive(Parser)]
#[command(name = "gxb")]
#[command(about = "Cross-compile a Go project for many targets in parallel", version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by commands that talk to the toolchain.
#[derive(Args, Clone)]
struct ToolchainArgs {
    /// Target to build, as OS or OS/ARCH (repeatable, case-insensitive)
    #[arg(short, long = "target", value_name = "OS[/ARCH]")]
    targets: Vec<String>,
    /// Only first-class ports
    #[arg(long)]
    first_class: bool,
    /// The go program to use [default: $GXB_GO or go]
    #[arg(long, value_name = "PATH")]
    go: Option<PathBuf>,
    /// Seconds to wait for the target catalog query
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_QUERY_TIMEOUT.as_secs())]
    timeout: u64,
    /// Print additional information during the run
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Cross-compile the project for every selected target
    Build {
        /// Project directory [default: current directory]
        project: Option<PathBuf>,
        /// Directory to write binaries into [default: <project>/build]
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
        /// Base name of the produced binaries [default: project directory name]
        #[arg(short, long)]
        name: Option<String>,
        /// Maximum number of concurrent builds [default: one per target]
        #[arg(short, long, value_name = "N")]
        jobs: Option<usize>,
        /// Show the builds that would run without running them
        #[arg(long)]
        dry_run: bool,
        /// Print a JSON report instead of human output
        #[arg(long)]
        json: bool,
        /// Exit successfully even when some targets fail to build
        #[arg(long)]
        allow_failures: bool,
        #[command(flatten)]
        toolchain: ToolchainArgs,
    },
    /// List the targets the toolchain supports
    List {
        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        toolchain: ToolchainArgs,
    },
    /// Generate shell completions
    Completion {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            project,
            output,
            name,
            jobs,
            dry_run,
            json,
            allow_failures,
            toolchain,
        } => {
            let args = commands::build::BuildArgs {
                project,
                overrides: Overrides {
                    output,
                    name,
                    targets: toolchain.targets,
                    jobs,
                    first_class: toolchain.first_class,
                    go: toolchain.go,
                },
                timeout: Duration::from_secs(toolchain.timeout),
                verbose: toolchain.verbose,
                dry_run,
                json,
                allow_failures,
            };
            match commands::build::run_build(&args)? {
                0 => Ok(()),
                code => std::process::exit(code),
            }
        }
        Commands::List { json, toolchain } => commands::list::run_list(&commands::list::ListArgs {
            targets: toolchain.targets,
            first_class: toolchain.first_class,
            json,
            timeout: Duration::from_secs(toolchain.timeout),
            verbose: toolchain.verbose,
            toolchain: toolchain.go.map(Toolchain::new).unwrap_or_default(),
        }),
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "gxb", &mut std::io::stdout());
            Ok(())
        }
    }
}
