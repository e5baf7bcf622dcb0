use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use frontconf::cmd;
use std::path::PathBuf;
use std::process;

/// Front-end build configuration composer
///
/// frontconf reads a small project descriptor and derives the bundler
/// configurations for dev-server, production, test and debug runs, plus the
/// test-runner configurations that embed them.
#[derive(Parser)]
#[command(name = "frontconf", author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Disable emoji output (useful for CI/CD or accessibility)
    #[arg(long, global = true)]
    no_emoji: bool,

    /// Descriptor file, or the directory containing it
    #[arg(short, long, global = true, default_value = ".")]
    descriptor: PathBuf,

    /// JSON rule catalog replacing the built-in one
    #[arg(long, global = true, value_name = "FILE")]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print one configuration as JSON
    Show {
        /// Target: run, build, test, debug, harness-headless, harness-interactive, harness-debug
        target: String,

        /// Print on a single line
        #[arg(long)]
        compact: bool,
    },

    /// Write every configuration as JSON files
    Emit {
        /// Directory the files are written to
        #[arg(short, long, default_value = "config")]
        out_dir: PathBuf,
    },

    /// Create a descriptor populated with defaults
    Init {
        /// Descriptor format: json, toml
        #[arg(short, long, default_value = "json", value_parser = ["json", "toml"])]
        format: String,
    },

    /// Review the descriptor and rule catalog
    Check,

    /// Show the resolved compilation strategy and selected rule kinds
    Strategy,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    // Initialize logger (use RUST_LOG env var to control verbosity)
    env_logger::init();

    let cli = Cli::parse();

    // Set console emoji mode based on CLI flag
    if cli.no_emoji {
        std::env::set_var("NO_EMOJI", "1");
    }

    let descriptor = cli.descriptor.as_path();
    let catalog = cli.catalog.as_deref();

    let result = match &cli.command {
        Some(Commands::Show { target, compact }) => {
            cmd::cmd_show(descriptor, catalog, target, *compact)
        }
        Some(Commands::Emit { out_dir }) => cmd::cmd_emit(descriptor, catalog, out_dir),
        Some(Commands::Init { format }) => cmd::cmd_init(descriptor, format),
        Some(Commands::Check) => cmd::cmd_check(descriptor, catalog),
        Some(Commands::Strategy) => cmd::cmd_strategy(descriptor, catalog),
        Some(Commands::Completions { shell }) => {
            cmd::cmd_completions(*shell, &mut Cli::command());
            Ok(())
        }
        None => {
            // No subcommand provided, show help
            println!("frontconf v{}", env!("CARGO_PKG_VERSION"));
            println!("Front-end build configuration composer\n");
            println!("Usage: frontconf <COMMAND>\n");
            println!("Commands:");
            println!("  show        Print one configuration as JSON");
            println!("  emit        Write every configuration as JSON files");
            println!("  init        Create a descriptor populated with defaults");
            println!("  check       Review the descriptor and rule catalog");
            println!("  strategy    Show the resolved compilation strategy");
            println!("\nRun 'frontconf <COMMAND> --help' for more information on a command.");
            Ok(())
        }
    };

    if let Err(e) = result {
        use frontconf::error::ErrorFormatter;
        eprintln!("{}", ErrorFormatter::format(&e));
        let exit_code = ErrorFormatter::exit_code(&e);
        process::exit(exit_code);
    }
}
