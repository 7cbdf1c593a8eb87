//! tsigc - a command-line tool for the tsig type-signature parser.
//!
//! This is the main entry point for the tsigc CLI application.
//! It uses clap for argument parsing and dispatches to appropriate
//! command handlers based on user input.

mod commands;
mod config;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{
    check::{run_check, CheckArgs},
    dump::{run_dump, DumpArgs},
    type_cmd::{run_type, TypeArgs},
};
use config::Config;
use error::{Result, TsigcError};

/// tsigc - a CLI tool for the tsig type-signature parser
///
/// tsigc checks, dumps, and type-checks individual expressions against the
/// structural type-signature grammar (method signatures, type aliases,
/// interfaces, modules, and classes).
#[derive(Parser, Debug)]
#[command(name = "tsigc")]
#[command(author = "Tsig Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "A CLI tool for the tsig type-signature parser", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, env = "TSIG_LOG")]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "TSIGC_CONFIG")]
    config: Option<PathBuf>,

    /// Disable color output
    #[arg(long, global = true, env = "TSIGC_NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands for the tsigc CLI.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Check that files parse as valid type signatures
    ///
    /// Runs the whole-buffer declaration parse over each file and prints
    /// `ok` or a diagnostic; exits nonzero if any file fails.
    Check(CheckCommand),

    /// Parse a file and print its declarations
    ///
    /// Runs the whole-buffer declaration parse over a file and
    /// pretty-prints the resulting AST.
    Dump(DumpCommand),

    /// Parse a single type expression
    ///
    /// Runs the single-type parse over an expression given as an argument
    /// and prints the resulting node.
    Type(TypeCommand),
}

/// Arguments for the check subcommand.
#[derive(Parser, Debug)]
struct CheckCommand {
    /// Files to check
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

/// Arguments for the dump subcommand.
#[derive(Parser, Debug)]
struct DumpCommand {
    /// File to parse and dump
    file: PathBuf,
}

/// Arguments for the type subcommand.
#[derive(Parser, Debug)]
struct TypeCommand {
    /// The type expression to parse, e.g. `Array[Integer]`
    expr: String,
}

/// Main entry point for the tsigc CLI.
fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.no_color)?;
    let config = load_config(cli.config.as_deref())?;
    let exit_code = execute_command(cli.command, cli.verbose, config)?;

    if exit_code != 0 {
        std::process::exit(exit_code);
    }
    Ok(())
}

/// Initialize the logging system.
fn init_logging(verbose: bool, no_color: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let subscriber = fmt::layer()
        .with_ansi(!no_color)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init()
        .map_err(|e| TsigcError::Config(format!("failed to initialize logging: {}", e)))?;

    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(config_path: Option<&std::path::Path>) -> Result<Config> {
    match config_path {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    }
}

/// Execute the selected command, returning the process exit code.
fn execute_command(command: Commands, verbose: bool, _config: Config) -> Result<i32> {
    match command {
        Commands::Check(args) => execute_check(args, verbose),
        Commands::Dump(args) => execute_dump(args, verbose).map(|_| 0),
        Commands::Type(args) => execute_type(args, verbose).map(|_| 0),
    }
}

/// Execute the check command.
fn execute_check(args: CheckCommand, verbose: bool) -> Result<i32> {
    let check_args = CheckArgs {
        verbose,
        files: args.files,
    };
    let failed = run_check(check_args)?;
    Ok(if failed > 0 { 1 } else { 0 })
}

/// Execute the dump command.
fn execute_dump(args: DumpCommand, verbose: bool) -> Result<()> {
    let dump_args = DumpArgs {
        verbose,
        file: args.file,
    };
    run_dump(dump_args)
}

/// Execute the type command.
fn execute_type(args: TypeCommand, verbose: bool) -> Result<()> {
    let type_args = TypeArgs {
        verbose,
        expr: args.expr,
    };
    run_type(type_args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_check() {
        let cli = Cli::parse_from(["tsigc", "check", "a.rbs"]);
        assert!(matches!(cli.command, Commands::Check(_)));
    }

    #[test]
    fn test_cli_parse_check_multiple_files() {
        let cli = Cli::parse_from(["tsigc", "check", "a.rbs", "b.rbs"]);
        if let Commands::Check(args) = cli.command {
            assert_eq!(args.files.len(), 2);
        } else {
            panic!("Expected Check command");
        }
    }

    #[test]
    fn test_cli_parse_dump() {
        let cli = Cli::parse_from(["tsigc", "dump", "a.rbs"]);
        if let Commands::Dump(args) = cli.command {
            assert_eq!(args.file, PathBuf::from("a.rbs"));
        } else {
            panic!("Expected Dump command");
        }
    }

    #[test]
    fn test_cli_parse_type() {
        let cli = Cli::parse_from(["tsigc", "type", "Array[Integer]"]);
        if let Commands::Type(args) = cli.command {
            assert_eq!(args.expr, "Array[Integer]");
        } else {
            panic!("Expected Type command");
        }
    }

    #[test]
    fn test_cli_parse_global_verbose() {
        let cli = Cli::parse_from(["tsigc", "--verbose", "dump", "a.rbs"]);
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_parse_global_config() {
        let cli = Cli::parse_from(["tsigc", "--config", "/path/to/config.toml", "dump", "a.rbs"]);
        assert_eq!(cli.config, Some(PathBuf::from("/path/to/config.toml")));
    }

    #[test]
    fn test_cli_parse_global_no_color() {
        let cli = Cli::parse_from(["tsigc", "--no-color", "dump", "a.rbs"]);
        assert!(cli.no_color);
    }

    #[test]
    fn test_cli_version_flag() {
        let cli = Cli::parse_from(["tsigc", "dump", "a.rbs"]);
        assert!(matches!(cli.command, Commands::Dump(_)));
        assert_eq!(cli.verbose, false);
    }
}
