//! Type command implementation.
//!
//! Parses a single type expression given on the command line and prints
//! the resulting node, seeded with the configured default type variables.

use tracing::info;
use tsig_util::buffer::Buffer;
use tsig_util::diagnostic::{DiagnosticBuilder, SourceSnippet};
use tsig_util::Symbol;

use crate::commands::traits::{Command, CommandDescription};
use crate::config::Config;
use crate::error::Result;

/// Arguments for the type command.
#[derive(Debug, Clone, Default)]
pub struct TypeArgs {
    /// Enable verbose output.
    pub verbose: bool,
    /// The type expression to parse, e.g. `Array[Integer]`.
    pub expr: String,
}

/// Type command handler.
pub struct TypeCommand {
    args: TypeArgs,
    config: Config,
}

impl TypeCommand {
    /// Create a new TypeCommand.
    pub fn new(args: TypeArgs) -> Self {
        Self {
            args,
            config: Config::default(),
        }
    }

    /// Execute the command.
    pub fn run(&self) -> Result<()> {
        let buffer = Buffer::new("<expr>", self.args.expr.clone())
            .map_err(|e| crate::error::TsigcError::FileOperation(e.to_string()))?;

        let tvars: Vec<Symbol> = self
            .config
            .parse
            .default_type_variables
            .iter()
            .map(|s| Symbol::intern(s))
            .collect();

        info!(expr = %self.args.expr, "parsing type expression");
        match tsig_par::parse_type(&buffer, 1, 1, &tvars) {
            Ok(ty) => {
                println!("{ty:#?}");
                Ok(())
            }
            Err(err) => {
                let range = err.range();
                let line = buffer.line_at(range.start.line).unwrap_or_default();
                let diagnostic = DiagnosticBuilder::error(err.to_string())
                    .range(range)
                    .snippet(SourceSnippet::point(line, range.start.line, range.start.column + 1))
                    .build();
                eprintln!("{}", diagnostic.message);
                for snippet in &diagnostic.snippets {
                    eprintln!("{}", snippet.format());
                }
                Err(err.into())
            }
        }
    }
}

impl Command for TypeCommand {
    type Args = TypeArgs;
    type Output = ();

    fn new(args: Self::Args) -> Self {
        Self::new(args)
    }

    fn execute(&self) -> Result<Self::Output> {
        self.run()
    }

    fn name() -> &'static str {
        "type"
    }
}

impl CommandDescription for TypeCommand {
    fn description() -> &'static str {
        "Parse a single type expression"
    }

    fn help() -> &'static str {
        "Parses a single type expression given as an argument and prints \
         the resulting node, e.g. `tsigc type 'Array[Integer]'`."
    }
}

/// Run the type command.
pub fn run_type(args: TypeArgs) -> Result<()> {
    let command = TypeCommand::new(args);
    command.run()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_command_name() {
        assert_eq!(<TypeCommand as Command>::name(), "type");
    }

    #[test]
    fn test_type_command_execute_valid_expr() {
        let args = TypeArgs {
            verbose: false,
            expr: "Array[Integer]".to_string(),
        };
        let command = TypeCommand::new(args);
        assert!(command.run().is_ok());
    }

    #[test]
    fn test_type_command_execute_invalid_expr() {
        let args = TypeArgs {
            verbose: false,
            expr: "|||".to_string(),
        };
        let command = TypeCommand::new(args);
        assert!(command.run().is_err());
    }
}
