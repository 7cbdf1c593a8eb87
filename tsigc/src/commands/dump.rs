//! Dump command implementation.
//!
//! Parses a single file as a whole signature buffer and pretty-prints the
//! resulting declarations, for debugging the parser and for golden-output
//! comparisons in the property-test harness.

use std::path::PathBuf;

use tracing::info;
use tsig_util::buffer::Buffer;
use tsig_util::diagnostic::{DiagnosticBuilder, SourceSnippet};

use crate::commands::traits::{Command, CommandDescription};
use crate::config::Config;
use crate::error::Result;

/// Arguments for the dump command.
#[derive(Debug, Clone, Default)]
pub struct DumpArgs {
    /// Enable verbose output.
    pub verbose: bool,
    /// File to parse and dump.
    pub file: PathBuf,
}

/// Dump command handler.
pub struct DumpCommand {
    args: DumpArgs,
    config: Config,
}

impl DumpCommand {
    /// Create a new DumpCommand.
    pub fn new(args: DumpArgs) -> Self {
        Self {
            args,
            config: Config::default(),
        }
    }

    /// Execute the command.
    pub fn run(&self) -> Result<()> {
        let content = std::fs::read_to_string(&self.args.file)?;
        let buffer = Buffer::new(self.args.file.display().to_string(), content)
            .map_err(|e| crate::error::TsigcError::FileOperation(e.to_string()))?;

        info!(file = %self.args.file.display(), "dumping signature file");
        let decls = match tsig_par::parse_signature(&buffer, 1, 1) {
            Ok(decls) => decls,
            Err(err) => {
                let range = err.range();
                let line = buffer.line_at(range.start.line).unwrap_or_default();
                let diagnostic = DiagnosticBuilder::error(err.to_string())
                    .range(range)
                    .snippet(SourceSnippet::point(line, range.start.line, range.start.column + 1))
                    .build();
                eprintln!("{}: {}", self.args.file.display(), diagnostic.message);
                for snippet in &diagnostic.snippets {
                    eprintln!("{}", snippet.format());
                }
                return Err(err.into());
            }
        };

        for decl in &decls {
            if self.config.include_comments {
                if let Some(comment) = decl.comment() {
                    println!("# {}", comment.content.trim_end());
                }
            }
            println!("{decl:#?}");
        }

        Ok(())
    }
}

impl Command for DumpCommand {
    type Args = DumpArgs;
    type Output = ();

    fn new(args: Self::Args) -> Self {
        Self::new(args)
    }

    fn execute(&self) -> Result<Self::Output> {
        self.run()
    }

    fn name() -> &'static str {
        "dump"
    }
}

impl CommandDescription for DumpCommand {
    fn description() -> &'static str {
        "Parse a file and print its declarations"
    }

    fn help() -> &'static str {
        "Parses a single file as a whole signature and pretty-prints the \
         resulting declarations for inspection or debugging."
    }
}

/// Run the dump command.
pub fn run_dump(args: DumpArgs) -> Result<()> {
    let command = DumpCommand::new(args);
    command.run()
}
