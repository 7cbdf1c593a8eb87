//! Check command implementation.
//!
//! Parses each given file as a whole signature buffer and reports either
//! `ok` or a rendered diagnostic, matching `check`'s role as the CLI's
//! fast pass/fail gate over a set of files.

use std::path::PathBuf;
use std::time::Instant;

use tracing::{debug, info};
use tsig_util::buffer::Buffer;
use tsig_util::diagnostic::{DiagnosticBuilder, SourceSnippet};

use crate::commands::common::output_messages;
use crate::commands::traits::{Command, CommandDescription};
use crate::error::{Result, TsigcError};

/// Arguments for the check command.
#[derive(Debug, Clone, Default)]
pub struct CheckArgs {
    /// Enable verbose output.
    pub verbose: bool,
    /// Files to check.
    pub files: Vec<PathBuf>,
}

/// Check command handler.
pub struct CheckCommand {
    args: CheckArgs,
}

impl CheckCommand {
    /// Create a new CheckCommand.
    pub fn new(args: CheckArgs) -> Self {
        Self { args }
    }

    /// Execute the command. Returns the number of files that failed to
    /// parse; the caller treats a nonzero count as a failing exit code.
    pub fn run(&self) -> Result<usize> {
        let start_time = Instant::now();

        if self.args.files.is_empty() {
            return Err(TsigcError::FileOperation(
                "no input files specified".to_string(),
            ));
        }

        let mut failed = 0;
        for path in &self.args.files {
            if self.check_one(path)? {
                failed += 1;
            }
        }

        if self.args.verbose {
            eprintln!(
                "{} checked {} file(s) in {:.2}s, {} failed",
                output_messages::INFO,
                self.args.files.len(),
                start_time.elapsed().as_secs_f64(),
                failed
            );
        }

        Ok(failed)
    }

    /// Check a single file, returning `true` if it failed to parse.
    fn check_one(&self, path: &PathBuf) -> Result<bool> {
        let content = std::fs::read_to_string(path)?;
        let buffer = Buffer::new(path.display().to_string(), content)
            .map_err(|e| TsigcError::FileOperation(e.to_string()))?;

        info!(file = %path.display(), "checking signature file");
        match tsig_par::parse_signature(&buffer, 1, 1) {
            Ok(decls) => {
                debug!(file = %path.display(), declarations = decls.len(), "parse succeeded");
                println!("{}: {}", path.display(), output_messages::OK);
                Ok(false)
            }
            Err(err) => {
                let range = err.range();
                let line = buffer.line_at(range.start.line).unwrap_or_default();
                let diagnostic = DiagnosticBuilder::error(err.to_string())
                    .range(range)
                    .snippet(SourceSnippet::point(line, range.start.line, range.start.column + 1))
                    .build();
                eprintln!("{}: {}", path.display(), diagnostic.message);
                for snippet in &diagnostic.snippets {
                    eprintln!("{}", snippet.format());
                }
                Ok(true)
            }
        }
    }
}

impl Command for CheckCommand {
    type Args = CheckArgs;
    type Output = usize;

    fn new(args: Self::Args) -> Self {
        Self::new(args)
    }

    fn execute(&self) -> Result<Self::Output> {
        self.run()
    }

    fn name() -> &'static str {
        "check"
    }
}

impl CommandDescription for CheckCommand {
    fn description() -> &'static str {
        "Check that files parse as valid type signatures"
    }

    fn help() -> &'static str {
        "Parses each given file as a whole signature and reports `ok` or \
         a diagnostic for the first syntax error encountered."
    }
}

/// Run the check command.
pub fn run_check(args: CheckArgs) -> Result<usize> {
    let command = CheckCommand::new(args);
    command.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_check_args_default() {
        let args = CheckArgs::default();
        assert!(!args.verbose);
        assert!(args.files.is_empty());
    }

    #[test]
    fn test_check_command_name() {
        assert_eq!(<CheckCommand as Command>::name(), "check");
    }

    #[test]
    fn test_check_command_execute_no_files() {
        let args = CheckArgs::default();
        let command = CheckCommand::new(args);
        let result = command.run();
        assert!(result.is_err());
    }

    #[test]
    fn test_check_command_execute_valid_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("ok.rbs");
        std::fs::write(&file, "FOO: Integer\n").unwrap();

        let args = CheckArgs {
            verbose: false,
            files: vec![file],
        };
        let command = CheckCommand::new(args);
        let failed = command.run().unwrap();
        assert_eq!(failed, 0);
    }

    #[test]
    fn test_check_command_execute_invalid_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("bad.rbs");
        std::fs::write(&file, "class\n").unwrap();

        let args = CheckArgs {
            verbose: false,
            files: vec![file],
        };
        let command = CheckCommand::new(args);
        let failed = command.run().unwrap();
        assert_eq!(failed, 1);
    }

    #[test]
    fn test_check_command_execute_mixed_files() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("ok.rbs");
        let bad = dir.path().join("bad.rbs");
        std::fs::write(&good, "FOO: Integer\n").unwrap();
        std::fs::write(&bad, "class\n").unwrap();

        let args = CheckArgs {
            verbose: false,
            files: vec![good, bad],
        };
        let command = CheckCommand::new(args);
        let failed = command.run().unwrap();
        assert_eq!(failed, 1);
    }
}
