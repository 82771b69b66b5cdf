//! CLI module for gha-annotate
//!
//! ## Commands
//!
//! - `annotate [FILE]` - Turn a JSON Lines stream of finished tests into annotation lines on stdout
//! - `locate <CLASS>` - Print the source path resolved for one class
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.
//! Stdout is reserved for annotation lines; everything else goes to stderr.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use gha_annotate_core::{LanguageId, lang};

use crate::locate::{DEFAULT_MAX_DEPTH, LocatorConfig, LookupStrategy, SearchRoot};
use crate::version::GHA_ANNOTATE_VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }

    /// Create a failure error rendered through miette (code, help, source chain).
    pub fn report(err: impl miette::Diagnostic + Send + Sync + 'static) -> Self {
        Self::failure(format!("{:?}", miette::Report::new(err)))
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Turn test results into GitHub Actions annotations
#[derive(Parser, Debug)]
#[command(name = "gha-annotate")]
#[command(version = GHA_ANNOTATE_VERSION)]
#[command(about = "Turn JVM test results into GitHub Actions file/line annotations", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Annotate failed, aborted and skipped tests from a JSON Lines event stream
    Annotate {
        /// Event file (default: stdin)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,
        #[command(flatten)]
        locator: LocatorArgs,
        /// Log and skip events that cannot be annotated instead of aborting
        #[arg(long)]
        keep_going: bool,
    },

    /// Print the source path resolved for a class
    Locate {
        /// Fully-qualified class name (binary names like `pkg.Outer$Inner` accepted)
        #[arg(value_name = "CLASS")]
        class: String,
        /// Directory or archive the class was loaded from
        #[arg(long, value_name = "DIR")]
        origin: Option<PathBuf>,
        #[command(flatten)]
        locator: LocatorArgs,
    },
}

/// Options shared by every command that looks up source files.
#[derive(Args, Debug, Clone)]
pub struct LocatorArgs {
    /// Checkout root (default: $GITHUB_WORKSPACE, or the current directory)
    #[arg(long, value_name = "DIR")]
    pub workspace: Option<PathBuf>,
    /// Source language: java, kotlin, groovy, scala
    #[arg(long = "lang", value_name = "LANG", default_value = "java", value_parser = parse_language)]
    pub language: LanguageId,
    /// Lookup strategy: auto, upward, search
    #[arg(long, value_name = "STRATEGY", default_value = "auto", value_parser = parse_strategy)]
    pub strategy: LookupStrategy,
    /// Maximum directory depth for the workspace search
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,
}

impl LocatorArgs {
    /// Build the locator config; the workspace falls back to `GITHUB_WORKSPACE` here, once.
    pub fn to_config(&self) -> LocatorConfig {
        let search_root = match &self.workspace {
            Some(dir) => SearchRoot::from(dir.clone()),
            None => SearchRoot::from_env(),
        };
        LocatorConfig::new(search_root)
            .with_language(self.language)
            .with_strategy(self.strategy)
            .with_max_depth(self.max_depth)
    }
}

fn parse_language(name: &str) -> Result<LanguageId, String> {
    lang::from_str(name).ok_or_else(|| {
        let known: Vec<&str> = lang::LANGUAGES.iter().map(|l| l.canonical).collect();
        format!("unknown language '{}' (expected one of: {})", name, known.join(", "))
    })
}

fn parse_strategy(name: &str) -> Result<LookupStrategy, String> {
    LookupStrategy::from_str(name)
        .ok_or_else(|| format!("unknown strategy '{}' (expected one of: auto, upward, search)", name))
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Annotate {
            input,
            locator,
            keep_going,
        } => commands::annotate(input.as_deref(), &locator.to_config(), keep_going),
        Command::Locate { class, origin, locator } => commands::locate(&class, origin, &locator.to_config()),
    }
}

// ============================================================================
// Tests
// ============================================================================
