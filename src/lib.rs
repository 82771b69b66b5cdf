#![forbid(unsafe_code)]
//! gha-annotate: GitHub Actions annotations for JVM test results
//!
//! Failed, aborted and skipped tests are reported as workflow commands pointing at the test's source file
//! and line, so they show up inline on pull requests instead of only in the job log:
//!
//! ```text
//! ::error file=module/src/test/java/pkg/FooTest.java,line=37,col=0::FAILED - expected <1> but was <2>
//! ```
//!
//! ## Layout
//!
//! - [`locate`] - class name → source file path (upward walk from the class origin, bounded workspace search)
//! - [`format`] - test source + outcome → annotation line
//! - [`listener`] - completion events → annotation lines on a writer
//! - [`events`] - JSON Lines event decoding
//! - [`cli`] - the `gha-annotate` command
//!
//! The outcome model and the line/message rules live in the IO-free `gha_annotate_core` crate and are
//! re-exported here.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod cli;
pub mod error;
pub mod events;
pub mod format;
pub mod listener;
pub mod locate;
pub mod version;

pub use gha_annotate_core::{
    AnnotationLine, Cause, ClassDescriptor, Frame, LanguageId, Severity, Status, TestIdentifier, TestOutcome,
    TestSource, resolve_line, resolve_message,
};

pub use error::AnnotateError;
pub use events::{EventReader, TestFinished};
pub use format::{DiagnosticFormatter, FormatError};
pub use listener::{AnnotationListener, AnnotationSummary, ExecutionListener};
pub use locate::{LocateError, LocatorConfig, LookupStrategy, ResolvedPath, SearchRoot, SourceLocator, SourceLookup};
