//! Test outcome model and GitHub annotation rendering for `gha-annotate`.
//!
//! ## Notes
//!
//! - This is a pure crate: **no IO**, no global state, no logging. Locating source files on disk lives in the
//!   `gha_annotate` crate; everything here is deterministic string and data work.
//! - The `serde` feature adds (de)serialization for the JSON Lines event format.

pub mod diagnostic;
pub mod lang;
pub mod model;

pub use diagnostic::{AnnotationLine, Severity, resolve_line, resolve_message};
pub use lang::LanguageId;
pub use model::{Cause, ClassDescriptor, Frame, Status, TestIdentifier, TestOutcome, TestSource};
