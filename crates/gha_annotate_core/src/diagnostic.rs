//! GitHub workflow-command annotations.
//!
//! An annotation is a single line the Actions runner picks out of a step's stdout and turns into an inline
//! comment on the referenced file:
//!
//! ```text
//! ::error file=src/test/java/pkg/T.java,line=37,col=0::FAILED - boom
//! ```
//!
//! The token order (`file=`, `line=`, `col=0`) is fixed; the runner does not accept anything else.

use std::fmt;

use crate::model::{Cause, Status, TestOutcome};

/// Annotation severity, chosen from the outcome status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    /// `Failed` maps to `error`; every other non-passed status maps to `warning`.
    ///
    /// Returns `None` for `Passed`, which is never annotated.
    pub fn for_status(status: Status) -> Option<Severity> {
        match status {
            Status::Passed => None,
            Status::Failed => Some(Severity::Error),
            Status::Aborted | Status::Skipped => Some(Severity::Warning),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully resolved annotation, rendered through [`fmt::Display`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationLine {
    pub severity: Severity,
    /// Path relative to the checkout root, `/`-separated.
    pub file: String,
    pub line: u32,
    pub status: Status,
    /// Single-line message (see [`resolve_message`]).
    pub message: String,
}

impl fmt::Display for AnnotationLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "::{} file={},line={},col=0::{} - {}",
            self.severity, self.file, self.line, self.status, self.message
        )
    }
}

/// Line of the first call-history frame executed by `type_name`.
///
/// Returns `0` when there is no cause, no frame matches exactly, or the matching frame has no known line.
pub fn resolve_line(type_name: &str, cause: Option<&Cause>) -> u32 {
    let Some(cause) = cause else {
        return 0;
    };
    cause
        .frames
        .iter()
        .find(|frame| frame.class_name == type_name)
        .map_or(0, |frame| u32::try_from(frame.line).unwrap_or(0))
}

/// Single-line, trimmed message for an outcome.
///
/// Uses the cause's message when there is a cause, the outcome's own message (a skip reason) otherwise.
/// Either falls back to the outcome's textual rendering.
pub fn resolve_message(outcome: &TestOutcome) -> String {
    let raw = match &outcome.cause {
        Some(cause) => cause.message.clone().unwrap_or_else(|| outcome.to_string()),
        None => outcome.message.clone().unwrap_or_else(|| outcome.to_string()),
    };
    collapse_line_breaks(&raw).trim().to_string()
}

/// Replace every line-break sequence with a single space. `\r\n` counts as one sequence.
pub fn collapse_line_breaks(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if is_line_break(ch) {
            if ch == '\r' && chars.peek() == Some(&'\n') {
                chars.next();
            }
            out.push(' ');
        } else {
            out.push(ch);
        }
    }
    out
}

fn is_line_break(ch: char) -> bool {
    matches!(
        ch,
        '\n' | '\r' | '\u{000B}' | '\u{000C}' | '\u{0085}' | '\u{2028}' | '\u{2029}'
    )
}
