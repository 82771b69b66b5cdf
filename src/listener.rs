//! Test execution listener.
//!
//! The listener sits between the test engine's completion events and the annotation channel: every
//! non-passed outcome with a known source becomes exactly one line on the output, in delivery order.
//!
//! ## ExecutionListener Trait
//!
//! Engines (or the JSON Lines replay in the CLI) drive an [`ExecutionListener`]; [`AnnotationListener`]
//! is the implementation writing GitHub workflow commands.

use std::io::Write;

use gha_annotate_core::{Status, TestIdentifier, TestOutcome};

use crate::error::AnnotateError;
use crate::format::DiagnosticFormatter;
use crate::locate::SourceLookup;

/// Receives test completion events.
pub trait ExecutionListener {
    /// Called once per finished test or container.
    fn execution_finished(&mut self, test: &TestIdentifier, outcome: &TestOutcome) -> Result<(), AnnotateError>;

    /// Called after the last event.
    fn execution_complete(&mut self) -> Result<(), AnnotateError> {
        Ok(())
    }
}

/// Counts kept by [`AnnotationListener`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnnotationSummary {
    pub annotated: usize,
    pub passed: usize,
    /// Non-passed outcomes without a declared source.
    pub sourceless: usize,
}

/// Writes one annotation line per failed, aborted or skipped test.
pub struct AnnotationListener<L, W> {
    formatter: DiagnosticFormatter<L>,
    out: W,
    summary: AnnotationSummary,
}

impl<L: SourceLookup, W: Write> AnnotationListener<L, W> {
    pub fn new(formatter: DiagnosticFormatter<L>, out: W) -> Self {
        Self {
            formatter,
            out,
            summary: AnnotationSummary::default(),
        }
    }

    pub fn summary(&self) -> AnnotationSummary {
        self.summary
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<L: SourceLookup, W: Write> ExecutionListener for AnnotationListener<L, W> {
    fn execution_finished(&mut self, test: &TestIdentifier, outcome: &TestOutcome) -> Result<(), AnnotateError> {
        if outcome.status == Status::Passed {
            self.summary.passed += 1;
            return Ok(());
        }
        let Some(source) = &test.source else {
            tracing::debug!(test = %test.unique_id, "no source, not annotated");
            self.summary.sourceless += 1;
            return Ok(());
        };

        // Render fully before writing so a failure never leaves half a line behind.
        let mut line = self
            .formatter
            .render(source, outcome)
            .map_err(|source| AnnotateError::Format {
                test: test.unique_id.clone(),
                source,
            })?;
        line.push('\n');

        self.out.write_all(line.as_bytes())?;
        self.out.flush()?;
        self.summary.annotated += 1;
        Ok(())
    }

    fn execution_complete(&mut self) -> Result<(), AnnotateError> {
        self.out.flush()?;
        tracing::info!(
            annotated = self.summary.annotated,
            passed = self.summary.passed,
            sourceless = self.summary.sourceless,
            "annotation run complete"
        );
        Ok(())
    }
}
