//! Annotation formatting.
//!
//! Turns a test's declared source plus its outcome into one GitHub annotation line. The path comes from a
//! [`SourceLookup`], the line and message from the failure cause (see [`gha_annotate_core::diagnostic`]).

use gha_annotate_core::{
    AnnotationLine, ClassDescriptor, Severity, Status, TestOutcome, TestSource, resolve_line, resolve_message,
};
use miette::Diagnostic;
use thiserror::Error;

use crate::locate::{LocateError, SourceLookup};

/// Errors that prevent an annotation from being produced.
#[derive(Debug, Error, Diagnostic)]
pub enum FormatError {
    #[error("unsupported test source type: {kind}")]
    #[diagnostic(
        code(gha_annotate::format::unsupported_source),
        help("only class and method sources can be mapped to a file and line")
    )]
    UnsupportedSource { kind: &'static str },

    #[error("{status} outcomes are not annotated")]
    #[diagnostic(code(gha_annotate::format::not_annotatable))]
    NotAnnotatable { status: Status },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Locate(#[from] LocateError),
}

/// Renders annotation lines, looking source files up through `L`.
#[derive(Debug, Clone)]
pub struct DiagnosticFormatter<L> {
    lookup: L,
}

impl<L: SourceLookup> DiagnosticFormatter<L> {
    pub fn new(lookup: L) -> Self {
        Self { lookup }
    }

    /// Build the annotation for a test declared at `source`.
    ///
    /// ## Errors
    ///
    /// - [`FormatError::UnsupportedSource`] for anything but class and method sources.
    /// - [`FormatError::NotAnnotatable`] for passed outcomes.
    /// - [`FormatError::Locate`] when the source lookup hits an I/O error.
    pub fn annotation_for(&self, source: &TestSource, outcome: &TestOutcome) -> Result<AnnotationLine, FormatError> {
        let class = source.declaring_class().ok_or(FormatError::UnsupportedSource {
            kind: source.kind_name(),
        })?;
        self.annotate_class(class, outcome)
    }

    /// [`Self::annotation_for`], rendered to its wire form.
    pub fn render(&self, source: &TestSource, outcome: &TestOutcome) -> Result<String, FormatError> {
        self.annotation_for(source, outcome).map(|annotation| annotation.to_string())
    }

    #[tracing::instrument(level = "debug", skip_all, fields(class = %class.name, status = %outcome.status))]
    fn annotate_class(&self, class: &ClassDescriptor, outcome: &TestOutcome) -> Result<AnnotationLine, FormatError> {
        let severity = Severity::for_status(outcome.status).ok_or(FormatError::NotAnnotatable {
            status: outcome.status,
        })?;
        let file = self.lookup.source_path_for(class)?;

        Ok(AnnotationLine {
            severity,
            file: file.to_slash_string(),
            line: resolve_line(&class.name, outcome.cause.as_ref()),
            status: outcome.status,
            message: resolve_message(outcome),
        })
    }
}
