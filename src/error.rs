//! Top-level error type for annotating a stream of test events.

use std::io;

use miette::Diagnostic;
use thiserror::Error;

use crate::events::EventError;
use crate::format::FormatError;

#[derive(Debug, Error, Diagnostic)]
pub enum AnnotateError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Event(#[from] EventError),

    #[error("failed to annotate `{test}`: {source}")]
    #[diagnostic(code(gha_annotate::annotate))]
    Format {
        /// Unique id of the test being annotated.
        test: String,
        #[source]
        source: FormatError,
    },

    #[error("failed to write annotation: {0}")]
    #[diagnostic(code(gha_annotate::output))]
    Output(#[from] io::Error),
}
