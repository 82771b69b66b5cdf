//! JSON Lines event stream.
//!
//! The test engine integration writes one `test-finished` event per line:
//!
//! ```json
//! {"test":{"unique_id":"[class:pkg.T]/[method:t()]","source":{"kind":"method","class":{"name":"pkg.T"},"method":"t"}},
//!  "outcome":{"status":"failed","cause":{"type":"java.lang.AssertionError","message":"boom",
//!  "frames":[{"class":"pkg.T","line":37}]}}}
//! ```
//!
//! (shown wrapped; on the wire each event is a single line). Blank lines are skipped.

use std::io::{self, BufRead};

use gha_annotate_core::{TestIdentifier, TestOutcome};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One finished test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestFinished {
    pub test: TestIdentifier,
    pub outcome: TestOutcome,
}

#[derive(Debug, Error, Diagnostic)]
pub enum EventError {
    #[error("malformed event on line {line}: {source}")]
    #[diagnostic(
        code(gha_annotate::events::decode),
        help("each line must be one JSON object with `test` and `outcome` fields")
    )]
    Decode {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("event on line {line} is not valid UTF-8: {source}")]
    #[diagnostic(code(gha_annotate::events::encoding))]
    Encoding {
        line: usize,
        #[source]
        source: std::str::Utf8Error,
    },

    #[error("failed to read events: {0}")]
    #[diagnostic(code(gha_annotate::events::read))]
    Read(#[from] io::Error),
}

/// Decode a single event. `line` is only used for error reporting.
pub fn parse_event(text: &str, line: usize) -> Result<TestFinished, EventError> {
    serde_json::from_str(text).map_err(|source| EventError::Decode { line, source })
}

/// Iterator over the events of a JSON Lines stream.
///
/// Lines are read as raw bytes, so an undecodable line only fails its own event.
pub struct EventReader<R> {
    reader: R,
    buf: Vec<u8>,
    line: usize,
}

impl<R: BufRead> EventReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            line: 0,
        }
    }
}

impl<R: BufRead> Iterator for EventReader<R> {
    type Item = Result<TestFinished, EventError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(EventError::Read(e))),
            }
            self.line += 1;

            let text = match std::str::from_utf8(&self.buf) {
                Ok(text) => text,
                Err(source) => {
                    return Some(Err(EventError::Encoding {
                        line: self.line,
                        source,
                    }));
                }
            };
            if text.trim().is_empty() {
                continue;
            }
            return Some(parse_event(text, self.line));
        }
    }
}
