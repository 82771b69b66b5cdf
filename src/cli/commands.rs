//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use gha_annotate_core::ClassDescriptor;

use crate::error::AnnotateError;
use crate::events::{EventError, EventReader, TestFinished};
use crate::format::DiagnosticFormatter;
use crate::listener::{AnnotationListener, ExecutionListener};
use crate::locate::{LocatorConfig, SourceLocator, SourceLookup};

use super::{CliError, CliResult, ExitCode};

/// Open the event input: a file, or stdin for `None` / `-`.
fn open_input(input: Option<&Path>) -> CliResult<Box<dyn BufRead>> {
    match input {
        None => Ok(Box::new(io::stdin().lock())),
        Some(path) if path == Path::new("-") => Ok(Box::new(io::stdin().lock())),
        Some(path) => {
            let file = File::open(path)
                .map_err(|e| CliError::failure(format!("Cannot open event file '{}': {}", path.display(), e)))?;
            Ok(Box::new(BufReader::new(file)))
        }
    }
}

/// Annotate every non-passed test from a JSON Lines event stream.
///
/// One line per annotated test is written to stdout, in input order.
///
/// ## Errors
///
/// The first event that cannot be decoded or annotated aborts the run, unless `keep_going` is set: then the
/// event is logged at `warn` and skipped. Read and write failures always abort.
pub fn annotate(input: Option<&Path>, config: &LocatorConfig, keep_going: bool) -> CliResult<ExitCode> {
    let reader = open_input(input)?;
    let formatter = DiagnosticFormatter::new(SourceLocator::new(config.clone()));
    let mut listener = AnnotationListener::new(formatter, io::stdout().lock());

    let skipped = annotate_events(EventReader::new(reader), &mut listener, keep_going).map_err(CliError::report)?;
    listener.execution_complete().map_err(CliError::report)?;

    if skipped > 0 {
        tracing::warn!(skipped, "some events could not be annotated");
    }
    Ok(ExitCode::SUCCESS)
}

/// Feed `events` to `listener`. Returns the number of events skipped under `keep_going`.
pub fn annotate_events<I, T>(events: I, listener: &mut T, keep_going: bool) -> Result<usize, AnnotateError>
where
    I: IntoIterator<Item = Result<TestFinished, EventError>>,
    T: ExecutionListener,
{
    let mut skipped = 0;
    for event in events {
        let result = event
            .map_err(AnnotateError::from)
            .and_then(|event| listener.execution_finished(&event.test, &event.outcome));

        match result {
            Ok(()) => {}
            Err(err) if keep_going && is_per_event(&err) => {
                tracing::warn!(error = %err, "skipping event");
                skipped += 1;
            }
            Err(err) => return Err(err),
        }
    }
    Ok(skipped)
}

/// Whether an error only concerns the current event (as opposed to the input or output stream).
fn is_per_event(err: &AnnotateError) -> bool {
    match err {
        AnnotateError::Event(EventError::Decode { .. } | EventError::Encoding { .. })
        | AnnotateError::Format { .. } => true,
        AnnotateError::Event(EventError::Read(_)) | AnnotateError::Output(_) => false,
    }
}

/// Print the resolved source path for a single class.
pub fn locate(class: &str, origin: Option<PathBuf>, config: &LocatorConfig) -> CliResult<ExitCode> {
    let mut descriptor = ClassDescriptor::new(class);
    descriptor.origin = origin;

    let path = SourceLocator::new(config.clone())
        .source_path_for(&descriptor)
        .map_err(CliError::report)?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", path).map_err(|e| CliError::failure(format!("Error writing output: {}", e)))?;
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::events::parse_event;
    use gha_annotate_core::{TestIdentifier, TestOutcome};

    /// Listener recording the ids it saw.
    #[derive(Default)]
    struct Recorder {
        seen: Vec<String>,
    }

    impl ExecutionListener for Recorder {
        fn execution_finished(&mut self, test: &TestIdentifier, _outcome: &TestOutcome) -> Result<(), AnnotateError> {
            self.seen.push(test.unique_id.clone());
            Ok(())
        }
    }

    fn event(id: &str) -> Result<TestFinished, EventError> {
        parse_event(
            &format!(r#"{{"test":{{"unique_id":"{id}"}},"outcome":{{"status":"failed"}}}}"#),
            1,
        )
    }

    #[test]
    fn test_events_delivered_in_order() {
        let mut recorder = Recorder::default();
        let skipped = annotate_events(vec![event("a"), event("b"), event("c")], &mut recorder, false).unwrap();

        assert_eq!(skipped, 0);
        assert_eq!(recorder.seen, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_bad_event_aborts_by_default() {
        let mut recorder = Recorder::default();
        let events = vec![event("a"), parse_event("{", 2), event("c")];
        let err = annotate_events(events, &mut recorder, false).unwrap_err();

        assert!(matches!(err, AnnotateError::Event(EventError::Decode { line: 2, .. })));
        assert_eq!(recorder.seen, vec!["a"]);
    }

    #[test]
    fn test_bad_event_skipped_with_keep_going() {
        let mut recorder = Recorder::default();
        let events = vec![event("a"), parse_event("{", 2), event("c")];
        let skipped = annotate_events(events, &mut recorder, true).unwrap();

        assert_eq!(skipped, 1);
        assert_eq!(recorder.seen, vec!["a", "c"]);
    }

    #[test]
    fn test_undecodable_line_skipped_with_keep_going() {
        let mut recorder = Recorder::default();
        let mut input = b"\xff\n".to_vec();
        input.extend_from_slice(br#"{"test":{"unique_id":"b"},"outcome":{"status":"failed"}}"#);
        let skipped = annotate_events(EventReader::new(input.as_slice()), &mut recorder, true).unwrap();

        assert_eq!(skipped, 1);
        assert_eq!(recorder.seen, vec!["b"]);
    }

    #[test]
    fn test_read_error_aborts_even_with_keep_going() {
        let mut recorder = Recorder::default();
        let events = vec![
            event("a"),
            Err(EventError::Read(io::Error::new(io::ErrorKind::BrokenPipe, "gone"))),
        ];
        let err = annotate_events(events, &mut recorder, true).unwrap_err();
        assert!(matches!(err, AnnotateError::Event(EventError::Read(_))));
    }

    #[test]
    fn test_open_missing_input() {
        let err = open_input(Some(Path::new("/definitely/not/here.jsonl"))).err().unwrap();
        assert!(err.message.contains("Cannot open event file"));
        assert_eq!(err.exit_code, ExitCode::FAILURE);
    }
}
