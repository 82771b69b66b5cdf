#![no_main]

use gha_annotate::events::parse_event;
use gha_annotate::locate::{LocateError, ResolvedPath, SourceLookup};
use gha_annotate::{ClassDescriptor, DiagnosticFormatter};
use libfuzzer_sys::fuzz_target;

/// Lookup that never touches the filesystem.
struct ConventionLookup;

impl SourceLookup for ConventionLookup {
    fn source_path_for(&self, class: &ClassDescriptor) -> Result<ResolvedPath, LocateError> {
        Ok(ResolvedPath::from(class.top_level_name()))
    }
}

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(event) = parse_event(text, 1) else {
        return;
    };
    let Some(source) = &event.test.source else {
        return;
    };
    if let Ok(annotation) = DiagnosticFormatter::new(ConventionLookup).annotation_for(source, &event.outcome) {
        assert!(!annotation.message.contains(['\n', '\r']), "multi-line message: {:?}", annotation.message);
        let _ = annotation.to_string();
    }
});
