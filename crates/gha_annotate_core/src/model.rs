//! Test outcome data model.
//!
//! These types describe one finished test as the execution engine reports it: who ran ([`TestIdentifier`]),
//! where it was declared ([`TestSource`] / [`ClassDescriptor`]) and how it ended ([`TestOutcome`]).
//!
//! With the `serde` feature enabled every type (de)serializes to the JSON Lines event format consumed by the
//! `gha-annotate` CLI.

use std::fmt;
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::lang::LanguageId;

/// Separator between an enclosing type and a nested type in JVM binary names (`pkg.Outer$Inner`).
pub const NESTED_TYPE_SEPARATOR: char = '$';

// ============================================================================
// Class descriptors
// ============================================================================

/// Identifying reference to a test-bearing type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClassDescriptor {
    /// Fully-qualified name, dot-separated. The JVM binary form (`pkg.Outer$Inner`) is accepted.
    pub name: String,
    /// Enclosing types, innermost first.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    pub enclosing: Vec<String>,
    /// Directory (or archive) the compiled class was loaded from, when known.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub origin: Option<PathBuf>,
}

impl ClassDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enclosing: Vec::new(),
            origin: None,
        }
    }

    /// Add the next (outer) enclosing type to the chain.
    pub fn nested_in(mut self, enclosing: impl Into<String>) -> Self {
        self.enclosing.push(enclosing.into());
        self
    }

    pub fn with_origin(mut self, origin: impl Into<PathBuf>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Fully-qualified name of the outermost enclosing type.
    ///
    /// ## Notes
    /// - An explicit enclosing chain wins; its last element is the top-level type.
    /// - Without a chain, a binary name `pkg.Outer$Inner$Deeper` resolves to `pkg.Outer`.
    pub fn top_level_name(&self) -> &str {
        if let Some(outermost) = self.enclosing.last() {
            return outermost;
        }
        match self.name.find(NESTED_TYPE_SEPARATOR) {
            Some(idx) if idx > 0 => &self.name[..idx],
            _ => &self.name,
        }
    }

    /// Package segments of the top-level type (`a.b.C` → `["a", "b"]`).
    pub fn package_segments(&self) -> Vec<&str> {
        let mut segments: Vec<&str> = self.top_level_name().split('.').collect();
        segments.pop();
        segments
    }

    /// Last segment of the top-level type name (`a.b.C` → `C`).
    pub fn simple_name(&self) -> &str {
        let top = self.top_level_name();
        top.rsplit('.').next().unwrap_or(top)
    }

    /// Package path joined with `/` (empty for the default package).
    pub fn package_path(&self) -> String {
        self.package_segments().join("/")
    }

    /// `<package/path>/<SimpleName>.<ext>`, the path a source file has relative to its source-set root.
    pub fn source_file_suffix(&self, language: LanguageId) -> String {
        format!("{}.{}", self.top_level_name().replace('.', "/"), language.extension())
    }
}

impl fmt::Display for ClassDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

// ============================================================================
// Test sources
// ============================================================================

/// Where a test was declared.
///
/// Only [`TestSource::Class`] and [`TestSource::Method`] can be annotated; the remaining kinds exist so a
/// collaborator can hand them over and get a descriptive rejection instead of a malformed line.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum TestSource {
    Class { class: ClassDescriptor },
    Method { class: ClassDescriptor, method: String },
    Package { name: String },
    File { path: PathBuf },
    ClasspathResource { name: String },
    Uri { uri: String },
}

impl TestSource {
    pub fn class(class: ClassDescriptor) -> Self {
        TestSource::Class { class }
    }

    pub fn method(class: ClassDescriptor, method: impl Into<String>) -> Self {
        TestSource::Method {
            class,
            method: method.into(),
        }
    }

    /// The declaring type, for the kinds that have one.
    pub fn declaring_class(&self) -> Option<&ClassDescriptor> {
        match self {
            TestSource::Class { class } | TestSource::Method { class, .. } => Some(class),
            TestSource::Package { .. }
            | TestSource::File { .. }
            | TestSource::ClasspathResource { .. }
            | TestSource::Uri { .. } => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            TestSource::Class { .. } => "class",
            TestSource::Method { .. } => "method",
            TestSource::Package { .. } => "package",
            TestSource::File { .. } => "file",
            TestSource::ClasspathResource { .. } => "classpath_resource",
            TestSource::Uri { .. } => "uri",
        }
    }
}

/// Identity of one test or container in the execution tree.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TestIdentifier {
    pub unique_id: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub display_name: String,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub source: Option<TestSource>,
}

impl TestIdentifier {
    pub fn new(unique_id: impl Into<String>, source: Option<TestSource>) -> Self {
        Self {
            unique_id: unique_id.into(),
            display_name: String::new(),
            source,
        }
    }
}

// ============================================================================
// Outcomes
// ============================================================================

/// Final status of a finished test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Status {
    Passed,
    Failed,
    Aborted,
    Skipped,
}

impl Status {
    /// Upper-case status name as it appears in annotation lines.
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Passed => "PASSED",
            Status::Failed => "FAILED",
            Status::Aborted => "ABORTED",
            Status::Skipped => "SKIPPED",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a failure's call history.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Frame {
    /// Fully-qualified (binary) name of the type executing this frame.
    #[cfg_attr(feature = "serde", serde(rename = "class"))]
    pub class_name: String,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub method: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub file: Option<String>,
    /// Source line; negative when unknown (`-1`) or native (`-2`).
    #[cfg_attr(feature = "serde", serde(default = "unknown_line"))]
    pub line: i64,
}

#[cfg(feature = "serde")]
fn unknown_line() -> i64 {
    -1
}

impl Frame {
    pub fn new(class_name: impl Into<String>, line: i64) -> Self {
        Self {
            class_name: class_name.into(),
            method: None,
            file: None,
            line,
        }
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }
}

/// A structured failure: message plus ordered call history, outermost call last.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cause {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub type_name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub message: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub frames: Vec<Frame>,
}

impl Cause {
    pub fn new(type_name: impl Into<String>, message: Option<String>) -> Self {
        Self {
            type_name: type_name.into(),
            message,
            frames: Vec::new(),
        }
    }

    pub fn with_frame(mut self, frame: Frame) -> Self {
        self.frames.push(frame);
        self
    }
}

/// Result of one finished test.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TestOutcome {
    pub status: Status,
    /// Free-form message supplied without a cause (a skip reason, for instance).
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub message: Option<String>,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub cause: Option<Cause>,
}

impl TestOutcome {
    pub fn passed() -> Self {
        Self {
            status: Status::Passed,
            message: None,
            cause: None,
        }
    }

    pub fn failed(cause: Cause) -> Self {
        Self {
            status: Status::Failed,
            message: None,
            cause: Some(cause),
        }
    }

    pub fn aborted(cause: Option<Cause>) -> Self {
        Self {
            status: Status::Aborted,
            message: None,
            cause,
        }
    }

    pub fn skipped(reason: impl Into<String>) -> Self {
        Self {
            status: Status::Skipped,
            message: Some(reason.into()),
            cause: None,
        }
    }
}

impl fmt::Display for TestOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cause = self.cause.as_ref().map_or("none", |c| c.type_name.as_str());
        write!(f, "TestOutcome [status = {}, cause = {}]", self.status, cause)
    }
}

// ============================================================================
// Tests
// ============================================================================
