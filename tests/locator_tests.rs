//! Source lookup against a multi-module checkout
//!
//! The fixture mirrors a typical Maven reactor:
//!
//! ```text
//! <root>/.git/
//! <root>/src/test/java/io/example/tlp/TestInTopProject.java
//! <root>/module/src/test/java/io/example/module/TestInModule.java
//! <root>/module/src/test/java/io/example/shared/SharedName.java
//! <root>/module/submodule/src/test/java/io/example/submodule/TestInSubmodule.java
//! <root>/module/submodule/src/test/java/io/example/shared/SharedName.java
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use gha_annotate::{ClassDescriptor, LanguageId, LocatorConfig, LookupStrategy, SearchRoot, SourceLocator, SourceLookup};
use tempfile::TempDir;

const SOURCES: &[&str] = &[
    "src/test/java/io/example/tlp/TestInTopProject.java",
    "module/src/test/java/io/example/module/TestInModule.java",
    "module/src/test/java/io/example/shared/SharedName.java",
    "module/submodule/src/test/java/io/example/submodule/TestInSubmodule.java",
    "module/submodule/src/test/java/io/example/shared/SharedName.java",
];

const BUILD_OUTPUTS: &[&str] = &[
    "target/test-classes",
    "module/target/test-classes",
    "module/submodule/target/test-classes",
];

fn checkout() -> TempDir {
    let tmp = tempfile::tempdir().expect("tempdir");
    fs::create_dir(tmp.path().join(".git")).expect("create .git");
    for source in SOURCES {
        let path = tmp.path().join(source);
        fs::create_dir_all(path.parent().expect("parent")).expect("create source dir");
        fs::write(&path, "class Placeholder {}\n").expect("write source");
    }
    for output in BUILD_OUTPUTS {
        fs::create_dir_all(tmp.path().join(output)).expect("create build output");
    }
    tmp
}

fn locator(root: &Path, strategy: LookupStrategy) -> SourceLocator {
    SourceLocator::new(LocatorConfig::new(SearchRoot::from(root.to_path_buf())).with_strategy(strategy))
}

fn resolve(locator: &SourceLocator, class: ClassDescriptor) -> String {
    locator.source_path_for(&class).expect("lookup failed").to_slash_string()
}

// ============================================================================
// Workspace search
// ============================================================================

#[test]
fn finds_source_in_module() {
    let tmp = checkout();
    let locator = locator(tmp.path(), LookupStrategy::Search);

    assert_eq!(
        resolve(&locator, ClassDescriptor::new("io.example.module.TestInModule")),
        "module/src/test/java/io/example/module/TestInModule.java"
    );
}

#[test]
fn finds_source_in_submodule() {
    let tmp = checkout();
    let locator = locator(tmp.path(), LookupStrategy::Search);

    assert_eq!(
        resolve(&locator, ClassDescriptor::new("io.example.submodule.TestInSubmodule")),
        "module/submodule/src/test/java/io/example/submodule/TestInSubmodule.java"
    );
}

#[test]
fn finds_source_in_top_level_project() {
    let tmp = checkout();
    let locator = locator(tmp.path(), LookupStrategy::Search);

    assert_eq!(
        resolve(&locator, ClassDescriptor::new("io.example.tlp.TestInTopProject")),
        "src/test/java/io/example/tlp/TestInTopProject.java"
    );
}

#[test]
fn platform_class_falls_back_to_convention() {
    let tmp = checkout();
    let locator = locator(tmp.path(), LookupStrategy::Search);

    assert_eq!(
        resolve(&locator, ClassDescriptor::new("java.lang.Object")),
        "src/test/java/java/lang/Object.java"
    );
}

// ============================================================================
// Upward walk from the build output
// ============================================================================

#[test]
fn same_class_name_resolves_to_its_own_module() {
    let tmp = checkout();
    let locator = locator(tmp.path(), LookupStrategy::Auto);

    let from_module = ClassDescriptor::new("io.example.shared.SharedName").with_origin("module/target/test-classes");
    let from_submodule =
        ClassDescriptor::new("io.example.shared.SharedName").with_origin("module/submodule/target/test-classes");

    assert_eq!(
        resolve(&locator, from_module),
        "module/src/test/java/io/example/shared/SharedName.java"
    );
    assert_eq!(
        resolve(&locator, from_submodule),
        "module/submodule/src/test/java/io/example/shared/SharedName.java"
    );
}

#[test]
fn upward_walk_reaches_top_level_sources() {
    let tmp = checkout();
    let locator = locator(tmp.path(), LookupStrategy::Upward);

    let class = ClassDescriptor::new("io.example.tlp.TestInTopProject").with_origin("target/test-classes");
    assert_eq!(
        resolve(&locator, class),
        "src/test/java/io/example/tlp/TestInTopProject.java"
    );
}

#[test]
fn upward_walk_does_not_descend_into_sibling_modules() {
    let tmp = checkout();
    let locator = locator(tmp.path(), LookupStrategy::Upward);

    // Only the submodule has this class; walking up from the top-level output never looks downwards.
    let class = ClassDescriptor::new("io.example.submodule.TestInSubmodule").with_origin("target/test-classes");
    assert_eq!(
        resolve(&locator, class),
        "io/example/submodule/TestInSubmodule.java"
    );
}

#[test]
fn auto_strategy_searches_when_walk_misses() {
    let tmp = checkout();
    let locator = locator(tmp.path(), LookupStrategy::Auto);

    let class = ClassDescriptor::new("io.example.submodule.TestInSubmodule").with_origin("target/test-classes");
    assert_eq!(
        resolve(&locator, class),
        "module/submodule/src/test/java/io/example/submodule/TestInSubmodule.java"
    );
}

#[test]
fn archive_origin_walks_from_its_directory() {
    let tmp = checkout();
    let jar: PathBuf = tmp.path().join("module/target/module-tests.jar");
    fs::write(&jar, b"PK").expect("write jar");
    let locator = locator(tmp.path(), LookupStrategy::Upward);

    let class = ClassDescriptor::new("io.example.module.TestInModule").with_origin(jar);
    assert_eq!(
        resolve(&locator, class),
        "module/src/test/java/io/example/module/TestInModule.java"
    );
}

// ============================================================================
// Nested classes and languages
// ============================================================================

#[test]
fn nested_class_resolves_to_enclosing_file() {
    let tmp = checkout();
    let locator = locator(tmp.path(), LookupStrategy::Auto);

    let top = ClassDescriptor::new("io.example.module.TestInModule").with_origin("module/target/test-classes");
    let nested = ClassDescriptor::new("io.example.module.TestInModule$WhenEmpty$AndClosed")
        .nested_in("io.example.module.TestInModule$WhenEmpty")
        .nested_in("io.example.module.TestInModule")
        .with_origin("module/target/test-classes");

    assert_eq!(resolve(&locator, nested), resolve(&locator, top));
}

#[test]
fn kotlin_sources() {
    let tmp = checkout();
    let path = tmp.path().join("module/src/test/kotlin/io/example/KSuite.kt");
    fs::create_dir_all(path.parent().expect("parent")).expect("create kotlin dir");
    fs::write(&path, "class KSuite\n").expect("write kotlin source");

    let config = LocatorConfig::new(SearchRoot::from(tmp.path().to_path_buf())).with_language(LanguageId::Kotlin);
    let locator = SourceLocator::new(config);

    let class = ClassDescriptor::new("io.example.KSuite").with_origin("module/target/test-classes");
    assert_eq!(resolve(&locator, class), "module/src/test/kotlin/io/example/KSuite.kt");
}
