use std::collections::HashMap;

use gha_annotate_core::ClassDescriptor;
use gha_annotate_core::lang::{self, LanguageId};

#[test]
fn language_spellings_unique_and_resolvable() {
    let mut seen: HashMap<&'static str, LanguageId> = HashMap::new();

    for info in lang::LANGUAGES {
        assert_eq!(
            lang::from_str(info.canonical),
            Some(info.id),
            "language canonical spelling not resolvable: {}",
            info.canonical
        );
        assert_eq!(lang::as_str(info.id), info.canonical, "language as_str mismatch for {:?}", info.id);

        for spelling in std::iter::once(&info.canonical).chain(info.aliases) {
            if let Some(prev) = seen.insert(*spelling, info.id) {
                panic!("duplicate language spelling {:?}: {:?} and {:?}", spelling, prev, info.id);
            }
            assert_eq!(lang::from_str(spelling), Some(info.id), "language alias not resolvable: {}", spelling);
        }
    }
}

#[test]
fn every_language_has_one_registry_entry() {
    for id in [LanguageId::Java, LanguageId::Kotlin, LanguageId::Groovy, LanguageId::Scala] {
        let entries = lang::LANGUAGES.iter().filter(|l| l.id == id).count();
        assert_eq!(entries, 1, "expected exactly one registry entry for {:?}", id);
        assert_eq!(lang::info_for(id).id, id);
    }
}

#[test]
fn extensions_are_bare() {
    for info in lang::LANGUAGES {
        assert!(!info.extension.is_empty(), "empty extension for {:?}", info.id);
        assert!(!info.extension.starts_with('.'), "extension must not start with '.': {}", info.extension);
        assert!(!info.source_dir.contains('/'), "source dir must be a single segment: {}", info.source_dir);
    }
}

#[test]
fn suffix_uses_registry_extension() {
    let class = ClassDescriptor::new("a.b.C$D").nested_in("a.b.C");
    for info in lang::LANGUAGES {
        assert_eq!(class.source_file_suffix(info.id), format!("a/b/C.{}", info.extension));
    }
}
