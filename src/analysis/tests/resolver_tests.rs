use crate::analysis::ImportResolver;
use std::collections::BTreeSet;

fn file_set(paths: &[&str]) -> BTreeSet<String> {
    paths.iter().map(|p| p.to_string()).collect()
}

#[test]
fn sibling_module_resolves_in_the_same_directory() {
    let resolver = ImportResolver::new();
    let files = file_set(&["pkg/a.py", "pkg/util.py"]);

    let resolved = resolver.resolve("util", "pkg/a.py", &files);
    assert_eq!(resolved, file_set(&["pkg/util.py"]));
}

#[test]
fn directory_import_resolves_through_the_index_convention() {
    let resolver = ImportResolver::new();
    let files = file_set(&["src/app.js", "src/components/index.js"]);

    let resolved = resolver.resolve("./components", "src/app.js", &files);
    assert_eq!(resolved, file_set(&["src/components/index.js"]));
}

#[test]
fn parent_relative_imports_resolve_within_the_root() {
    let resolver = ImportResolver::new();
    let files = file_set(&["util.py", "pkg/a.py"]);

    let resolved = resolver.resolve("../util", "pkg/a.py", &files);
    assert_eq!(resolved, file_set(&["util.py"]));
}

#[test]
fn third_party_imports_resolve_to_nothing() {
    let resolver = ImportResolver::new();
    let files = file_set(&["pkg/a.py", "pkg/util.py"]);

    assert!(resolver.resolve("requests", "pkg/a.py", &files).is_empty());
    assert!(resolver.resolve("react", "pkg/a.py", &files).is_empty());
}

#[test]
fn imports_escaping_the_project_root_resolve_to_nothing() {
    let resolver = ImportResolver::new();
    let files = file_set(&["a.py", "util.py"]);

    assert!(resolver.resolve("../util", "a.py", &files).is_empty());
    assert!(resolver
        .resolve("../../../etc/passwd", "a.py", &files)
        .is_empty());
}

#[test]
fn top_level_files_resolve_against_the_root_directory() {
    let resolver = ImportResolver::new();
    let files = file_set(&["main.py", "lib.py"]);

    let resolved = resolver.resolve("lib", "main.py", &files);
    assert_eq!(resolved, file_set(&["lib.py"]));
}

#[test]
fn all_candidate_extensions_are_tried() {
    let resolver = ImportResolver::new();
    // An ambiguous import matches every admitted candidate.
    let files = file_set(&["src/a.ts", "src/helper.ts", "src/helper.js"]);

    let resolved = resolver.resolve("./helper", "src/a.ts", &files);
    assert_eq!(resolved, file_set(&["src/helper.js", "src/helper.ts"]));
}
