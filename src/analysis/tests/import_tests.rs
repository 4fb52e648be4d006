use crate::analysis::ImportExtractor;

#[test]
fn python_imports_and_from_imports_are_captured() {
    let extractor = ImportExtractor::new();
    let content = "import os\nimport util\nfrom helpers import run\n";

    let imports = extractor.extract(".py", content);
    assert!(imports.contains(&"os".to_string()));
    assert!(imports.contains(&"util".to_string()));
    assert!(imports.contains(&"helpers".to_string()));
}

#[test]
fn javascript_imports_and_requires_are_captured() {
    let extractor = ImportExtractor::new();
    let content = concat!(
        "import React from 'react';\n",
        "import { helper } from \"./components\";\n",
        "const fs = require('fs');\n",
    );

    let imports = extractor.extract(".js", content);
    assert!(imports.contains(&"react".to_string()));
    assert!(imports.contains(&"./components".to_string()));
    assert!(imports.contains(&"fs".to_string()));
}

#[test]
fn typescript_uses_the_import_pattern_only() {
    let extractor = ImportExtractor::new();
    let content = "import { App } from './app';\nconst legacy = require('./legacy');\n";

    let imports = extractor.extract(".ts", content);
    assert!(imports.contains(&"./app".to_string()));
    assert!(!imports.contains(&"./legacy".to_string()));
}

#[test]
fn java_imports_and_package_declarations_are_captured() {
    let extractor = ImportExtractor::new();
    let content = "package com.example.app;\n\nimport java.util.List;\n";

    let imports = extractor.extract(".java", content);
    assert!(imports.contains(&"com.example.app".to_string()));
    assert!(imports.contains(&"java.util.List".to_string()));
}

#[test]
fn go_quoted_imports_are_captured() {
    let extractor = ImportExtractor::new();
    let imports = extractor.extract(".go", "package main\n\nimport \"fmt\"\n");
    assert!(imports.contains(&"fmt".to_string()));
}

#[test]
fn rust_use_paths_are_captured() {
    let extractor = ImportExtractor::new();
    let imports = extractor.extract(".rs", "use std::collections::HashMap;\nuse util;\n");
    assert!(imports.contains(&"std::collections::HashMap".to_string()));
    assert!(imports.contains(&"util".to_string()));
}

#[test]
fn extensions_without_patterns_yield_nothing() {
    let extractor = ImportExtractor::new();
    assert!(extractor.extract(".md", "import something\n").is_empty());
    assert!(extractor.extract(".yaml", "import: value\n").is_empty());
}

#[test]
fn duplicate_imports_are_tolerated_at_extraction() {
    let extractor = ImportExtractor::new();
    let imports = extractor.extract(".py", "import util\nimport util\n");
    assert_eq!(imports.iter().filter(|i| *i == "util").count(), 2);
}
