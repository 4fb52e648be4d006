use std::collections::BTreeSet;

/// Domain groups and the file extensions that belong to them. An extension
/// appears in at most one group, but `classify` does not assume that.
const FILE_GROUPS: &[(&str, &[&str])] = &[
    (
        "frontend",
        &[
            ".js", ".jsx", ".ts", ".tsx", ".vue", ".html", ".css", ".scss", ".less", ".svelte",
        ],
    ),
    (
        "backend",
        &[".py", ".java", ".rb", ".php", ".go", ".cs", ".rs"],
    ),
    ("mobile", &[".swift", ".kt", ".dart", ".m", ".mm"]),
    (
        "config",
        &[".json", ".yaml", ".yml", ".toml", ".ini", ".conf"],
    ),
    ("database", &[".sql", ".psql", ".pls"]),
    ("documentation", &[".md", ".rst", ".tex"]),
    ("build", &[".gradle", ".cmake", ".make", ".rake"]),
    ("smart_contracts", &[".sol", ".vyper"]),
    ("ai_ml", &[".ipynb"]),
    ("system", &[".c", ".cpp", ".h", ".hpp", ".asm", ".s"]),
];

/// Returns every group whose extension set contains `extension`.
///
/// Matching is exact; callers normalize to a lowercase extension with a
/// leading dot before asking.
pub fn classify(extension: &str) -> Vec<&'static str> {
    FILE_GROUPS
        .iter()
        .filter(|(_, extensions)| extensions.contains(&extension))
        .map(|(group, _)| *group)
        .collect()
}

/// All group names, in table order.
pub fn group_names() -> impl Iterator<Item = &'static str> {
    FILE_GROUPS.iter().map(|(group, _)| *group)
}

/// The admitted-extension allow-list: the union of every group's extensions.
pub fn allowed_extensions() -> BTreeSet<&'static str> {
    FILE_GROUPS
        .iter()
        .flat_map(|(_, extensions)| extensions.iter().copied())
        .collect()
}
