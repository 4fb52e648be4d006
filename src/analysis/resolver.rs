use std::collections::BTreeSet;

/// Maps a raw import string to concrete project files.
///
/// The import is treated as a path fragment relative to the importing file's
/// directory. For each candidate extension, both `<fragment><ext>` and
/// `<fragment>/index<ext>` are tried against the admitted path set; only
/// exact matches count. Imports of third-party packages resolve to nothing,
/// which is the common case.
pub struct ImportResolver {
    candidate_extensions: Vec<&'static str>,
}

impl ImportResolver {
    pub fn new() -> Self {
        Self {
            candidate_extensions: vec![".py", ".js", ".jsx", ".ts", ".tsx", ".java", ".go", ".rs"],
        }
    }

    /// Resolves `raw_import` from the file at `current_path` (a
    /// project-relative, slash-separated path) against `files`, the set of
    /// admitted project-relative paths.
    pub fn resolve(
        &self,
        raw_import: &str,
        current_path: &str,
        files: &BTreeSet<String>,
    ) -> BTreeSet<String> {
        let mut resolved = BTreeSet::new();
        let current_dir = parent_dir(current_path);

        for extension in &self.candidate_extensions {
            let direct = format!("{}{}", raw_import, extension);
            if let Some(candidate) = join_normalized(current_dir, &direct) {
                if files.contains(&candidate) {
                    resolved.insert(candidate);
                }
            }

            let index = format!("{}/index{}", raw_import, extension);
            if let Some(candidate) = join_normalized(current_dir, &index) {
                if files.contains(&candidate) {
                    resolved.insert(candidate);
                }
            }
        }

        resolved
    }
}

impl Default for ImportResolver {
    fn default() -> Self {
        Self::new()
    }
}

fn parent_dir(path: &str) -> &str {
    path.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
}

/// Joins `fragment` onto `dir` and collapses `.`/`..` segments. A fragment
/// that traverses above the project root yields `None` rather than a path.
fn join_normalized(dir: &str, fragment: &str) -> Option<String> {
    let mut segments: Vec<&str> = if dir.is_empty() {
        Vec::new()
    } else {
        dir.split('/').collect()
    };

    for segment in fragment.split('/') {
        match segment {
            "" | "." => continue,
            ".." => {
                segments.pop()?;
            }
            other => segments.push(other),
        }
    }

    if segments.is_empty() {
        None
    } else {
        Some(segments.join("/"))
    }
}
