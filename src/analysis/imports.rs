use regex::Regex;
use std::collections::HashMap;
use tracing::debug;

/// Extracts raw import/require targets from source text via per-language
/// regular expressions. Group 1 of every match is the imported token. This is
/// a heuristic scan, not a parse; extensions without patterns yield nothing.
pub struct ImportExtractor {
    patterns: HashMap<&'static str, Vec<Regex>>,
}

impl ImportExtractor {
    pub fn new() -> Self {
        let mut patterns = HashMap::new();
        patterns.insert(
            ".py",
            compile(&[r"import\s+(\w+)", r"from\s+(\w+)\s+import"]),
        );
        patterns.insert(
            ".js",
            compile(&[
                r#"import.*from\s+['"](.+?)['"]"#,
                r#"require\(['"](.+?)['"]\)"#,
            ]),
        );
        patterns.insert(".ts", compile(&[r#"import.*from\s+['"](.+?)['"]"#]));
        patterns.insert(
            ".java",
            compile(&[r"import\s+([\w.]+)", r"package\s+([\w.]+)"]),
        );
        patterns.insert(".go", compile(&[r#"import\s+[\(]?["'](.*?)["']"#]));
        patterns.insert(".rs", compile(&[r"use\s+([\w:]+)"]));

        Self { patterns }
    }

    /// Applies every pattern registered for `extension` and returns each
    /// match's captured token. Duplicates are tolerated here; downstream set
    /// semantics deduplicate.
    pub fn extract(&self, extension: &str, content: &str) -> Vec<String> {
        let Some(patterns) = self.patterns.get(extension) else {
            return Vec::new();
        };

        patterns
            .iter()
            .flat_map(|pattern| {
                pattern
                    .captures_iter(content)
                    .filter_map(|capture| capture.get(1))
                    .map(|token| token.as_str().to_string())
            })
            .collect()
    }
}

impl Default for ImportExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .filter_map(|pattern| match Regex::new(pattern) {
            Ok(regex) => Some(regex),
            Err(e) => {
                debug!("skipping invalid import pattern {}: {}", pattern, e);
                None
            }
        })
        .collect()
}
