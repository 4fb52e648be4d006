use serde::Serialize;
use std::path::Path;
use tokei::{Config, Languages};

#[derive(Debug, Clone, Serialize)]
pub struct LanguageStat {
    pub name: String,
    pub files: usize,
    pub code_lines: usize,
    pub percentage: f32,
}

/// Per-language line counts for the analyzed tree, used to enrich the
/// overview statistics.
pub struct LanguageDetector;

impl LanguageDetector {
    pub fn new() -> Self {
        Self
    }

    pub fn detect(&self, path: &Path) -> Vec<LanguageStat> {
        let mut languages = Languages::new();
        let config = Config::default();
        languages.get_statistics(&[path], &[], &config);

        let total_code: f64 = languages.iter().map(|(_, stats)| stats.code as f64).sum();

        let mut results: Vec<LanguageStat> = languages
            .iter()
            .map(|(lang_type, stats)| {
                let percentage = if total_code > 0.0 {
                    (stats.code as f64 / total_code * 100.0) as f32
                } else {
                    0.0
                };

                LanguageStat {
                    name: lang_type.name().to_string(),
                    files: stats.reports.len(),
                    code_lines: stats.code,
                    percentage,
                }
            })
            .collect();

        results.sort_by(|a, b| b.code_lines.cmp(&a.code_lines).then(a.name.cmp(&b.name)));
        results
    }
}

impl Default for LanguageDetector {
    fn default() -> Self {
        Self::new()
    }
}
