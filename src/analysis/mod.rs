use anyhow::{bail, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::config::AnalysisConfig;

pub mod groups;

mod entry_points;
mod imports;
mod language;
mod manifests;
mod resolver;

#[cfg(test)]
mod tests;

pub use entry_points::EntryPointDetector;
pub use imports::ImportExtractor;
pub use language::{LanguageDetector, LanguageStat};
pub use manifests::{DeclaredDependency, ManifestProbe};
pub use resolver::ImportResolver;

/// One admitted project file. `path` is the project-relative,
/// slash-separated identity of the file; `referenced_by` holds the paths of
/// files whose imports resolved to this one and is populated only during
/// dependency linking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub path: String,
    pub extension: String,
    pub size: u64,
    pub referenced_by: BTreeSet<String>,
}

/// The aggregate model of one analyzed project. Built fresh per analysis,
/// never mutated afterwards. Every key in `files` has a (possibly empty)
/// entry in `dependencies`; every group name has a (possibly empty) list in
/// `file_groups`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectStructure {
    pub files: BTreeMap<String, FileRecord>,
    pub dependencies: BTreeMap<String, BTreeSet<String>>,
    pub entry_points: BTreeSet<String>,
    pub file_groups: BTreeMap<String, Vec<String>>,
}

impl ProjectStructure {
    fn new() -> Self {
        Self {
            files: BTreeMap::new(),
            dependencies: BTreeMap::new(),
            entry_points: BTreeSet::new(),
            file_groups: groups::group_names()
                .map(|group| (group.to_string(), Vec::new()))
                .collect(),
        }
    }
}

/// A [`ProjectStructure`] plus the supplemental statistics the
/// documentation prompts use.
#[derive(Debug)]
pub struct ProjectAnalysis {
    pub structure: ProjectStructure,
    pub languages: Vec<LanguageStat>,
    pub declared_dependencies: Vec<DeclaredDependency>,
}

pub struct ProjectAnalyzer {
    root: PathBuf,
    ignore_dirs: Vec<String>,
    entry_points: EntryPointDetector,
    imports: ImportExtractor,
    resolver: ImportResolver,
    languages: LanguageDetector,
    manifests: ManifestProbe,
}

impl ProjectAnalyzer {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self::with_config(root, &AnalysisConfig::default())
    }

    pub fn with_config<P: AsRef<Path>>(root: P, config: &AnalysisConfig) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            ignore_dirs: config.ignore_dirs.clone(),
            entry_points: EntryPointDetector::new(),
            imports: ImportExtractor::new(),
            resolver: ImportResolver::new(),
            languages: LanguageDetector::new(),
            manifests: ManifestProbe::new(),
        }
    }

    /// Builds the project model in two passes: inventory every admitted
    /// file, then link dependencies by extracting and resolving imports.
    ///
    /// Fails only when the root itself cannot be traversed. Unreadable
    /// individual files degrade the result and are logged at debug level.
    pub fn build(&self) -> Result<ProjectStructure> {
        if !self.root.is_dir() {
            bail!(
                "project root {} is not a readable directory",
                self.root.display()
            );
        }

        let allowed = groups::allowed_extensions();
        let mut structure = ProjectStructure::new();

        // Pass 1: inventory.
        let walker = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.is_ignored(entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    debug!("skipping unreadable tree entry: {}", e);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let Some(extension) = file_extension(entry.path()) else {
                continue;
            };
            if !allowed.contains(extension.as_str()) {
                continue;
            }

            let Ok(relative) = entry.path().strip_prefix(&self.root) else {
                continue;
            };
            let relative = slash_path(relative);

            let size = match entry.metadata() {
                Ok(metadata) => metadata.len(),
                Err(e) => {
                    debug!("skipping {}: {}", relative, e);
                    continue;
                }
            };

            for group in groups::classify(&extension) {
                structure
                    .file_groups
                    .entry(group.to_string())
                    .or_default()
                    .push(relative.clone());
            }

            if self.entry_points.is_entry_point(entry.path()) {
                structure.entry_points.insert(relative.clone());
            }

            structure
                .dependencies
                .insert(relative.clone(), BTreeSet::new());
            structure.files.insert(
                relative.clone(),
                FileRecord {
                    path: relative,
                    extension,
                    size,
                    referenced_by: BTreeSet::new(),
                },
            );
        }

        // Pass 2: dependency linking against the full admitted set.
        let admitted: BTreeSet<String> = structure.files.keys().cloned().collect();

        for path in &admitted {
            let extension = structure.files[path].extension.clone();
            let Some(content) = read_text(&self.root.join(path)) else {
                continue;
            };

            let mut resolved = BTreeSet::new();
            for raw_import in self.imports.extract(&extension, &content) {
                resolved.extend(self.resolver.resolve(&raw_import, path, &admitted));
            }

            for target in &resolved {
                if let Some(record) = structure.files.get_mut(target) {
                    record.referenced_by.insert(path.clone());
                }
            }

            if let Some(edges) = structure.dependencies.get_mut(path) {
                edges.extend(resolved);
            }
        }

        Ok(structure)
    }

    /// [`build`](Self::build) plus language statistics and declared
    /// manifest dependencies.
    pub fn analyze(&self) -> Result<ProjectAnalysis> {
        let structure = self.build()?;
        let languages = self.languages.detect(&self.root);
        let declared_dependencies = self.manifests.probe(&self.root);

        Ok(ProjectAnalysis {
            structure,
            languages,
            declared_dependencies,
        })
    }

    fn is_ignored(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return false;
        }
        entry
            .file_name()
            .to_str()
            .map(|name| self.ignore_dirs.iter().any(|dir| dir == name))
            .unwrap_or(false)
    }
}

/// Lowercase extension with its leading dot, or `None` for files without
/// one. Classification and pattern tables key on this form.
pub(crate) fn file_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
}

/// Reads a file as UTF-8 text. Binary or unreadable content is treated as
/// absent and logged; callers fall back to "no markers, no imports".
pub(crate) fn read_text(path: &Path) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(e) => {
            debug!("treating {} as unreadable: {}", path.display(), e);
            None
        }
    }
}

fn slash_path(path: &Path) -> String {
    path.components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
