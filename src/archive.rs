use anyhow::{Context, Result};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::debug;
use zip::ZipArchive;

/// An extracted archive rooted in a temporary directory. The directory is
/// removed when this guard drops, on success and failure alike.
pub struct ExtractedArchive {
    // Held only so the tree outlives the analysis.
    _dir: TempDir,
    project_root: PathBuf,
}

impl ExtractedArchive {
    /// The directory to analyze. When the archive wraps everything in a
    /// single top-level directory (the GitHub download layout), that inner
    /// directory is the root, so project-relative paths stay clean.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }
}

/// Extracts ZIP bytes into a scoped temporary tree.
pub fn extract_zip(bytes: &[u8]) -> Result<ExtractedArchive> {
    let dir = TempDir::new().context("could not create a temporary extraction directory")?;

    let mut archive = ZipArchive::new(Cursor::new(bytes)).context("not a valid ZIP archive")?;
    archive
        .extract(dir.path())
        .context("could not extract the ZIP archive")?;

    let project_root = unwrap_single_directory(dir.path());
    debug!(
        "extracted {} entries under {}",
        archive.len(),
        project_root.display()
    );

    Ok(ExtractedArchive {
        _dir: dir,
        project_root,
    })
}

fn unwrap_single_directory(root: &Path) -> PathBuf {
    let entries: Vec<PathBuf> = match std::fs::read_dir(root) {
        Ok(entries) => entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .collect(),
        Err(_) => return root.to_path_buf(),
    };

    match entries.as_slice() {
        [single] if single.is_dir() => single.clone(),
        _ => root.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::FileOptions;
    use zip::ZipWriter;

    fn zip_bytes(files: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in files {
            writer.start_file(*name, FileOptions::default()).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn extracts_files_into_a_temporary_tree() {
        let bytes = zip_bytes(&[("main.py", "print('hi')\n"), ("docs/README.md", "# hi\n")]);
        let extracted = extract_zip(&bytes).unwrap();

        assert!(extracted.project_root().join("main.py").is_file());
        assert!(extracted.project_root().join("docs/README.md").is_file());
    }

    #[test]
    fn unwraps_a_single_wrapping_directory() {
        let bytes = zip_bytes(&[
            ("repo-main/main.py", "print('hi')\n"),
            ("repo-main/lib.py", "pass\n"),
        ]);
        let extracted = extract_zip(&bytes).unwrap();

        assert!(extracted.project_root().ends_with("repo-main"));
        assert!(extracted.project_root().join("main.py").is_file());
    }

    #[test]
    fn rejects_bytes_that_are_not_a_zip() {
        assert!(extract_zip(b"definitely not a zip").is_err());
    }

    #[test]
    fn temporary_tree_is_removed_on_drop() {
        let bytes = zip_bytes(&[("main.py", "print('hi')\n")]);
        let extracted = extract_zip(&bytes).unwrap();
        let root = extracted.project_root().to_path_buf();

        drop(extracted);
        assert!(!root.exists());
    }
}
