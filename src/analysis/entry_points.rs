use std::collections::HashMap;
use std::path::Path;

use super::{file_extension, read_text};

/// Decides whether a file is a likely program entry point.
///
/// Two independent rules, either one sufficient: a case-insensitive filename
/// match against well-known project manifests, or a scan of the file's text
/// for a language-specific marker. Content that cannot be read never makes a
/// file an entry point.
pub struct EntryPointDetector {
    filename_markers: Vec<&'static str>,
    content_markers: HashMap<&'static str, Vec<&'static str>>,
}

impl EntryPointDetector {
    pub fn new() -> Self {
        let mut content_markers = HashMap::new();
        content_markers.insert(
            ".py",
            vec![
                r#"if __name__ == "__main__":"#,
                "app = FastAPI()",
                "app = Flask()",
            ],
        );
        content_markers.insert(".js", vec!["index.js", "main.js", "app.js"]);
        content_markers.insert(".java", vec!["public static void main"]);
        content_markers.insert(".go", vec!["func main()"]);
        content_markers.insert(".rs", vec!["fn main()"]);

        Self {
            filename_markers: vec!["index.html", "package.json", "cargo.toml", "build.gradle"],
            content_markers,
        }
    }

    pub fn is_entry_point(&self, path: &Path) -> bool {
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if self.filename_markers.contains(&name.to_lowercase().as_str()) {
                return true;
            }
        }

        let Some(extension) = file_extension(path) else {
            return false;
        };
        let Some(markers) = self.content_markers.get(extension.as_str()) else {
            return false;
        };

        match read_text(path) {
            Some(content) => markers.iter().any(|marker| content.contains(marker)),
            None => false,
        }
    }
}

impl Default for EntryPointDetector {
    fn default() -> Self {
        Self::new()
    }
}
