use anyhow::Result;
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::path::Path;
use toml::Value as TomlValue;
use tracing::debug;

/// A third-party dependency declared in a project manifest. These feed the
/// component-analysis prompt; they are not resolved against anything.
#[derive(Debug, Clone, Serialize)]
pub struct DeclaredDependency {
    pub name: String,
    pub version: String,
    pub is_dev: bool,
    pub source: String,
}

trait ManifestParser: Send + Sync {
    fn parse(&self, root: &Path) -> Result<Vec<DeclaredDependency>>;
}

struct CargoManifest;
struct NodeManifest;
struct PythonManifest;
struct DartManifest;

impl ManifestParser for CargoManifest {
    fn parse(&self, root: &Path) -> Result<Vec<DeclaredDependency>> {
        let manifest_path = root.join("Cargo.toml");
        if !manifest_path.exists() {
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(manifest_path)?;
        let manifest: TomlValue = toml::from_str(&content)?;

        let mut deps = Vec::new();
        collect_toml_table(&manifest, "dependencies", false, &mut deps);
        collect_toml_table(&manifest, "dev-dependencies", true, &mut deps);
        Ok(deps)
    }
}

fn collect_toml_table(
    manifest: &TomlValue,
    table: &str,
    is_dev: bool,
    deps: &mut Vec<DeclaredDependency>,
) {
    if let Some(entries) = manifest.get(table).and_then(|d| d.as_table()) {
        for (name, version) in entries {
            let version_str = match version {
                TomlValue::String(v) => v.clone(),
                TomlValue::Table(t) => t
                    .get("version")
                    .and_then(|v| v.as_str())
                    .unwrap_or("*")
                    .to_string(),
                _ => "*".to_string(),
            };

            deps.push(DeclaredDependency {
                name: name.clone(),
                version: version_str,
                is_dev,
                source: "crates.io".to_string(),
            });
        }
    }
}

impl ManifestParser for NodeManifest {
    fn parse(&self, root: &Path) -> Result<Vec<DeclaredDependency>> {
        let manifest_path = root.join("package.json");
        if !manifest_path.exists() {
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(manifest_path)?;
        let manifest: JsonValue = serde_json::from_str(&content)?;

        let mut deps = Vec::new();
        for (table, is_dev) in [("dependencies", false), ("devDependencies", true)] {
            if let Some(entries) = manifest.get(table).and_then(|d| d.as_object()) {
                for (name, version) in entries {
                    deps.push(DeclaredDependency {
                        name: name.clone(),
                        version: version.as_str().unwrap_or("*").to_string(),
                        is_dev,
                        source: "npm".to_string(),
                    });
                }
            }
        }

        Ok(deps)
    }
}

impl ManifestParser for PythonManifest {
    fn parse(&self, root: &Path) -> Result<Vec<DeclaredDependency>> {
        let mut deps = Vec::new();

        let requirements_path = root.join("requirements.txt");
        if requirements_path.exists() {
            let content = std::fs::read_to_string(requirements_path)?;
            for line in content.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }

                let (name, version) = split_requirement(line);
                deps.push(DeclaredDependency {
                    name: name.to_string(),
                    version: version.to_string(),
                    is_dev: false,
                    source: "pip".to_string(),
                });
            }
        }

        let pyproject_path = root.join("pyproject.toml");
        if pyproject_path.exists() {
            let content = std::fs::read_to_string(pyproject_path)?;
            if let Ok(pyproject) = toml::from_str::<TomlValue>(&content) {
                if let Some(poetry) = pyproject.get("tool").and_then(|t| t.get("poetry")) {
                    if let Some(entries) = poetry.get("dependencies").and_then(|d| d.as_table()) {
                        for (name, version) in entries {
                            deps.push(DeclaredDependency {
                                name: name.clone(),
                                version: version.as_str().unwrap_or("*").to_string(),
                                is_dev: false,
                                source: "poetry".to_string(),
                            });
                        }
                    }
                }
            }
        }

        Ok(deps)
    }
}

fn split_requirement(line: &str) -> (&str, &str) {
    for separator in ["==", ">=", "<=", "~=", ">", "<"] {
        if let Some((name, version)) = line.split_once(separator) {
            return (name.trim(), version.trim());
        }
    }
    (line, "*")
}

impl ManifestParser for DartManifest {
    fn parse(&self, root: &Path) -> Result<Vec<DeclaredDependency>> {
        let manifest_path = root.join("pubspec.yaml");
        if !manifest_path.exists() {
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(manifest_path)?;
        let manifest: serde_yaml::Value = serde_yaml::from_str(&content)?;

        let mut deps = Vec::new();
        for (table, is_dev) in [("dependencies", false), ("dev_dependencies", true)] {
            if let Some(entries) = manifest.get(table).and_then(|d| d.as_mapping()) {
                for (name, version) in entries {
                    let Some(name) = name.as_str() else { continue };
                    deps.push(DeclaredDependency {
                        name: name.to_string(),
                        version: version.as_str().unwrap_or("*").to_string(),
                        is_dev,
                        source: "pub.dev".to_string(),
                    });
                }
            }
        }

        Ok(deps)
    }
}

/// Scans a project root for ecosystem manifests and collects the
/// dependencies they declare. A manifest that fails to parse is skipped.
pub struct ManifestProbe {
    parsers: Vec<Box<dyn ManifestParser>>,
}

impl ManifestProbe {
    pub fn new() -> Self {
        Self {
            parsers: vec![
                Box::new(CargoManifest),
                Box::new(NodeManifest),
                Box::new(PythonManifest),
                Box::new(DartManifest),
            ],
        }
    }

    pub fn probe(&self, root: &Path) -> Vec<DeclaredDependency> {
        let mut all_deps = Vec::new();

        for parser in &self.parsers {
            match parser.parse(root) {
                Ok(deps) => all_deps.extend(deps),
                Err(e) => debug!("skipping unreadable manifest under {:?}: {}", root, e),
            }
        }

        all_deps
    }
}

impl Default for ManifestProbe {
    fn default() -> Self {
        Self::new()
    }
}
