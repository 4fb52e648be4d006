use crate::analysis::ManifestProbe;
use std::fs;
use tempfile::TempDir;

fn fixture_manifests() -> TempDir {
    let dir = TempDir::new().unwrap();

    fs::write(
        dir.path().join("Cargo.toml"),
        r#"[package]
name = "fixture"
version = "0.1.0"

[dependencies]
serde = "1.0"
tokio = { version = "1.0", features = ["full"] }

[dev-dependencies]
mockito = "1.0"
"#,
    )
    .unwrap();

    fs::write(
        dir.path().join("package.json"),
        r#"{
    "name": "fixture",
    "version": "1.0.0",
    "dependencies": {
        "react": "^17.0.0",
        "express": "^4.17.1"
    },
    "devDependencies": {
        "jest": "^27.0.0"
    }
}"#,
    )
    .unwrap();

    fs::write(
        dir.path().join("requirements.txt"),
        "requests==2.26.0\nflask>=2.0.0\n# a comment\n\n",
    )
    .unwrap();

    fs::write(
        dir.path().join("pubspec.yaml"),
        "name: fixture\ndependencies:\n  http: ^0.13.0\ndev_dependencies:\n  lints: ^2.0.0\n",
    )
    .unwrap();

    dir
}

#[test]
fn cargo_dependencies_are_collected_with_dev_flags() {
    let dir = fixture_manifests();
    let deps = ManifestProbe::new().probe(dir.path());

    let rust_deps: Vec<_> = deps.iter().filter(|d| d.source == "crates.io").collect();
    assert!(rust_deps
        .iter()
        .any(|d| d.name == "serde" && d.version == "1.0" && !d.is_dev));
    assert!(rust_deps.iter().any(|d| d.name == "tokio" && d.version == "1.0"));
    assert!(rust_deps.iter().any(|d| d.name == "mockito" && d.is_dev));
}

#[test]
fn node_dependencies_are_collected_with_dev_flags() {
    let dir = fixture_manifests();
    let deps = ManifestProbe::new().probe(dir.path());

    let node_deps: Vec<_> = deps.iter().filter(|d| d.source == "npm").collect();
    assert!(node_deps.iter().any(|d| d.name == "react" && !d.is_dev));
    assert!(node_deps.iter().any(|d| d.name == "express" && !d.is_dev));
    assert!(node_deps.iter().any(|d| d.name == "jest" && d.is_dev));
}

#[test]
fn python_requirements_are_collected() {
    let dir = fixture_manifests();
    let deps = ManifestProbe::new().probe(dir.path());

    let pip_deps: Vec<_> = deps.iter().filter(|d| d.source == "pip").collect();
    assert!(pip_deps
        .iter()
        .any(|d| d.name == "requests" && d.version == "2.26.0"));
    assert!(pip_deps
        .iter()
        .any(|d| d.name == "flask" && d.version == "2.0.0"));
    assert_eq!(pip_deps.len(), 2);
}

#[test]
fn dart_pubspec_dependencies_are_collected() {
    let dir = fixture_manifests();
    let deps = ManifestProbe::new().probe(dir.path());

    let pub_deps: Vec<_> = deps.iter().filter(|d| d.source == "pub.dev").collect();
    assert!(pub_deps.iter().any(|d| d.name == "http" && !d.is_dev));
    assert!(pub_deps.iter().any(|d| d.name == "lints" && d.is_dev));
}

#[test]
fn a_malformed_manifest_does_not_hide_the_others() {
    let dir = fixture_manifests();
    fs::write(dir.path().join("Cargo.toml"), "this is [ not toml").unwrap();

    let deps = ManifestProbe::new().probe(dir.path());
    assert!(deps.iter().all(|d| d.source != "crates.io"));
    assert!(deps.iter().any(|d| d.source == "npm"));
    assert!(deps.iter().any(|d| d.source == "pip"));
}

#[test]
fn a_project_without_manifests_declares_nothing() {
    let dir = TempDir::new().unwrap();
    assert!(ManifestProbe::new().probe(dir.path()).is_empty());
}
