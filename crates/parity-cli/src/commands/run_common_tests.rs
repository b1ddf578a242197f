use std::fs;
use std::path::PathBuf;

use parity_lib::{ArtifactRole, Error};
use tempfile::TempDir;

use super::run_common::{ArtifactArgs, load_config, read_artifact};

fn root_with_project_file(toml: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("parity.toml"), toml).unwrap();
    dir
}

#[test]
fn defaults_without_project_file() {
    let dir = TempDir::new().unwrap();
    let args = ArtifactArgs {
        root: Some(dir.path().to_path_buf()),
        ..ArtifactArgs::default()
    };
    let config = load_config(&args).unwrap();
    assert_eq!(config.artifacts.root, dir.path());
    assert_eq!(config.artifacts.grammar, PathBuf::from("grammar.js"));
    assert_eq!(config.categories.len(), 3);
}

#[test]
fn project_file_in_root_is_layered() {
    let dir = root_with_project_file(
        "[artifacts]\nreference = \"syntaxes/stata.tmLanguage.json\"\n",
    );
    let args = ArtifactArgs {
        root: Some(dir.path().to_path_buf()),
        ..ArtifactArgs::default()
    };
    let config = load_config(&args).unwrap();
    assert_eq!(
        config.artifacts.reference,
        PathBuf::from("syntaxes/stata.tmLanguage.json")
    );
    assert_eq!(config.artifacts.highlights, PathBuf::from("queries/highlights.scm"));
}

#[test]
fn flags_override_project_file() {
    let dir = root_with_project_file("[artifacts]\ngrammar = \"src/grammar.json\"\n");
    let args = ArtifactArgs {
        root: Some(dir.path().to_path_buf()),
        grammar: Some(PathBuf::from("grammar.js")),
        ..ArtifactArgs::default()
    };
    let config = load_config(&args).unwrap();
    assert_eq!(config.artifacts.grammar, PathBuf::from("grammar.js"));
}

#[test]
fn explicit_config_must_exist() {
    let dir = TempDir::new().unwrap();
    let args = ArtifactArgs {
        config: Some(dir.path().join("missing.toml")),
        ..ArtifactArgs::default()
    };
    let err = load_config(&args).unwrap_err();
    assert!(matches!(err, Error::Config(_)), "{err:?}");
}

#[test]
fn read_explicit_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("highlights.scm");
    fs::write(&path, "(comment) @comment\n").unwrap();

    let (read_path, source) =
        read_artifact(Some(&path), &ArtifactArgs::default(), ArtifactRole::Highlights).unwrap();
    assert_eq!(read_path, path);
    assert_eq!(source, "(comment) @comment\n");
}

#[test]
fn read_configured_file() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("queries")).unwrap();
    fs::write(dir.path().join("queries/highlights.scm"), "(comment) @comment\n").unwrap();
    let args = ArtifactArgs {
        root: Some(dir.path().to_path_buf()),
        ..ArtifactArgs::default()
    };

    let (path, _) = read_artifact(None, &args, ArtifactRole::Highlights).unwrap();
    assert_eq!(path, dir.path().join("queries/highlights.scm"));
}

#[test]
fn missing_file_names_its_role() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("grammar.js");
    let err = read_artifact(Some(&path), &ArtifactArgs::default(), ArtifactRole::Grammar)
        .unwrap_err();
    let Error::MissingArtifact { role, .. } = &err else {
        panic!("expected MissingArtifact, got {err:?}");
    };
    assert_eq!(*role, ArtifactRole::Grammar);
}
