//! Reading `manifest.json`.

use crate::common::build_fixture;
use sphindex::build::read_manifest;
use sphindex::{run_build, BuildOptions, Error};
use tempfile::TempDir;

#[test]
fn test_read_valid_manifest() {
    let manifest = read_manifest(&build_fixture("valid")).unwrap();
    assert_eq!(manifest.version, 1);
    assert_eq!(manifest.documents.len(), 3);
    assert_eq!(manifest.language, "en");
    assert!(manifest.docnames.is_none());
    assert_eq!(manifest.envversion.unwrap().sphinx(), Some(56));
}

#[test]
fn test_missing_manifest() {
    let dir = TempDir::new().unwrap();
    let err = read_manifest(dir.path()).unwrap_err();
    assert!(matches!(err, Error::Read { .. }));
}

#[test]
fn test_malformed_manifest() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("manifest.json"), r#"{"version": 1, "documents": "a.json"}"#)
        .unwrap();
    let err = read_manifest(dir.path()).unwrap_err();
    assert!(matches!(err, Error::Manifest { .. }));
}

#[test]
fn test_unsupported_version() {
    let err = read_manifest(&build_fixture("bad-version")).unwrap_err();
    assert!(matches!(err, Error::ManifestVersion { version: 2, .. }));
}

#[test]
fn test_unsupported_language_fails_build() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("searchindex.js");
    let err = run_build(&build_fixture("bad-language"), &output, BuildOptions::default()).unwrap_err();
    assert!(matches!(err, Error::UnsupportedLanguage(ref code) if code == "de"));
    assert!(!output.exists());
}
