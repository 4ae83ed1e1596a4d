//! Tests for layered settings loading

use std::path::PathBuf;

use tempfile::TempDir;

use coursetree::application::ApplicationError;
use coursetree::config::Settings;
use coursetree::domain::DuplicatePolicy;

#[test]
fn given_explicit_config_file_when_loading_then_overrides_defaults() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("coursetree.toml");
    std::fs::write(
        &path,
        "data_file = \"/data/abet.csv\"\ndelimiter = \";\"\nbench_repeat = 2\n",
    )
    .unwrap();

    let settings = Settings::load(Some(&path)).unwrap();

    assert_eq!(settings.data_file, PathBuf::from("/data/abet.csv"));
    assert_eq!(settings.delimiter, ';');
    assert_eq!(settings.bench_repeat, 2);
}

#[test]
fn given_missing_config_file_when_loading_then_errors() {
    let temp = TempDir::new().unwrap();

    let result = Settings::load(Some(&temp.path().join("nope.toml")));

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_invalid_toml_when_loading_then_errors() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("broken.toml");
    std::fs::write(&path, "duplicates = [\n").unwrap();

    let result = Settings::load(Some(&path));

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_zero_bench_repeat_when_loading_then_rejected() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("zero.toml");
    std::fs::write(&path, "bench_repeat = 0\n").unwrap();

    let result = Settings::load(Some(&path));

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_overwrite_policy_in_toml_when_parsing_then_applied() {
    let settings = Settings::from_toml_str("duplicates = \"overwrite\"\n").unwrap();

    assert_eq!(settings.duplicates, DuplicatePolicy::Overwrite);
}
