//! CLI integration tests
//!
//! These run the built binary and check exit codes, written documents and the stderr summary.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const DSCGEN_VARS: [&str; 8] = [
    "DSCGEN_STRATEGY",
    "DSCGEN_SOURCE",
    "DSCGEN_COMPONENT_FILE",
    "DSCGEN_INPUT_FILE",
    "DSCGEN_COMPONENT_ID",
    "DSCGEN_COMPONENT_VERSION",
    "DSCGEN_COMPONENT_CATEGORY",
    "DSCGEN_LOG_LEVEL",
];

/// Helper to get the path to the dscgen binary
fn dscgen_bin() -> PathBuf {
    let mut path = env::current_exe()
        .expect("Failed to get current executable path")
        .parent()
        .expect("No parent")
        .to_path_buf();

    // Test binaries live in target/<profile>/deps
    if path.ends_with("deps") {
        path = path.parent().expect("No parent").to_path_buf();
    }

    path.join(format!("dscgen{}", env::consts::EXE_SUFFIX))
}

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/descriptors")
        .join(name)
}

/// Runs dscgen with a clean `DSCGEN_*` environment
fn run(args: &[&str]) -> Output {
    let mut command = Command::new(dscgen_bin());
    for var in DSCGEN_VARS {
        command.env_remove(var);
    }
    command
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute dscgen")
}

#[test]
fn test_cli_help() {
    let output = run(&["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("dscgen"));
    assert!(stdout.contains("generate"));
    assert!(stdout.contains("strategies"));
}

#[test]
fn test_cli_version() {
    let output = run(&["--version"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("dscgen"));
}

#[test]
fn test_strategies_lists_both_variants() {
    let output = run(&["strategies"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("annotations"));
    assert!(stdout.contains("doclets"));
}

#[test]
fn test_generate_writes_component_xml() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("classes/component.xml");
    let source = fixture("annotated.json");

    let output = run(&[
        "generate",
        "--source",
        source.to_str().unwrap(),
        "--output",
        out.to_str().unwrap(),
        "--component-id",
        "be.example.annotated",
        "--component-version",
        "1.0",
    ]);

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let xml = fs::read_to_string(&out).unwrap();
    assert!(xml.contains("<component-id>be.example.annotated</component-id>"));
    assert!(xml.contains("<service name=\"TestComponentOne\">"));
    assert!(xml.contains("<operation name=\"opWithParamAsInt\" method=\"op\""));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Component Generated"));
    assert!(stderr.contains("TestComponentTwo (3 operations, 0 config parameters)"));
}

#[test]
fn test_generate_to_stdout_as_json() {
    let source = fixture("doclet.json");

    let output = run(&[
        "-q",
        "generate",
        "--strategy",
        "DOCLETS",
        "--source",
        source.to_str().unwrap(),
        "--component-id",
        "be.example.doclet",
        "--component-version",
        "2.1",
        "--format",
        "json",
        "--stdout",
    ]);

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["id"], "be.example.doclet");
    assert_eq!(value["services"][0]["name"], "TestComponentOne");
    assert_eq!(
        value["services"][0]["autoDeploy"]["categoryId"],
        "be.example.doclet"
    );
    assert!(!String::from_utf8_lossy(&output.stderr).contains("Component Generated"));
}

#[test]
fn test_generate_keeps_prior_document_scalars() {
    let dir = TempDir::new().unwrap();
    let prior = dir.path().join("component.xml");
    fs::write(
        &prior,
        r#"<?xml version="1.0" encoding="UTF-8"?>
<component xmlns="http://adobe.com/idp/dsc/component/document">
  <component-id>be.example.prior</component-id>
  <version>3.2</version>
  <class-path>lib/commons.jar</class-path>
  <services>
    <service name="Removed"><implementation-class>pckg.Removed</implementation-class></service>
  </services>
</component>"#,
    )
    .unwrap();
    let source = fixture("bootstrap_lifecycle.json");

    let output = run(&[
        "generate",
        "--source",
        source.to_str().unwrap(),
        "--input",
        prior.to_str().unwrap(),
        "--output",
        prior.to_str().unwrap(),
    ]);

    assert!(output.status.success());
    let xml = fs::read_to_string(&prior).unwrap();
    assert!(xml.contains("<component-id>be.example.prior</component-id>"));
    assert!(xml.contains("<class-path>lib/commons.jar</class-path>"));
    assert!(xml.contains("<bootstrap-class>pckg.bootstrap.LcBootstrap</bootstrap-class>"));
    assert!(!xml.contains("Removed"));
}

#[test]
fn test_generate_fails_on_ineligible_service() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("descriptors.json");
    fs::write(
        &source,
        r#"{"classes": [{"qualified_name": "pckg.Broken", "is_abstract": true, "annotations": {"Service": {}}}]}"#,
    )
    .unwrap();
    let out = dir.path().join("component.xml");

    let output = run(&[
        "generate",
        "--source",
        source.to_str().unwrap(),
        "--output",
        out.to_str().unwrap(),
        "--component-id",
        "be.example",
        "--component-version",
        "1.0",
    ]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("pckg.Broken"));
    assert!(stderr.contains("class is abstract"));
    assert!(!out.exists());
}

#[test]
fn test_generate_fails_on_missing_source() {
    let output = run(&[
        "generate",
        "--source",
        "/nonexistent/descriptors.json",
        "--stdout",
    ]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Descriptor source not found"));
}

#[test]
fn test_generate_rejects_unknown_strategy() {
    let output = run(&["generate", "--strategy", "reflection", "--stdout"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid extraction strategy"));
}

#[test]
fn test_invalid_format_is_a_usage_error() {
    let output = run(&["generate", "--format", "toml"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("toml"));
}
