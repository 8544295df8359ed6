//! CLI integration tests
//!
//! These tests verify the CLI works correctly by running the binary.

#![cfg(feature = "cli")]

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tempfile::TempDir;

fn jsons2xsd_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_jsons2xsd"))
}

fn fixture(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    path
}

// ============================================================================
// Conversion
// ============================================================================

#[test]
fn test_cli_convert_to_stdout() {
    let output = Command::new(jsons2xsd_bin())
        .args(["-n", "urn:example:widget", "-r", "Widget"])
        .arg(fixture("widget.json"))
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "conversion should succeed");
    assert!(stdout.starts_with("<?xml"), "should write the XML declaration");
    assert!(stdout.contains(r#"<complexType name="widget">"#));
    assert!(stdout.contains(r#"<element name="Name" type="string"/>"#));
}

#[test]
fn test_cli_convert_to_file() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("widget.xsd");

    let output = Command::new(jsons2xsd_bin())
        .args(["-n", "urn:example:widget", "-r", "Widget", "-w", "element", "-o"])
        .arg(&out)
        .arg(fixture("widget.json"))
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "conversion should succeed");
    assert!(output.stdout.is_empty(), "nothing should go to stdout");

    let xsd = fs::read_to_string(&out).unwrap();
    assert!(xsd.contains(r#"<element name="widget" type="widget:widget"/>"#));
}

#[test]
fn test_cli_reads_stdin() {
    let mut child = Command::new(jsons2xsd_bin())
        .args(["-n", "urn:example:widget", "-r", "Widget", "-"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute command");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(br#"{"type": "object", "properties": {"age": {"type": "integer"}}}"#)
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(r#"<element name="Age" type="int" minOccurs="0"/>"#));
}

#[test]
fn test_cli_writes_notices() {
    let dir = TempDir::new().unwrap();
    let notices = dir.path().join("notices.json");

    let output = Command::new(jsons2xsd_bin())
        .args(["-n", "urn:example:order", "-r", "PurchaseOrder", "--notices"])
        .arg(&notices)
        .arg(fixture("purchase_order.json"))
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("review the generated schema"));

    let notices: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&notices).unwrap()).unwrap();
    let kinds: Vec<_> = notices
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["kind"].as_str().unwrap().to_string())
        .collect();
    assert!(kinds.contains(&"synthesized-choice-name".to_string()));
    assert!(kinds.contains(&"synthesized-array-item-name".to_string()));
}

#[test]
fn test_cli_custom_link_type() {
    let dir = TempDir::new().unwrap();
    let schema = dir.path().join("schema.json");
    fs::write(
        &schema,
        r##"{"type": "object",
            "properties": {"self": {"$ref": "#/definitions/HalLink"}},
            "definitions": {"HalLink": {}}}"##,
    )
    .unwrap();

    let output = Command::new(jsons2xsd_bin())
        .args(["-n", "urn:example:hal", "-r", "Resource", "--link-type", "HalLink"])
        .arg(&schema)
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(r#"<attribute name="href" type="string"/>"#));
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_cli_unmappable_type() {
    let dir = TempDir::new().unwrap();
    let schema = dir.path().join("schema.json");
    fs::write(
        &schema,
        r#"{"type": "object", "properties": {"id": {"type": "integer", "format": "int64"}}}"#,
    )
    .unwrap();

    let output = Command::new(jsons2xsd_bin())
        .args(["-n", "urn:example:test", "-r", "Thing"])
        .arg(&schema)
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "conversion should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unable to determine XSD type"));
    assert!(stderr.contains("/properties/id"));
}

#[test]
fn test_cli_missing_file() {
    let output = Command::new(jsons2xsd_bin())
        .args(["-n", "urn:example:test", "-r", "Thing", "/nonexistent/schema.json"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("/nonexistent/schema.json"));
}

#[test]
fn test_cli_invalid_namespace() {
    let output = Command::new(jsons2xsd_bin())
        .args(["-n", "not a uri", "-r", "Widget"])
        .arg(fixture("widget.json"))
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
}

#[test]
fn test_cli_requires_root_name() {
    let output = Command::new(jsons2xsd_bin())
        .args(["-n", "urn:example:test"])
        .arg(fixture("widget.json"))
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "missing --name should be rejected");
}
