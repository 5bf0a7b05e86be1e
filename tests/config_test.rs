use armature::config::{get_schema, load_config, parse_config};
use armature::constants::CONFIG_FILES;
use armature::error::Error;
use armature::renderer::MiniJinjaRenderer;
use serde_json::json;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_config_prefers_json() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("armature.json"), "{\"a\": 1}").unwrap();
    fs::write(temp_dir.path().join("armature.yaml"), "a: 2").unwrap();

    let content = load_config(temp_dir.path(), &CONFIG_FILES).unwrap();
    assert_eq!(content, "{\"a\": 1}");
}

#[test]
fn test_load_config_missing() {
    let temp_dir = TempDir::new().unwrap();
    match load_config(temp_dir.path(), &CONFIG_FILES) {
        Err(Error::ConfigError(message)) => assert!(message.contains("armature.json")),
        other => panic!("Expected ConfigError, got {:?}", other),
    }
}

#[test]
fn test_parse_yaml_schema() {
    let content = r#"
service_name:
  kind: str
  help: Service name
  default: api
transport:
  kind: enum
  help: Transport protocol
  choices: [http, grpc]
use_tls:
  kind: bool
  help: Terminate TLS
  default: true
"#;
    let schema = parse_config(content).unwrap();
    let engine = MiniJinjaRenderer::new();
    let options = schema.resolve(&json!(null), &engine).unwrap();

    assert_eq!(options.text("service_name"), "api");
    assert_eq!(options.text("transport"), "http");
    assert!(options.flag("use_tls"));
}

#[test]
fn test_parse_json_schema() {
    let content = r#"{
        "flavor": {
            "kind": "enum",
            "help": "Build flavor",
            "choices": ["debug", "release"],
            "default": "release"
        }
    }"#;
    let schema = parse_config(content).unwrap();
    let engine = MiniJinjaRenderer::new();
    let options = schema.resolve(&json!(null), &engine).unwrap();
    assert_eq!(options.text("flavor"), "release");
}

#[test]
fn test_get_schema_falls_back_to_builtin() {
    let temp_dir = TempDir::new().unwrap();
    let schema = get_schema(temp_dir.path()).unwrap();
    assert!(schema.declarations().contains_key("task_runner"));
    assert!(schema.declarations().contains_key("license"));
}

#[test]
fn test_get_schema_uses_template_file() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("armature.yml"),
        "flag:\n  kind: bool\n  help: A flag\n",
    )
    .unwrap();
    let schema = get_schema(temp_dir.path()).unwrap();
    assert!(schema.declarations().contains_key("flag"));
    assert!(!schema.declarations().contains_key("task_runner"));
}
