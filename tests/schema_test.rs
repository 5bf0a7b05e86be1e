use armature::error::Error;
use armature::renderer::MiniJinjaRenderer;
use armature::schema::{builtin_schema, OptionDeclaration, Schema};
use serde_json::json;

#[test]
fn test_defaults_fill_every_key() {
    let engine = MiniJinjaRenderer::new();
    let options = builtin_schema().resolve(&json!(null), &engine).unwrap();

    assert_eq!(options.text("task_runner"), "pdm");
    assert_eq!(options.text("license"), "MIT");
    assert_eq!(options.text("config_library"), "pydantic-settings");
    assert_eq!(options.text("python_version"), "3.13");
    assert!(!options.flag("cli"));
    assert!(!options.flag("use_safety"));
    assert!(!options.flag("initialize_git"));
}

#[test]
fn test_templated_defaults_derive_names() {
    let engine = MiniJinjaRenderer::new();
    let options = builtin_schema()
        .resolve(&json!({"project_name": "Data Tools"}), &engine)
        .unwrap();

    assert_eq!(options.text("project_slug"), "data-tools");
    assert_eq!(options.text("module_name"), "data_tools");
}

#[test]
fn test_explicit_slug_wins_over_derivation() {
    let engine = MiniJinjaRenderer::new();
    let options = builtin_schema()
        .resolve(
            &json!({"project_name": "Data Tools", "project_slug": "datatool"}),
            &engine,
        )
        .unwrap();

    assert_eq!(options.text("project_slug"), "datatool");
    assert_eq!(options.text("module_name"), "datatool");
}

#[test]
fn test_unknown_option_rejected() {
    let engine = MiniJinjaRenderer::new();
    match builtin_schema().resolve(&json!({"use_tox": true}), &engine) {
        Err(Error::UnknownOptionError { name }) => assert_eq!(name, "use_tox"),
        other => panic!("Expected UnknownOptionError, got {:?}", other),
    }
}

#[test]
fn test_permissive_schema_passes_unknown_keys() {
    let engine = MiniJinjaRenderer::new();
    let options = builtin_schema()
        .permissive()
        .resolve(&json!({"use_tox": true}), &engine)
        .unwrap();
    assert!(options.flag("use_tox"));
}

#[test]
fn test_invalid_enum_value() {
    let engine = MiniJinjaRenderer::new();
    match builtin_schema().resolve(&json!({"task_runner": "make"}), &engine) {
        Err(Error::InvalidValueError { option, value, expected }) => {
            assert_eq!(option, "task_runner");
            assert_eq!(value, "make");
            assert!(expected.contains("pdm"));
        }
        other => panic!("Expected InvalidValueError, got {:?}", other),
    }
}

#[test]
fn test_invalid_value_kind() {
    let engine = MiniJinjaRenderer::new();
    assert!(matches!(
        builtin_schema().resolve(&json!({"cli": "yes"}), &engine),
        Err(Error::InvalidValueError { .. })
    ));
    assert!(matches!(
        builtin_schema().resolve(&json!({"license": 7}), &engine),
        Err(Error::InvalidValueError { .. })
    ));
}

#[test]
fn test_slug_pattern_enforced() {
    let engine = MiniJinjaRenderer::new();
    assert!(matches!(
        builtin_schema().resolve(&json!({"project_slug": "Bad Slug"}), &engine),
        Err(Error::InvalidValueError { .. })
    ));
}

#[test]
fn test_declared_schema_resolution_order() {
    let engine = MiniJinjaRenderer::new();
    let mut schema = Schema::new();
    schema.declare(
        "name",
        OptionDeclaration::Str {
            help: "Name".to_string(),
            default: Some("widget".to_string()),
            pattern: None,
        },
    );
    schema.declare(
        "greeting",
        OptionDeclaration::Str {
            help: "Greeting".to_string(),
            default: Some("Hello {{ name }}".to_string()),
            pattern: None,
        },
    );

    let options = schema.resolve(&json!(null), &engine).unwrap();
    assert_eq!(options.text("greeting"), "Hello widget");

    let options = schema.resolve(&json!({"name": "gear"}), &engine).unwrap();
    assert_eq!(options.text("greeting"), "Hello gear");
}

#[test]
fn test_enum_default_falls_back_to_first_choice() {
    let engine = MiniJinjaRenderer::new();
    let mut schema = Schema::new();
    schema.declare(
        "color",
        OptionDeclaration::Enum {
            help: "Color".to_string(),
            choices: vec!["red".to_string(), "blue".to_string()],
            default: None,
        },
    );

    let options = schema.resolve(&json!(null), &engine).unwrap();
    assert_eq!(options.text("color"), "red");
}
