//! Option schema for Armature templates.
//! Declares the recognized configuration options, their kinds and defaults,
//! and resolves caller-supplied overrides into an immutable [`OptionSet`].

use crate::error::{Error, Result};
use crate::renderer::TemplateRenderer;
use indexmap::IndexMap;
use regex::Regex;
use serde::Deserialize;

/// Describes one configuration option.
///
/// String defaults may contain template expressions which are rendered
/// against the options resolved before them, in declaration order.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum OptionDeclaration {
    Bool {
        help: String,
        #[serde(default)]
        default: bool,
    },
    Enum {
        help: String,
        choices: Vec<String>,
        #[serde(default)]
        default: Option<String>,
    },
    Str {
        help: String,
        #[serde(default)]
        default: Option<String>,
        #[serde(default)]
        pattern: Option<String>,
    },
}

impl OptionDeclaration {
    pub fn help(&self) -> &str {
        match self {
            OptionDeclaration::Bool { help, .. } => help,
            OptionDeclaration::Enum { help, .. } => help,
            OptionDeclaration::Str { help, .. } => help,
        }
    }
}

/// A fully-resolved option mapping. Every declared key is present;
/// immutable for the duration of one resolution pass.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionSet {
    values: IndexMap<String, serde_json::Value>,
}

impl OptionSet {
    /// Builds an OptionSet directly from resolved values, bypassing schema
    /// validation. Intended for rule evaluation against hand-built maps.
    pub fn from_values(values: IndexMap<String, serde_json::Value>) -> Self {
        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.values.get(name)
    }

    /// Returns the boolean value of an option, `false` when absent.
    pub fn flag(&self, name: &str) -> bool {
        self.values.get(name).and_then(|v| v.as_bool()).unwrap_or(false)
    }

    /// Returns the string value of an option, `""` when absent.
    pub fn text(&self, name: &str) -> &str {
        self.values.get(name).and_then(|v| v.as_str()).unwrap_or("")
    }

    /// Exposes the options as a rendering context object.
    pub fn as_context(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        for (key, value) in &self.values {
            map.insert(key.clone(), value.clone());
        }
        serde_json::Value::Object(map)
    }
}

/// The enumerated set of recognized options.
#[derive(Debug, Clone, Deserialize)]
pub struct Schema {
    #[serde(flatten)]
    options: IndexMap<String, OptionDeclaration>,
    #[serde(skip)]
    permissive: bool,
}

impl Schema {
    pub fn new() -> Self {
        Self { options: IndexMap::new(), permissive: false }
    }

    /// A permissive schema passes through override keys it does not declare
    /// instead of failing with `UnknownOptionError`.
    pub fn permissive(mut self) -> Self {
        self.permissive = true;
        self
    }

    pub fn declare(&mut self, name: &str, declaration: OptionDeclaration) {
        self.options.insert(name.to_string(), declaration);
    }

    pub fn declarations(&self) -> &IndexMap<String, OptionDeclaration> {
        &self.options
    }

    /// Merges caller-supplied overrides onto the declared defaults.
    ///
    /// # Arguments
    /// * `overrides` - JSON object of option name to value (or Null for none)
    /// * `engine` - Template engine used to render templated string defaults
    ///
    /// # Errors
    /// * `Error::UnknownOptionError` for an undeclared override key, unless
    ///   the schema is permissive
    /// * `Error::InvalidValueError` for a value outside an option's kind,
    ///   allowed choices or pattern
    pub fn resolve(
        &self,
        overrides: &serde_json::Value,
        engine: &dyn TemplateRenderer,
    ) -> Result<OptionSet> {
        let overrides = match overrides {
            serde_json::Value::Null => serde_json::Map::new(),
            serde_json::Value::Object(map) => map.clone(),
            other => {
                return Err(Error::ConfigError(format!(
                    "expected an object of option overrides, got: {}",
                    other
                )))
            }
        };

        if !self.permissive {
            for key in overrides.keys() {
                if !self.options.contains_key(key) {
                    return Err(Error::UnknownOptionError { name: key.clone() });
                }
            }
        }

        let mut values = IndexMap::new();
        let mut context = serde_json::Map::new();

        for (name, declaration) in &self.options {
            let supplied = overrides.get(name);
            let value = match declaration {
                OptionDeclaration::Bool { default, .. } => {
                    resolve_bool(name, supplied, *default)?
                }
                OptionDeclaration::Enum { choices, default, .. } => {
                    resolve_enum(name, supplied, choices, default.as_deref())?
                }
                OptionDeclaration::Str { default, pattern, .. } => resolve_str(
                    name,
                    supplied,
                    default.as_deref(),
                    pattern.as_deref(),
                    &serde_json::Value::Object(context.clone()),
                    engine,
                )?,
            };
            context.insert(name.clone(), value.clone());
            values.insert(name.clone(), value);
        }

        if self.permissive {
            for (key, value) in &overrides {
                if !values.contains_key(key) {
                    values.insert(key.clone(), value.clone());
                }
            }
        }

        Ok(OptionSet { values })
    }
}

impl Default for Schema {
    fn default() -> Self {
        Schema::new()
    }
}

fn resolve_bool(
    name: &str,
    supplied: Option<&serde_json::Value>,
    default: bool,
) -> Result<serde_json::Value> {
    match supplied {
        None => Ok(serde_json::Value::Bool(default)),
        Some(serde_json::Value::Bool(value)) => Ok(serde_json::Value::Bool(*value)),
        Some(other) => Err(Error::InvalidValueError {
            option: name.to_string(),
            value: other.to_string(),
            expected: "a boolean".to_string(),
        }),
    }
}

fn resolve_enum(
    name: &str,
    supplied: Option<&serde_json::Value>,
    choices: &[String],
    default: Option<&str>,
) -> Result<serde_json::Value> {
    let chosen = match supplied {
        None => default
            .map(str::to_string)
            .or_else(|| choices.first().cloned())
            .ok_or_else(|| {
                Error::ConfigError(format!("option '{}' declares no choices", name))
            })?,
        Some(serde_json::Value::String(value)) => value.clone(),
        Some(other) => {
            return Err(Error::InvalidValueError {
                option: name.to_string(),
                value: other.to_string(),
                expected: format!("one of: {}", choices.join(", ")),
            })
        }
    };

    if !choices.iter().any(|choice| choice == &chosen) {
        return Err(Error::InvalidValueError {
            option: name.to_string(),
            value: chosen,
            expected: format!("one of: {}", choices.join(", ")),
        });
    }

    Ok(serde_json::Value::String(chosen))
}

fn resolve_str(
    name: &str,
    supplied: Option<&serde_json::Value>,
    default: Option<&str>,
    pattern: Option<&str>,
    context: &serde_json::Value,
    engine: &dyn TemplateRenderer,
) -> Result<serde_json::Value> {
    let value = match supplied {
        None => match default {
            Some(template) => engine.render(template, context)?,
            None => String::new(),
        },
        Some(serde_json::Value::String(value)) => value.clone(),
        Some(other) => {
            return Err(Error::InvalidValueError {
                option: name.to_string(),
                value: other.to_string(),
                expected: "a string".to_string(),
            })
        }
    };

    if let Some(pattern) = pattern {
        let regex = Regex::new(pattern).map_err(|e| {
            Error::ConfigError(format!("invalid pattern for option '{}': {}", name, e))
        })?;
        if !regex.is_match(&value) {
            return Err(Error::InvalidValueError {
                option: name.to_string(),
                value,
                expected: format!("a string matching '{}'", pattern),
            });
        }
    }

    Ok(serde_json::Value::String(value))
}

/// The built-in scaffolding schema, used when a template carries no
/// configuration file of its own.
pub fn builtin_schema() -> Schema {
    let mut schema = Schema::new();

    schema.declare(
        "project_name",
        OptionDeclaration::Str {
            help: "Project name".to_string(),
            default: Some("My Project".to_string()),
            pattern: None,
        },
    );
    schema.declare(
        "project_slug",
        OptionDeclaration::Str {
            help: "Project slug (used for directories and the CLI entry point)".to_string(),
            default: Some("{{ project_name | kebab_case }}".to_string()),
            pattern: Some("^[a-z][a-z0-9-]*$".to_string()),
        },
    );
    schema.declare(
        "module_name",
        OptionDeclaration::Str {
            help: "Importable module name".to_string(),
            default: Some("{{ project_slug | snake_case }}".to_string()),
            pattern: Some("^[a-z][a-z0-9_]*$".to_string()),
        },
    );
    schema.declare(
        "project_description",
        OptionDeclaration::Str {
            help: "Short project description".to_string(),
            default: Some("A project scaffolded with armature.".to_string()),
            pattern: None,
        },
    );
    schema.declare(
        "author_name",
        OptionDeclaration::Str {
            help: "Author name".to_string(),
            default: None,
            pattern: None,
        },
    );
    schema.declare(
        "author_email",
        OptionDeclaration::Str {
            help: "Author email".to_string(),
            default: None,
            pattern: None,
        },
    );
    schema.declare(
        "github_account",
        OptionDeclaration::Str {
            help: "GitHub account or organization".to_string(),
            default: None,
            pattern: None,
        },
    );
    schema.declare(
        "repository_url",
        OptionDeclaration::Str {
            help: "Repository URL".to_string(),
            default: Some(
                "https://github.com/{{ github_account }}/{{ project_slug }}".to_string(),
            ),
            pattern: None,
        },
    );
    schema.declare(
        "version",
        OptionDeclaration::Str {
            help: "Initial version".to_string(),
            default: Some("0.1.0".to_string()),
            pattern: None,
        },
    );
    schema.declare(
        "python_version",
        OptionDeclaration::Enum {
            help: "Minimum Python version".to_string(),
            choices: vec!["3.13".to_string(), "3.12".to_string()],
            default: Some("3.13".to_string()),
        },
    );
    schema.declare(
        "license",
        OptionDeclaration::Enum {
            help: "Project license".to_string(),
            choices: vec![
                "MIT".to_string(),
                "Apache-2.0".to_string(),
                "Proprietary".to_string(),
            ],
            default: Some("MIT".to_string()),
        },
    );
    schema.declare(
        "task_runner",
        OptionDeclaration::Enum {
            help: "Task runner front end".to_string(),
            choices: vec!["pdm".to_string(), "just".to_string()],
            default: Some("pdm".to_string()),
        },
    );
    schema.declare(
        "config_library",
        OptionDeclaration::Enum {
            help: "Settings library for the generated project".to_string(),
            choices: vec!["pydantic-settings".to_string(), "typed-settings".to_string()],
            default: Some("pydantic-settings".to_string()),
        },
    );
    schema.declare(
        "doc_hosting_provider",
        OptionDeclaration::Enum {
            help: "Documentation hosting provider".to_string(),
            choices: vec!["None".to_string(), "ReadTheDocs".to_string()],
            default: Some("None".to_string()),
        },
    );

    for (name, help) in [
        ("cli", "Include a command-line interface"),
        ("docker_support", "Include a docker-compose descriptor"),
        ("generate_env", "Generate a .env file"),
        ("include_adr", "Include architecture decision records"),
        ("badges", "Include status badges in the README"),
        ("use_safety", "Check dependencies with safety"),
        ("use_bandit", "Scan sources with bandit"),
        ("use_dependabot", "Enable dependabot updates"),
        ("dependabot_automerge", "Auto-merge passing dependabot updates"),
        ("use_codecov", "Upload coverage to Codecov from CI"),
        ("use_detect_secrets", "Run detect-secrets in pre-commit"),
        ("use_semantic_release", "Release with python-semantic-release"),
        ("strict_testing", "Enable strict pytest and typeguard options"),
        ("initialize_git", "Initialize a git repository after generation"),
        ("push_to_github", "Create the GitHub repository and push"),
        ("create_github_project", "Create a GitHub project board"),
    ] {
        schema.declare(
            name,
            OptionDeclaration::Bool { help: help.to_string(), default: false },
        );
    }

    schema
}
