//! Armature is a project-scaffolding toolkit. It renders a parameterized
//! template into a new project skeleton, where a rule-based resolver maps
//! the chosen options to the set of emitted files and the contents of the
//! composable ones (dependency manifest, task definitions, CI workflow).

/// Post-generation bootstrap: git initialization, remote repository and
/// project-board wiring
pub mod bootstrap;

/// The default artifact-rule index for scaffolded projects
pub mod catalog;

/// Command-line interface module for the Armature application
pub mod cli;

/// Schema loading from template directories
/// Supports JSON and YAML formats (armature.json, armature.yml, armature.yaml)
pub mod config;

/// Common constants used across the application
pub mod constants;

/// Error types and handling for the Armature application
pub mod error;

/// prepare-commit-msg hook logic shared with its binary entry point
pub mod hook;

/// Pre and post generation hook processing
/// Handles execution of scripts in:
/// - hooks/pre_generate
/// - hooks/post_generate
pub mod hooks;

/// File and directory ignore patterns
/// Processes .armatureignore files to exclude specific paths
pub mod ignore;

/// Answer assembly from stdin and interactive prompting
pub mod parser;

/// Core template processing orchestration
/// Combines all components to generate the final output
pub mod processor;

/// User input and interaction handling
pub mod prompt;

/// Template rendering backed by MiniJinja
pub mod renderer;

/// Conditional artifact resolution from an option set
pub mod resolver;

/// Declarative artifact rules: predicates, targets and effects
pub mod rules;

/// Option schema: declarations, defaults and validation
pub mod schema;

/// External task execution with timeouts and captured output
pub mod tasks;
