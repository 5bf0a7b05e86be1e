//! Command-line interface implementation for Armature.
//! Provides argument parsing and help text formatting using clap.

use crate::error::{Error, Result};
use clap::{error::ErrorKind, CommandFactory, Parser};
use std::path::PathBuf;

/// Command-line arguments structure for Armature.
#[derive(Parser, Debug)]
#[command(author, version, about = "Armature: parameterized project scaffolding", long_about = None)]
pub struct Args {
    /// Path to the template directory
    #[arg(value_name = "TEMPLATE")]
    pub template: String,

    /// Directory where the generated project will be created
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Option overrides as KEY=VALUE pairs; values are parsed as JSON
    /// scalars where possible, otherwise taken as strings
    #[arg(short = 'd', long = "data", value_name = "KEY=VALUE")]
    pub data: Vec<String>,

    /// Read option overrides as a JSON object from stdin
    #[arg(long)]
    pub stdin: bool,

    /// Accept declared defaults instead of prompting for unanswered options
    #[arg(long)]
    pub defaults: bool,

    /// Force overwrite of existing output directory
    #[arg(short, long)]
    pub force: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Skip the post-generation bootstrap (git init, remote repository,
    /// project board)
    #[arg(long)]
    pub skip_tasks: bool,

    /// Skip confirmation prompts when executing hooks.
    /// This will automatically execute any pre/post hooks defined in the
    /// template without asking for confirmation first.
    #[arg(long)]
    pub skip_hooks_check: bool,
}

/// Parses `-d KEY=VALUE` overrides into a JSON object. Values are parsed
/// as JSON scalars ("true", "3") where possible, strings otherwise.
pub fn parse_data_overrides(pairs: &[String]) -> Result<serde_json::Value> {
    let mut overrides = serde_json::Map::new();
    for pair in pairs {
        let Some((key, value)) = pair.split_once('=') else {
            return Err(Error::ConfigError(format!(
                "invalid --data value '{}', expected KEY=VALUE",
                pair
            )));
        };
        let value = serde_json::from_str(value)
            .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));
        overrides.insert(key.to_string(), value);
    }
    Ok(serde_json::Value::Object(overrides))
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument {
                Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help()
                    .unwrap();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
