//! Answer assembly: collects option overrides from stdin or interactive
//! prompting before the schema resolves them into an [`OptionSet`].

use crate::error::{Error, Result};
use crate::prompt::Prompter;
use crate::renderer::TemplateRenderer;
use crate::schema::{OptionDeclaration, Schema};
use std::io::Read;
use std::process::ChildStdout;

/// Where preloaded answers come from.
#[derive(Debug)]
pub enum AnswerSource {
    Stdin,
    None,
}

/// Reads a JSON object of answers from standard input.
///
/// An empty input yields `Null`; malformed JSON is a configuration error.
pub fn load_from_stdin() -> Result<serde_json::Value> {
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    parse_answers(&buffer)
}

/// Parses a raw answer payload.
pub fn parse_answers(raw: &str) -> Result<serde_json::Value> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(serde_json::Value::Null);
    }
    serde_json::from_str(trimmed)
        .map_err(|e| Error::ConfigError(format!("Failed to parse answers as JSON: {}", e)))
}

/// Reads a JSON object of answers from a pre-generation hook's stdout.
pub fn load_from_hook(mut stdout: ChildStdout) -> Result<serde_json::Value> {
    let mut buffer = String::new();
    stdout.read_to_string(&mut buffer).map_err(Error::IoError)?;
    parse_answers(&buffer)
}

/// Merges `overlay` onto `base`; overlay keys win. Non-object values are
/// treated as empty.
pub fn merge_answers(
    base: &serde_json::Value,
    overlay: &serde_json::Value,
) -> serde_json::Value {
    let mut merged = match base {
        serde_json::Value::Object(map) => map.clone(),
        _ => serde_json::Map::new(),
    };
    if let serde_json::Value::Object(map) = overlay {
        for (key, value) in map {
            merged.insert(key.clone(), value.clone());
        }
    }
    serde_json::Value::Object(merged)
}

/// Selects the preloaded answer source based on the CLI flags.
pub fn get_answers_from(take_from_stdin: bool) -> Result<serde_json::Value> {
    let source = if take_from_stdin { AnswerSource::Stdin } else { AnswerSource::None };
    match source {
        AnswerSource::Stdin => load_from_stdin(),
        AnswerSource::None => Ok(serde_json::Value::Null),
    }
}

/// Collects one answer per declared option: preloaded values win, then
/// interactive prompting, unless `assume_defaults` leaves the remainder to
/// the schema's default-filling.
///
/// The returned object contains only explicitly answered options;
/// [`Schema::resolve`] fills and validates the rest.
pub fn get_answers(
    engine: &dyn TemplateRenderer,
    prompter: &dyn Prompter,
    schema: &Schema,
    preloaded: &serde_json::Value,
    assume_defaults: bool,
) -> Result<serde_json::Value> {
    let mut answers = serde_json::Map::new();

    for (name, declaration) in schema.declarations() {
        if let Some(value) = preloaded.get(name) {
            answers.insert(name.clone(), value.clone());
            continue;
        }
        if assume_defaults {
            continue;
        }

        let context = serde_json::Value::Object(answers.clone());
        let help = engine
            .render(declaration.help(), &context)
            .unwrap_or_else(|_| declaration.help().to_string());

        let value = match declaration {
            OptionDeclaration::Bool { .. } => {
                serde_json::Value::Bool(prompter.confirm(false, help)?)
            }
            OptionDeclaration::Enum { choices, default, .. } => {
                let default_index = default
                    .as_ref()
                    .and_then(|d| choices.iter().position(|choice| choice == d))
                    .unwrap_or(0);
                let selected = prompter.select(&help, choices, default_index)?;
                serde_json::Value::String(choices[selected].clone())
            }
            OptionDeclaration::Str { default, .. } => {
                let rendered_default = match default {
                    Some(template) => engine.render(template, &context).unwrap_or_default(),
                    None => String::new(),
                };
                serde_json::Value::String(prompter.input(&help, &rendered_default)?)
            }
        };
        answers.insert(name.clone(), value);
    }

    Ok(serde_json::Value::Object(answers))
}
