//! User input and interaction handling.

use crate::error::{Error, Result};
use dialoguer::{Confirm, Input, Select};

/// Trait for interactive prompting, kept narrow so tests can substitute a
/// scripted implementation.
pub trait Prompter {
    /// Asks a yes/no question. When `skip` is set the question is not shown
    /// and the answer is `true`.
    fn confirm(&self, skip: bool, message: String) -> Result<bool>;

    /// Asks for a line of free text with a pre-filled default.
    fn input(&self, help: &str, default: &str) -> Result<String>;

    /// Asks to pick one of `choices`; returns the selected index.
    fn select(&self, help: &str, choices: &[String], default_index: usize) -> Result<usize>;
}

/// Prompter backed by dialoguer, attached to the current terminal.
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DialoguerPrompter {
    fn default() -> Self {
        DialoguerPrompter::new()
    }
}

impl Prompter for DialoguerPrompter {
    fn confirm(&self, skip: bool, message: String) -> Result<bool> {
        if skip {
            return Ok(true);
        }
        Confirm::new()
            .with_prompt(message)
            .default(false)
            .interact()
            .map_err(|e| Error::PromptError(e.to_string()))
    }

    fn input(&self, help: &str, default: &str) -> Result<String> {
        Input::new()
            .with_prompt(help)
            .default(default.to_string())
            .interact_text()
            .map_err(|e| Error::PromptError(e.to_string()))
    }

    fn select(&self, help: &str, choices: &[String], default_index: usize) -> Result<usize> {
        Select::new()
            .with_prompt(help)
            .default(default_index)
            .items(choices)
            .interact()
            .map_err(|e| Error::PromptError(e.to_string()))
    }
}
