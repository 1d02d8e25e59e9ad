//! User interaction.
//! The pipeline asks questions through [`Prompter`] so tests can script the answers.

use crate::error::Result;
use dialoguer::{Confirm, Input, Select};

/// Asks the user a question and returns the answer.
pub trait Prompter {
    /// Asks a yes/no question defaulting to "no". Returns `true` without asking when `skip` is set.
    fn confirm(&self, skip: bool, prompt: String) -> Result<bool>;

    /// Asks for free text, offering `default` when present.
    fn input(&self, prompt: String, default: Option<String>) -> Result<String>;

    /// Asks the user to pick one of `items`, returning its index.
    fn select(&self, prompt: String, items: &[&str], default: usize) -> Result<usize>;
}

/// Terminal prompter backed by dialoguer.
#[derive(Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for DialoguerPrompter {
    fn confirm(&self, skip: bool, prompt: String) -> Result<bool> {
        if skip {
            return Ok(true);
        }
        Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
    }

    fn input(&self, prompt: String, default: Option<String>) -> Result<String> {
        let mut input = Input::<String>::new().with_prompt(prompt).allow_empty(true);
        if let Some(default) = default {
            input = input.default(default);
        }
        Ok(input.interact_text()?)
    }

    fn select(&self, prompt: String, items: &[&str], default: usize) -> Result<usize> {
        Ok(Select::new().with_prompt(prompt).items(items).default(default).interact()?)
    }
}
