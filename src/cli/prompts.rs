//! Interactive prompts using dialoguer

use anyhow::Result;
use dialoguer::{Confirm, Input, Select};
use serde_json::{Number, Value};

/// Type of the answer an input prompt expects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Number,
    Bool,
    String,
}

/// Source of answers for record surveys.
///
/// The terminal implementation asks the user; tests supply scripted answers.
pub trait Prompter {
    /// Ask for a free-form answer of the given type.
    fn input(&mut self, message: &str, value_type: ValueType) -> Result<Value>;

    /// Ask a yes/no question.
    fn confirm(&mut self, message: &str) -> Result<bool>;

    /// Ask the user to pick one of `items`; returns its index.
    fn select(&mut self, message: &str, items: &[String]) -> Result<usize>;
}

/// Number of options shown at once in select prompts
pub const SELECT_PAGE_SIZE: usize = 10;

/// Prompter backed by the user's terminal
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn input(&mut self, message: &str, value_type: ValueType) -> Result<Value> {
        let value = match value_type {
            ValueType::Number => {
                let n: f64 = Input::new().with_prompt(message).interact_text()?;
                Number::from_f64(n)
                    .map(Value::Number)
                    .ok_or_else(|| anyhow::anyhow!("'{}' is not a finite number", n))?
            }
            ValueType::Bool => {
                let b: bool = Input::new().with_prompt(message).interact_text()?;
                Value::Bool(b)
            }
            ValueType::String => {
                let s: String = Input::new()
                    .with_prompt(message)
                    .allow_empty(true)
                    .interact_text()?;
                Value::String(s)
            }
        };
        Ok(value)
    }

    fn confirm(&mut self, message: &str) -> Result<bool> {
        confirm_step(message)
    }

    fn select(&mut self, message: &str, items: &[String]) -> Result<usize> {
        let index = Select::new()
            .with_prompt(message)
            .items(items)
            .default(0)
            .max_length(SELECT_PAGE_SIZE)
            .interact()?;
        Ok(index)
    }
}

/// Prompt user to confirm proceeding with an action
pub fn confirm_step(message: &str) -> Result<bool> {
    let confirmed = Confirm::new()
        .with_prompt(message)
        .default(true)
        .interact()?;
    Ok(confirmed)
}
