//! Survey processes: ask a question, store the answer under a key

use std::str::FromStr;

use anyhow::Result;
use serde::Deserialize;
use serde_json::Value;

use super::error::RecordError;
use super::ResultStore;
use crate::cli::{Prompter, ValueType};
use crate::utils::DONE;

/// Menu entry that ends a loop prompt
pub const LOOP_FINISH_TAG: &str = "*FINISH*";

/// Message of the option menu shown by loop prompts
pub const LOOP_SELECT_MESSAGE: &str = "Select an option:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurveyKind {
    Input,
    Confirm,
    Select,
    LoopSelectInput,
    LoopSelectSelect,
}

impl FromStr for SurveyKind {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, RecordError> {
        match s {
            "input" => Ok(SurveyKind::Input),
            "confirm" => Ok(SurveyKind::Confirm),
            "select" => Ok(SurveyKind::Select),
            "loopSelectInput" => Ok(SurveyKind::LoopSelectInput),
            "loopSelectSelect" => Ok(SurveyKind::LoopSelectSelect),
            other => Err(RecordError::InvalidSurveyType(other.to_string())),
        }
    }
}

impl FromStr for ValueType {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, RecordError> {
        match s {
            "number" => Ok(ValueType::Number),
            "bool" => Ok(ValueType::Bool),
            "string" => Ok(ValueType::String),
            other => Err(RecordError::InvalidValueType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SurveyOption {
    pub desc: String,
    #[serde(default)]
    pub value: Value,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyStep {
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Store key, used by every prompt type
    #[serde(default)]
    pub key: String,
    /// Answer type of input prompts
    #[serde(default)]
    pub value_type: String,
    #[serde(default)]
    pub message: String,
    /// Choices of select prompts
    #[serde(default)]
    pub options: Vec<SurveyOption>,
    /// Sub-keys offered by loop prompts
    #[serde(default)]
    pub loop_options: Vec<SurveyOption>,
}

impl SurveyStep {
    /// Ask the question and store the answer.
    pub fn execute(&self, prompter: &mut dyn Prompter, store: &mut ResultStore) -> Result<()> {
        match self.kind.parse::<SurveyKind>()? {
            SurveyKind::Input => {
                let value_type = self.value_type.parse::<ValueType>()?;
                let answer = prompter.input(&self.message, value_type)?;
                store.insert(self.key.clone(), answer);
            }
            SurveyKind::Confirm => {
                let answer = prompter.confirm(&self.message)?;
                store.insert(self.key.clone(), Value::Bool(answer));
            }
            SurveyKind::Select => {
                let items: Vec<String> = self.options.iter().map(|o| o.desc.clone()).collect();
                let index = prompter.select(&self.message, &items)?;
                let option = self.options.get(index).ok_or(RecordError::InvalidSelection {
                    index,
                    count: self.options.len(),
                })?;
                store.insert(self.key.clone(), option.value.clone());
            }
            SurveyKind::LoopSelectInput => self.run_loop(SurveyKind::Input, prompter, store)?,
            SurveyKind::LoopSelectSelect => self.run_loop(SurveyKind::Select, prompter, store)?,
        }
        Ok(())
    }

    /// Offer the loop options until the finish entry is picked, asking an
    /// inner prompt under `key.<option value>` for every pick.
    fn run_loop(&self, inner: SurveyKind, prompter: &mut dyn Prompter, store: &mut ResultStore) -> Result<()> {
        let mut items: Vec<String> = self.loop_options.iter().map(|o| o.desc.clone()).collect();
        items.push(LOOP_FINISH_TAG.to_string());

        loop {
            let index = prompter.select(LOOP_SELECT_MESSAGE, &items)?;
            if index == self.loop_options.len() {
                break;
            }

            let option = self.loop_options.get(index).ok_or(RecordError::InvalidSelection {
                index,
                count: items.len(),
            })?;

            let sub_key = option.value.as_str().ok_or_else(|| RecordError::InvalidLoopOptionValue {
                key: self.key.clone(),
                found: option.value.to_string(),
            })?;

            let inner_step = SurveyStep {
                kind: match inner {
                    SurveyKind::Select => "select".to_string(),
                    _ => "input".to_string(),
                },
                key: format!("{}.{}", self.key, sub_key),
                value_type: self.value_type.clone(),
                message: self.message.clone(),
                options: self.options.clone(),
                loop_options: Vec::new(),
            };
            inner_step.execute(prompter, store)?;

            items[index] = format!("{}{}", DONE, option.desc);
            println!();
        }

        Ok(())
    }
}
