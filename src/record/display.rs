//! Display processes: section headers and prefixed messages

use serde::Deserialize;
use tracing::Level;

use super::error::RecordError;
use crate::utils::{print_prefixed, print_section, PrefixLevel};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DisplayStep {
    /// "section" or "prefix"
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub section: SectionStep,
    #[serde(default)]
    pub prefix: PrefixStep,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SectionStep {
    /// Header depth; 0 is treated as 1
    #[serde(default)]
    pub level: usize,
    #[serde(default)]
    pub println: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PrefixStep {
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub println: String,
}

/// What a display step prints, once validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayAction<'a> {
    Section { level: usize, text: &'a str },
    Prefix { level: PrefixLevel, text: &'a str },
}

impl DisplayAction<'_> {
    /// Debug lines only show when debug diagnostics are enabled.
    pub fn is_visible(&self, debug_enabled: bool) -> bool {
        match self {
            DisplayAction::Prefix {
                level: PrefixLevel::Debug,
                ..
            } => debug_enabled,
            _ => true,
        }
    }
}

pub fn parse_prefix_level(level: &str) -> Result<PrefixLevel, RecordError> {
    match level {
        "debug" => Ok(PrefixLevel::Debug),
        "info" => Ok(PrefixLevel::Info),
        "success" => Ok(PrefixLevel::Success),
        "warning" => Ok(PrefixLevel::Warning),
        "error" => Ok(PrefixLevel::Error),
        other => Err(RecordError::InvalidPrefixLevel(other.to_string())),
    }
}

impl DisplayStep {
    pub fn action(&self) -> Result<DisplayAction<'_>, RecordError> {
        match self.kind.as_str() {
            "section" => Ok(DisplayAction::Section {
                level: self.section.level.max(1),
                text: &self.section.println,
            }),
            "prefix" => Ok(DisplayAction::Prefix {
                level: parse_prefix_level(&self.prefix.level)?,
                text: &self.prefix.println,
            }),
            other => Err(RecordError::InvalidDisplayType(other.to_string())),
        }
    }

    pub fn execute(&self) -> Result<(), RecordError> {
        let action = self.action()?;
        if !action.is_visible(tracing::enabled!(Level::DEBUG)) {
            return Ok(());
        }

        match action {
            DisplayAction::Section { level, text } => print_section(level, text),
            DisplayAction::Prefix { level, text } => print_prefixed(level, text),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(json: &str) -> DisplayStep {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_section_level_zero_defaults_to_one() {
        let s = step(r#"{"type": "section", "section": {"println": "Lab 1"}}"#);
        assert_eq!(
            s.action().unwrap(),
            DisplayAction::Section { level: 1, text: "Lab 1" }
        );
    }

    #[test]
    fn test_prefix_levels() {
        let s = step(r#"{"type": "prefix", "prefix": {"level": "warning", "println": "careful"}}"#);
        assert_eq!(
            s.action().unwrap(),
            DisplayAction::Prefix { level: PrefixLevel::Warning, text: "careful" }
        );
    }

    #[test]
    fn test_debug_prefix_hidden_unless_debug_enabled() {
        let s = step(r#"{"type": "prefix", "prefix": {"level": "debug", "println": "trace"}}"#);
        let action = s.action().unwrap();
        assert!(!action.is_visible(false));
        assert!(action.is_visible(true));

        let info = step(r#"{"type": "prefix", "prefix": {"level": "info", "println": "hello"}}"#);
        assert!(info.action().unwrap().is_visible(false));

        let section = step(r#"{"type": "section", "section": {"println": "Lab"}}"#);
        assert!(section.action().unwrap().is_visible(false));
    }

    #[test]
    fn test_invalid_prefix_level() {
        let s = step(r#"{"type": "prefix", "prefix": {"level": "fatal", "println": "x"}}"#);
        assert_eq!(
            s.action().unwrap_err(),
            RecordError::InvalidPrefixLevel("fatal".to_string())
        );
    }

    #[test]
    fn test_invalid_display_type() {
        let s = step(r#"{"type": "table"}"#);
        assert!(matches!(s.action(), Err(RecordError::InvalidDisplayType(_))));
    }
}
