//! Export configuration: the JSON document as written by hand, and the
//! compiled form the rule engine evaluates against.

use std::fmt;
use std::str::FromStr;

use regex::Regex;
use serde::Deserialize;

use super::error::{ExportError, Result};

/// Selector value that targets every row of the group.
pub const FOR_ALL: &str = "all";

/// Export configuration as loaded from an export asset.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportConfig {
    /// Number of rows produced for each result document
    pub group_size: usize,
    #[serde(default)]
    pub titles: Vec<TitleConfig>,
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
    /// Title indices identifying that two documents belong to the same row
    #[serde(default)]
    pub key_columns: Vec<usize>,
    /// Title indices giving the order of the exported rows
    #[serde(default)]
    pub sort_columns: Vec<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TitleConfig {
    pub title: String,
    pub regexp: String,
    #[serde(default)]
    pub default: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RuleConfig {
    pub regexp: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub value: i64,
    #[serde(default, rename = "for")]
    pub for_selector: String,
}

/// How a rule transforms the value of a matched key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// String copied unchanged
    PlainText,
    /// Boolean mapped to the rule value when true, zero otherwise
    ValuableBoolean,
    /// Number copied unchanged
    ValuableComplete,
    /// Number multiplied by the rule value
    ValuablePartial,
}

impl RuleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::PlainText => "plaintext",
            RuleKind::ValuableBoolean => "valuable_boolean",
            RuleKind::ValuableComplete => "valuable_complete",
            RuleKind::ValuablePartial => "valuable_partial",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleKind {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "plaintext" => Ok(RuleKind::PlainText),
            "valuable_boolean" => Ok(RuleKind::ValuableBoolean),
            "valuable_complete" => Ok(RuleKind::ValuableComplete),
            "valuable_partial" => Ok(RuleKind::ValuablePartial),
            other => Err(ExportError::InvalidRuleType(other.to_string())),
        }
    }
}

/// Which group rows a rule's values are written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForSelector {
    /// Every row of the group
    All,
    /// The row whose 1-based id is captured by this named group
    Group(String),
}

impl fmt::Display for ForSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForSelector::All => f.write_str(FOR_ALL),
            ForSelector::Group(name) => f.write_str(name),
        }
    }
}

/// One output column.
#[derive(Debug, Clone)]
pub struct Title {
    pub label: String,
    pub pattern: Regex,
    pub default_value: String,
    pub column_index: usize,
}

/// One key-matching transformation.
#[derive(Debug, Clone)]
pub struct Rule {
    pub pattern: Regex,
    pub kind: RuleKind,
    pub value: i64,
    pub for_selector: ForSelector,
}

/// Compiled export configuration. Immutable once built.
#[derive(Debug, Clone)]
pub struct ExportSpec {
    pub group_size: usize,
    pub titles: Vec<Title>,
    pub rules: Vec<Rule>,
    pub key_columns: Vec<usize>,
    pub sort_columns: Vec<usize>,
}

impl ExportConfig {
    /// Parse an export configuration from JSON text.
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Compile every pattern and validate the configuration.
    ///
    /// Rules are compiled before titles, each in declaration order, and the
    /// first failure is returned.
    ///
    /// Stricter than per-key evaluation: an unknown rule type or a zero
    /// `groupSize` fails here even if no result key would reach it.
    pub fn compile(&self) -> Result<ExportSpec> {
        let rules = self
            .rules
            .iter()
            .map(compile_rule)
            .collect::<Result<Vec<_>>>()?;

        let titles = self
            .titles
            .iter()
            .enumerate()
            .map(|(column_index, title)| {
                Ok(Title {
                    label: title.title.clone(),
                    pattern: compile_pattern("title", &title.regexp)?,
                    default_value: title.default.clone(),
                    column_index,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        if self.group_size == 0 {
            return Err(ExportError::InvalidGroupSize(self.group_size));
        }

        validate_columns("key", &self.key_columns, titles.len())?;
        validate_columns("sort", &self.sort_columns, titles.len())?;

        Ok(ExportSpec {
            group_size: self.group_size,
            titles,
            rules,
            key_columns: self.key_columns.clone(),
            sort_columns: self.sort_columns.clone(),
        })
    }
}

impl ExportSpec {
    /// First rule, in declaration order, whose pattern matches the key.
    pub fn rule_for(&self, key: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.pattern.is_match(key))
    }

    /// First title, in declaration order, whose pattern matches the key.
    pub fn title_for(&self, key: &str) -> Option<&Title> {
        self.titles.iter().find(|title| title.pattern.is_match(key))
    }

    /// A row holding every title's default value.
    pub fn default_row(&self) -> Vec<String> {
        self.titles
            .iter()
            .map(|title| title.default_value.clone())
            .collect()
    }

    /// Title labels in column order.
    pub fn header(&self) -> Vec<&str> {
        self.titles.iter().map(|title| title.label.as_str()).collect()
    }
}

fn compile_pattern(owner: &'static str, pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| ExportError::InvalidPattern {
        owner,
        pattern: pattern.to_string(),
        source,
    })
}

fn compile_rule(rule: &RuleConfig) -> Result<Rule> {
    let pattern = compile_pattern("rule", &rule.regexp)?;
    let kind = rule.kind.parse::<RuleKind>()?;

    let for_selector = match rule.for_selector.as_str() {
        FOR_ALL => ForSelector::All,
        "" => {
            return Err(ExportError::InvalidForSelector {
                selector: String::new(),
                subject: format!("rule '{}'", rule.regexp),
                reason: "rule has no selector, use \"all\" or a named capture group".to_string(),
            })
        }
        name => {
            if !pattern.capture_names().flatten().any(|n| n == name) {
                return Err(ExportError::InvalidForSelector {
                    selector: name.to_string(),
                    subject: format!("rule '{}'", rule.regexp),
                    reason: "pattern has no capture group with this name".to_string(),
                });
            }
            ForSelector::Group(name.to_string())
        }
    };

    Ok(Rule {
        pattern,
        kind,
        value: rule.value,
        for_selector,
    })
}

fn validate_columns(role: &'static str, columns: &[usize], title_count: usize) -> Result<()> {
    match columns.iter().find(|&&index| index >= title_count) {
        Some(&index) => Err(ExportError::InvalidColumn {
            role,
            index,
            title_count,
        }),
        None => Ok(()),
    }
}
