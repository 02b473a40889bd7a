//! Rule evaluation: classify result keys, spread values across group rows,
//! and merge rows that describe the same subject.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;
use tracing::{debug, warn};

use super::error::{json_type_name, ExportError, Result};
use super::sort::sort_rows;
use super::spec::{ExportSpec, ForSelector, Rule, RuleKind};

/// A flat result document as stored by the record command.
pub type ResultDocument = serde_json::Map<String, Value>;

/// One exported record, one cell per title.
pub type DetailRow = Vec<String>;

/// Classified result values, keyed by the result key they came from.
pub type Detail = BTreeMap<String, DetailValue>;

/// A result value after its rule has been applied.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailValue {
    Text(String),
    Number(f64),
}

impl fmt::Display for DetailValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetailValue::Text(s) => f.write_str(s),
            DetailValue::Number(n) => f.write_str(&format_number(*n)),
        }
    }
}

/// Shortest decimal form of `n`, switching to exponent notation (`1e-05`,
/// `1.5e+21`) when the decimal exponent is below -4 or at least 21.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }

    let sci = format!("{:e}", n);
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);

    if (-4..21).contains(&exp) {
        n.to_string()
    } else {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exp.abs())
    }
}

impl ExportSpec {
    /// Apply the first matching rule to every key of a result document.
    ///
    /// Keys without a matching rule are skipped with a warning.
    pub fn classify(&self, document: &ResultDocument) -> Result<Detail> {
        let mut detail = Detail::new();

        for (key, value) in document {
            let Some(rule) = self.rule_for(key) else {
                warn!("No match rule, skipping key: {}", key);
                continue;
            };

            detail.insert(key.clone(), apply_rule(rule, key, value)?);
        }

        debug!("Evaluate detail done: {:?}", detail);
        Ok(detail)
    }

    /// Spread classified values over `group_size` rows pre-filled with
    /// title defaults.
    pub fn build_rows(&self, detail: &Detail) -> Result<Vec<DetailRow>> {
        let mut rows = vec![self.default_row(); self.group_size];

        for (key, value) in detail {
            let Some(rule) = self.rule_for(key) else {
                warn!("No match rule, skipping key: {}", key);
                continue;
            };
            let Some(title) = self.title_for(key) else {
                warn!("No match title, skipping key: {}", key);
                continue;
            };

            let cell = value.to_string();
            for idx in self.target_rows(key, rule)? {
                rows[idx][title.column_index] = cell.clone();
            }
        }

        Ok(rows)
    }

    /// Row indices a rule writes a key's value to.
    fn target_rows(&self, key: &str, rule: &Rule) -> Result<Vec<usize>> {
        let name = match &rule.for_selector {
            ForSelector::All => return Ok((0..self.group_size).collect()),
            ForSelector::Group(name) => name,
        };

        let invalid = |reason: String| ExportError::InvalidForSelector {
            selector: name.clone(),
            subject: format!("key '{}'", key),
            reason,
        };

        let captured = rule
            .pattern
            .captures(key)
            .and_then(|caps| caps.name(name))
            .ok_or_else(|| invalid("capture group did not match".to_string()))?
            .as_str();

        let group_id: i64 = captured
            .parse()
            .map_err(|_| invalid(format!("captured '{}' is not an integer", captured)))?;

        if group_id < 1 || group_id > self.group_size as i64 {
            return Err(invalid(format!(
                "group id {} is outside [1, {}]",
                group_id, self.group_size
            )));
        }

        Ok(vec![(group_id - 1) as usize])
    }
}

fn apply_rule(rule: &Rule, key: &str, value: &Value) -> Result<DetailValue> {
    let mismatch = |expected: &'static str| ExportError::TypeMismatch {
        kind: rule.kind.to_string(),
        expected,
        found: json_type_name(value),
        key: key.to_string(),
    };

    match rule.kind {
        RuleKind::PlainText => match value {
            Value::String(s) => Ok(DetailValue::Text(s.clone())),
            _ => Err(mismatch("string")),
        },
        RuleKind::ValuableBoolean => match value {
            Value::Bool(true) => Ok(DetailValue::Number(rule.value as f64)),
            Value::Bool(false) => Ok(DetailValue::Number(0.0)),
            _ => Err(mismatch("bool")),
        },
        RuleKind::ValuableComplete => match value.as_f64() {
            Some(n) => Ok(DetailValue::Number(n)),
            None => Err(mismatch("number")),
        },
        RuleKind::ValuablePartial => match value.as_f64() {
            Some(n) => Ok(DetailValue::Number(n * rule.value as f64)),
            None => Err(mismatch("number")),
        },
    }
}

/// Cells of the key columns, paired with their column index.
pub fn row_key<'r>(row: &'r [String], key_columns: &[usize]) -> Vec<(usize, &'r str)> {
    key_columns
        .iter()
        .map(|&column| (column, row[column].as_str()))
        .collect()
}

/// Merge `new_row` into the first existing row with the same key, or append
/// it. Empty cells of the new row never overwrite existing data.
///
/// Returns `true` when the row was merged.
pub fn merge_or_append(rows: &mut Vec<DetailRow>, new_row: DetailRow, key_columns: &[usize]) -> bool {
    let existing = rows
        .iter_mut()
        .find(|row| row_key(row, key_columns) == row_key(&new_row, key_columns));

    match existing {
        Some(row) => {
            debug!("Merging into existing row with key: {:?}", row_key(&new_row, key_columns));
            for (cell, new_cell) in row.iter_mut().zip(new_row) {
                if !new_cell.is_empty() {
                    *cell = new_cell;
                }
            }
            true
        }
        None => {
            debug!("Appending new row with key: {:?}", row_key(&new_row, key_columns));
            rows.push(new_row);
            false
        }
    }
}

/// Counters gathered while evaluating result documents.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExportStats {
    pub documents: usize,
    pub rows_appended: usize,
    pub rows_merged: usize,
    pub skipped_keys: usize,
}

/// Accumulates detail rows across result documents, in the order the
/// documents are evaluated.
#[derive(Debug)]
pub struct DetailTable<'s> {
    spec: &'s ExportSpec,
    rows: Vec<DetailRow>,
    stats: ExportStats,
}

impl<'s> DetailTable<'s> {
    pub fn new(spec: &'s ExportSpec) -> Self {
        Self {
            spec,
            rows: Vec::new(),
            stats: ExportStats::default(),
        }
    }

    /// Classify one document and merge its rows into the table.
    pub fn evaluate(&mut self, document: &ResultDocument) -> Result<()> {
        let detail = self.spec.classify(document)?;

        self.stats.skipped_keys += document
            .keys()
            .filter(|key| self.spec.rule_for(key).is_none() || self.spec.title_for(key).is_none())
            .count();

        for row in self.spec.build_rows(&detail)? {
            if merge_or_append(&mut self.rows, row, &self.spec.key_columns) {
                self.stats.rows_merged += 1;
            } else {
                self.stats.rows_appended += 1;
            }
        }

        self.stats.documents += 1;
        Ok(())
    }

    pub fn rows(&self) -> &[DetailRow] {
        &self.rows
    }

    pub fn stats(&self) -> &ExportStats {
        &self.stats
    }

    /// Sort the accumulated rows by the configured sort columns.
    pub fn into_sorted_rows(mut self) -> (Vec<DetailRow>, ExportStats) {
        sort_rows(&mut self.rows, &self.spec.sort_columns);
        (self.rows, self.stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::spec::ExportConfig;
    use serde_json::json;

    fn spec(json: Value) -> ExportSpec {
        let cfg: ExportConfig = serde_json::from_value(json).unwrap();
        cfg.compile().unwrap()
    }

    fn document(json: Value) -> ResultDocument {
        match json {
            Value::Object(map) => map,
            _ => panic!("test document must be an object"),
        }
    }

    fn single_rule(kind: &str, value: i64) -> ExportSpec {
        spec(json!({
            "groupSize": 1,
            "titles": [{"title": "Score", "regexp": "score"}],
            "rules": [{"regexp": "score", "type": kind, "value": value, "for": "all"}]
        }))
    }

    #[test]
    fn test_valuable_boolean_maps_true_to_rule_value() {
        let spec = single_rule("valuable_boolean", 5);
        let yes = spec.classify(&document(json!({"score": true}))).unwrap();
        let no = spec.classify(&document(json!({"score": false}))).unwrap();
        assert_eq!(yes["score"], DetailValue::Number(5.0));
        assert_eq!(no["score"], DetailValue::Number(0.0));
        assert_eq!(yes["score"].to_string(), "5");
        assert_eq!(no["score"].to_string(), "0");
    }

    #[test]
    fn test_valuable_partial_multiplies() {
        let spec = single_rule("valuable_partial", 3);
        let detail = spec.classify(&document(json!({"score": 4.0}))).unwrap();
        assert_eq!(detail["score"], DetailValue::Number(12.0));
        assert_eq!(detail["score"].to_string(), "12");
    }

    #[test]
    fn test_valuable_complete_copies_number() {
        let spec = single_rule("valuable_complete", 3);
        let detail = spec.classify(&document(json!({"score": 2.5}))).unwrap();
        assert_eq!(detail["score"], DetailValue::Number(2.5));
    }

    #[test]
    fn test_plaintext_copies_string() {
        let spec = single_rule("plaintext", 0);
        let detail = spec.classify(&document(json!({"score": "A+"}))).unwrap();
        assert_eq!(detail["score"], DetailValue::Text("A+".to_string()));
    }

    #[test]
    fn test_type_mismatch_per_kind() {
        let cases = [
            ("plaintext", json!(1)),
            ("valuable_boolean", json!("yes")),
            ("valuable_complete", json!(true)),
            ("valuable_partial", json!("3")),
        ];
        for (kind, value) in cases {
            let spec = single_rule(kind, 1);
            let err = spec
                .classify(&document(json!({ "score": value })))
                .unwrap_err();
            assert!(
                matches!(err, ExportError::TypeMismatch { .. }),
                "{} should reject {:?}",
                kind,
                err
            );
        }
    }

    #[test]
    fn test_classify_skips_unmatched_keys() {
        let spec = single_rule("plaintext", 0);
        let detail = spec
            .classify(&document(json!({"score": "B", "comment": 42})))
            .unwrap();
        assert_eq!(detail.len(), 1);
        assert!(!detail.contains_key("comment"));
    }

    fn group_spec() -> ExportSpec {
        spec(json!({
            "groupSize": 3,
            "titles": [
                {"title": "Student", "regexp": "^demo\\.student(?P<g>\\d+)$", "default": ""},
                {"title": "Score", "regexp": "^demo\\.score$", "default": "0"}
            ],
            "rules": [
                {"regexp": "^demo\\.student(?P<g>\\d+)$", "type": "plaintext", "for": "g"},
                {"regexp": "^demo\\.score$", "type": "valuable_complete", "for": "all"},
                {"regexp": "^demo\\.orphan$", "type": "plaintext", "for": "all"}
            ],
            "keyColumns": [0],
            "sortColumns": [0]
        }))
    }

    #[test]
    fn test_for_all_fills_every_row() {
        let spec = group_spec();
        let detail = spec.classify(&document(json!({"demo.score": 7}))).unwrap();
        let rows = spec.build_rows(&detail).unwrap();
        assert_eq!(rows.len(), 3);
        for row in &rows {
            assert_eq!(row, &vec!["".to_string(), "7".to_string()]);
        }
    }

    #[test]
    fn test_named_group_targets_one_row() {
        let spec = group_spec();
        let detail = spec
            .classify(&document(json!({"demo.student2": "alice"})))
            .unwrap();
        let rows = spec.build_rows(&detail).unwrap();
        assert_eq!(rows[0][0], "");
        assert_eq!(rows[1][0], "alice");
        assert_eq!(rows[2][0], "");
        assert!(rows.iter().all(|row| row[1] == "0"));
    }

    #[test]
    fn test_group_id_out_of_range() {
        let spec = group_spec();
        for key in ["demo.student0", "demo.student4"] {
            let detail = spec.classify(&document(json!({ key: "bob" }))).unwrap();
            let err = spec.build_rows(&detail).unwrap_err();
            assert!(matches!(err, ExportError::InvalidForSelector { .. }));
        }
    }

    #[test]
    fn test_group_id_not_an_integer() {
        let spec = spec(json!({
            "groupSize": 2,
            "titles": [{"title": "Name", "regexp": "name"}],
            "rules": [{"regexp": "^name\\.(?P<who>\\w+)$", "type": "plaintext", "for": "who"}]
        }));
        let detail = spec.classify(&document(json!({"name.first": "x"}))).unwrap();
        let err = spec.build_rows(&detail).unwrap_err();
        assert!(err.to_string().contains("is not an integer"));
    }

    #[test]
    fn test_group_capture_not_participating() {
        let spec = spec(json!({
            "groupSize": 2,
            "titles": [{"title": "A", "regexp": "^a"}],
            "rules": [{"regexp": "^a(?P<g>\\d+)?$", "type": "plaintext", "for": "g"}]
        }));
        let detail = spec.classify(&document(json!({"a": "x"}))).unwrap();
        let err = spec.build_rows(&detail).unwrap_err();
        assert!(matches!(err, ExportError::InvalidForSelector { .. }));
        assert!(err.to_string().contains("capture group did not match"));
    }

    #[test]
    fn test_number_cells_use_exponent_outside_range() {
        assert_eq!(DetailValue::Number(0.00001).to_string(), "1e-05");
        assert_eq!(DetailValue::Number(1e21).to_string(), "1e+21");
        assert_eq!(format_number(1.5e-7), "1.5e-07");
        assert_eq!(format_number(-2.5e22), "-2.5e+22");
        assert_eq!(format_number(0.0001), "0.0001");
        assert_eq!(format_number(1e20), "100000000000000000000");
        assert_eq!(format_number(12.0), "12");
        assert_eq!(format_number(0.0), "0");
    }

    #[test]
    fn test_build_rows_skips_keys_without_title() {
        let spec = group_spec();
        let detail = spec
            .classify(&document(json!({"demo.orphan": "lost"})))
            .unwrap();
        let rows = spec.build_rows(&detail).unwrap();
        assert!(rows.iter().all(|row| row == &spec.default_row()));
    }

    #[test]
    fn test_merge_overwrites_only_non_empty_cells() {
        let mut rows = vec![vec!["alice".to_string(), "10".to_string(), "note".to_string()]];
        let merged = merge_or_append(
            &mut rows,
            vec!["alice".to_string(), "".to_string(), "late".to_string()],
            &[0],
        );
        assert!(merged);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0], vec!["alice", "10", "late"]);
    }

    #[test]
    fn test_merge_appends_new_key() {
        let mut rows = vec![vec!["alice".to_string(), "10".to_string()]];
        let merged = merge_or_append(&mut rows, vec!["bob".to_string(), "3".to_string()], &[0]);
        assert!(!merged);
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_empty_key_columns_merge_everything() {
        let mut rows = Vec::new();
        merge_or_append(&mut rows, vec!["a".to_string(), "".to_string()], &[]);
        merge_or_append(&mut rows, vec!["".to_string(), "b".to_string()], &[]);
        assert_eq!(rows, vec![vec!["a".to_string(), "b".to_string()]]);
    }

    #[test]
    fn test_detail_table_merges_documents_in_order() {
        let spec = spec(json!({
            "groupSize": 1,
            "titles": [
                {"title": "Student", "regexp": "student"},
                {"title": "Lab1", "regexp": "lab1"},
                {"title": "Lab2", "regexp": "lab2"}
            ],
            "rules": [
                {"regexp": "student", "type": "plaintext", "for": "all"},
                {"regexp": "lab", "type": "valuable_complete", "for": "all"}
            ],
            "keyColumns": [0],
            "sortColumns": [0]
        }));

        let mut table = DetailTable::new(&spec);
        table
            .evaluate(&document(json!({"student": "alice", "lab1": 80, "extra": "x"})))
            .unwrap();
        table
            .evaluate(&document(json!({"student": "alice", "lab2": 90})))
            .unwrap();

        assert_eq!(table.rows(), &[vec!["alice", "80", "90"]]);
        let stats = table.stats();
        assert_eq!(stats.documents, 2);
        assert_eq!(stats.rows_appended, 1);
        assert_eq!(stats.rows_merged, 1);
        assert_eq!(stats.skipped_keys, 1);
    }
}
