//! Core types for lint results.

use serde::{Deserialize, Serialize};

use crate::analysis::Position;

/// The four log message rules, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RuleKind {
    #[serde(rename = "capital_letter")]
    CapitalLetter,
    #[serde(rename = "special_symbols")]
    SpecialSymbols,
    #[serde(rename = "only_english")]
    OnlyEnglish,
    #[serde(rename = "sensitive_data")]
    SensitiveData,
}

impl RuleKind {
    /// Every rule, in evaluation order.
    pub const ALL: [RuleKind; 4] = [
        RuleKind::CapitalLetter,
        RuleKind::SpecialSymbols,
        RuleKind::OnlyEnglish,
        RuleKind::SensitiveData,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::CapitalLetter => "capital_letter",
            RuleKind::SpecialSymbols => "special_symbols",
            RuleKind::OnlyEnglish => "only_english",
            RuleKind::SensitiveData => "sensitive_data",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "capital_letter" => Some(RuleKind::CapitalLetter),
            "special_symbols" => Some(RuleKind::SpecialSymbols),
            "only_english" => Some(RuleKind::OnlyEnglish),
            "sensitive_data" => Some(RuleKind::SensitiveData),
            _ => None,
        }
    }

    /// The message reported to the user when this rule fires.
    pub fn message(&self) -> &'static str {
        match self {
            RuleKind::CapitalLetter => "log message should not start with a capital letter",
            RuleKind::SpecialSymbols => "log message should not contain special symbols or emojis",
            RuleKind::OnlyEnglish => "log message should contain only english symbols",
            RuleKind::SensitiveData => "log message should not contain sensitive data",
        }
    }
}

impl std::fmt::Display for RuleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single rule violation at a log call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub rule: RuleKind,
    pub file: String,
    pub position: Position,
}

impl Diagnostic {
    pub fn new(rule: RuleKind, file: impl Into<String>, position: Position) -> Self {
        Self {
            rule,
            file: file.into(),
            position,
        }
    }

    /// Human-readable message for this diagnostic.
    pub fn message(&self) -> &'static str {
        self.rule.message()
    }

    pub fn line(&self) -> usize {
        self.position.line
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}: {}", self.file, self.position, self.message())
    }
}

/// A call expression whose method name marks it as a log call.
#[derive(Debug, Clone)]
pub struct LogCallSite<'tree> {
    /// The `call_expression` node.
    pub node: tree_sitter::Node<'tree>,
    /// The invoked method name (e.g., "Printf").
    pub method: String,
    /// Start of the call expression.
    pub position: Position,
}

/// Results of linting a set of files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LintResult {
    pub diagnostics: Vec<Diagnostic>,
    /// Diagnostics that were suppressed by inline comments
    #[serde(default)]
    pub suppressed: Vec<super::SuppressedDiagnostic>,
    /// Number of files scanned
    pub scanned: usize,
}

impl LintResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge another result into this one.
    pub fn merge(&mut self, other: LintResult) {
        self.diagnostics.extend(other.diagnostics);
        self.suppressed.extend(other.suppressed);
        self.scanned += other.scanned;
    }

    /// Whether any unsuppressed diagnostic was produced.
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Number of diagnostics for a given rule.
    pub fn count_for(&self, rule: RuleKind) -> usize {
        self.diagnostics.iter().filter(|d| d.rule == rule).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_names_round_trip() {
        for kind in RuleKind::ALL {
            assert_eq!(RuleKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(RuleKind::parse("unknown"), None);
    }

    #[test]
    fn test_diagnostic_display() {
        let d = Diagnostic::new(RuleKind::CapitalLetter, "main.go", Position::new(7, 12));
        assert_eq!(
            d.to_string(),
            "main.go:7:12: log message should not start with a capital letter"
        );
    }

    #[test]
    fn test_rule_serializes_as_config_key() {
        let json = serde_json::to_string(&RuleKind::OnlyEnglish).unwrap();
        assert_eq!(json, "\"only_english\"");
    }

    #[test]
    fn test_merge_and_count() {
        let mut a = LintResult::new();
        a.scanned = 1;
        a.diagnostics
            .push(Diagnostic::new(RuleKind::SensitiveData, "a.go", Position::new(1, 1)));

        let mut b = LintResult::new();
        b.scanned = 2;
        b.diagnostics
            .push(Diagnostic::new(RuleKind::SensitiveData, "b.go", Position::new(2, 1)));

        a.merge(b);
        assert_eq!(a.scanned, 3);
        assert_eq!(a.count_for(RuleKind::SensitiveData), 2);
        assert_eq!(a.count_for(RuleKind::CapitalLetter), 0);
        assert!(a.has_diagnostics());
    }
}
