//! Linterlog - a linter for log messages in Go source code.
//!
//! Every call whose selected method is a well-known logging name
//! (`Print`, `Infof`, `Errorln`, ...) has its first argument inspected.
//! String literals and `+` chains of literals are checked against four
//! rules:
//!
//! - `capital_letter`: messages start with a lower-case letter
//! - `special_symbols`: no `!`, `:`, `;`, ellipsis or emoji
//! - `only_english`: ASCII letters, digits and whitespace only
//! - `sensitive_data`: no passwords, secrets, API keys or tokens
//!
//! # Architecture
//!
//! - `analysis`: tree-sitter parsing of Go sources
//! - `lint`: classification, extraction, rule evaluation, suppression
//! - `analyzer`: the named analyzer, its pass and diagnostic sink
//! - `config`: YAML rule toggles
//! - `report`: output formatting (pretty, JSON, SARIF)

pub mod analysis;
pub mod analyzer;
pub mod cli;
pub mod config;
pub mod lint;
pub mod logging;
pub mod plugin;
pub mod report;

pub use analysis::{AnalysisContext, GoParser, ParsedFile, Position, SourceParser};
pub use analyzer::{Analyzer, DiagnosticSink, Pass, ANALYZER};
pub use config::{ConfigError, FileConfig, RuleConfig};
pub use lint::{Diagnostic, LintResult, MessageExpression, RuleKind, Runner};
pub use plugin::AnalyzerPlugin;
