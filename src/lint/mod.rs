//! Log message linting.
//!
//! Pipeline per log call: classify the call by method name, extract the
//! message from its first argument, evaluate the rules, report.

pub mod classify;
pub mod extract;
pub mod rules;
mod runner;
pub mod suppress;
mod types;

pub use classify::{is_log_call, is_log_method, log_call_site};
pub use extract::{extract, ExtractedMessage, MessageExpression};
pub use rules::{evaluate, SensitivePolicy, CONCAT_POLICY, LITERAL_POLICY};
pub use runner::{check_file, report, CallFinder, Runner};
pub use suppress::{
    collect_suppressions, filter_suppressed, parse_suppressions, SuppressedDiagnostic,
    Suppression, SuppressionType,
};
pub use types::{Diagnostic, LintResult, LogCallSite, RuleKind};
