//! Log call classification by method name.
//!
//! A call is a log call when its callee is a selector (`recv.Method(...)`)
//! and the selected name is one of the well-known logging methods. The
//! receiver is never resolved, so any value exposing one of these names
//! matches.

use phf::phf_set;

use crate::analysis::{ParsedFile, Position};

use super::LogCallSite;

/// Method names treated as logging calls.
static LOG_METHODS: phf::Set<&'static str> = phf_set! {
    "Print", "Println", "Printf",
    "Fatal", "Fatalf", "Fatalln",
    "Panic", "Panicf", "Panicln",
    "Error", "Errorf", "Errorln",
    "Warn", "Warnf", "Warnln",
    "Warning",
    "Info", "Infof", "Infoln",
    "Debug", "Debugf", "Debugln",
    "Log", "Logf",
};

/// Whether `name` is one of the logging method names.
pub fn is_log_method(name: &str) -> bool {
    LOG_METHODS.contains(name)
}

/// Name of the selected method when `call` is `recv.Method(...)`.
fn selected_method<'a>(call: tree_sitter::Node, file: &'a ParsedFile) -> Option<&'a str> {
    if call.kind() != "call_expression" {
        return None;
    }
    let function = call.child_by_field_name("function")?;
    if function.kind() != "selector_expression" {
        return None;
    }
    let field = function.child_by_field_name("field")?;
    Some(file.node_text(field))
}

/// Whether a `call_expression` node is a log call.
pub fn is_log_call(call: tree_sitter::Node, file: &ParsedFile) -> bool {
    selected_method(call, file).is_some_and(is_log_method)
}

/// Build a call site for `call` if it is a log call.
pub fn log_call_site<'tree>(
    call: tree_sitter::Node<'tree>,
    file: &ParsedFile,
) -> Option<LogCallSite<'tree>> {
    let method = selected_method(call, file).filter(|name| is_log_method(name))?;
    Some(LogCallSite {
        node: call,
        method: method.to_string(),
        position: Position::from_node(call),
    })
}
