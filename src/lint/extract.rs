//! Log message extraction from a log call's first argument.
//!
//! Two argument shapes produce a checkable message:
//! - a single string literal, interpreted (`"..."`) or raw (`` `...` ``)
//! - a `+` chain (optionally parenthesized) whose string-literal operands
//!   are collected left to right; every other operand is dropped
//!
//! Anything else yields no message and is never reported.

use crate::analysis::{ParsedFile, Position};

use super::LogCallSite;

/// The message text a log call emits, as visible in source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageExpression {
    /// A single string literal, unquoted.
    Literal(String),
    /// Literal fragments of a `+` chain, in source order, and their
    /// separator-free concatenation.
    Concatenation {
        fragments: Vec<String>,
        joined: String,
    },
}

impl MessageExpression {
    /// Build a concatenation from its fragments.
    pub fn concatenation(fragments: Vec<String>) -> Self {
        let joined = fragments.concat();
        MessageExpression::Concatenation { fragments, joined }
    }

    /// The text the style rules run against.
    pub fn text(&self) -> &str {
        match self {
            MessageExpression::Literal(text) => text,
            MessageExpression::Concatenation { joined, .. } => joined,
        }
    }
}

/// A message together with the position its diagnostics are reported at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedMessage {
    pub expr: MessageExpression,
    /// The literal's own start for a single literal, the call's start for
    /// a concatenation.
    pub position: Position,
}

/// Extract the message of a log call.
///
/// Only the first argument is inspected. Returns None for calls without
/// arguments, unsupported argument shapes, and malformed literals.
pub fn extract(site: &LogCallSite, file: &ParsedFile) -> Option<ExtractedMessage> {
    let arg = first_argument(site.node)?;

    match arg.kind() {
        "interpreted_string_literal" | "raw_string_literal" => {
            let text = unquote(file.node_text(arg))?;
            Some(ExtractedMessage {
                expr: MessageExpression::Literal(text),
                position: Position::from_node(arg),
            })
        }
        "binary_expression" | "parenthesized_expression" => {
            if !is_concatenation(unwrap_parens(arg)?) {
                return None;
            }
            let mut fragments = Vec::new();
            collect_fragments(arg, file, &mut fragments);
            Some(ExtractedMessage {
                expr: MessageExpression::concatenation(fragments),
                position: site.position,
            })
        }
        _ => None,
    }
}

/// First positional argument of a call, skipping comments.
fn first_argument(call: tree_sitter::Node) -> Option<tree_sitter::Node> {
    let args = call.child_by_field_name("arguments")?;
    let mut cursor = args.walk();
    let first = args
        .named_children(&mut cursor)
        .find(|n| n.kind() != "comment");
    first
}

/// Strip any number of enclosing parentheses.
fn unwrap_parens(mut node: tree_sitter::Node) -> Option<tree_sitter::Node> {
    while node.kind() == "parenthesized_expression" {
        let mut cursor = node.walk();
        let inner = node
            .named_children(&mut cursor)
            .find(|n| n.kind() != "comment")?;
        node = inner;
    }
    Some(node)
}

fn is_concatenation(node: tree_sitter::Node) -> bool {
    node.kind() == "binary_expression"
        && node
            .child_by_field_name("operator")
            .is_some_and(|op| op.kind() == "+")
}

/// Walk a `+` chain left to right, keeping only string-literal leaves.
fn collect_fragments(node: tree_sitter::Node, file: &ParsedFile, out: &mut Vec<String>) {
    match node.kind() {
        "binary_expression" if is_concatenation(node) => {
            if let Some(left) = node.child_by_field_name("left") {
                collect_fragments(left, file, out);
            }
            if let Some(right) = node.child_by_field_name("right") {
                collect_fragments(right, file, out);
            }
        }
        "parenthesized_expression" => {
            if let Some(inner) = unwrap_parens(node) {
                collect_fragments(inner, file, out);
            }
        }
        "interpreted_string_literal" | "raw_string_literal" => {
            if let Some(text) = unquote(file.node_text(node)) {
                out.push(text);
            }
        }
        _ => {}
    }
}

/// Unquote a Go string literal.
///
/// Handles raw literals (carriage returns are discarded) and interpreted
/// literals with the full escape grammar. Returns None when the literal is
/// malformed.
pub fn unquote(literal: &str) -> Option<String> {
    let bytes = literal.as_bytes();
    if bytes.len() < 2 {
        return None;
    }
    let quote = bytes[0];
    if bytes[bytes.len() - 1] != quote {
        return None;
    }
    let body = &literal[1..literal.len() - 1];

    match quote {
        b'`' => {
            if body.contains('`') {
                return None;
            }
            Some(body.replace('\r', ""))
        }
        b'"' => unquote_interpreted(body),
        _ => None,
    }
}

fn unquote_interpreted(body: &str) -> Option<String> {
    if !body.contains(['\\', '"', '\n']) {
        return Some(body.to_string());
    }

    let mut out: Vec<u8> = Vec::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(c) = chars.next() {
        match c {
            '"' | '\n' => return None,
            '\\' => decode_escape(&mut chars, &mut out)?,
            _ => push_char(&mut out, c),
        }
    }

    // \x and octal escapes may produce bytes that are not valid UTF-8
    Some(String::from_utf8_lossy(&out).into_owned())
}

fn decode_escape(chars: &mut std::str::Chars, out: &mut Vec<u8>) -> Option<()> {
    let c = chars.next()?;
    match c {
        'a' => out.push(0x07),
        'b' => out.push(0x08),
        'f' => out.push(0x0c),
        'n' => out.push(b'\n'),
        'r' => out.push(b'\r'),
        't' => out.push(b'\t'),
        'v' => out.push(0x0b),
        '\\' => out.push(b'\\'),
        '"' => out.push(b'"'),
        'x' => out.push(read_digits(chars, 2, 16)? as u8),
        'u' => push_char(out, char::from_u32(read_digits(chars, 4, 16)?)?),
        'U' => push_char(out, char::from_u32(read_digits(chars, 8, 16)?)?),
        '0'..='7' => {
            let first = c.to_digit(8)?;
            let rest = read_digits(chars, 2, 8)?;
            let value = first * 64 + rest;
            if value > 0xff {
                return None;
            }
            out.push(value as u8);
        }
        _ => return None,
    }
    Some(())
}

fn read_digits(chars: &mut std::str::Chars, count: usize, radix: u32) -> Option<u32> {
    let mut value = 0u32;
    for _ in 0..count {
        value = value * radix + chars.next()?.to_digit(radix)?;
    }
    Some(value)
}

fn push_char(out: &mut Vec<u8>, c: char) {
    let mut buf = [0u8; 4];
    out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
}
