//! Inline suppression of diagnostics via comments.
//!
//! Supports suppression comments like:
//! - `// linterlog:ignore <rule> - <reason>`
//! - `// linterlog:ignore-next-line <rule> - <reason>`
//! - `// linterlog:ignore-file <rule> - <reason>`
//!
//! `<rule>` is a rule name such as `sensitive_data`, or `*` for all rules.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::analysis::ParsedFile;

use super::{Diagnostic, RuleKind};

/// How a suppression applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuppressionType {
    /// Applies to the same line
    Line,
    /// Applies to the next line
    NextLine,
    /// Applies to the entire file
    File,
}

/// An inline suppression directive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suppression {
    /// Rule to suppress (e.g., "capital_letter") or "*" for all
    pub rule: String,
    /// Human-readable reason
    pub reason: String,
    /// File containing the suppression
    pub file: String,
    /// Line number (0 for file-level)
    pub line: usize,
    /// How the suppression applies
    pub suppression_type: SuppressionType,
}

/// A diagnostic that was suppressed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuppressedDiagnostic {
    pub diagnostic: Diagnostic,
    pub suppression: Suppression,
}

/// File-level directives are only honored this close to the top.
const FILE_DIRECTIVE_MAX_LINE: usize = 10;

lazy_static::lazy_static! {
    /// Patterns for matching suppression comments, anchored at the comment start.
    static ref SUPPRESSION_PATTERNS: Vec<Regex> = vec![
        // Line comment: // linterlog:...
        Regex::new(r"^//\s*linterlog:(ignore(?:-file|-next-line)?)\s+(\S+)\s*(?:-\s*(.*))?").unwrap(),
        // Block comment: /* linterlog:... */
        Regex::new(r"^/\*\s*linterlog:(ignore(?:-file|-next-line)?)\s+(\S+)\s*(?:-\s*(.*?))?\s*\*/").unwrap(),
    ];
}

/// Parse suppression directives from the comments of a Go file.
///
/// Only tree-sitter `comment` nodes are inspected, so directive-like text
/// inside string literals is ignored.
pub fn parse_suppressions(file: &ParsedFile) -> Vec<Suppression> {
    let root = file.tree.root_node();
    let header_end = header_end(root);
    let mut suppressions = Vec::new();

    for comment in comment_nodes(root) {
        let text = file.node_text(comment);
        let Some(caps) = SUPPRESSION_PATTERNS.iter().find_map(|p| p.captures(text)) else {
            continue;
        };
        let line_number = comment.start_position().row + 1;
        let directive = caps.get(1).map(|m| m.as_str()).unwrap_or("");
        let rule = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        let reason = caps
            .get(3)
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default();

        if rule != "*" && RuleKind::parse(rule).is_none() {
            tracing::warn!(
                file = %file.path,
                line = line_number,
                rule,
                "suppression names an unknown rule"
            );
            continue;
        }

        let suppression_type = match directive {
            "ignore-file" => {
                let in_header = comment.start_byte() < header_end;
                if !in_header && line_number > FILE_DIRECTIVE_MAX_LINE {
                    tracing::debug!(
                        file = %file.path,
                        line = line_number,
                        "ignoring file-level suppression outside the header"
                    );
                    continue;
                }
                SuppressionType::File
            }
            "ignore-next-line" => SuppressionType::NextLine,
            "ignore" => {
                // Alone on its line: covers the next line. After code: covers this one.
                if code_precedes(file, comment) {
                    SuppressionType::Line
                } else {
                    SuppressionType::NextLine
                }
            }
            _ => continue,
        };

        suppressions.push(Suppression {
            rule: rule.to_string(),
            reason,
            file: file.path.clone(),
            line: if suppression_type == SuppressionType::File {
                0
            } else {
                line_number
            },
            suppression_type,
        });
    }

    suppressions
}

/// All comment nodes in document order.
fn comment_nodes(root: tree_sitter::Node) -> Vec<tree_sitter::Node> {
    let mut comments = Vec::new();
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        if node.kind() == "comment" {
            comments.push(node);
        }
        if cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return comments;
            }
        }
    }
}

/// Byte offset where the header (leading comments and the package
/// clause) ends.
fn header_end(root: tree_sitter::Node) -> usize {
    let mut cursor = root.walk();
    let end = root
        .named_children(&mut cursor)
        .find(|n| n.kind() != "comment" && n.kind() != "package_clause")
        .map(|n| n.start_byte())
        .unwrap_or_else(|| root.end_byte());
    end
}

/// Whether non-whitespace source precedes `comment` on its line.
fn code_precedes(file: &ParsedFile, comment: tree_sitter::Node) -> bool {
    let start = comment.start_byte();
    let line_start = file.source[..start]
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |i| i + 1);
    file.source[line_start..start]
        .iter()
        .any(|b| !b.is_ascii_whitespace())
}

/// Check if a diagnostic matches a suppression.
pub fn matches_suppression(diagnostic: &Diagnostic, suppression: &Suppression) -> bool {
    if diagnostic.file != suppression.file {
        return false;
    }

    if suppression.rule != "*" && RuleKind::parse(&suppression.rule) != Some(diagnostic.rule) {
        return false;
    }

    match suppression.suppression_type {
        SuppressionType::File => true,
        SuppressionType::Line => diagnostic.line() == suppression.line,
        SuppressionType::NextLine => diagnostic.line() == suppression.line + 1,
    }
}

/// Separate diagnostics into active and suppressed.
pub fn filter_suppressed(
    diagnostics: Vec<Diagnostic>,
    suppressions: &[Suppression],
) -> (Vec<Diagnostic>, Vec<SuppressedDiagnostic>) {
    let mut active = Vec::new();
    let mut suppressed = Vec::new();

    for diagnostic in diagnostics {
        match suppressions
            .iter()
            .find(|s| matches_suppression(&diagnostic, s))
        {
            Some(suppression) => suppressed.push(SuppressedDiagnostic {
                diagnostic,
                suppression: suppression.clone(),
            }),
            None => active.push(diagnostic),
        }
    }

    (active, suppressed)
}

/// Collect suppressions from parsed files.
pub fn collect_suppressions(files: &[ParsedFile]) -> Vec<Suppression> {
    files
        .iter()
        .flat_map(parse_suppressions)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{GoParser, Position, SourceParser};
    use std::path::Path;

    fn parse(content: &str) -> ParsedFile {
        GoParser::new()
            .parse(Path::new("main.go"), content.as_bytes())
            .unwrap()
    }

    #[test]
    fn test_parse_suppressions() {
        let content = r#"// linterlog:ignore-file capital_letter - Generated code
package main

func main() {
    log.Print("Hello") // linterlog:ignore capital_letter - Legacy format
}
"#;
        let suppressions = parse_suppressions(&parse(content));
        assert_eq!(suppressions.len(), 2);

        assert_eq!(suppressions[0].suppression_type, SuppressionType::File);
        assert_eq!(suppressions[0].rule, "capital_letter");
        assert_eq!(suppressions[0].reason, "Generated code");
        assert_eq!(suppressions[0].line, 0);

        assert_eq!(suppressions[1].suppression_type, SuppressionType::Line);
        assert_eq!(suppressions[1].line, 5);
        assert_eq!(suppressions[1].reason, "Legacy format");
    }

    #[test]
    fn test_parse_next_line_forms() {
        let content = r#"package main

func main() {
    // linterlog:ignore-next-line sensitive_data
    log.Print("password reset")
    // linterlog:ignore *
    log.Print("Token!")
    /* linterlog:ignore-next-line only_english - translated later */
    log.Print("привет")
}
"#;
        let suppressions = parse_suppressions(&parse(content));
        assert_eq!(suppressions.len(), 3);
        assert!(suppressions
            .iter()
            .all(|s| s.suppression_type == SuppressionType::NextLine));
        assert_eq!(suppressions[1].rule, "*");
        assert_eq!(suppressions[2].reason, "translated later");
    }

    #[test]
    fn test_file_directive_outside_header_is_ignored() {
        let mut content = String::from("package main\n\nimport \"log\"\n");
        for _ in 0..10 {
            content.push_str("var _ = 1\n");
        }
        content.push_str("// linterlog:ignore-file * - too late\n");

        assert!(parse_suppressions(&parse(&content)).is_empty());
    }

    #[test]
    fn test_directive_inside_string_literal_is_ignored() {
        let content = r#"package main

func main() {
    log.Print("Hello // linterlog:ignore capital_letter - x")
    log.Print("Bye /* linterlog:ignore * */")
}
"#;
        assert!(parse_suppressions(&parse(content)).is_empty());
    }

    #[test]
    fn test_unknown_rule_is_dropped() {
        let content = r#"package main

func main() {
    // linterlog:ignore-next-line capitol_letter - typo
    log.Print("Hello")
}
"#;
        assert!(parse_suppressions(&parse(content)).is_empty());
    }

    #[test]
    fn test_matches_suppression() {
        let diagnostic =
            Diagnostic::new(RuleKind::CapitalLetter, "main.go", Position::new(5, 2));

        let file_level = Suppression {
            rule: "capital_letter".to_string(),
            reason: String::new(),
            file: "main.go".to_string(),
            line: 0,
            suppression_type: SuppressionType::File,
        };
        assert!(matches_suppression(&diagnostic, &file_level));

        let next_line = Suppression {
            line: 4,
            suppression_type: SuppressionType::NextLine,
            ..file_level.clone()
        };
        assert!(matches_suppression(&diagnostic, &next_line));

        let wrong_rule = Suppression {
            rule: "sensitive_data".to_string(),
            ..file_level.clone()
        };
        assert!(!matches_suppression(&diagnostic, &wrong_rule));

        let other_file = Suppression {
            file: "other.go".to_string(),
            ..file_level.clone()
        };
        assert!(!matches_suppression(&diagnostic, &other_file));

        let wildcard = Suppression {
            rule: "*".to_string(),
            ..file_level
        };
        assert!(matches_suppression(&diagnostic, &wildcard));
    }

    #[test]
    fn test_filter_suppressed() {
        let diagnostics = vec![
            Diagnostic::new(RuleKind::CapitalLetter, "main.go", Position::new(5, 2)),
            Diagnostic::new(RuleKind::SensitiveData, "main.go", Position::new(9, 2)),
        ];
        let suppressions = vec![Suppression {
            rule: "sensitive_data".to_string(),
            reason: "reviewed".to_string(),
            file: "main.go".to_string(),
            line: 9,
            suppression_type: SuppressionType::Line,
        }];

        let (active, suppressed) = filter_suppressed(diagnostics, &suppressions);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].rule, RuleKind::CapitalLetter);
        assert_eq!(suppressed.len(), 1);
        assert_eq!(suppressed[0].suppression.reason, "reviewed");
    }
}
