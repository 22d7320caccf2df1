//! Call discovery, reporting, and the runner that ties a lint run together.

use std::path::{Path, PathBuf};

use streaming_iterator::StreamingIterator;
use tree_sitter::{Query, QueryCursor};

use crate::analysis::{go_parser, AnalysisContext, ParsedFile, SourceParser};
use crate::analyzer::{DiagnosticSink, Pass, ANALYZER};
use crate::config::RuleConfig;

use super::classify::log_call_site;
use super::extract::{extract, ExtractedMessage};
use super::rules::evaluate;
use super::suppress::{collect_suppressions, filter_suppressed};
use super::{Diagnostic, LintResult, LogCallSite, RuleKind};

/// Every method call with a selector callee. Method names are filtered
/// afterwards by the call classifier.
const CALL_QUERY: &str = r#"
(call_expression
  function: (selector_expression
    field: (field_identifier) @method)) @call
"#;

/// Finds log calls in a parsed Go file.
///
/// The compiled query is immutable and shared across worker threads.
pub struct CallFinder {
    query: Query,
    call_index: u32,
}

impl CallFinder {
    pub fn new() -> anyhow::Result<Self> {
        let query = Query::new(go_parser().language(), CALL_QUERY)?;
        let call_index = query
            .capture_index_for_name("call")
            .ok_or_else(|| anyhow::anyhow!("call query has no @call capture"))?;
        Ok(Self { query, call_index })
    }

    /// All log calls in the file, in source order.
    pub fn find_log_calls<'tree>(&self, file: &'tree ParsedFile) -> Vec<LogCallSite<'tree>> {
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&self.query, file.tree.root_node(), file.source.as_slice());

        let mut sites = Vec::new();
        while let Some(m) = matches.next() {
            for capture in m.captures {
                if capture.index != self.call_index {
                    continue;
                }
                if let Some(site) = log_call_site(capture.node, file) {
                    sites.push(site);
                }
            }
        }

        sites.sort_by_key(|s| s.node.start_byte());
        sites.dedup_by_key(|s| s.node.id());
        sites
    }
}

/// Forward each triggered rule to the sink, in engine order.
pub fn report(
    sink: &mut dyn DiagnosticSink,
    file: &str,
    message: &ExtractedMessage,
    kinds: &[RuleKind],
) {
    for &kind in kinds {
        sink.report(Diagnostic::new(kind, file, message.position));
    }
}

/// Lint one file: find log calls, extract their messages, run the rules.
pub fn check_file(finder: &CallFinder, file: &ParsedFile, config: &RuleConfig) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for site in finder.find_log_calls(file) {
        let Some(message) = extract(&site, file) else {
            continue;
        };
        let kinds = evaluate(&message.expr, config);
        if kinds.is_empty() {
            continue;
        }
        tracing::trace!(
            file = %file.path,
            position = %message.position,
            method = %site.method,
            "log message violates {} rule(s)",
            kinds.len()
        );
        report(&mut diagnostics, &file.path, &message, &kinds);
    }

    diagnostics
}

/// Parses a set of files and lints them with the registered analyzer.
pub struct Runner {
    base_dir: PathBuf,
    rules: RuleConfig,
}

impl Runner {
    /// Create a new runner.
    pub fn new<P: AsRef<Path>>(base_dir: P, rules: RuleConfig) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
            rules,
        }
    }

    /// Lint the given files.
    ///
    /// Unreadable or unparseable files are skipped. Inline suppressions
    /// are applied after the pass.
    pub fn run(&self, files: &[PathBuf]) -> anyhow::Result<LintResult> {
        let ctx = AnalysisContext::new(&self.base_dir);
        let parsed = ctx.parse_files_parallel(files);

        let mut diagnostics: Vec<Diagnostic> = Vec::new();
        {
            let mut pass = Pass {
                files: &parsed,
                config: &self.rules,
                sink: &mut diagnostics,
            };
            (ANALYZER.run)(&mut pass)?;
        }

        let suppressions = collect_suppressions(&parsed);
        let (active, suppressed) = if suppressions.is_empty() {
            (diagnostics, Vec::new())
        } else {
            filter_suppressed(diagnostics, &suppressions)
        };

        tracing::debug!(
            files = parsed.len(),
            diagnostics = active.len(),
            suppressed = suppressed.len(),
            "lint run finished"
        );

        Ok(LintResult {
            diagnostics: active,
            suppressed,
            scanned: parsed.len(),
        })
    }
}
