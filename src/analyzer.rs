//! The linterlog analyzer: a named unit a host runs over parsed files.

use rayon::prelude::*;

use crate::analysis::ParsedFile;
use crate::config::RuleConfig;
use crate::lint::{check_file, CallFinder, Diagnostic};

pub const NAME: &str = "linterlog";

pub const DOC: &str = "checks log messages for style and safety: \
messages must not start with a capital letter, must not contain special \
symbols or emojis, must contain only english symbols, and must not \
contain sensitive data";

/// Receives diagnostics produced by a pass.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// One run of an analyzer over a set of files.
pub struct Pass<'a> {
    /// Files to analyze, sorted by path.
    pub files: &'a [ParsedFile],
    pub config: &'a RuleConfig,
    pub sink: &'a mut dyn DiagnosticSink,
}

/// A named analysis with its entry point.
pub struct Analyzer {
    pub name: &'static str,
    pub doc: &'static str,
    pub run: fn(&mut Pass) -> anyhow::Result<()>,
}

pub static ANALYZER: Analyzer = Analyzer {
    name: NAME,
    doc: DOC,
    run,
};

/// Check every file in parallel, then hand diagnostics to the sink in
/// file order.
fn run(pass: &mut Pass) -> anyhow::Result<()> {
    let finder = CallFinder::new()?;
    let config = pass.config;

    let per_file: Vec<Vec<Diagnostic>> = pass
        .files
        .par_iter()
        .map(|file| check_file(&finder, file, config))
        .collect();

    for diagnostic in per_file.into_iter().flatten() {
        pass.sink.report(diagnostic);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{GoParser, SourceParser};
    use crate::lint::RuleKind;
    use std::path::Path;

    /// Counts instead of storing.
    #[derive(Default)]
    struct CountingSink(usize);

    impl DiagnosticSink for CountingSink {
        fn report(&mut self, _diagnostic: Diagnostic) {
            self.0 += 1;
        }
    }

    fn parse(path: &str, body: &str) -> ParsedFile {
        let source = format!("package main\n\nfunc main() {{\n{}\n}}\n", body);
        let mut file = GoParser::new()
            .parse(Path::new(path), source.as_bytes())
            .unwrap();
        file.path = path.to_string();
        file
    }

    #[test]
    fn test_descriptor() {
        assert_eq!(ANALYZER.name, "linterlog");
        assert!(ANALYZER.doc.contains("sensitive data"));
    }

    #[test]
    fn test_run_reports_in_file_order() {
        let files = vec![
            parse("a.go", "\tlog.Print(\"Capital letter\")"),
            parse("b.go", "\tlog.Fatal(\"ошибка подключения\")"),
            parse("c.go", "\tlog.Print(\"connected to port 8080\")"),
        ];
        let config = RuleConfig::default();
        let mut sink: Vec<Diagnostic> = Vec::new();
        let mut pass = Pass {
            files: &files,
            config: &config,
            sink: &mut sink,
        };
        (ANALYZER.run)(&mut pass).unwrap();

        let got: Vec<_> = sink.iter().map(|d| (d.file.as_str(), d.rule)).collect();
        assert_eq!(
            got,
            vec![("a.go", RuleKind::CapitalLetter), ("b.go", RuleKind::OnlyEnglish)]
        );
    }

    #[test]
    fn test_custom_sink() {
        let files = vec![parse("main.go", "\tlog.Print(\"Done!\")\n\tslog.Debug(\"token validated\")")];
        let config = RuleConfig::default();
        let mut sink = CountingSink::default();
        let mut pass = Pass {
            files: &files,
            config: &config,
            sink: &mut sink,
        };
        (ANALYZER.run)(&mut pass).unwrap();
        assert_eq!(sink.0, 2);
    }
}
