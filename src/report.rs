//! Output formatting for lint results.
//!
//! Supports three output formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: structured output for programmatic consumption
//! - SARIF: Static Analysis Results Interchange Format for IDE/CI integration

use colored::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::lint::{Diagnostic, LintResult, RuleKind, SuppressedDiagnostic, SuppressionType};

// =============================================================================
// JSON Format
// =============================================================================

/// Top-level JSON report.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<String>,
    pub passed: bool,
    pub files_scanned: usize,
    pub diagnostics: Vec<JsonDiagnostic>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suppressed: Vec<JsonSuppressedDiagnostic>,
    pub suppressed_count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonDiagnostic {
    pub rule: String,
    pub file: String,
    pub line: usize,
    pub column: usize,
    pub message: String,
}

/// Suppressed diagnostic with suppression info.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonSuppressedDiagnostic {
    pub diagnostic: JsonDiagnostic,
    pub suppression: JsonSuppression,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonSuppression {
    pub rule: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reason: String,
    pub file: String,
    pub line: usize,
    #[serde(rename = "type")]
    pub suppression_type: String,
}

/// Build the JSON report for a lint run.
pub fn json_report(path: &str, config_path: Option<&str>, result: &LintResult) -> JsonReport {
    let suppressed = result
        .suppressed
        .iter()
        .map(|sd| JsonSuppressedDiagnostic {
            diagnostic: diagnostic_to_json(&sd.diagnostic),
            suppression: JsonSuppression {
                rule: sd.suppression.rule.clone(),
                reason: sd.suppression.reason.clone(),
                file: sd.suppression.file.clone(),
                line: sd.suppression.line,
                suppression_type: suppression_type_name(sd.suppression.suppression_type)
                    .to_string(),
            },
        })
        .collect();

    JsonReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        path: path.to_string(),
        config: config_path.map(str::to_string),
        passed: !result.has_diagnostics(),
        files_scanned: result.scanned,
        diagnostics: result.diagnostics.iter().map(diagnostic_to_json).collect(),
        suppressed,
        suppressed_count: result.suppressed.len(),
    }
}

/// Write results in JSON format.
pub fn write_json(path: &str, config_path: Option<&str>, result: &LintResult) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&json_report(path, config_path, result))?;
    println!("{}", json);
    Ok(())
}

fn diagnostic_to_json(d: &Diagnostic) -> JsonDiagnostic {
    JsonDiagnostic {
        rule: d.rule.as_str().to_string(),
        file: d.file.clone(),
        line: d.position.line,
        column: d.position.column,
        message: d.message().to_string(),
    }
}

fn suppression_type_name(t: SuppressionType) -> &'static str {
    match t {
        SuppressionType::Line => "line",
        SuppressionType::NextLine => "next_line",
        SuppressionType::File => "file",
    }
}

// =============================================================================
// SARIF Format
// =============================================================================

const SARIF_VERSION: &str = "2.1.0";
const SARIF_SCHEMA: &str = "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/master/Schemata/sarif-schema-2.1.0.json";
const TOOL_NAME: &str = "linterlog";

#[derive(Serialize, Deserialize)]
pub struct SarifReport {
    version: String,
    #[serde(rename = "$schema")]
    schema: String,
    runs: Vec<SarifRun>,
}

#[derive(Serialize, Deserialize)]
struct SarifRun {
    tool: SarifTool,
    results: Vec<SarifResult>,
}

#[derive(Serialize, Deserialize)]
struct SarifTool {
    driver: SarifDriver,
}

#[derive(Serialize, Deserialize)]
struct SarifDriver {
    name: String,
    version: String,
    rules: Vec<SarifRule>,
}

#[derive(Serialize, Deserialize)]
struct SarifRule {
    id: String,
    name: String,
    #[serde(rename = "shortDescription")]
    short_description: SarifMessage,
    #[serde(rename = "fullDescription")]
    full_description: SarifMessage,
    #[serde(rename = "defaultConfiguration")]
    default_config: SarifRuleConfig,
}

#[derive(Serialize, Deserialize)]
struct SarifRuleConfig {
    level: String,
}

#[derive(Serialize, Deserialize)]
struct SarifResult {
    #[serde(rename = "ruleId")]
    rule_id: String,
    level: String,
    message: SarifMessage,
    locations: Vec<SarifLocation>,
}

#[derive(Serialize, Deserialize)]
struct SarifMessage {
    text: String,
}

#[derive(Serialize, Deserialize)]
struct SarifLocation {
    #[serde(rename = "physicalLocation")]
    physical_location: SarifPhysicalLocation,
}

#[derive(Serialize, Deserialize)]
struct SarifPhysicalLocation {
    #[serde(rename = "artifactLocation")]
    artifact_location: SarifArtifact,
    region: SarifRegion,
}

#[derive(Serialize, Deserialize)]
struct SarifArtifact {
    uri: String,
}

#[derive(Serialize, Deserialize)]
struct SarifRegion {
    #[serde(rename = "startLine")]
    start_line: usize,
    #[serde(rename = "startColumn")]
    start_column: usize,
}

/// Rule metadata for SARIF output.
struct RuleInfo {
    name: &'static str,
    full_description: &'static str,
}

fn get_rule_info(rule: RuleKind) -> RuleInfo {
    match rule {
        RuleKind::CapitalLetter => RuleInfo {
            name: "CapitalLetter",
            full_description: "Log messages should start with a lower-case letter.",
        },
        RuleKind::SpecialSymbols => RuleInfo {
            name: "SpecialSymbols",
            full_description: "Log messages should not contain '!', ':', ';', an ellipsis, emojis or other non-letter symbols outside ASCII.",
        },
        RuleKind::OnlyEnglish => RuleInfo {
            name: "OnlyEnglish",
            full_description: "Log messages should only contain ASCII letters, digits and whitespace.",
        },
        RuleKind::SensitiveData => RuleInfo {
            name: "SensitiveData",
            full_description: "Log messages should not mention passwords, API keys, secrets, credentials or tokens.",
        },
    }
}

/// Build the SARIF report for a lint run.
pub fn sarif_report(result: &LintResult) -> SarifReport {
    // Rules that actually fired, in evaluation order
    let rule_set: BTreeSet<RuleKind> = result.diagnostics.iter().map(|d| d.rule).collect();

    let rules = rule_set
        .into_iter()
        .map(|rule| {
            let info = get_rule_info(rule);
            SarifRule {
                id: rule.as_str().to_string(),
                name: info.name.to_string(),
                short_description: SarifMessage {
                    text: rule.message().to_string(),
                },
                full_description: SarifMessage {
                    text: info.full_description.to_string(),
                },
                default_config: SarifRuleConfig {
                    level: "warning".to_string(),
                },
            }
        })
        .collect();

    let results = result
        .diagnostics
        .iter()
        .map(|d| SarifResult {
            rule_id: d.rule.as_str().to_string(),
            level: "warning".to_string(),
            message: SarifMessage {
                text: d.message().to_string(),
            },
            locations: vec![SarifLocation {
                physical_location: SarifPhysicalLocation {
                    artifact_location: SarifArtifact { uri: d.file.clone() },
                    region: SarifRegion {
                        start_line: d.position.line.max(1),
                        start_column: d.position.column.max(1),
                    },
                },
            }],
        })
        .collect();

    SarifReport {
        version: SARIF_VERSION.to_string(),
        schema: SARIF_SCHEMA.to_string(),
        runs: vec![SarifRun {
            tool: SarifTool {
                driver: SarifDriver {
                    name: TOOL_NAME.to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                    rules,
                },
            },
            results,
        }],
    }
}

/// Write results in SARIF format.
pub fn write_sarif(result: &LintResult) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&sarif_report(result))?;
    println!("{}", json);
    Ok(())
}

// =============================================================================
// Pretty Format
// =============================================================================

/// Write results in pretty (human-readable) format.
pub fn write_pretty(
    path: &str,
    config_path: Option<&str>,
    result: &LintResult,
    show_suppressed: bool,
) {
    println!();
    print!("  ");
    print!("{}", TOOL_NAME.cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();

    print!("  {}", "Scanning: ".dimmed());
    println!("{}", path);
    print!("  {}", "Config:   ".dimmed());
    println!("{}", config_path.unwrap_or("(defaults)"));
    println!();

    if result.has_diagnostics() {
        write_diagnostics(&result.diagnostics);
        println!();
    }

    if !result.suppressed.is_empty() {
        write_suppressed_summary(&result.suppressed, show_suppressed);
        println!();
    }

    write_final_status(result);
    println!();
}

fn write_diagnostics(diagnostics: &[Diagnostic]) {
    println!("  {} ({}):", "Diagnostics".bold(), diagnostics.len());
    println!();

    for d in diagnostics {
        print!("    {:<18}", d.rule.as_str().yellow());
        print!("{}", d.file.blue());
        println!("{}", format!(":{}", d.position).dimmed());
        println!("            {}", d.message());
    }
}

fn write_suppressed_summary(suppressed: &[SuppressedDiagnostic], show_details: bool) {
    println!("  {} ({}):", "Suppressed".dimmed(), suppressed.len());

    if !show_details {
        println!("    {}", "(use --show-suppressed to see details)".dimmed());
        return;
    }

    println!();
    for sd in suppressed {
        let d = &sd.diagnostic;
        let s = &sd.suppression;

        print!("    {:<18}", d.rule.as_str().dimmed());
        print!("{}", d.file.blue());
        if s.suppression_type == SuppressionType::File {
            print!("{}", ":* (file)".dimmed());
        } else {
            print!("{}", format!(":{}", d.position).dimmed());
        }
        println!();

        if !s.reason.is_empty() {
            println!("            {}", format!("reason: {:?}", s.reason).dimmed());
        }
    }
}

fn write_final_status(result: &LintResult) {
    let plural = |n: usize| if n == 1 { "" } else { "s" };
    print!(
        "  {}",
        format!(
            "{} file{} scanned",
            result.scanned,
            plural(result.scanned)
        )
        .dimmed()
    );
    print!("  ");

    if result.has_diagnostics() {
        let n = result.diagnostics.len();
        print!("{}", format!("FAILED ({} diagnostic{})", n, plural(n)).red());
    } else {
        print!("{}", "PASSED".green());
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Position;
    use crate::lint::Suppression;

    fn sample() -> LintResult {
        LintResult {
            diagnostics: vec![
                Diagnostic::new(RuleKind::SensitiveData, "a.go", Position::new(3, 2)),
                Diagnostic::new(RuleKind::CapitalLetter, "b.go", Position::new(7, 12)),
            ],
            suppressed: vec![SuppressedDiagnostic {
                diagnostic: Diagnostic::new(RuleKind::OnlyEnglish, "b.go", Position::new(9, 12)),
                suppression: Suppression {
                    rule: "only_english".to_string(),
                    reason: "localized".to_string(),
                    file: "b.go".to_string(),
                    line: 8,
                    suppression_type: SuppressionType::NextLine,
                },
            }],
            scanned: 2,
        }
    }

    #[test]
    fn test_json_report() {
        let report = json_report("./src", Some(".linterlog.yml"), &sample());
        assert!(!report.passed);
        assert_eq!(report.files_scanned, 2);
        assert_eq!(report.diagnostics.len(), 2);
        assert_eq!(report.diagnostics[1].rule, "capital_letter");
        assert_eq!(report.diagnostics[1].column, 12);
        assert_eq!(report.suppressed_count, 1);
        assert_eq!(report.suppressed[0].suppression.suppression_type, "next_line");

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["config"], ".linterlog.yml");
        assert_eq!(
            value["diagnostics"][0]["message"],
            "log message should not contain sensitive data"
        );
    }

    #[test]
    fn test_json_report_clean_run() {
        let result = LintResult {
            scanned: 4,
            ..LintResult::default()
        };
        let value = serde_json::to_value(json_report(".", None, &result)).unwrap();
        assert_eq!(value["passed"], true);
        assert!(value.get("config").is_none());
        assert!(value.get("suppressed").is_none());
        assert_eq!(value["suppressed_count"], 0);
    }

    #[test]
    fn test_sarif_report() {
        let value = serde_json::to_value(sarif_report(&sample())).unwrap();
        assert_eq!(value["version"], "2.1.0");

        let run = &value["runs"][0];
        assert_eq!(run["tool"]["driver"]["name"], "linterlog");

        // Rules are listed once, in evaluation order
        let rules = run["tool"]["driver"]["rules"].as_array().unwrap();
        let ids: Vec<_> = rules.iter().map(|r| r["id"].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["capital_letter", "sensitive_data"]);

        let results = run["results"].as_array().unwrap();
        assert_eq!(results.len(), 2);
        let region = &results[1]["locations"][0]["physicalLocation"]["region"];
        assert_eq!(region["startLine"], 7);
        assert_eq!(region["startColumn"], 12);
    }
}
