//! Implementation of the `fieldcheck check` command.

use std::collections::HashMap;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use fieldcheck::parser::{parse_catalog, CatalogEntry};
use fieldcheck::{CatalogWarning, MessageTemplate, RuleRegistry, Translator};
use miette::{miette, IntoDiagnostic, Report};
use owo_colors::{OwoColorize, Stream, Style};
use serde::Serialize;
use tracing::debug;

use crate::output::{byte_offset, entry_span, CatalogDiagnostic, LintDiagnostic};

/// Arguments for the check command.
#[derive(Debug, clap::Args)]
pub struct CheckArgs {
    /// Files to check (.fcat)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Treat files as display-name catalogs instead of rule templates
    #[arg(long)]
    pub names: bool,

    /// Exit with non-zero code on warnings too
    #[arg(long)]
    pub strict: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
enum Severity {
    Error,
    Warning,
}

/// One problem found in a file.
#[derive(Debug, Serialize)]
struct Finding {
    file: String,
    severity: Severity,
    line: usize,
    column: usize,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    help: Option<String>,
    #[serde(skip)]
    span: (usize, usize),
}

impl Finding {
    fn at_entry(
        path: &Path,
        severity: Severity,
        entry: &CatalogEntry,
        message: String,
        help: Option<String>,
    ) -> Self {
        Finding {
            file: path.display().to_string(),
            severity,
            line: entry.line,
            column: entry.column,
            message,
            help,
            span: entry_span(entry),
        }
    }

    fn report(&self, path: &Path, content: &str) -> Report {
        match self.severity {
            Severity::Error => CatalogDiagnostic::new(
                path,
                content,
                self.span,
                self.message.clone(),
                self.help.clone(),
            )
            .into(),
            Severity::Warning => {
                LintDiagnostic::new(path, content, self.span, self.message.clone()).into()
            }
        }
    }
}

/// Run the check command.
pub fn run_check(args: CheckArgs) -> miette::Result<i32> {
    let registry = RuleRegistry::with_builtins();
    let mut all_findings = Vec::new();

    for path in &args.files {
        let content = read_to_string(path)
            .into_diagnostic()
            .map_err(|e| miette!("Failed to read {}: {}", path.display(), e))?;
        debug!(path = %path.display(), names = args.names, "checking catalog");

        let findings = check_file(path, &content, args.names, &registry);
        if !args.json {
            for finding in &findings {
                eprintln!("{:?}", finding.report(path, &content));
            }
        }
        all_findings.extend(findings);
    }

    let errors = all_findings
        .iter()
        .filter(|f| f.severity == Severity::Error)
        .count();
    let warnings = all_findings.len() - errors;

    if args.json {
        let json_output = serde_json::to_string_pretty(&all_findings).into_diagnostic()?;
        println!("{}", json_output);
    } else {
        let summary = format!(
            "checked {} file(s): {} error(s), {} warning(s)",
            args.files.len(),
            errors,
            warnings
        );
        let style = if errors > 0 {
            Style::new().red()
        } else if warnings > 0 {
            Style::new().yellow()
        } else {
            Style::new().green()
        };
        println!(
            "{}",
            summary.if_supports_color(Stream::Stdout, |s| s.style(style))
        );
    }

    if errors > 0 || (args.strict && warnings > 0) {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}

/// Check one file's content.
fn check_file(path: &Path, content: &str, names: bool, registry: &RuleRegistry) -> Vec<Finding> {
    let entries = match parse_catalog(content) {
        Ok(entries) => entries,
        Err(e) => {
            let (line, column) = e.position();
            return vec![Finding {
                file: path.display().to_string(),
                severity: Severity::Error,
                line,
                column,
                message: format!("syntax error: {}", e.message()),
                help: None,
                span: (byte_offset(content, line, column), 1),
            }];
        }
    };

    let mut findings = Vec::new();
    let mut first_lines: HashMap<&str, usize> = HashMap::new();
    let mut unique = Vec::new();
    for entry in &entries {
        if let Some(first) = first_lines.get(entry.name.as_str()) {
            findings.push(Finding::at_entry(
                path,
                Severity::Error,
                entry,
                format!("'{}' is already defined on line {}", entry.name, first),
                Some("remove one of the entries".to_string()),
            ));
        } else {
            first_lines.insert(&entry.name, entry.line);
            unique.push(entry);
        }
    }

    if names {
        findings.extend(
            unique
                .iter()
                .filter(|entry| entry.value.trim().is_empty())
                .map(|entry| {
                    Finding::at_entry(
                        path,
                        Severity::Warning,
                        entry,
                        format!("display name for '{}' is empty", entry.name),
                        None,
                    )
                }),
        );
    } else {
        check_templates(path, &unique, registry, &mut findings);
    }
    findings
}

/// Parse each template, then lint the valid ones against the rule registry.
fn check_templates(
    path: &Path,
    entries: &[&CatalogEntry],
    registry: &RuleRegistry,
    findings: &mut Vec<Finding>,
) {
    let mut valid = Vec::new();
    for entry in entries {
        match MessageTemplate::parse(&entry.value) {
            Ok(_) => valid.push(*entry),
            Err(e) => findings.push(Finding::at_entry(
                path,
                Severity::Error,
                entry,
                format!("invalid template for '{}': {}", entry.name, e.message()),
                Some("use {{ and }} for literal braces".to_string()),
            )),
        }
    }

    // An undetermined locale has no base tier, so only this file's entries
    // are linted.
    let Ok(mut builder) = Translator::builder("und") else {
        return;
    };
    for entry in &valid {
        builder = match builder.add(&entry.name, &entry.value, true) {
            Ok(builder) => builder,
            Err(_) => return,
        };
    }

    let translator = builder.build();
    for warning in translator.check_placeholders(registry) {
        let rule = warning_rule(&warning);
        if let Some(entry) = valid.iter().find(|entry| entry.name == rule) {
            findings.push(Finding::at_entry(
                path,
                Severity::Warning,
                entry,
                warning.to_string(),
                None,
            ));
        }
    }
}

fn warning_rule(warning: &CatalogWarning) -> &str {
    match warning {
        CatalogWarning::PlaceholderOutOfRange { rule, .. }
        | CatalogWarning::MissingFieldName { rule, .. }
        | CatalogWarning::UnknownRule { rule, .. } => rule,
    }
}
