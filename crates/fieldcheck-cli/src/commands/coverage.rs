//! Coverage command implementation.

use std::fs::read_to_string;
use std::path::PathBuf;

use clap::Args;
use fieldcheck::{builtin_rule_names, Tier, Translator};
use miette::{miette, IntoDiagnostic, Result};
use serde::Serialize;
use tracing::debug;

use crate::output::load_error_report;
use crate::output::table::{format_coverage_table, CatalogCoverage};

/// Arguments for the coverage command.
#[derive(Debug, Args)]
pub struct CoverageArgs {
    /// Locale whose built-in templates form the base tier (e.g., en, ja).
    #[arg(long, default_value = "en")]
    pub lang: String,

    /// Catalog files to layer over the base tier, one row each.
    pub files: Vec<PathBuf>,

    /// Exit with non-zero code if any catalog leaves a built-in rule uncovered.
    #[arg(long)]
    pub strict: bool,

    /// Output results as JSON.
    #[arg(long)]
    pub json: bool,
}

/// JSON output format for coverage data.
#[derive(Debug, Serialize)]
struct CoverageJson {
    catalog: String,
    entries: usize,
    covered: usize,
    total: usize,
    missing: Vec<String>,
}

/// Run the coverage command.
pub fn run_coverage(args: CoverageArgs) -> Result<i32> {
    let rules = builtin_rule_names();
    let builder = Translator::builder(&args.lang).map_err(|e| miette!("{e}"))?;

    let mut coverage_data = vec![coverage_row(
        "(built-in)".to_string(),
        &builder.clone().build(),
        rules,
    )];

    for path in &args.files {
        let content = read_to_string(path)
            .into_diagnostic()
            .map_err(|e| miette!("Failed to read catalog {}: {}", path.display(), e))?;
        let translator = match builder.clone().load_catalog_str(&content, true) {
            Ok(builder) => builder.build(),
            Err(e) => return Err(load_error_report(path, &content, e)),
        };
        debug!(path = %path.display(), "computed coverage");
        coverage_data.push(coverage_row(
            path.display().to_string(),
            &translator,
            rules,
        ));
    }

    let any_incomplete = coverage_data.iter().any(|c| !c.missing.is_empty());

    if args.json {
        let json_data: Vec<CoverageJson> = coverage_data
            .iter()
            .map(|c| CoverageJson {
                catalog: c.catalog.clone(),
                entries: c.entries,
                covered: c.covered,
                total: rules.len(),
                missing: c.missing.clone(),
            })
            .collect();

        let json_output = serde_json::to_string_pretty(&json_data).into_diagnostic()?;
        println!("{}", json_output);
    } else {
        let table = format_coverage_table(rules.len(), &coverage_data);
        println!("{}", table);
    }

    if args.strict && any_incomplete {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}

fn coverage_row(catalog: String, translator: &Translator, rules: &[&str]) -> CatalogCoverage {
    let coverage = translator.coverage(rules.iter().copied());
    let entries = translator
        .rules()
        .into_iter()
        .filter(|rule| translator.tier(rule) == Some(Tier::Catalog))
        .count();
    CatalogCoverage {
        catalog,
        entries,
        covered: coverage.covered.len(),
        missing: coverage.missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_tier_covers_builtins_for_known_language() {
        let translator = Translator::builder("ja").unwrap().build();
        let row = coverage_row("ja".to_string(), &translator, builtin_rule_names());
        assert_eq!(row.covered, builtin_rule_names().len());
        assert_eq!(row.entries, 0);
        assert!(row.missing.is_empty());
    }

    #[test]
    fn catalog_entries_count_toward_coverage() {
        let translator = Translator::builder("fr")
            .unwrap()
            .load_catalog_str("required = \"{0} est obligatoire\";", true)
            .unwrap()
            .build();
        let row = coverage_row("fr.fcat".to_string(), &translator, builtin_rule_names());
        assert_eq!(row.entries, 1);
        assert_eq!(row.covered, 1);
        assert_eq!(row.missing, ["min", "max", "iscolor", "datetime"]);
    }
}
