//! Implementation of the `fieldcheck render` command.

use std::fs::read_to_string;
use std::path::PathBuf;

use fieldcheck::{DisplayNames, Rule, Tier, Translator, Value, Violation};
use miette::{miette, IntoDiagnostic};
use serde::Serialize;

use crate::output::load_error_report;

/// Arguments for the render command.
#[derive(Debug, clap::Args)]
pub struct RenderArgs {
    /// Locale to render in (e.g., en, ja)
    #[arg(long, required = true)]
    pub lang: String,

    /// Rule that failed
    #[arg(long, required = true)]
    pub rule: String,

    /// Field identifier the rule failed on
    #[arg(long, required = true)]
    pub field: String,

    /// Rule parameter, as declared (e.g., 10 or 2006-01-02)
    #[arg(long)]
    pub param: Option<String>,

    /// Observed value, echoed in JSON output
    #[arg(long)]
    pub value: Option<String>,

    /// Catalog files layered over the base tier, in order (repeatable)
    #[arg(long)]
    pub catalog: Vec<PathBuf>,

    /// Display-name catalog (.fcat)
    #[arg(long)]
    pub names: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for render results.
#[derive(Serialize)]
pub struct RenderResult {
    pub message: String,
    pub source: &'static str,
    pub violation: Violation,
}

/// Run the render command.
pub fn run_render(args: RenderArgs) -> miette::Result<i32> {
    let mut builder = Translator::builder(&args.lang).map_err(|e| miette!("{e}"))?;
    for path in &args.catalog {
        let content = read_to_string(path)
            .into_diagnostic()
            .map_err(|e| miette!("Cannot read catalog {}: {}", path.display(), e))?;
        builder = builder
            .load_catalog_str(&content, true)
            .map_err(|e| load_error_report(path, &content, e))?;
    }
    let translator = builder.build();

    let names = match &args.names {
        Some(path) => {
            let content = read_to_string(path)
                .into_diagnostic()
                .map_err(|e| miette!("Cannot read names file {}: {}", path.display(), e))?;
            DisplayNames::load_str(&content).map_err(|e| load_error_report(path, &content, e))?
        }
        None => DisplayNames::new(),
    };

    let rule = match args.param {
        Some(param) => Rule::with_param(args.rule, param),
        None => Rule::new(args.rule),
    };
    let value = args.value.map_or(Value::Missing, Value::from);
    let violation = Violation::new(args.field, &rule, value);
    let message = translator.render(&violation, &names);

    if args.json {
        let output = RenderResult {
            message,
            source: source_label(translator.tier(violation.rule())),
            violation,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&output).into_diagnostic()?
        );
    } else {
        println!("{}", message);
    }
    Ok(exitcode::OK)
}

/// Where the rendered template came from.
fn source_label(tier: Option<Tier>) -> &'static str {
    match tier {
        Some(Tier::Base) => "base",
        Some(Tier::Catalog) => "catalog",
        Some(Tier::Custom) => "custom",
        None => "fallback",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_when_rule_has_no_template() {
        let translator = Translator::builder("en").unwrap().build();
        assert_eq!(source_label(translator.tier("email")), "fallback");
        assert_eq!(source_label(translator.tier("required")), "base");
    }
}
