//! Table formatting utilities for CLI output.

use comfy_table::{presets, ContentArrangement, Table};

/// Coverage data for a single catalog.
pub struct CatalogCoverage {
    /// Catalog label (file path, or `(built-in)` for the base tier alone).
    pub catalog: String,
    /// Entries the catalog itself defines.
    pub entries: usize,
    /// Number of built-in rules with a template.
    pub covered: usize,
    /// Built-in rules without a template.
    pub missing: Vec<String>,
}

/// Format coverage data as a table.
pub fn format_coverage_table(rule_count: usize, coverage: &[CatalogCoverage]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Catalog", "Entries", "Coverage", "Missing"]);

    for row in coverage {
        table.add_row(vec![
            row.catalog.clone(),
            row.entries.to_string(),
            format!("{}/{}", row.covered, rule_count),
            row.missing.join(", "),
        ]);
    }

    table
}
