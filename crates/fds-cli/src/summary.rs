//! Human-readable output for `fds update` and `fds validate`.

use std::collections::BTreeMap;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use fds_model::DomainKey;
use fds_transform::{ChangeKind, RULESET_VERSION, Rule, TransformReport};
use fds_validate::{ValidationError, ValidationSummary};

use crate::pipeline::UpdateOutcome;

pub fn print_update_summary(outcome: &UpdateOutcome) {
    println!("{}", rates_line(outcome));
    if outcome.report.is_dirty() {
        println!("{}", change_table(&outcome.report));
    }
    for line in update_lines(outcome) {
        println!("{line}");
    }
}

/// Where the rates came from and how many there were.
pub fn rates_line(outcome: &UpdateOutcome) -> String {
    format!(
        "Sales tax rates: {} ({})",
        outcome.rate_count,
        outcome.origin.label()
    )
}

/// Dirty/clean status followed by write/dry-run status.
pub fn update_lines(outcome: &UpdateOutcome) -> Vec<String> {
    let status = if outcome.report.is_dirty() {
        "Dataset updated in-memory.".to_string()
    } else {
        format!("No changes needed (dataset already matches v{RULESET_VERSION} transforms).")
    };
    let persistence = if outcome.written {
        format!("Wrote: {}", outcome.dataset.display())
    } else {
        "Dry run (use --write to save).".to_string()
    };
    vec![status, persistence]
}

/// Field writes and insertions per rule, with a total row.
pub fn change_table(report: &TransformReport) -> Table {
    let mut counts: BTreeMap<Rule, (usize, usize)> = BTreeMap::new();
    for change in &report.changes {
        let entry = counts.entry(change.rule).or_default();
        match change.kind {
            ChangeKind::Field(_) => entry.0 += 1,
            ChangeKind::Inserted { .. } => entry.1 += 1,
        }
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rule"),
        header_cell("Fields"),
        header_cell("Inserted"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);

    let mut total_fields = 0usize;
    let mut total_inserted = 0usize;
    for (rule, (fields, inserted)) in counts {
        total_fields += fields;
        total_inserted += inserted;
        table.add_row(vec![
            Cell::new(rule),
            count_cell(fields, Color::Yellow),
            count_cell(inserted, Color::Green),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total_fields).add_attribute(Attribute::Bold),
        Cell::new(total_inserted).add_attribute(Attribute::Bold),
    ]);
    table
}

/// Prints the finding preview; the error line itself is printed by the caller.
pub fn print_findings(error: &ValidationError) {
    for line in finding_lines(error) {
        println!("{line}");
    }
}

pub fn finding_lines(error: &ValidationError) -> Vec<String> {
    let mut lines: Vec<String> = error
        .preview()
        .iter()
        .map(|finding| format!("BAD: {finding}"))
        .collect();
    let hidden = error.finding_count() - lines.len();
    if hidden > 0 {
        lines.push(format!("... {hidden} more not shown"));
    }
    lines
}

pub fn print_validation_summary(summary: &ValidationSummary) {
    println!("{}", validation_line(summary));
    println!("{}", validation_table(summary));
}

pub fn validation_line(summary: &ValidationSummary) -> String {
    format!(
        "OK: dataset version={} jurisdictions={}",
        summary.version, summary.jurisdictions
    )
}

/// Actions and most common `days_max` values per required domain.
pub fn validation_table(summary: &ValidationSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Domain"),
        header_cell("Actions"),
        header_cell("Top days_max"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);

    for domain in DomainKey::REQUIRED {
        let actions = summary
            .actions_per_domain
            .get(&domain)
            .copied()
            .unwrap_or(0);
        table.add_row(vec![
            Cell::new(domain).fg(Color::Blue),
            Cell::new(actions),
            top_cell(&summary.top_days_max(domain)),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(summary.total_actions()).add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    table
}

/// `"420 (3), 180 (1)"`, or `-` when nothing was tallied.
pub fn format_top(values: &[(i64, usize)]) -> String {
    if values.is_empty() {
        return "-".to_string();
    }
    values
        .iter()
        .map(|(value, count)| format!("{value} ({count})"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn top_cell(values: &[(i64, usize)]) -> Cell {
    if values.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(format_top(values))
    }
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_top_values() {
        assert_eq!(format_top(&[(420, 3), (180, 1)]), "420 (3), 180 (1)");
        assert_eq!(format_top(&[]), "-");
    }
}
