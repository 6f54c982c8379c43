use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Color, ContentArrangement, Table};
use synthalert_common::{AlertRule, LabelSet};

pub fn build_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    let cells: Vec<Cell> = headers
        .iter()
        .map(|h| Cell::new(h).fg(Color::Cyan).add_attribute(Attribute::Bold))
        .collect();
    table.set_header(cells);
    table
}

/// One row per alert rule, in collection order. Custom rules show
/// `custom` and dashes where the template fields do not apply.
pub fn rules_table(rules: &[AlertRule]) -> Table {
    let mut table = build_table(&["Name", "Family", "Sensitivity", "Threshold", "For", "Labels"]);
    for r in rules {
        table.add_row(vec![
            Cell::new(&r.name),
            Cell::new(family_cell(r)),
            Cell::new(sensitivity_cell(r)),
            threshold_cell(r),
            Cell::new(r.window()),
            Cell::new(labels_cell(&r.labels)),
        ]);
    }
    table
}

pub fn family_cell(rule: &AlertRule) -> String {
    rule.family()
        .map(|f| f.to_string())
        .unwrap_or_else(|| "custom".into())
}

pub fn sensitivity_cell(rule: &AlertRule) -> String {
    rule.sensitivity()
        .map(|s| s.to_string())
        .unwrap_or_else(|| "-".into())
}

fn threshold_cell(rule: &AlertRule) -> Cell {
    if rule.is_custom() {
        Cell::new("-").fg(Color::DarkGrey)
    } else {
        Cell::new(rule.threshold.to_string())
    }
}

fn labels_cell(labels: &LabelSet) -> String {
    if labels.is_empty() {
        return "-".into();
    }
    labels
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join(", ")
}
