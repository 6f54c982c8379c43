pub mod confirm;
mod format;
pub mod spinner;
mod table;
pub mod theme;

pub use format::{print_error, print_json, print_rule_group, print_saved, print_success, OutputMode};
pub use table::{build_table, family_cell, rules_table, sensitivity_cell};
