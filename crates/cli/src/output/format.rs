use colored::Colorize;
use serde::Serialize;
use synthalert_common::WireRule;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Rule group body as the ruler receives it: YAML for people, JSON otherwise.
pub fn print_rule_group(rules: &[WireRule], mode: OutputMode) -> anyhow::Result<()> {
    match mode {
        OutputMode::Json => print_json(&rules),
        OutputMode::Human => {
            print!("{}", serde_yaml::to_string(rules)?);
            Ok(())
        }
    }
}

/// JSON acknowledgement of a save. Human mode reports through the spinner.
pub fn print_saved(alert_rules: usize, mode: OutputMode) -> anyhow::Result<()> {
    if mode == OutputMode::Json {
        print_json(&serde_json::json!({
            "saved": true,
            "alert_rules": alert_rules,
        }))?;
    }
    Ok(())
}

pub fn print_success(msg: &str) {
    println!("{} {}", "✓".green().bold(), msg);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "✗".red().bold(), msg);
}
