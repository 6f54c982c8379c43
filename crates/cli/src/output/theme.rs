use colored::Colorize;
use synthalert_common::LabelSet;

pub fn print_header(title: &str) {
    let width = title.chars().count() + 6;
    let border = "─".repeat(width);
    println!();
    println!("  ╭{}╮", border.cyan());
    println!("  │   {}   │", title.bright_cyan().bold());
    println!("  ╰{}╯", border.cyan());
    println!();
}

pub fn print_section(title: &str) {
    println!();
    println!("  {} {}", "●".bright_cyan(), title.bold());
    println!("  {}", "─".repeat(40).dimmed());
}

pub fn print_kv(label: &str, value: &str) {
    println!(
        "    {} {}",
        format!("{:<16}", label).dimmed(),
        value.bright_white()
    );
}

pub fn print_alerting_status(enabled: bool) {
    let status = if enabled {
        "enabled".green()
    } else {
        "disabled".red()
    };
    println!("    {} {}", format!("{:<16}", "Alerting").dimmed(), status);
}

/// A titled block of labels or annotations, in emission order.
pub fn print_label_set(title: &str, set: &LabelSet) {
    print_section(title);
    if set.is_empty() {
        print_dim("  (none)");
        return;
    }
    for (k, v) in set.iter() {
        print_kv(k, v);
    }
}

pub fn print_warning(msg: &str) {
    println!("{} {}", "⚠".yellow().bold(), msg.yellow());
}

pub fn print_dim(msg: &str) {
    println!("  {}", msg.dimmed());
}
