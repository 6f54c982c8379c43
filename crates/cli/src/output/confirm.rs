use dialoguer::{theme::ColorfulTheme, Confirm};

use super::{theme, OutputMode};

/// Asks a yes/no question, defaulting to no. A closed terminal counts as no.
fn confirm_action(msg: &str) -> bool {
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(msg)
        .default(false)
        .interact()
        .unwrap_or(false)
}

/// Gate for commands that overwrite stored rules. JSON mode, `--yes` and
/// `--dry-run` all skip the prompt.
pub fn proceed(mode: OutputMode, assume_yes: bool, dry_run: bool, msg: &str) -> bool {
    if mode == OutputMode::Json || assume_yes || dry_run {
        return true;
    }
    if confirm_action(msg) {
        return true;
    }
    theme::print_dim("  Cancelled.");
    false
}
