use anyhow::Result;
use clap::Subcommand;

use super::helpers;
use crate::output::{print_error, print_json, print_success, theme, OutputMode};

#[derive(Subcommand)]
pub enum ConfigCmd {
    Show(ShowArgs),
    Validate(ValidateArgs),
    Path,
}

#[derive(clap::Args)]
pub struct ShowArgs;

#[derive(clap::Args)]
pub struct ValidateArgs;

pub fn execute(
    cmd: ConfigCmd,
    mode: OutputMode,
    ruler: Option<String>,
    config_path: Option<String>,
) -> Result<()> {
    match cmd {
        ConfigCmd::Show(args) => show(args, mode, ruler, config_path),
        ConfigCmd::Validate(args) => validate(args, mode, config_path),
        ConfigCmd::Path => path(mode, config_path),
    }
}

fn show(
    _args: ShowArgs,
    mode: OutputMode,
    ruler: Option<String>,
    config_path: Option<String>,
) -> Result<()> {
    let resolved = helpers::resolve_ruler(ruler.as_deref(), config_path.as_deref());

    match mode {
        OutputMode::Json => match resolved {
            Ok(r) => print_json(&serde_json::json!({ "alerting_enabled": true, "ruler": r }))?,
            Err(_) => print_json(&serde_json::json!({ "alerting_enabled": false }))?,
        },
        OutputMode::Human => {
            theme::print_header("Alerting Configuration");
            match resolved {
                Ok(r) => {
                    theme::print_alerting_status(true);
                    theme::print_section("Ruler");
                    theme::print_kv("URL", &r.url);
                    theme::print_kv("Namespace", &r.namespace);
                    theme::print_kv("Group", &r.group);
                    theme::print_kv("Save timeout", &format!("{}s", r.save_timeout_seconds));
                }
                Err(e) => {
                    theme::print_alerting_status(false);
                    theme::print_dim(&format!("  {e:#}"));
                }
            }
            println!();
        }
    }

    Ok(())
}

fn validate(_args: ValidateArgs, mode: OutputMode, config_path: Option<String>) -> Result<()> {
    match helpers::load_config(config_path.as_deref()) {
        Ok(cfg) => match mode {
            OutputMode::Json => {
                print_json(&serde_json::json!({
                    "valid": true,
                    "alerting_enabled": cfg.alerting_enabled(),
                }))?;
            }
            OutputMode::Human => {
                print_success("Configuration is valid");
                if !cfg.alerting_enabled() {
                    theme::print_warning("No ruler configured; alerting is disabled");
                }
            }
        },
        Err(e) => match mode {
            OutputMode::Json => {
                print_json(&serde_json::json!({"valid": false, "error": format!("{e:#}")}))?;
            }
            OutputMode::Human => print_error(&format!("Invalid configuration: {e:#}")),
        },
    }

    Ok(())
}

fn path(_mode: OutputMode, config_path: Option<String>) -> Result<()> {
    let p = config_path
        .map(std::path::PathBuf::from)
        .unwrap_or_else(helpers::default_config_path);

    println!("{}", p.display());
    Ok(())
}
