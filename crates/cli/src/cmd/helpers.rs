use anyhow::{anyhow, bail, Context, Result};
use std::path::PathBuf;
use synthalert_alerting::config::{load_from_file, AlertingConfig, RulerConfig};
use synthalert_alerting::coordinator::RuleSetCoordinator;
use synthalert_alerting::storage::RulerClient;

pub fn default_config_path() -> PathBuf {
    if let Some(dir) = dirs::config_dir() {
        return dir.join("synthalert").join("config.yml");
    }
    PathBuf::from("/etc/synthalert/config.yml")
}

pub fn load_config(config_path: Option<&str>) -> Result<AlertingConfig> {
    let path = config_path
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path);

    load_from_file(&path).with_context(|| format!("loading config from {}", path.display()))
}

/// `--ruler` wins over the config file; the file is still read for the
/// namespace, group and timeout when it exists.
pub fn resolve_ruler(ruler_flag: Option<&str>, config_path: Option<&str>) -> Result<RulerConfig> {
    if let Some(url) = ruler_flag {
        let mut ruler = match load_config(config_path) {
            Ok(cfg) => cfg.ruler.unwrap_or_else(|| RulerConfig::new(url)),
            Err(e) if config_path.is_some() => return Err(e),
            Err(_) => RulerConfig::new(url),
        };
        ruler.url = url.to_string();
        return Ok(ruler);
    }

    let cfg = load_config(config_path)?;
    cfg.ruler
        .ok_or_else(|| anyhow!("alerting is not configured: no ruler section in config"))
}

pub fn connect(
    ruler_flag: Option<&str>,
    config_path: Option<&str>,
) -> Result<(RuleSetCoordinator, RulerClient)> {
    let config = AlertingConfig {
        ruler: Some(resolve_ruler(ruler_flag, config_path)?),
    };
    synthalert_alerting::connect(&config)
        .ok_or_else(|| anyhow!("alerting is not configured: no ruler section in config"))
}

/// Position of the loaded rule called `name`. Names may repeat; `nth` (from 1)
/// picks among the rules sharing it and is required when there is more than one.
pub fn rule_index(coordinator: &RuleSetCoordinator, name: &str, nth: Option<usize>) -> Result<usize> {
    let matches: Vec<usize> = coordinator
        .rules()
        .iter()
        .enumerate()
        .filter(|(_, r)| r.name == name)
        .map(|(idx, _)| idx)
        .collect();

    match (matches.as_slice(), nth) {
        ([], _) => bail!("no alert rule named '{name}'"),
        ([only], None) => Ok(*only),
        (all, None) => bail!("{} alert rules are named '{name}'; pick one with --nth", all.len()),
        (all, Some(n)) => n
            .checked_sub(1)
            .and_then(|i| all.get(i).copied())
            .ok_or_else(|| anyhow!("--nth {n} is out of range: {} rules are named '{name}'", all.len())),
    }
}

/// Splits a `name=value` argument.
pub fn parse_pair(raw: &str) -> Result<(String, String)> {
    let Some((name, value)) = raw.split_once('=') else {
        bail!("expected NAME=VALUE, got '{raw}'");
    };
    let name = name.trim();
    if name.is_empty() {
        bail!("empty name in '{raw}'");
    }
    Ok((name.to_string(), value.to_string()))
}
