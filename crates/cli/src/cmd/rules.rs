use anyhow::{bail, Context, Result};
use clap::Subcommand;
use synthalert_alerting::coordinator::{RuleDraft, RuleSetCoordinator};
use synthalert_alerting::storage::RulerClient;
use synthalert_common::{
    default_alert_rules, default_rule_set, render_rule, AlertFamily, AlertRule, AlertSensitivity,
    WireAlertRule,
};

use super::helpers;
use crate::output::{
    confirm, family_cell, print_json, print_rule_group, print_saved, print_success, rules_table,
    sensitivity_cell, spinner, theme, OutputMode,
};

#[derive(Subcommand)]
pub enum RulesCmd {
    /// List the alert rules stored in the ruler
    List,
    Show(ShowArgs),
    /// Print the default rule set without contacting the ruler
    Defaults,
    /// Print the full rule group a save would send
    Render,
    Populate(PopulateArgs),
    Edit(EditArgs),
    Add(AddArgs),
    Delete(DeleteArgs),
    Reset(ResetArgs),
}

/// Picks one loaded rule by name.
#[derive(clap::Args)]
pub struct RuleSelector {
    #[arg(help = "Alert rule name")]
    pub(crate) name: String,
    #[arg(long, help = "Which of several rules sharing the name, counting from 1")]
    pub(crate) nth: Option<usize>,
}

impl RuleSelector {
    fn index(&self, coordinator: &RuleSetCoordinator) -> Result<usize> {
        helpers::rule_index(coordinator, &self.name, self.nth)
    }
}

#[derive(clap::Args)]
pub struct ShowArgs {
    #[command(flatten)]
    rule: RuleSelector,
}

#[derive(clap::Args)]
pub struct PopulateArgs {
    #[arg(long, help = "Skip confirmation prompt")]
    yes: bool,
    #[arg(long, help = "Print the resulting rules instead of saving")]
    dry_run: bool,
}

/// Field changes shared by `edit` and `add`.
#[derive(clap::Args, Default)]
pub struct RuleChanges {
    #[arg(long = "name", help = "New alert name")]
    pub(crate) new_name: Option<String>,
    #[arg(long, help = "Threshold compared against the family metric")]
    pub(crate) threshold: Option<f64>,
    #[arg(long = "for", value_name = "WINDOW", help = "Evaluation window, e.g. 5m or 2s")]
    pub(crate) window: Option<String>,
    #[arg(long = "label", value_name = "NAME=VALUE")]
    pub(crate) labels: Vec<String>,
    #[arg(long = "remove-label", value_name = "NAME")]
    pub(crate) remove_labels: Vec<String>,
    #[arg(long = "annotation", value_name = "NAME=VALUE")]
    pub(crate) annotations: Vec<String>,
    #[arg(long = "remove-annotation", value_name = "NAME")]
    pub(crate) remove_annotations: Vec<String>,
    #[arg(long)]
    pub(crate) summary: Option<String>,
    #[arg(long)]
    pub(crate) description: Option<String>,
}

#[derive(clap::Args)]
pub struct EditArgs {
    #[command(flatten)]
    pub(crate) rule: RuleSelector,
    #[command(flatten)]
    changes: RuleChanges,
    #[arg(long, help = "Print the resulting rules instead of saving")]
    dry_run: bool,
}

#[derive(clap::Args)]
pub struct AddArgs {
    #[arg(long, required_unless_present = "expr", conflicts_with = "expr")]
    family: Option<AlertFamily>,
    #[arg(long, default_value_t = AlertSensitivity::Medium)]
    sensitivity: AlertSensitivity,
    #[arg(long, requires = "new_name", help = "Verbatim PromQL expression")]
    expr: Option<String>,
    #[command(flatten)]
    changes: RuleChanges,
    #[arg(long, help = "Print the resulting rules instead of saving")]
    dry_run: bool,
}

#[derive(clap::Args)]
pub struct DeleteArgs {
    #[command(flatten)]
    rule: RuleSelector,
    #[arg(long, help = "Skip confirmation prompt")]
    yes: bool,
    #[arg(long, help = "Print the resulting rules instead of saving")]
    dry_run: bool,
}

#[derive(clap::Args)]
pub struct ResetArgs {
    #[command(flatten)]
    rule: RuleSelector,
    #[arg(long, help = "Print the resulting rules instead of saving")]
    dry_run: bool,
}

impl RuleChanges {
    pub(crate) fn apply(&self, draft: &mut RuleDraft) -> Result<()> {
        if let Some(name) = &self.new_name {
            draft.rename(name.as_str());
        }
        if let Some(threshold) = self.threshold {
            draft.set_threshold(threshold);
        }
        if let Some(window) = &self.window {
            draft.set_window_str(window)?;
        }
        for raw in &self.labels {
            let (name, value) = helpers::parse_pair(raw)?;
            draft.set_label(&name, value);
        }
        for name in &self.remove_labels {
            if !draft.remove_label(name) {
                bail!("rule has no label '{name}'");
            }
        }
        for raw in &self.annotations {
            let (name, value) = helpers::parse_pair(raw)?;
            draft.set_annotation(&name, value);
        }
        for name in &self.remove_annotations {
            if !draft.remove_annotation(name) {
                bail!("rule has no annotation '{name}'");
            }
        }
        if let Some(summary) = &self.summary {
            draft.rule_mut().summary = Some(summary.clone());
        }
        if let Some(description) = &self.description {
            draft.rule_mut().description = Some(description.clone());
        }
        Ok(())
    }
}

pub async fn execute(
    cmd: RulesCmd,
    mode: OutputMode,
    ruler: Option<String>,
    config_path: Option<String>,
) -> Result<()> {
    let connect = || helpers::connect(ruler.as_deref(), config_path.as_deref());

    match cmd {
        RulesCmd::Defaults => defaults(mode),
        RulesCmd::List => {
            let (mut coordinator, client) = connect()?;
            load(&mut coordinator, &client, mode).await?;
            list(&coordinator, mode)
        }
        RulesCmd::Show(args) => {
            let (mut coordinator, client) = connect()?;
            load(&mut coordinator, &client, mode).await?;
            show(&coordinator, args, mode)
        }
        RulesCmd::Render => {
            let (mut coordinator, client) = connect()?;
            load(&mut coordinator, &client, mode).await?;
            print_rule_group(&coordinator.wire_rules()?, mode)
        }
        RulesCmd::Populate(args) => {
            let (mut coordinator, client) = connect()?;
            populate(&mut coordinator, &client, args, mode).await
        }
        RulesCmd::Edit(args) => {
            let (mut coordinator, client) = connect()?;
            edit(&mut coordinator, &client, args, mode).await
        }
        RulesCmd::Add(args) => {
            let (mut coordinator, client) = connect()?;
            add(&mut coordinator, &client, args, mode).await
        }
        RulesCmd::Delete(args) => {
            let (mut coordinator, client) = connect()?;
            delete(&mut coordinator, &client, args, mode).await
        }
        RulesCmd::Reset(args) => {
            let (mut coordinator, client) = connect()?;
            reset(&mut coordinator, &client, args, mode).await
        }
    }
}

async fn load(
    coordinator: &mut RuleSetCoordinator,
    client: &RulerClient,
    mode: OutputMode,
) -> Result<()> {
    let sp = match mode {
        OutputMode::Human => Some(spinner::create("Fetching alert rules...")),
        OutputMode::Json => None,
    };

    let result = coordinator.load(client).await;

    if let Some(sp) = sp {
        match &result {
            Ok(_) => spinner::finish_clear(&sp),
            Err(_) => spinner::finish_err(&sp, "Could not fetch alert rules"),
        }
    }

    result.context("fetching alert rules")?;
    Ok(())
}

async fn save(
    coordinator: &mut RuleSetCoordinator,
    client: &RulerClient,
    dry_run: bool,
    mode: OutputMode,
    done: &str,
) -> Result<()> {
    if dry_run {
        return print_rule_group(&coordinator.wire_rules()?, mode);
    }

    let sp = match mode {
        OutputMode::Human => Some(spinner::create("Saving alert rules...")),
        OutputMode::Json => None,
    };

    let result = coordinator.submit(client).await;

    if let Some(sp) = sp {
        match &result {
            Ok(()) => spinner::finish_ok(&sp, done),
            Err(_) => spinner::finish_err(&sp, "Could not save alert rules"),
        }
    }
    result.context("saving alert rules")?;
    print_saved(coordinator.rules().len(), mode)
}

fn rendered(rules: &[AlertRule]) -> Result<Vec<WireAlertRule>> {
    rules
        .iter()
        .map(|r| render_rule(r).with_context(|| format!("rendering rule '{}'", r.name)))
        .collect()
}

fn list(coordinator: &RuleSetCoordinator, mode: OutputMode) -> Result<()> {
    let rules = coordinator.rules();
    match mode {
        OutputMode::Json => print_json(&rendered(rules)?)?,
        OutputMode::Human => {
            if rules.is_empty() {
                print_success("No alert rules defined");
                theme::print_dim("  Run `synthalert rules populate` to create the defaults.");
                return Ok(());
            }
            theme::print_header("Alert Rules");
            println!("{}", rules_table(rules));
        }
    }
    Ok(())
}

fn show(coordinator: &RuleSetCoordinator, args: ShowArgs, mode: OutputMode) -> Result<()> {
    let rule = &coordinator.rules()[args.rule.index(coordinator)?];
    let wire = render_rule(rule)?;

    match mode {
        OutputMode::Json => print_json(&wire)?,
        OutputMode::Human => {
            theme::print_header(&wire.alert);
            theme::print_kv("Family", &family_cell(rule));
            theme::print_kv("Sensitivity", &sensitivity_cell(rule));
            theme::print_kv("Expr", &wire.expr);
            theme::print_kv("For", &wire.for_duration);

            theme::print_label_set("Labels", &wire.labels);
            theme::print_label_set("Annotations", &wire.annotations);
            println!();
        }
    }
    Ok(())
}

fn defaults(mode: OutputMode) -> Result<()> {
    match mode {
        OutputMode::Json => print_json(&default_rule_set()?)?,
        OutputMode::Human => {
            theme::print_header("Default Alert Rules");
            println!("{}", rules_table(&default_alert_rules()));
        }
    }
    Ok(())
}

async fn populate(
    coordinator: &mut RuleSetCoordinator,
    client: &RulerClient,
    args: PopulateArgs,
    mode: OutputMode,
) -> Result<()> {
    let msg = "Replace all family alert rules with their defaults?";
    if !confirm::proceed(mode, args.yes, args.dry_run, msg) {
        return Ok(());
    }

    load(coordinator, client, mode).await?;
    coordinator.populate_defaults()?;
    save(coordinator, client, args.dry_run, mode, "Default alert rules saved").await
}

async fn edit(
    coordinator: &mut RuleSetCoordinator,
    client: &RulerClient,
    args: EditArgs,
    mode: OutputMode,
) -> Result<()> {
    load(coordinator, client, mode).await?;
    let index = args.rule.index(coordinator)?;

    let mut draft = coordinator.open_rule_at(index)?;
    args.changes.apply(&mut draft)?;
    coordinator.confirm_edit(draft)?;

    let done = format!("Rule '{}' updated", args.rule.name);
    save(coordinator, client, args.dry_run, mode, &done).await
}

async fn add(
    coordinator: &mut RuleSetCoordinator,
    client: &RulerClient,
    args: AddArgs,
    mode: OutputMode,
) -> Result<()> {
    load(coordinator, client, mode).await?;

    let mut draft = match (&args.expr, args.family) {
        (Some(expr), _) => coordinator.new_rule_from(AlertRule::custom("", expr.as_str()))?,
        (None, Some(family)) => coordinator.new_rule(family, args.sensitivity)?,
        (None, None) => bail!("either --family or --expr is required"),
    };
    args.changes.apply(&mut draft)?;
    let name = draft.rule().name.clone();
    coordinator.confirm_edit(draft)?;

    let done = format!("Rule '{name}' added");
    save(coordinator, client, args.dry_run, mode, &done).await
}

async fn delete(
    coordinator: &mut RuleSetCoordinator,
    client: &RulerClient,
    args: DeleteArgs,
    mode: OutputMode,
) -> Result<()> {
    let msg = format!("Delete alert rule '{}'?", args.rule.name);
    if !confirm::proceed(mode, args.yes, args.dry_run, &msg) {
        return Ok(());
    }

    load(coordinator, client, mode).await?;
    let index = args.rule.index(coordinator)?;
    coordinator.remove_rule_at(index)?;

    let done = format!("Rule '{}' deleted", args.rule.name);
    save(coordinator, client, args.dry_run, mode, &done).await
}

async fn reset(
    coordinator: &mut RuleSetCoordinator,
    client: &RulerClient,
    args: ResetArgs,
    mode: OutputMode,
) -> Result<()> {
    load(coordinator, client, mode).await?;
    let index = args.rule.index(coordinator)?;
    coordinator.reset_rule_at(index)?;

    let done = format!("Rule '{}' reset to default", args.rule.name);
    save(coordinator, client, args.dry_run, mode, &done).await
}
