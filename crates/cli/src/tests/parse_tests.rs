#[cfg(test)]
mod tests {
    use crate::cmd::rules::RulesCmd;
    use crate::cmd::Commands;
    use crate::Opts;
    use clap::Parser;

    fn parse(args: &[&str]) -> Opts {
        let mut full = vec!["synthalert"];
        full.extend_from_slice(args);
        Opts::parse_from(full)
    }

    fn try_parse(args: &[&str]) -> Result<Opts, clap::Error> {
        let mut full = vec!["synthalert"];
        full.extend_from_slice(args);
        Opts::try_parse_from(full)
    }

    #[test]
    fn parse_version() {
        let opts = parse(&["version"]);
        assert!(matches!(opts.cmd, Commands::Version));
    }

    #[test]
    fn parse_json_flag() {
        let opts = parse(&["--json", "version"]);
        assert!(opts.json);
        assert_eq!(opts.output_mode(), crate::output::OutputMode::Json);
    }

    #[test]
    fn parse_human_flag_default() {
        let opts = parse(&["version"]);
        assert!(!opts.json);
        assert_eq!(opts.output_mode(), crate::output::OutputMode::Human);
    }

    #[test]
    fn parse_ruler_flag() {
        let opts = parse(&["--ruler", "http://localhost:9009", "rules", "list"]);
        assert_eq!(opts.ruler.as_deref(), Some("http://localhost:9009"));
    }

    #[test]
    fn parse_config_flag() {
        let opts = parse(&["--config", "/tmp/alerting.yml", "config", "show"]);
        assert_eq!(opts.config.as_deref(), Some("/tmp/alerting.yml"));
        assert!(matches!(opts.cmd, Commands::Config(_)));
    }

    #[test]
    fn parse_rules_list() {
        let opts = parse(&["rules", "list"]);
        assert!(matches!(opts.cmd, Commands::Rules(RulesCmd::List)));
    }

    #[test]
    fn parse_rules_defaults() {
        let opts = parse(&["rules", "defaults"]);
        assert!(matches!(opts.cmd, Commands::Rules(RulesCmd::Defaults)));
    }

    #[test]
    fn parse_rules_edit_with_changes() {
        let opts = parse(&[
            "rules",
            "edit",
            "SyntheticMonitoringCheckFailureAtHighSensitivity",
            "--name",
            "A different name",
            "--threshold",
            "25",
            "--for",
            "2s",
            "--label",
            "a_label_name=a_label_value",
            "--dry-run",
        ]);
        assert!(matches!(opts.cmd, Commands::Rules(RulesCmd::Edit(_))));
    }

    #[test]
    fn parse_rules_add_family() {
        let opts = parse(&["rules", "add", "--family", "ssl", "--sensitivity", "low"]);
        assert!(matches!(opts.cmd, Commands::Rules(RulesCmd::Add(_))));
    }

    #[test]
    fn rules_add_needs_family_or_expr() {
        assert!(try_parse(&["rules", "add"]).is_err());
    }

    #[test]
    fn rules_add_expr_needs_name() {
        assert!(try_parse(&["rules", "add", "--expr", "up == 0"]).is_err());
        assert!(try_parse(&["rules", "add", "--expr", "up == 0", "--name", "Down"]).is_ok());
    }

    #[test]
    fn rules_add_rejects_unknown_family() {
        assert!(try_parse(&["rules", "add", "--family", "latency"]).is_err());
    }

    #[test]
    fn parse_rules_delete_yes() {
        let opts = parse(&["rules", "delete", "SomeRule", "--yes"]);
        assert!(matches!(opts.cmd, Commands::Rules(RulesCmd::Delete(_))));
    }

    #[test]
    fn parse_rules_populate() {
        let opts = parse(&["rules", "populate", "--dry-run"]);
        assert!(matches!(opts.cmd, Commands::Rules(RulesCmd::Populate(_))));
    }

    #[test]
    fn parse_config_path() {
        let opts = parse(&["config", "path"]);
        assert!(matches!(opts.cmd, Commands::Config(_)));
    }

    #[test]
    fn parse_rules_edit_nth() {
        let opts = parse(&["rules", "edit", "SomeRule", "--nth", "2", "--threshold", "50"]);
        let Commands::Rules(RulesCmd::Edit(args)) = opts.cmd else {
            panic!("expected rules edit");
        };
        assert_eq!(args.rule.name, "SomeRule");
        assert_eq!(args.rule.nth, Some(2));
    }
}
