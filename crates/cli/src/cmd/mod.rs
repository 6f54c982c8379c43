mod config;
pub(crate) mod helpers;
pub(crate) mod rules;
mod version;

use anyhow::Result;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    #[command(subcommand)]
    Rules(rules::RulesCmd),
    #[command(subcommand)]
    Config(config::ConfigCmd),
    Version,
}

pub async fn run(opts: crate::Opts) -> Result<()> {
    let mode = opts.output_mode();
    match opts.cmd {
        Commands::Rules(cmd) => rules::execute(cmd, mode, opts.ruler, opts.config).await,
        Commands::Config(cmd) => config::execute(cmd, mode, opts.ruler, opts.config),
        Commands::Version => {
            version::execute(mode);
            Ok(())
        }
    }
}
