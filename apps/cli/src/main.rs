use anyhow::Context;
use clap::Parser;
use georef::ReferenceContext;
use georef::domain::config::ReferenceConfig;
use georef_cli::args::Cli;
use georef_cli::{init_logging, run};
use georef_kernel::config::load_config;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config: ReferenceConfig =
        load_config(cli.config.as_deref()).context("Critical: Configuration is malformed")?;
    cli.apply(&mut config);

    let _log = init_logging(&config.logging, cli.verbose)?;

    let context = ReferenceContext::from_config(&config).context("Opening the reference registry")?;
    run(&cli, &context, &mut std::io::stdout().lock())
}
