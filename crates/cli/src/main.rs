use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use mica_cli::args::CliArgs;
use mica_cli::config::Config;
use mica_cli::MainService;

fn main() -> Result<()> {
    let args = CliArgs::parse();

    let level: tracing::Level = args.verbose.into();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load(args.config.as_deref())?;
    let mut service = MainService::new(&config, &args)?;

    match &args.execute {
        Some(line) => service.execute_line(line),
        None => service.run(),
    }
}
