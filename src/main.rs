//! yml2props command-line entry point.

use anyhow::Result;
use clap::Parser;
use tracing::error;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use yml2props::cli::Cli;
use yml2props::Converter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let options = cli.to_options()?;
    let report = Converter::new(options).run()?;
    for failure in &report.failed {
        error!("{}", failure);
    }
    report.into_result()?;
    Ok(())
}
