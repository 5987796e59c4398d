//! rfpack - packages the current directory into a deployment archive.

mod cli;
mod error;
mod logging;
mod output;

use anyhow::Result;
use clap::Parser;
use rfpack_core::PackageConfig;
use rfpack_core::create_deployment_archive;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    logging::init_tracing(cli.verbose)?;

    let config = PackageConfig::default();
    tracing::debug!(root = %config.root.display(), output = %config.output_name, "packaging");

    let mut reporter = output::ConsoleReporter::new(config.output_name.as_str());
    error::add_archive_context(
        create_deployment_archive(&config, &mut reporter),
        &config.output_name,
    )?;

    Ok(())
}
