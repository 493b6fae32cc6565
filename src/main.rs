//! CLI entry point for snake-order mosaic assembly

use clap::Parser;
use snakemosaic::io::cli::{Cli, MosaicJob};

fn main() -> snakemosaic::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(cli.default_log_level()),
    )
    .init();

    let job = MosaicJob::new(cli);
    job.run()?;
    Ok(())
}
