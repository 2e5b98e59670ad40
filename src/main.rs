use anyhow::{Context, Result};
use asset_embed::{Cli, EmbedBuilder};
use clap::Parser;
use log::{LevelFilter, debug};

fn main() -> Result<()> {
  let cli = Cli::parse();

  let Some(request) = cli.resolve_request()? else {
    eprint!("{}", Cli::usage());
    return Ok(());
  };

  init_logging(request.verbose);

  let report = EmbedBuilder::new(&request)
    .build()
    .with_context(|| format!("failed to generate {}", request.output_path.display()))?;

  debug!(
    "Wrote {} entries to {} ({} skipped, {} duplicates dropped, {} compressed)",
    report.entries_written,
    report.output_path.display(),
    report.skipped,
    report.duplicates_dropped,
    report.compressed
  );
  Ok(())
}

fn init_logging(verbose: bool) {
  let level = if verbose {
    LevelFilter::Debug
  } else {
    LevelFilter::Warn
  };
  env_logger::Builder::new()
    .filter_level(level)
    .parse_default_env()
    .init();
}
