//! Command-line surface of the `asset-embed` binary.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};

use crate::config::{GenerationRequest, RequestFile};

/// Embed files into a Go source file as a `map[string][]byte`.
#[derive(Debug, Parser)]
#[command(name = "asset-embed", version, about)]
pub struct Cli {
  /// Name of package, required.
  #[arg(long = "pkg", value_name = "NAME")]
  pub package_name: Option<String>,

  /// Name of map variable, required.
  #[arg(long = "var", value_name = "NAME")]
  pub variable_name: Option<String>,

  /// Name of output file, required.
  #[arg(long = "out", value_name = "FILE")]
  pub output_path: Option<PathBuf>,

  /// Base directory of input files; similar to tar -C mode. Defaults to ".".
  #[arg(long = "base", value_name = "DIR")]
  pub base_directory: Option<String>,

  /// Print additional log messages.
  #[arg(long)]
  pub verbose: bool,

  /// Pass data through gzip compression; inputs that are already gzipped are left as-is.
  #[arg(long)]
  pub gzip: bool,

  /// JSON request file supplying defaults for any option not given on the command line.
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Glob patterns of input files, relative to the base directory.
  #[arg(value_name = "PATTERN")]
  pub patterns: Vec<String>,
}

impl Cli {
  /// Build the generation request, merging in the request file when one is given.
  ///
  /// Returns `Ok(None)` when a required value is still missing, in which case the
  /// caller shows usage instead of generating anything.
  pub fn resolve_request(&self) -> Result<Option<GenerationRequest>> {
    let defaults = match &self.config {
      Some(path) => RequestFile::from_path(path)
        .with_context(|| format!("failed to load request file {}", path.display()))?,
      None => RequestFile::default(),
    };

    Ok(defaults.merge(self.overrides()).into_request().ok())
  }

  fn overrides(&self) -> RequestFile {
    RequestFile {
      package_name: self.package_name.clone(),
      variable_name: self.variable_name.clone(),
      output_path: self.output_path.clone(),
      base_directory: self.base_directory.clone(),
      patterns: self.patterns.clone(),
      compress: self.gzip,
      verbose: self.verbose,
    }
  }

  /// Rendered usage text.
  pub fn usage() -> String {
    Cli::command().render_help().to_string()
  }
}
