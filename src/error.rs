//! Error types shared across the generation pipeline.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias used by every fallible pipeline step.
pub type EmbedResult<T> = Result<T, EmbedError>;

/// Fatal conditions that abort a generation run.
#[derive(Debug, Error)]
pub enum EmbedError {
  /// A glob pattern could not be parsed.
  #[error("input pattern invalid: {pattern}: {source}")]
  Pattern {
    /// Pattern as given on the command line.
    pattern: String,
    /// Parser diagnostic.
    source: glob::PatternError,
  },
  /// The base directory cannot be used to anchor glob patterns.
  #[error("base directory {0} is not valid UTF-8")]
  NonUtf8Base(PathBuf),
  /// Gzip compression of an in-memory buffer failed.
  #[error("cannot compress {name}: {source}")]
  Compress {
    /// Base name of the asset being compressed.
    name: String,
    /// Encoder error.
    source: io::Error,
  },
  /// The generated source could not be created, written, flushed or synced.
  #[error("cannot write output file {}: {source}", .path.display())]
  Output {
    /// Output path requested by the caller.
    path: PathBuf,
    /// Underlying I/O error.
    source: io::Error,
  },
}
