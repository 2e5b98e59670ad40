//! Data structures produced while collecting assets for a generation run.

use std::io;
use std::path::PathBuf;
use std::time::SystemTime;

use thiserror::Error;

/// A single embedded asset keyed by its forward-slash relative path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetEntry {
  /// Path relative to the base directory, always using `/` separators.
  pub relative_path: String,
  /// Bytes embedded for the asset, compressed when requested.
  pub content: Vec<u8>,
}

impl AssetEntry {
  /// Create an entry from a key and payload.
  pub fn new(relative_path: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
    Self {
      relative_path: relative_path.into(),
      content: content.into(),
    }
  }
}

/// Ordered entries produced by one run, in pattern order then match order.
pub type AssetTable = Vec<AssetEntry>;

/// A matched file that survived directory filtering and stat.
#[derive(Debug, Clone)]
pub struct ResolvedFile {
  /// Path as produced by glob expansion.
  pub path: PathBuf,
  /// Modification time reported by the filesystem.
  pub modified: SystemTime,
}

/// An asset read from disk together with the metadata the compressor needs.
#[derive(Debug, Clone)]
pub struct LoadedAsset {
  /// Entry carrying the raw file bytes.
  pub entry: AssetEntry,
  /// Base file name, recorded in the gzip header.
  pub file_name: String,
  /// Modification time, recorded in the gzip header.
  pub modified: SystemTime,
}

/// Why a matched path was left out of the table.
#[derive(Debug, Error)]
pub enum SkipReason {
  /// The glob matched a directory.
  #[error("matched a directory")]
  Directory,
  /// The entry could not be stat'ed.
  #[error("cannot stat input file: {0}")]
  Stat(#[source] io::Error),
  /// The file disappeared or was unreadable.
  #[error("cannot read input file: {0}")]
  Read(#[source] io::Error),
  /// The path does not live under the base directory.
  #[error("cannot compute relative path against {}", .0.display())]
  OutsideBase(PathBuf),
}

/// A path that was skipped along with the reason.
#[derive(Debug)]
pub struct SkippedFile {
  /// Offending path.
  pub path: PathBuf,
  /// Reason it was skipped.
  pub reason: SkipReason,
}

/// Per-file result of a pipeline step: either usable output or a recoverable skip.
#[derive(Debug)]
pub enum FileOutcome<T> {
  /// The step produced a value for the next stage.
  Ready(T),
  /// The file is dropped from the run; the run continues.
  Skipped(SkippedFile),
}

impl<T> FileOutcome<T> {
  /// Shorthand for building a skip outcome.
  pub fn skip(path: impl Into<PathBuf>, reason: SkipReason) -> Self {
    FileOutcome::Skipped(SkippedFile {
      path: path.into(),
      reason,
    })
  }
}

/// Everything gathered from the inputs before emission.
#[derive(Debug, Default)]
pub struct CollectedAssets {
  /// Entries in processing order, possibly with duplicate keys.
  pub entries: AssetTable,
  /// Files dropped along the way.
  pub skipped: Vec<SkippedFile>,
  /// Number of payloads gzip-compressed during collection.
  pub compressed: usize,
}

/// Summary of a successful generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
  /// File the generated source was written to.
  pub output_path: PathBuf,
  /// Map entries present in the generated source.
  pub entries_written: usize,
  /// Matched paths that were skipped.
  pub skipped: usize,
  /// Earlier entries discarded because a later entry reused their key.
  pub duplicates_dropped: usize,
  /// Payloads gzip-compressed by this run.
  pub compressed: usize,
}
