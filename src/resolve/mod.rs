//! Expand glob patterns against the base directory into ordered candidate files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

mod pattern;

use glob::{MatchOptions, Pattern};

use crate::config::from_slash;
use crate::error::{EmbedError, EmbedResult};
use crate::models::{FileOutcome, ResolvedFile, SkipReason};

pub use pattern::translate_pattern;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
  case_sensitive: true,
  require_literal_separator: true,
  require_literal_leading_dot: false,
};

/// Expand `pattern` under `base` into sorted per-file outcomes.
///
/// Matches that are directories or cannot be stat'ed come back as skips. A
/// malformed pattern fails the whole run.
pub fn resolve_pattern(base: &Path, pattern: &str) -> EmbedResult<Vec<FileOutcome<ResolvedFile>>> {
  let full_pattern = anchor_pattern(base, pattern)?;
  let paths = glob::glob_with(&full_pattern, MATCH_OPTIONS).map_err(|source| EmbedError::Pattern {
    pattern: pattern.to_string(),
    source,
  })?;

  let mut matched = Vec::new();
  let mut outcomes = Vec::new();
  for result in paths {
    match result {
      Ok(path) => matched.push(path),
      Err(err) => {
        let path = err.path().to_path_buf();
        outcomes.push(FileOutcome::skip(path, SkipReason::Stat(err.into())));
      }
    }
  }
  matched.sort();

  outcomes.extend(matched.into_iter().map(stat_candidate));
  Ok(outcomes)
}

fn stat_candidate(path: PathBuf) -> FileOutcome<ResolvedFile> {
  match fs::metadata(&path) {
    Ok(metadata) if metadata.is_dir() => FileOutcome::skip(path, SkipReason::Directory),
    Ok(metadata) => {
      let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
      FileOutcome::Ready(ResolvedFile { path, modified })
    }
    Err(err) => FileOutcome::skip(path, SkipReason::Stat(err)),
  }
}

/// Build the glob expression for `pattern` rooted at `base`.
///
/// The base is escaped so its own characters never act as wildcards and
/// leading slashes in the pattern are dropped so it always stays under the base.
fn anchor_pattern(base: &Path, pattern: &str) -> EmbedResult<String> {
  let base_str = base
    .to_str()
    .ok_or_else(|| EmbedError::NonUtf8Base(base.to_path_buf()))?;

  let translated = translate_pattern(pattern).map_err(|source| EmbedError::Pattern {
    pattern: pattern.to_string(),
    source,
  })?;
  let relative = translated.trim_start_matches('/');
  let joined = Path::new(&Pattern::escape(base_str)).join(from_slash(relative));
  Ok(joined.to_string_lossy().into_owned())
}
