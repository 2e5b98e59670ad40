//! Read resolved files and compute their canonical keys.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::models::{AssetEntry, FileOutcome, LoadedAsset, ResolvedFile, SkipReason};

/// Read `file` and key it relative to `base`.
pub fn load_asset(base: &Path, file: &ResolvedFile) -> FileOutcome<LoadedAsset> {
  let content = match fs::read(&file.path) {
    Ok(content) => content,
    Err(err) => return FileOutcome::skip(&file.path, SkipReason::Read(err)),
  };

  let Some(relative_path) = relative_key(base, &file.path) else {
    return FileOutcome::skip(&file.path, SkipReason::OutsideBase(base.to_path_buf()));
  };

  let file_name = file
    .path
    .file_name()
    .map(|name| name.to_string_lossy().into_owned())
    .unwrap_or_default();

  FileOutcome::Ready(LoadedAsset {
    entry: AssetEntry::new(relative_path, content),
    file_name,
    modified: file.modified,
  })
}

/// Forward-slash path of `path` relative to `base`, compared lexically.
///
/// Returns `None` when `path` is not inside `base` or names `base` itself.
pub fn relative_key(base: &Path, path: &Path) -> Option<String> {
  let base = lexical_components(base);
  let path = lexical_components(path);

  if path.len() <= base.len() || path[..base.len()] != base[..] {
    return None;
  }

  let rest: Vec<String> = path[base.len()..]
    .iter()
    .map(|component| component.to_string_lossy().into_owned())
    .collect();
  Some(rest.join("/"))
}

fn lexical_components(path: &Path) -> Vec<PathBuf> {
  let mut components: Vec<PathBuf> = Vec::new();
  for component in path.components() {
    match component {
      Component::CurDir => {}
      Component::ParentDir => match components.last() {
        Some(last) if last.as_os_str() != ".." && !is_root(last) => {
          components.pop();
        }
        _ => components.push(PathBuf::from("..")),
      },
      other => components.push(PathBuf::from(other.as_os_str())),
    }
  }
  components
}

fn is_root(component: &Path) -> bool {
  component.has_root() && component.parent().is_none()
}
