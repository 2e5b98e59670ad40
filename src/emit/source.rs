use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use log::{debug, warn};

use super::quote::go_quote;
use crate::error::{EmbedError, EmbedResult};
use crate::models::AssetEntry;

/// Tool name recorded in the generated file's header.
pub const GENERATOR_NAME: &str = "asset-embed";

/// Drop entries whose key reappears later, keeping the last occurrence in place.
///
/// Returns the surviving entries and how many were dropped.
pub fn dedup_last_wins(entries: Vec<AssetEntry>) -> (Vec<AssetEntry>, usize) {
  let mut last_index: HashMap<String, usize> = HashMap::with_capacity(entries.len());
  for (index, entry) in entries.iter().enumerate() {
    last_index.insert(entry.relative_path.clone(), index);
  }

  let total = entries.len();
  let kept: Vec<AssetEntry> = entries
    .into_iter()
    .enumerate()
    .filter_map(|(index, entry)| {
      if last_index.get(&entry.relative_path) == Some(&index) {
        Some(entry)
      } else {
        warn!(
          "Duplicate key {}, keeping the later match",
          entry.relative_path
        );
        None
      }
    })
    .collect();

  let dropped = total - kept.len();
  (kept, dropped)
}

/// Stream the Go source for `entries` into `writer`.
pub fn render_into<W: Write>(
  writer: &mut W,
  package_name: &str,
  variable_name: &str,
  entries: &[AssetEntry],
) -> io::Result<()> {
  write!(
    writer,
    "// This file was generated by {GENERATOR_NAME}. DO NOT EDIT.\n\npackage {package_name}\n\n"
  )?;
  writeln!(writer, "var {variable_name} = map[string][]byte{{")?;
  for entry in entries {
    writeln!(
      writer,
      "\t{}: []byte({}),",
      go_quote(entry.relative_path.as_bytes()),
      go_quote(&entry.content)
    )?;
  }
  writeln!(writer, "}}")
}

/// Render the Go source for `entries` into a string.
pub fn render_source(package_name: &str, variable_name: &str, entries: &[AssetEntry]) -> String {
  let mut buffer = Vec::new();
  render_into(&mut buffer, package_name, variable_name, entries)
    .expect("writing into a Vec never fails");
  String::from_utf8(buffer).expect("generated source is valid UTF-8")
}

/// Create or truncate `output_path` and write the generated source to it.
///
/// The buffered writer is flushed and the file synced before returning, so a
/// successful return means the whole artifact reached the filesystem.
pub fn write_source(
  output_path: &Path,
  package_name: &str,
  variable_name: &str,
  entries: &[AssetEntry],
) -> EmbedResult<()> {
  let output_error = |source: io::Error| EmbedError::Output {
    path: output_path.to_path_buf(),
    source,
  };

  debug!("Creating {}", output_path.display());
  let file = File::create(output_path).map_err(output_error)?;
  let mut writer = BufWriter::new(file);
  render_into(&mut writer, package_name, variable_name, entries).map_err(output_error)?;

  debug!("Flushing and closing {}", output_path.display());
  let file = writer
    .into_inner()
    .map_err(|err| output_error(err.into_error()))?;
  file.sync_all().map_err(output_error)
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::fs;
  use tempfile::tempdir;

  #[test]
  fn renders_expected_layout() {
    let entries = vec![
      AssetEntry::new("a/1.txt", b"one\n".to_vec()),
      AssetEntry::new("b/bin", vec![0x00, 0xff]),
    ];
    let source = render_source("assets", "Files", &entries);
    assert_eq!(
      source,
      "// This file was generated by asset-embed. DO NOT EDIT.\n\
       \n\
       package assets\n\
       \n\
       var Files = map[string][]byte{\n\
       \t\"a/1.txt\": []byte(\"one\\n\"),\n\
       \t\"b/bin\": []byte(\"\\x00\\xff\"),\n\
       }\n"
    );
  }

  #[test]
  fn renders_empty_map() {
    let source = render_source("assets", "Files", &[]);
    assert!(source.ends_with("var Files = map[string][]byte{\n}\n"));
  }

  #[test]
  fn renders_unicode_identifiers_verbatim() {
    let source = render_source("ресурсы", "Файлы", &[]);
    assert!(source.contains("\npackage ресурсы\n"));
    assert!(source.contains("var Файлы = map[string][]byte{\n"));
  }

  #[test]
  fn keeps_last_duplicate_in_its_position() {
    let entries = vec![
      AssetEntry::new("x.txt", b"first".to_vec()),
      AssetEntry::new("y.txt", b"y".to_vec()),
      AssetEntry::new("x.txt", b"second".to_vec()),
    ];
    let (kept, dropped) = dedup_last_wins(entries);
    assert_eq!(dropped, 1);
    assert_eq!(
      kept,
      vec![
        AssetEntry::new("y.txt", b"y".to_vec()),
        AssetEntry::new("x.txt", b"second".to_vec()),
      ]
    );
  }

  #[test]
  fn unique_keys_pass_through() {
    let entries = vec![
      AssetEntry::new("a", b"a".to_vec()),
      AssetEntry::new("b", b"b".to_vec()),
    ];
    let (kept, dropped) = dedup_last_wins(entries.clone());
    assert_eq!(dropped, 0);
    assert_eq!(kept, entries);
  }

  #[test]
  fn write_source_truncates_existing_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let output = dir.path().join("assets.go");
    fs::write(&output, "x".repeat(4096))?;

    let entries = vec![AssetEntry::new("a.txt", b"a".to_vec())];
    write_source(&output, "assets", "Files", &entries)?;

    assert_eq!(
      fs::read_to_string(&output)?,
      render_source("assets", "Files", &entries)
    );
    Ok(())
  }

  #[test]
  fn write_source_reports_uncreatable_output() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("missing-dir").join("assets.go");
    let err = write_source(&output, "assets", "Files", &[]).unwrap_err();
    assert!(matches!(err, EmbedError::Output { ref path, .. } if *path == output));
  }
}
