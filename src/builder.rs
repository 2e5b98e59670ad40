//! Generation orchestrator driving resolve, load, compress and emit in order.

use log::debug;

use crate::compress::prepare_payload;
use crate::config::GenerationRequest;
use crate::emit::{dedup_last_wins, render_source, write_source};
use crate::error::EmbedResult;
use crate::loader::load_asset;
use crate::models::{CollectedAssets, FileOutcome, GenerationReport, LoadedAsset, SkippedFile};
use crate::resolve::resolve_pattern;

/// High-level helper that turns a [`GenerationRequest`] into Go source.
pub struct EmbedBuilder<'a> {
  request: &'a GenerationRequest,
}

impl<'a> EmbedBuilder<'a> {
  /// Create a builder for the provided request.
  pub fn new(request: &'a GenerationRequest) -> Self {
    Self { request }
  }

  /// Resolve, load and optionally compress every input, in pattern order.
  ///
  /// Only malformed patterns and compression failures abort; everything else is
  /// recorded as a skip.
  pub fn collect(&self) -> EmbedResult<CollectedAssets> {
    let base = &self.request.base_directory;
    let mut collected = CollectedAssets::default();

    for pattern in &self.request.patterns {
      debug!("Processing pattern {pattern}");
      for outcome in resolve_pattern(base, pattern)? {
        let file = match outcome {
          FileOutcome::Ready(file) => file,
          FileOutcome::Skipped(skipped) => {
            record_skip(&mut collected, skipped);
            continue;
          }
        };

        debug!("Processing file {}", file.path.display());
        match load_asset(base, &file) {
          FileOutcome::Ready(asset) => self.accept(&mut collected, asset)?,
          FileOutcome::Skipped(skipped) => record_skip(&mut collected, skipped),
        }
      }
    }

    Ok(collected)
  }

  /// Collect the inputs and render the generated source without touching the output path.
  pub fn render(&self) -> EmbedResult<String> {
    let collected = self.collect()?;
    let (entries, _) = dedup_last_wins(collected.entries);
    Ok(render_source(
      &self.request.package_name,
      &self.request.variable_name,
      &entries,
    ))
  }

  /// Collect the inputs and write the generated source to the requested output path.
  ///
  /// The output file is opened only after every input has been collected.
  pub fn build(&self) -> EmbedResult<GenerationReport> {
    let CollectedAssets {
      entries,
      skipped,
      compressed,
    } = self.collect()?;
    let (entries, duplicates_dropped) = dedup_last_wins(entries);

    write_source(
      &self.request.output_path,
      &self.request.package_name,
      &self.request.variable_name,
      &entries,
    )?;

    Ok(GenerationReport {
      output_path: self.request.output_path.clone(),
      entries_written: entries.len(),
      skipped: skipped.len(),
      duplicates_dropped,
      compressed,
    })
  }

  fn accept(&self, collected: &mut CollectedAssets, asset: LoadedAsset) -> EmbedResult<()> {
    let LoadedAsset {
      mut entry,
      file_name,
      modified,
    } = asset;

    if self.request.compress {
      debug!("Applying gzip compression to content of {file_name}");
    }
    let payload = prepare_payload(self.request.compress, entry.content, &file_name, modified)?;
    if payload.was_compressed() {
      collected.compressed += 1;
    }
    entry.content = payload.into_bytes();
    collected.entries.push(entry);
    Ok(())
  }
}

fn record_skip(collected: &mut CollectedAssets, skipped: SkippedFile) {
  debug!("Skipping {}: {}", skipped.path.display(), skipped.reason);
  collected.skipped.push(skipped);
}
