//! Idempotent gzip compression of asset payloads.

use std::io::Write;
use std::time::{SystemTime, UNIX_EPOCH};

use flate2::{Compression, GzBuilder};

use crate::error::{EmbedError, EmbedResult};

/// The two bytes every gzip member starts with.
pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Bytes chosen for embedding, tagged with what happened to them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
  /// Compression disabled; the input as read.
  Raw(Vec<u8>),
  /// Input already started with the gzip magic and was passed through.
  AlreadyCompressed(Vec<u8>),
  /// Freshly gzipped input.
  Compressed(Vec<u8>),
}

impl Payload {
  /// Bytes to embed.
  pub fn into_bytes(self) -> Vec<u8> {
    match self {
      Payload::Raw(bytes) | Payload::AlreadyCompressed(bytes) | Payload::Compressed(bytes) => bytes,
    }
  }

  /// Whether this call performed compression.
  pub fn was_compressed(&self) -> bool {
    matches!(self, Payload::Compressed(_))
  }
}

/// Whether `content` already looks like a gzip stream.
pub fn is_gzip(content: &[u8]) -> bool {
  content.starts_with(&GZIP_MAGIC)
}

/// Produce the payload for one asset.
///
/// With `enabled` unset the bytes are returned as-is. Otherwise input that is
/// already gzipped passes through untouched and anything else is compressed at
/// the best level with `name` and `modified` recorded in the gzip header.
pub fn prepare_payload(
  enabled: bool,
  content: Vec<u8>,
  name: &str,
  modified: SystemTime,
) -> EmbedResult<Payload> {
  if !enabled {
    return Ok(Payload::Raw(content));
  }
  if is_gzip(&content) {
    return Ok(Payload::AlreadyCompressed(content));
  }
  gzip(&content, name, modified).map(Payload::Compressed)
}

fn gzip(content: &[u8], name: &str, modified: SystemTime) -> EmbedResult<Vec<u8>> {
  let header_name: Vec<u8> = name.bytes().filter(|byte| *byte != 0).collect();
  let mut encoder = GzBuilder::new()
    .filename(header_name)
    .mtime(header_mtime(modified))
    .write(Vec::with_capacity(content.len() / 2), Compression::best());

  let compressed = match encoder.write_all(content) {
    Ok(()) => encoder.finish(),
    Err(err) => Err(err),
  };
  compressed.map_err(|source| EmbedError::Compress {
    name: name.to_string(),
    source,
  })
}

/// Seconds since the epoch as stored in the gzip MTIME field, 0 when it does not fit.
fn header_mtime(modified: SystemTime) -> u32 {
  modified
    .duration_since(UNIX_EPOCH)
    .ok()
    .and_then(|elapsed| u32::try_from(elapsed.as_secs()).ok())
    .unwrap_or(0)
}

#[cfg(test)]
mod tests {
  use super::*;
  use flate2::read::GzDecoder;
  use std::io::Read;
  use std::time::Duration;

  fn stamp() -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(1_500_000_000)
  }

  #[test]
  fn disabled_returns_input_unchanged() {
    let payload = prepare_payload(false, b"plain text".to_vec(), "a.txt", stamp()).unwrap();
    assert_eq!(payload, Payload::Raw(b"plain text".to_vec()));
  }

  #[test]
  fn compresses_and_tags_header() {
    let original = b"hello hello hello hello".repeat(20);
    let payload = prepare_payload(true, original.clone(), "greeting.txt", stamp()).unwrap();
    assert!(payload.was_compressed());

    let bytes = payload.into_bytes();
    assert!(is_gzip(&bytes));
    assert!(bytes.len() < original.len());

    let mut decoder = GzDecoder::new(bytes.as_slice());
    let mut decoded = Vec::new();
    decoder.read_to_end(&mut decoded).unwrap();
    assert_eq!(decoded, original);

    let header = decoder.header().unwrap();
    assert_eq!(header.filename(), Some(&b"greeting.txt"[..]));
    assert_eq!(header.mtime(), 1_500_000_000);
  }

  #[test]
  fn already_gzipped_input_is_untouched() {
    let once = prepare_payload(true, b"payload".to_vec(), "p.bin", stamp())
      .unwrap()
      .into_bytes();
    let twice = prepare_payload(true, once.clone(), "p.bin", stamp()).unwrap();
    assert_eq!(twice, Payload::AlreadyCompressed(once));
  }

  #[test]
  fn magic_prefix_alone_counts_as_compressed() {
    let input = vec![0x1f, 0x8b, 0x00, 0xff];
    let payload = prepare_payload(true, input.clone(), "x", stamp()).unwrap();
    assert_eq!(payload.into_bytes(), input);
  }

  #[test]
  fn short_inputs_are_compressed() {
    for input in [Vec::new(), vec![0x1f]] {
      let payload = prepare_payload(true, input.clone(), "tiny", stamp()).unwrap();
      assert!(payload.was_compressed());

      let mut decoded = Vec::new();
      GzDecoder::new(payload.into_bytes().as_slice())
        .read_to_end(&mut decoded)
        .unwrap();
      assert_eq!(decoded, input);
    }
  }

  #[test]
  fn out_of_range_mtime_is_zero() {
    assert_eq!(header_mtime(UNIX_EPOCH - Duration::from_secs(10)), 0);
    assert_eq!(header_mtime(UNIX_EPOCH + Duration::from_secs(u64::from(u32::MAX) + 1)), 0);
  }
}
