//! Streaming SHA-1 and SHA-2 digests.
//!
//! All seven algorithms share the same lifecycle: `initialize`, any number
//! of `digest` calls pulling bytes from a [`Reader`], then `finalize`.
//! Partial input is staged in a one-block ring buffer inside the context,
//! so arbitrarily long messages digest without any allocation. After
//! `finalize` the context must be re-initialized before further use.

use byteorder::{BigEndian, ByteOrder};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

mod sha1;
mod sha2_32;
mod sha2_64;

#[cfg(test)]
mod tests;

pub use self::sha1::Sha1Context;
pub use self::sha2_32::Sha232Context;
pub use self::sha2_64::Sha264Context;

use crate::io::{ReadResult, Reader};

/// Largest block length across all algorithms, sizing the buffers of
/// downstream consumers.
pub const BLOCK_LENGTH_MAX: usize = 128;

/// Largest digest length across all algorithms.
pub const DIGEST_LENGTH_MAX: usize = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HashKind {
  Sha1,
  Sha224,
  Sha256,
  Sha384,
  Sha512,
  Sha512_224,
  Sha512_256,
}

impl HashKind {
  pub const ALL: [HashKind; 7] = [
    HashKind::Sha1,
    HashKind::Sha224,
    HashKind::Sha256,
    HashKind::Sha384,
    HashKind::Sha512,
    HashKind::Sha512_224,
    HashKind::Sha512_256,
  ];

  /// Canonical lowercase identifier, as used in key URIs.
  pub fn identifier(self) -> &'static str {
    match self {
      HashKind::Sha1 => "sha1",
      HashKind::Sha224 => "sha224",
      HashKind::Sha256 => "sha256",
      HashKind::Sha384 => "sha384",
      HashKind::Sha512 => "sha512",
      HashKind::Sha512_224 => "sha512-224",
      HashKind::Sha512_256 => "sha512-256",
    }
  }

  pub fn block_length(self) -> usize {
    match self {
      HashKind::Sha1 | HashKind::Sha224 | HashKind::Sha256 => 64,
      _ => 128,
    }
  }

  pub fn digest_length(self) -> usize {
    match self {
      HashKind::Sha1 => 20,
      HashKind::Sha224 | HashKind::Sha512_224 => 28,
      HashKind::Sha256 | HashKind::Sha512_256 => 32,
      HashKind::Sha384 => 48,
      HashKind::Sha512 => 64,
    }
  }
}

impl fmt::Display for HashKind {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.write_str(self.identifier())
  }
}

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("unknown hash identifier")]
pub struct UnknownHashIdentifier;

impl FromStr for HashKind {
  type Err = UnknownHashIdentifier;

  fn from_str(s: &str) -> Result<HashKind, UnknownHashIdentifier> {
    HashKind::ALL
      .into_iter()
      .find(|kind| kind.identifier() == s)
      .ok_or(UnknownHashIdentifier)
  }
}

/// A hash context with the per-family state held inline.
pub enum HashContext {
  Sha1(Sha1Context),
  Sha232(Sha232Context),
  Sha264(Sha264Context),
}

impl HashContext {
  pub fn new(kind: HashKind) -> HashContext {
    match kind {
      HashKind::Sha1 => HashContext::Sha1(Sha1Context::new()),
      HashKind::Sha224 | HashKind::Sha256 => HashContext::Sha232(Sha232Context::new(kind)),
      _ => HashContext::Sha264(Sha264Context::new(kind)),
    }
  }

  pub fn kind(&self) -> HashKind {
    match self {
      HashContext::Sha1(_) => HashKind::Sha1,
      HashContext::Sha232(context) => context.kind(),
      HashContext::Sha264(context) => context.kind(),
    }
  }

  /// Installs the algorithm IV and empties the ring buffer.
  pub fn initialize(&mut self) {
    match self {
      HashContext::Sha1(context) => context.initialize(),
      HashContext::Sha232(context) => context.initialize(),
      HashContext::Sha264(context) => context.initialize(),
    }
  }

  /// Pulls up to `bytes` bytes from `reader` into the digest. A short or
  /// failing read is forwarded with the accumulated count; the context
  /// stays valid and digestion may resume.
  pub fn digest(&mut self, reader: &mut dyn Reader, bytes: usize) -> ReadResult {
    match self {
      HashContext::Sha1(context) => context.digest(reader, bytes),
      HashContext::Sha232(context) => context.digest(reader, bytes),
      HashContext::Sha264(context) => context.digest(reader, bytes),
    }
  }

  /// Pads, runs the trailing compressions and returns the digest bytes.
  pub fn finalize(&mut self) -> &[u8] {
    match self {
      HashContext::Sha1(context) => context.finalize(),
      HashContext::Sha232(context) => context.finalize(),
      HashContext::Sha264(context) => context.finalize(),
    }
  }
}

/// Shared ring-buffer fill loop. Compresses every time the ring fills and
/// tracks the running byte total for the padding length field.
fn stream_digest<const BLOCK: usize>(
  ring: &mut [u8; BLOCK],
  capacity: &mut usize,
  total: &mut u64,
  reader: &mut dyn Reader,
  bytes: usize,
  compress: &mut dyn FnMut(&[u8; BLOCK]),
) -> ReadResult {
  let mut pulled = 0;
  let mut remaining = bytes;

  while remaining != 0 {
    let fill = BLOCK - *capacity;
    let wanted = remaining.min(*capacity);

    let result = reader.read(&mut ring[fill..fill + wanted]);
    *capacity -= result.bytes;
    *total += result.bytes as u64;
    pulled += result.bytes;
    remaining -= result.bytes;

    if *capacity == 0 {
      compress(ring);
      *capacity = BLOCK;
    }

    if !result.is_success() {
      return ReadResult {
        status: result.status,
        bytes: pulled,
      };
    }
  }

  ReadResult::success(pulled)
}

/// Shared padding: `0x80` terminator, zero fill to the length-field
/// boundary, the bit length as a big-endian 64-bit integer, and the one or
/// two trailing compressions.
fn finalize_digest<const BLOCK: usize>(
  ring: &mut [u8; BLOCK],
  capacity: &mut usize,
  total: u64,
  compress: &mut dyn FnMut(&[u8; BLOCK]),
) {
  const LENGTH_FIELD: usize = 8;

  let residual = BLOCK - *capacity;
  ring[residual] = 0x80;

  if residual + 1 + LENGTH_FIELD <= BLOCK {
    ring[residual + 1..BLOCK - LENGTH_FIELD].fill(0x00);
  } else {
    // the length field does not fit after the terminator, emit an extra block
    ring[residual + 1..].fill(0x00);
    compress(ring);
    ring[..BLOCK - LENGTH_FIELD].fill(0x00);
  }

  BigEndian::write_u64(&mut ring[BLOCK - LENGTH_FIELD..], total.wrapping_mul(8));
  compress(ring);

  *capacity = BLOCK;
}
