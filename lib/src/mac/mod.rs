//! Streaming HMAC per RFC 2104 / FIPS 198-1.
//!
//! The key is ingested incrementally without ever buffering more than one
//! hash block of it: short keys accumulate in the K0 buffer, and the moment
//! the key outgrows a block the buffered bytes and everything that follows
//! are hashed down instead.

use zeroize::Zeroize;

use crate::hash::{HashContext, HashKind, BLOCK_LENGTH_MAX, DIGEST_LENGTH_MAX};
use crate::io::{ReadResult, Reader, SliceReader};


const HMAC_IPAD: u8 = 0x36;
const HMAC_OPAD: u8 = 0x5c;

pub struct HmacContext {
  hash: HashContext,
  k0: [u8; BLOCK_LENGTH_MAX],
  digest_buffer: [u8; DIGEST_LENGTH_MAX],
  block_bytes: usize,
  digest_bytes: usize,
  k0_capacity: usize,
  k0_hash_initiated: bool,
}

impl HmacContext {
  pub fn new(kind: HashKind) -> HmacContext {
    HmacContext {
      hash: HashContext::new(kind),
      k0: [0; BLOCK_LENGTH_MAX],
      digest_buffer: [0; DIGEST_LENGTH_MAX],
      block_bytes: kind.block_length(),
      digest_bytes: kind.digest_length(),
      k0_capacity: kind.block_length(),
      k0_hash_initiated: false,
    }
  }

  pub fn kind(&self) -> HashKind {
    self.hash.kind()
  }

  pub fn digest_length(&self) -> usize {
    self.digest_bytes
  }

  /// Resets the context for a fresh key and message.
  pub fn initialize(&mut self) {
    self.hash.initialize();
    self.k0_capacity = self.block_bytes;
    self.k0_hash_initiated = false;
  }

  /// Feeds up to `key_bytes` key bytes from `reader`.
  ///
  /// The returned count covers bytes accepted into the K0 buffer as well as
  /// bytes hashed down, and a short or failing read leaves the context
  /// consistent for a retry.
  pub fn key_digest(&mut self, reader: &mut dyn Reader, key_bytes: usize) -> ReadResult {
    // the key already outgrew the K0 buffer, everything streams into the hash
    if self.k0_hash_initiated {
      return self.hash.digest(reader, key_bytes);
    }

    // this call pushes the key past one block
    if key_bytes > self.k0_capacity {
      return self.key_digest_rollover(reader, key_bytes);
    }

    // the key still fits, append to the K0 buffer
    let fill = self.block_bytes - self.k0_capacity;
    let result = reader.read_all(&mut self.k0[fill..fill + key_bytes]);
    self.k0_capacity -= result.bytes;

    result
  }

  fn key_digest_rollover(&mut self, reader: &mut dyn Reader, key_bytes: usize) -> ReadResult {
    let fill = self.block_bytes - self.k0_capacity;
    let residual_bytes = key_bytes - self.k0_capacity;

    // top up K0 first so an i/o failure can surface before any hashing starts
    let result = reader.read_all(&mut self.k0[fill..self.block_bytes]);
    self.k0_capacity -= result.bytes;
    if !result.is_success() {
      return result;
    }

    let consumed = key_bytes - residual_bytes;

    let HmacContext {
      hash,
      k0,
      block_bytes,
      ..
    } = self;

    hash.initialize();
    let _ = hash.digest(&mut SliceReader::new(&k0[..*block_bytes]), *block_bytes);

    let result = hash.digest(reader, residual_bytes);

    // only mark hashing as initiated once a remainder byte actually entered
    // the hash, otherwise a failed read here would leave a key that still
    // fits exactly in one block being treated as oversized at finalize
    if result.bytes != 0 {
      self.k0_hash_initiated = true;
    }

    ReadResult {
      status: result.status,
      bytes: result.bytes + consumed,
    }
  }

  /// Normalizes the key to one block, applies the inner padding and starts
  /// the inner hash.
  pub fn key_finalize(&mut self) {
    if self.k0_hash_initiated {
      let HmacContext {
        hash,
        k0,
        digest_bytes,
        ..
      } = self;

      let key_digest = hash.finalize();
      k0[..*digest_bytes].copy_from_slice(key_digest);
      k0[*digest_bytes..].fill(0x00);
    } else {
      let filled = self.block_bytes - self.k0_capacity;
      self.k0[filled..].fill(0x00);
    }

    for byte in self.k0[..self.block_bytes].iter_mut() {
      *byte ^= HMAC_IPAD;
    }

    let HmacContext {
      hash,
      k0,
      block_bytes,
      ..
    } = self;

    hash.initialize();
    let _ = hash.digest(&mut SliceReader::new(&k0[..*block_bytes]), *block_bytes);
  }

  /// Feeds message bytes into the inner hash. Only valid after
  /// [`HmacContext::key_finalize`].
  pub fn message_digest(&mut self, reader: &mut dyn Reader, message_bytes: usize) -> ReadResult {
    self.hash.digest(reader, message_bytes)
  }

  /// Completes `H((K0 ^ opad) || H((K0 ^ ipad) || message))`.
  pub fn finalize(&mut self) -> &[u8] {
    {
      let HmacContext {
        hash,
        digest_buffer,
        digest_bytes,
        ..
      } = self;

      let inner_digest = hash.finalize();
      digest_buffer[..*digest_bytes].copy_from_slice(inner_digest);
    }

    // K0 currently holds K0 ^ ipad, a single xor flips it to K0 ^ opad
    for byte in self.k0[..self.block_bytes].iter_mut() {
      *byte ^= HMAC_IPAD ^ HMAC_OPAD;
    }

    let HmacContext {
      hash,
      k0,
      digest_buffer,
      block_bytes,
      digest_bytes,
      ..
    } = self;

    hash.initialize();
    let _ = hash.digest(&mut SliceReader::new(&k0[..*block_bytes]), *block_bytes);
    let _ = hash.digest(
      &mut SliceReader::new(&digest_buffer[..*digest_bytes]),
      *digest_bytes,
    );

    hash.finalize()
  }
}

impl Drop for HmacContext {
  fn drop(&mut self) {
    self.k0.zeroize();
    self.digest_buffer.zeroize();
  }
}
