use byteorder::{BigEndian, ByteOrder};

use crate::hash::HashKind;
use crate::io::{ReadResult, Reader, SliceReader};
use crate::mac::HmacContext;

/// HOTP (RFC 4226): an HMAC over the big-endian counter, dynamically
/// truncated and reduced to a decimal passcode.
pub struct HotpContext {
  hmac: HmacContext,
  counter: u64,
  digits: u8,
}

impl HotpContext {
  pub fn new(kind: HashKind, counter: u64, digits: u8) -> HotpContext {
    HotpContext {
      hmac: HmacContext::new(kind),
      counter,
      digits,
    }
  }

  /// Streams shared-secret bytes into the HMAC key.
  pub fn key_digest(&mut self, reader: &mut dyn Reader, key_bytes: usize) -> ReadResult {
    self.hmac.key_digest(reader, key_bytes)
  }

  /// Runs the MAC over the counter and reduces the digest to a passcode of
  /// the configured number of digits. The caller renders it zero-padded.
  pub fn finalize(&mut self) -> u32 {
    self.hmac.key_finalize();

    let counter_bytes = self.counter.to_be_bytes();
    let _ = self
      .hmac
      .message_digest(&mut SliceReader::new(&counter_bytes), counter_bytes.len());

    let digest = self.hmac.finalize();

    // dynamic truncation per RFC 4226 §5.3
    let offset = (digest[digest.len() - 1] & 0x0f) as usize;
    let passcode = BigEndian::read_u32(&digest[offset..offset + 4]) & 0x7fff_ffff;

    passcode % 10u32.pow(u32::from(self.digits))
  }
}
