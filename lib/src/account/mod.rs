//! The account record produced by key URI parsing and consumed by the OTP
//! engine.
//!
//! All buffers are fixed-size and live inside the record; the shared secret
//! is zeroized when the record is dropped.

use log::debug;
use std::fmt;
use std::str;
use zeroize::{Zeroize, ZeroizeOnDrop};

mod error;


pub use self::error::*;

use crate::hash::HashKind;
use crate::io::SliceReader;
use crate::otp::{totp_counter, HotpContext};

pub const SECRETS_LENGTH_MAX: usize = 128;
pub const ISSUER_LENGTH_MAX: usize = 64;
pub const ACCOUNT_NAME_LENGTH_MAX: usize = 64;

pub const DIGITS_MIN: u8 = 1;
pub const DIGITS_MAX: u8 = 9;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccountAlgorithm {
  Hotp { counter: u64 },
  Totp { period: u64 },
}

impl fmt::Display for AccountAlgorithm {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      AccountAlgorithm::Hotp { .. } => write!(f, "hotp"),
      AccountAlgorithm::Totp { .. } => write!(f, "totp"),
    }
  }
}

/// Shared-secret bytes, bounded and zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SecretBytes {
  bytes: [u8; SECRETS_LENGTH_MAX],
  length: u8,
}

impl fmt::Debug for SecretBytes {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_struct("SecretBytes").field("length", &self.length).finish()
  }
}

impl SecretBytes {
  pub(crate) fn empty() -> SecretBytes {
    SecretBytes {
      bytes: [0; SECRETS_LENGTH_MAX],
      length: 0,
    }
  }

  pub(crate) fn buffer_mut(&mut self) -> &mut [u8; SECRETS_LENGTH_MAX] {
    &mut self.bytes
  }

  pub(crate) fn set_length(&mut self, length: usize) {
    self.length = length as u8;
  }

  pub fn as_bytes(&self) -> &[u8] {
    &self.bytes[..self.length as usize]
  }

  pub fn len(&self) -> usize {
    self.length as usize
  }

  pub fn is_empty(&self) -> bool {
    self.length == 0
  }
}

/// Printable-ASCII text, bounded to one label component.
#[derive(Debug)]
pub struct TextBytes {
  bytes: [u8; ISSUER_LENGTH_MAX],
  length: u8,
}

impl TextBytes {
  pub(crate) fn empty() -> TextBytes {
    TextBytes {
      bytes: [0; ISSUER_LENGTH_MAX],
      length: 0,
    }
  }

  pub(crate) fn set(&mut self, text: &[u8]) {
    self.bytes[..text.len()].copy_from_slice(text);
    self.length = text.len() as u8;
  }

  pub fn as_str(&self) -> &str {
    str::from_utf8(&self.bytes[..self.length as usize]).unwrap_or("")
  }

  pub fn is_empty(&self) -> bool {
    self.length == 0
  }
}

/// Time inputs for TOTP accounts; ignored for HOTP.
pub struct TotpParameters {
  pub time_initial: u64,
  pub time_current: u64,
}

#[derive(Debug)]
pub struct Account {
  pub(crate) algorithm: AccountAlgorithm,
  pub(crate) hash: HashKind,
  pub(crate) secret: SecretBytes,
  pub(crate) issuer: TextBytes,
  pub(crate) account_name: TextBytes,
  pub(crate) digits: u8,
}

impl Account {
  pub fn algorithm(&self) -> AccountAlgorithm {
    self.algorithm
  }

  pub fn hash(&self) -> HashKind {
    self.hash
  }

  pub fn secret(&self) -> &[u8] {
    self.secret.as_bytes()
  }

  pub fn issuer(&self) -> &str {
    self.issuer.as_str()
  }

  pub fn account_name(&self) -> &str {
    self.account_name.as_str()
  }

  pub fn digits(&self) -> u8 {
    self.digits
  }

  /// Generates the passcode at a signed `index` relative to the account's
  /// current counter (the stored HOTP counter, or the TOTP counter derived
  /// from `totp`). An offset that would leave the 64-bit counter range is
  /// reported as [`PasscodeError::DoesNotExist`] before any arithmetic
  /// wraps.
  pub fn generate_passcode(&self, totp: &TotpParameters, index: i64) -> PasscodeResult<u32> {
    let base = match self.algorithm {
      AccountAlgorithm::Hotp { counter } => counter,
      AccountAlgorithm::Totp { period } => {
        totp_counter(totp.time_initial, totp.time_current, period)
      }
    };

    let counter = if index < 0 {
      base
        .checked_sub(index.unsigned_abs())
        .ok_or(PasscodeError::DoesNotExist)?
    } else {
      base
        .checked_add(index as u64)
        .ok_or(PasscodeError::DoesNotExist)?
    };

    debug!("generating {} digit passcode for counter {}", self.digits, counter);

    let mut hotp = HotpContext::new(self.hash, counter, self.digits);
    let _ = hotp.key_digest(&mut SliceReader::new(self.secret.as_bytes()), self.secret.len());

    Ok(hotp.finalize())
  }
}
