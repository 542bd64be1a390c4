//! Key URI parsing: `otpauth://{hotp,totp}/LABEL?params` into an
//! [`Account`].
//!
//! Parsing is a single left-to-right pass over the URI bytes. Labels and
//! issuers are percent-decoded, secrets are base32-decoded and integers are
//! decimal, all into the fixed-size buffers of the account record.

mod base32;
mod error;
mod escape;
mod integer;


pub use self::base32::base32_decode;
pub use self::error::*;
pub use self::escape::decode_text;
pub use self::integer::parse_u64;

use crate::account::{
  Account, AccountAlgorithm, SecretBytes, TextBytes, ACCOUNT_NAME_LENGTH_MAX, DIGITS_MAX,
  DIGITS_MIN, ISSUER_LENGTH_MAX, SECRETS_LENGTH_MAX,
};
use crate::hash::HashKind;

const PROTOCOL: &[u8] = b"otpauth://";
const TYPE_SUFFIX: &[u8] = b"otp";

const DEFAULT_DIGITS: u8 = 6;
const DEFAULT_TOTP_PERIOD: u64 = 30;

// enough for issuer, account name and the separating colon
const LABEL_BUFFER_LENGTH: usize = ISSUER_LENGTH_MAX + ACCOUNT_NAME_LENGTH_MAX + 1;

// longest base32 encoding that can still decode into the secrets buffer
const SECRET_ENCODED_LENGTH_MAX: usize = (SECRETS_LENGTH_MAX * 8 + 4) / 5;

const HASH_IDENTIFIER_LENGTH_MAX: usize = 16;

/// Parses a key URI into an account record, enforcing every length and
/// range invariant of the record along the way.
pub fn parse_key_uri(uri: &str) -> KeyUriResult<Account> {
  let mut parser = KeyUriParser::new(uri.as_bytes());

  parser.protocol()?;
  parser.algorithm_type()?;
  parser.label()?;
  parser.query_chain()?;
  parser.finish()
}

struct KeyUriParser<'a> {
  remaining: &'a [u8],
  account: Account,
  secrets_present: bool,
  hash_present: bool,
  hotp_counter_present: bool,
}

impl<'a> KeyUriParser<'a> {
  fn new(uri: &'a [u8]) -> KeyUriParser<'a> {
    KeyUriParser {
      remaining: uri,
      account: Account {
        algorithm: AccountAlgorithm::Hotp { counter: 0 },
        hash: HashKind::Sha1,
        secret: SecretBytes::empty(),
        issuer: TextBytes::empty(),
        account_name: TextBytes::empty(),
        digits: DEFAULT_DIGITS,
      },
      secrets_present: false,
      // SHA-1 is always available as the standing default
      hash_present: true,
      hotp_counter_present: false,
    }
  }

  fn protocol(&mut self) -> KeyUriResult<()> {
    if self.remaining.len() < PROTOCOL.len() || &self.remaining[..PROTOCOL.len()] != PROTOCOL {
      return Err(KeyUriError::MalformedUri);
    }

    self.remaining = &self.remaining[PROTOCOL.len()..];
    Ok(())
  }

  fn algorithm_type(&mut self) -> KeyUriResult<()> {
    let remaining = self.remaining;

    if remaining.is_empty() {
      return Err(KeyUriError::MissingType);
    }

    let slash = find_byte(remaining, b'/').ok_or(KeyUriError::MalformedUri)?;
    if slash != TYPE_SUFFIX.len() + 1 || &remaining[1..slash] != TYPE_SUFFIX {
      return Err(KeyUriError::InvalidType);
    }

    self.account.algorithm = match remaining[0] {
      b'h' => AccountAlgorithm::Hotp { counter: 0 },
      b't' => AccountAlgorithm::Totp {
        period: DEFAULT_TOTP_PERIOD,
      },
      _ => return Err(KeyUriError::InvalidType),
    };

    self.remaining = &remaining[slash + 1..];
    Ok(())
  }

  fn label(&mut self) -> KeyUriResult<()> {
    let remaining = self.remaining;

    let (label, rest) = match find_byte(remaining, b'?') {
      Some(position) => (&remaining[..position], &remaining[position + 1..]),
      None => (remaining, &remaining[remaining.len()..]),
    };
    self.remaining = rest;

    let mut decoded = [0u8; LABEL_BUFFER_LENGTH];
    let decoded_length = match decode_text(&mut decoded, label) {
      Ok(length) => length,
      Err(TextDecodeError::BufferTooShort) => return Err(KeyUriError::TooLongLabel),
      Err(TextDecodeError::InvalidEscape) => return Err(KeyUriError::InvalidTextEscape),
    };
    let decoded = &decoded[..decoded_length];

    // a colon separates the optional issuer from the account name
    let (issuer, account_name) = match find_byte(decoded, b':') {
      Some(position) => (&decoded[..position], &decoded[position + 1..]),
      None => (&decoded[..0], decoded),
    };

    if issuer.len() > ISSUER_LENGTH_MAX {
      return Err(KeyUriError::TooLongIssuer);
    }
    if account_name.len() > ACCOUNT_NAME_LENGTH_MAX {
      return Err(KeyUriError::TooLongAccountName);
    }

    self.account.issuer.set(issuer);
    self.account.account_name.set(account_name);

    Ok(())
  }

  fn query_chain(&mut self) -> KeyUriResult<()> {
    while !self.remaining.is_empty() {
      let remaining = self.remaining;

      let (query, rest) = match find_byte(remaining, b'&') {
        Some(position) => (&remaining[..position], &remaining[position + 1..]),
        None => (remaining, &remaining[remaining.len()..]),
      };
      self.remaining = rest;

      self.query(query)?;
    }

    Ok(())
  }

  fn query(&mut self, query: &[u8]) -> KeyUriResult<()> {
    let separator = find_byte(query, b'=').ok_or(KeyUriError::MalformedUri)?;
    let key = &query[..separator];
    let value = &query[separator + 1..];

    match key {
      b"secret" => self.query_secret(value),
      b"issuer" => self.query_issuer(value),
      b"algorithm" => self.query_algorithm(value),
      b"digits" => self.query_digits(value),
      b"counter" => self.query_counter(value),
      b"period" => self.query_period(value),
      // unknown keys are ignored for forward compatibility
      _ => Ok(()),
    }
  }

  fn query_secret(&mut self, value: &[u8]) -> KeyUriResult<()> {
    if value.len() > SECRET_ENCODED_LENGTH_MAX {
      return Err(KeyUriError::TooLongSecrets);
    }

    let length = match base32_decode(self.account.secret.buffer_mut(), value) {
      Ok(length) => length,
      Err(Base32DecodeError::InvalidEncoding) => return Err(KeyUriError::InvalidSecrets),
      Err(Base32DecodeError::BufferTooShort) => return Err(KeyUriError::TooLongSecrets),
    };
    self.account.secret.set_length(length);

    self.secrets_present = true;
    Ok(())
  }

  fn query_issuer(&mut self, value: &[u8]) -> KeyUriResult<()> {
    let mut decoded = [0u8; ISSUER_LENGTH_MAX];
    let length = match decode_text(&mut decoded, value) {
      Ok(length) => length,
      Err(TextDecodeError::BufferTooShort) => return Err(KeyUriError::TooLongIssuer),
      Err(TextDecodeError::InvalidEscape) => return Err(KeyUriError::InvalidTextEscape),
    };

    // overwrites an issuer derived from the label
    self.account.issuer.set(&decoded[..length]);
    Ok(())
  }

  fn query_algorithm(&mut self, value: &[u8]) -> KeyUriResult<()> {
    if value.len() > HASH_IDENTIFIER_LENGTH_MAX {
      return Err(KeyUriError::InvalidHash);
    }

    // provisioning URIs conventionally spell identifiers in uppercase,
    // the lookup table is lowercase
    let mut lowered = [0u8; HASH_IDENTIFIER_LENGTH_MAX];
    for (target, &source) in lowered.iter_mut().zip(value) {
      *target = source.to_ascii_lowercase();
    }

    self.account.hash = std::str::from_utf8(&lowered[..value.len()])
      .ok()
      .and_then(|identifier| identifier.parse::<HashKind>().ok())
      .ok_or(KeyUriError::InvalidHash)?;

    self.hash_present = true;
    Ok(())
  }

  fn query_digits(&mut self, value: &[u8]) -> KeyUriResult<()> {
    let digits = parse_u64(value).map_err(|_| KeyUriError::InvalidDigits)?;

    if !(u64::from(DIGITS_MIN)..=u64::from(DIGITS_MAX)).contains(&digits) {
      return Err(KeyUriError::InvalidDigits);
    }

    self.account.digits = digits as u8;
    Ok(())
  }

  fn query_counter(&mut self, value: &[u8]) -> KeyUriResult<()> {
    let parsed = parse_u64(value).map_err(|_| KeyUriError::InvalidHotpCounter)?;

    // validated for both types, applied only to hotp
    if let AccountAlgorithm::Hotp { counter } = &mut self.account.algorithm {
      *counter = parsed;
    }

    self.hotp_counter_present = true;
    Ok(())
  }

  fn query_period(&mut self, value: &[u8]) -> KeyUriResult<()> {
    let parsed = parse_u64(value).map_err(|_| KeyUriError::InvalidTotpPeriod)?;

    if parsed < 1 {
      return Err(KeyUriError::InvalidTotpPeriod);
    }

    // validated for both types, applied only to totp
    if let AccountAlgorithm::Totp { period } = &mut self.account.algorithm {
      *period = parsed;
    }

    Ok(())
  }

  fn finish(self) -> KeyUriResult<Account> {
    if !self.secrets_present {
      return Err(KeyUriError::MissingSecrets);
    }
    if !self.hash_present {
      return Err(KeyUriError::MissingHash);
    }
    if matches!(self.account.algorithm, AccountAlgorithm::Hotp { .. })
      && !self.hotp_counter_present
    {
      return Err(KeyUriError::MissingHotpCounter);
    }

    Ok(self.account)
  }
}

fn find_byte(bytes: &[u8], needle: u8) -> Option<usize> {
  bytes.iter().position(|&byte| byte == needle)
}
