use thiserror::Error;

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum IntegerParseError {
  #[error("invalid decimal encoding")]
  InvalidEncoding,
  #[error("value does not fit in 64 bits")]
  OutOfRange,
}

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum Base32DecodeError {
  #[error("invalid base32 encoding")]
  InvalidEncoding,
  #[error("decoded bytes do not fit the output buffer")]
  BufferTooShort,
}

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum TextDecodeError {
  #[error("decoded text does not fit the output buffer")]
  BufferTooShort,
  #[error("invalid percent escape sequence")]
  InvalidEscape,
}

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum KeyUriError {
  #[error("not an otpauth:// URI")]
  MalformedUri,
  #[error("missing OTP algorithm type")]
  MissingType,
  #[error("invalid OTP algorithm type, expected hotp or totp")]
  InvalidType,
  #[error("label exceeds the maximum length")]
  TooLongLabel,
  #[error("issuer exceeds {} bytes", crate::account::ISSUER_LENGTH_MAX)]
  TooLongIssuer,
  #[error("account name exceeds {} bytes", crate::account::ACCOUNT_NAME_LENGTH_MAX)]
  TooLongAccountName,
  #[error("secret exceeds {} bytes", crate::account::SECRETS_LENGTH_MAX)]
  TooLongSecrets,
  #[error("invalid percent escape in label or issuer")]
  InvalidTextEscape,
  #[error("missing secret parameter")]
  MissingSecrets,
  #[error("missing algorithm parameter")]
  MissingHash,
  #[error("unknown hash algorithm")]
  InvalidHash,
  #[error("missing counter parameter for an hotp account")]
  MissingHotpCounter,
  #[error("invalid counter parameter")]
  InvalidHotpCounter,
  #[error("invalid period parameter")]
  InvalidTotpPeriod,
  #[error("invalid digits parameter, expected 1 to 9")]
  InvalidDigits,
  #[error("secret is not valid base32")]
  InvalidSecrets,
}

pub type KeyUriResult<T> = Result<T, KeyUriError>;
