use thiserror::Error;

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum PasscodeError {
  #[error("no passcode exists at the requested index")]
  DoesNotExist,
}

pub type PasscodeResult<T> = Result<T, PasscodeError>;
