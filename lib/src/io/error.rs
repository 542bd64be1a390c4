use thiserror::Error;

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum IoError {
  #[error("unexpected end of stream")]
  EndOfStream,
  #[error("unknown i/o error")]
  ErrorUnknown,
}

pub type IoResult<T> = Result<T, IoError>;
