//! Pull-based byte streams over in-memory buffers.
//!
//! The hash and MAC engines consume their input through the [`Reader`]
//! capability so they never need to know where bytes come from. Short reads
//! are permitted with a `Success` status; callers that need an exact count
//! use [`Reader::read_all`].

use byteorder::{BigEndian, ByteOrder, LittleEndian};

mod error;

#[cfg(test)]
mod tests;

pub use self::error::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReadStatus {
  Success,
  EndOfStream,
  ErrorUnknown,
}

/// Outcome of a single read: the status together with the number of bytes
/// that actually arrived before the status was raised.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReadResult {
  pub status: ReadStatus,
  pub bytes: usize,
}

impl ReadResult {
  pub fn success(bytes: usize) -> ReadResult {
    ReadResult {
      status: ReadStatus::Success,
      bytes,
    }
  }

  pub fn is_success(&self) -> bool {
    self.status == ReadStatus::Success
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteStatus {
  Success,
  EndOfStream,
  ErrorUnknown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WriteResult {
  pub status: WriteStatus,
  pub bytes: usize,
}

impl WriteResult {
  pub fn success(bytes: usize) -> WriteResult {
    WriteResult {
      status: WriteStatus::Success,
      bytes,
    }
  }

  pub fn is_success(&self) -> bool {
    self.status == WriteStatus::Success
  }
}

macro_rules! read_integer {
  ($name:ident, $ty:ty, $read:expr) => {
    fn $name(&mut self) -> IoResult<$ty> {
      let mut buffer = [0u8; std::mem::size_of::<$ty>()];
      let result = self.read_all(&mut buffer);
      match result.status {
        ReadStatus::Success => Ok($read(&buffer)),
        ReadStatus::EndOfStream => Err(IoError::EndOfStream),
        ReadStatus::ErrorUnknown => Err(IoError::ErrorUnknown),
      }
    }
  };
}

pub trait Reader {
  /// Reads up to `dst.len()` bytes. A count smaller than `dst.len()` with a
  /// `Success` status is a short read, not an error.
  fn read(&mut self, dst: &mut [u8]) -> ReadResult;

  /// Reads until `dst` is full or a non-success status surfaces. The
  /// returned count accumulates across all underlying reads.
  fn read_all(&mut self, dst: &mut [u8]) -> ReadResult {
    let mut filled = 0;

    while filled < dst.len() {
      let result = self.read(&mut dst[filled..]);
      filled += result.bytes;

      if !result.is_success() {
        return ReadResult {
          status: result.status,
          bytes: filled,
        };
      }
    }

    ReadResult::success(filled)
  }

  read_integer!(read_u8, u8, |buffer: &[u8]| buffer[0]);
  read_integer!(read_u16_little, u16, LittleEndian::read_u16);
  read_integer!(read_u32_little, u32, LittleEndian::read_u32);
  read_integer!(read_u64_little, u64, LittleEndian::read_u64);
  read_integer!(read_u16_big, u16, BigEndian::read_u16);
  read_integer!(read_u32_big, u32, BigEndian::read_u32);
  read_integer!(read_u64_big, u64, BigEndian::read_u64);
}

impl<R: Reader + ?Sized> Reader for &mut R {
  fn read(&mut self, dst: &mut [u8]) -> ReadResult {
    (**self).read(dst)
  }
}

macro_rules! write_integer {
  ($name:ident, $ty:ty, $write:expr) => {
    fn $name(&mut self, value: $ty) -> IoResult<()> {
      let mut buffer = [0u8; std::mem::size_of::<$ty>()];
      $write(&mut buffer, value);
      let result = self.write_all(&buffer);
      match result.status {
        WriteStatus::Success => Ok(()),
        WriteStatus::EndOfStream => Err(IoError::EndOfStream),
        WriteStatus::ErrorUnknown => Err(IoError::ErrorUnknown),
      }
    }
  };
}

pub trait Writer {
  /// Writes up to `src.len()` bytes, reporting how many were accepted.
  fn write(&mut self, src: &[u8]) -> WriteResult;

  fn write_all(&mut self, src: &[u8]) -> WriteResult {
    let mut written = 0;

    while written < src.len() {
      let result = self.write(&src[written..]);
      written += result.bytes;

      if !result.is_success() {
        return WriteResult {
          status: result.status,
          bytes: written,
        };
      }
    }

    WriteResult::success(written)
  }

  fn write_u8(&mut self, value: u8) -> IoResult<()> {
    let result = self.write_all(&[value]);
    match result.status {
      WriteStatus::Success => Ok(()),
      WriteStatus::EndOfStream => Err(IoError::EndOfStream),
      WriteStatus::ErrorUnknown => Err(IoError::ErrorUnknown),
    }
  }

  write_integer!(write_u16_little, u16, LittleEndian::write_u16);
  write_integer!(write_u32_little, u32, LittleEndian::write_u32);
  write_integer!(write_u64_little, u64, LittleEndian::write_u64);
  write_integer!(write_u16_big, u16, BigEndian::write_u16);
  write_integer!(write_u32_big, u32, BigEndian::write_u32);
  write_integer!(write_u64_big, u64, BigEndian::write_u64);
}

impl<W: Writer + ?Sized> Writer for &mut W {
  fn write(&mut self, src: &[u8]) -> WriteResult {
    (**self).write(src)
  }
}

/// Cursor over a borrowed byte slice.
pub struct SliceReader<'a> {
  bytes: &'a [u8],
  position: usize,
}

impl<'a> SliceReader<'a> {
  pub fn new(bytes: &'a [u8]) -> SliceReader<'a> {
    SliceReader { bytes, position: 0 }
  }

  pub fn remaining(&self) -> usize {
    self.bytes.len() - self.position
  }
}

impl Reader for SliceReader<'_> {
  fn read(&mut self, dst: &mut [u8]) -> ReadResult {
    let remaining = self.remaining();

    if remaining == 0 && !dst.is_empty() {
      return ReadResult {
        status: ReadStatus::EndOfStream,
        bytes: 0,
      };
    }

    let count = dst.len().min(remaining);
    dst[..count].copy_from_slice(&self.bytes[self.position..self.position + count]);
    self.position += count;

    ReadResult::success(count)
  }
}

/// Cursor over a borrowed mutable byte slice.
pub struct SliceWriter<'a> {
  bytes: &'a mut [u8],
  position: usize,
}

impl<'a> SliceWriter<'a> {
  pub fn new(bytes: &'a mut [u8]) -> SliceWriter<'a> {
    SliceWriter { bytes, position: 0 }
  }

  pub fn written(&self) -> usize {
    self.position
  }
}

impl Writer for SliceWriter<'_> {
  fn write(&mut self, src: &[u8]) -> WriteResult {
    let remaining = self.bytes.len() - self.position;

    if remaining == 0 && !src.is_empty() {
      return WriteResult {
        status: WriteStatus::EndOfStream,
        bytes: 0,
      };
    }

    let count = src.len().min(remaining);
    self.bytes[self.position..self.position + count].copy_from_slice(&src[..count]);
    self.position += count;

    WriteResult::success(count)
  }
}

pub const BUFFERED_WRITER_LENGTH: usize = 64;

/// Ring-buffered adapter that batches small writes before handing them to
/// the backing writer.
///
/// A failed flush leaves the start index advanced past exactly the bytes
/// that were accepted downstream, so the flush may be retried.
pub struct BufferedWriter<W: Writer> {
  writer: W,
  buffer: [u8; BUFFERED_WRITER_LENGTH],
  start: usize,
  pending: usize,
}

impl<W: Writer> BufferedWriter<W> {
  pub fn new(writer: W) -> BufferedWriter<W> {
    BufferedWriter {
      writer,
      buffer: [0u8; BUFFERED_WRITER_LENGTH],
      start: 0,
      pending: 0,
    }
  }

  pub fn pending(&self) -> usize {
    self.pending
  }

  /// Hands all buffered bytes to the backing writer. A fragmented ring
  /// (contents wrapping past the physical end) is emitted as the tail
  /// slice followed by the head slice; the returned count accumulates
  /// across both writes.
  pub fn flush(&mut self) -> WriteResult {
    let mut written = 0;

    while self.pending != 0 {
      let end = (self.start + self.pending).min(BUFFERED_WRITER_LENGTH);
      let result = self.writer.write_all(&self.buffer[self.start..end]);

      self.start = (self.start + result.bytes) % BUFFERED_WRITER_LENGTH;
      self.pending -= result.bytes;
      written += result.bytes;

      if !result.is_success() {
        return WriteResult {
          status: result.status,
          bytes: written,
        };
      }
    }

    self.start = 0;

    WriteResult::success(written)
  }
}

impl<W: Writer> Writer for BufferedWriter<W> {
  fn write(&mut self, src: &[u8]) -> WriteResult {
    let mut accepted = 0;

    while accepted < src.len() {
      if self.pending == BUFFERED_WRITER_LENGTH {
        let result = self.flush();
        if !result.is_success() {
          return WriteResult {
            status: result.status,
            bytes: accepted,
          };
        }
      }

      let free_start = (self.start + self.pending) % BUFFERED_WRITER_LENGTH;
      let free_end = if free_start < self.start {
        self.start
      } else {
        BUFFERED_WRITER_LENGTH
      };
      let count = (src.len() - accepted).min(free_end - free_start);

      self.buffer[free_start..free_start + count].copy_from_slice(&src[accepted..accepted + count]);
      self.pending += count;
      accepted += count;
    }

    WriteResult::success(accepted)
  }
}
