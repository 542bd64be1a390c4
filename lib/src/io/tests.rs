use super::*;
use spectral::prelude::*;

/// Writer test double that accepts a limited number of bytes before raising
/// an error, recording everything it accepted.
struct LimitedWriter {
  accepted: Vec<u8>,
  limit: Option<usize>,
}

impl LimitedWriter {
  fn new(limit: Option<usize>) -> LimitedWriter {
    LimitedWriter {
      accepted: Vec::new(),
      limit,
    }
  }
}

impl Writer for LimitedWriter {
  fn write(&mut self, src: &[u8]) -> WriteResult {
    let count = match self.limit {
      Some(limit) => src.len().min(limit - self.accepted.len()),
      None => src.len(),
    };

    if count == 0 && !src.is_empty() {
      return WriteResult {
        status: WriteStatus::ErrorUnknown,
        bytes: 0,
      };
    }

    self.accepted.extend_from_slice(&src[..count]);

    WriteResult::success(count)
  }
}

/// Reader test double that hands out its contents one byte at a time.
struct TricklingReader<'a> {
  inner: SliceReader<'a>,
}

impl Reader for TricklingReader<'_> {
  fn read(&mut self, dst: &mut [u8]) -> ReadResult {
    let count = dst.len().min(1);
    self.inner.read(&mut dst[..count])
  }
}

#[test]
fn slice_reader_reads_and_ends() {
  let mut reader = SliceReader::new(b"hello");
  let mut buffer = [0u8; 3];

  let result = reader.read(&mut buffer);
  assert_that(&result).is_equal_to(ReadResult::success(3));
  assert_that(&&buffer[..]).is_equal_to(&b"hel"[..]);

  let result = reader.read(&mut buffer);
  assert_that(&result).is_equal_to(ReadResult::success(2));
  assert_that(&&buffer[..2]).is_equal_to(&b"lo"[..]);

  let result = reader.read(&mut buffer);
  assert_that(&result.status).is_equal_to(ReadStatus::EndOfStream);
  assert_that(&result.bytes).is_equal_to(0);
}

#[test]
fn slice_reader_empty_destination() {
  let mut reader = SliceReader::new(b"");
  let result = reader.read(&mut []);

  assert_that(&result).is_equal_to(ReadResult::success(0));
}

#[test]
fn read_all_accumulates_across_short_reads() {
  let mut reader = TricklingReader {
    inner: SliceReader::new(b"abcdef"),
  };
  let mut buffer = [0u8; 4];

  let result = reader.read_all(&mut buffer);
  assert_that(&result).is_equal_to(ReadResult::success(4));
  assert_that(&&buffer[..]).is_equal_to(&b"abcd"[..]);

  let mut buffer = [0u8; 4];
  let result = reader.read_all(&mut buffer);
  assert_that(&result.status).is_equal_to(ReadStatus::EndOfStream);
  assert_that(&result.bytes).is_equal_to(2);
}

#[test]
fn integer_helpers_convert_endianness() {
  let mut reader = SliceReader::new(&[0x12, 0x34, 0x56, 0x78, 0x9a, 0xbc, 0xde, 0xf0]);
  assert_that(&reader.read_u32_big()).is_equal_to(Ok(0x1234_5678));
  assert_that(&reader.read_u32_little()).is_equal_to(Ok(0xf0de_bc9a));

  let mut reader = SliceReader::new(&[0x12, 0x34]);
  assert_that(&reader.read_u16_little()).is_equal_to(Ok(0x3412));
  assert_that(&reader.read_u16_big()).is_equal_to(Err(IoError::EndOfStream));

  let mut reader = SliceReader::new(&[0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08]);
  assert_that(&reader.read_u64_big()).is_equal_to(Ok(0x0102_0304_0506_0708));

  let mut reader = SliceReader::new(&[0xff]);
  assert_that(&reader.read_u8()).is_equal_to(Ok(0xff));
}

#[test]
fn slice_writer_fills_and_ends() {
  let mut buffer = [0u8; 4];
  let mut writer = SliceWriter::new(&mut buffer);

  assert_that(&writer.write(b"ab")).is_equal_to(WriteResult::success(2));
  assert_that(&writer.write(b"cdef").bytes).is_equal_to(2);

  let result = writer.write(b"gh");
  assert_that(&result.status).is_equal_to(WriteStatus::EndOfStream);
  assert_that(&result.bytes).is_equal_to(0);
  assert_that(&writer.written()).is_equal_to(4);
  assert_that(&&buffer[..]).is_equal_to(&b"abcd"[..]);
}

#[test]
fn writer_integer_helpers_convert_endianness() {
  let mut buffer = [0u8; 8];
  let mut writer = SliceWriter::new(&mut buffer);

  assert_that(&writer.write_u32_big(0x1234_5678)).is_equal_to(Ok(()));
  assert_that(&writer.write_u32_little(0x1234_5678)).is_equal_to(Ok(()));
  assert_that(&&buffer[..]).is_equal_to(&[0x12, 0x34, 0x56, 0x78, 0x78, 0x56, 0x34, 0x12][..]);
}

#[test]
fn buffered_writer_flushes_when_full() {
  let mut writer = BufferedWriter::new(LimitedWriter::new(None));
  let data = [0xabu8; BUFFERED_WRITER_LENGTH + 10];

  assert_that(&writer.write(&data).bytes).is_equal_to(data.len());
  // the first full ring was flushed automatically, the overflow is pending
  assert_that(&writer.pending()).is_equal_to(10);

  assert_that(&writer.flush()).is_equal_to(WriteResult::success(10));
  assert_that(&writer.pending()).is_equal_to(0);
}

#[test]
fn buffered_writer_flushes_fragmented_ring() {
  let mut backend = LimitedWriter::new(Some(20));
  let mut writer = BufferedWriter::new(&mut backend);

  let head = [0x11u8; 60];
  assert_that(&writer.write(&head).bytes).is_equal_to(60);

  // only 20 bytes fit downstream; the failed flush must report them and
  // keep the remaining 40 pending
  let result = writer.flush();
  assert_that(&result.status).is_equal_to(WriteStatus::ErrorUnknown);
  assert_that(&result.bytes).is_equal_to(20);
  assert_that(&writer.pending()).is_equal_to(40);

  // appending wraps past the physical end of the ring
  let tail = [0x22u8; 20];
  assert_that(&writer.write(&tail).bytes).is_equal_to(20);
  assert_that(&writer.pending()).is_equal_to(60);

  writer.writer.limit = None;
  let result = writer.flush();
  assert_that(&result).is_equal_to(WriteResult::success(60));

  let mut expected = vec![0x11u8; 60];
  expected.extend_from_slice(&[0x22u8; 20]);
  assert_that(&backend.accepted).is_equal_to(expected);
}
