//! SHA-1 per FIPS 180-4 §6.1.

use byteorder::{BigEndian, ByteOrder};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::io::{ReadResult, Reader};

const BLOCK_LENGTH: usize = 64;
const DIGEST_LENGTH: usize = 20;
const STATE_WORDS: usize = 5;
const ROUNDS: usize = 80;

const INITIALIZE_CONSTANTS: [u32; STATE_WORDS] =
  [0x6745_2301, 0xefcd_ab89, 0x98ba_dcfe, 0x1032_5476, 0xc3d2_e1f0];

// one constant per quarter of the 80 rounds
const ROUND_CONSTANTS: [u32; 4] = [0x5a82_7999, 0x6ed9_eba1, 0x8f1b_bcdc, 0xca62_c1d6];

#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Sha1Context {
  state: [u32; STATE_WORDS],
  ring: [u8; BLOCK_LENGTH],
  capacity: usize,
  total: u64,
  digest: [u8; DIGEST_LENGTH],
}

impl Sha1Context {
  pub fn new() -> Sha1Context {
    let mut context = Sha1Context {
      state: [0; STATE_WORDS],
      ring: [0; BLOCK_LENGTH],
      capacity: 0,
      total: 0,
      digest: [0; DIGEST_LENGTH],
    };
    context.initialize();
    context
  }

  pub fn initialize(&mut self) {
    self.state = INITIALIZE_CONSTANTS;
    self.capacity = BLOCK_LENGTH;
    self.total = 0;
  }

  pub fn digest(&mut self, reader: &mut dyn Reader, bytes: usize) -> ReadResult {
    let Sha1Context {
      state,
      ring,
      capacity,
      total,
      ..
    } = self;

    super::stream_digest(ring, capacity, total, reader, bytes, &mut |block| {
      compress(state, block)
    })
  }

  pub fn finalize(&mut self) -> &[u8] {
    let Sha1Context {
      state,
      ring,
      capacity,
      total,
      ..
    } = self;

    super::finalize_digest(ring, capacity, *total, &mut |block| compress(state, block));

    for (chunk, word) in self.digest.chunks_exact_mut(4).zip(self.state) {
      BigEndian::write_u32(chunk, word);
    }

    &self.digest
  }
}

impl Default for Sha1Context {
  fn default() -> Sha1Context {
    Sha1Context::new()
  }
}

fn compress(state: &mut [u32; STATE_WORDS], block: &[u8; BLOCK_LENGTH]) {
  let mut schedule = [0u32; ROUNDS];
  BigEndian::read_u32_into(block, &mut schedule[..16]);

  for t in 16..ROUNDS {
    schedule[t] =
      (schedule[t - 3] ^ schedule[t - 8] ^ schedule[t - 14] ^ schedule[t - 16]).rotate_left(1);
  }

  let [mut a, mut b, mut c, mut d, mut e] = *state;

  for (t, &word) in schedule.iter().enumerate() {
    let mixed = match t / 20 {
      0 => (b & c) | (!b & d),
      2 => (b & c) | (b & d) | (c & d),
      _ => b ^ c ^ d,
    };

    let temp = a
      .rotate_left(5)
      .wrapping_add(mixed)
      .wrapping_add(e)
      .wrapping_add(ROUND_CONSTANTS[t / 20])
      .wrapping_add(word);

    e = d;
    d = c;
    c = b.rotate_left(30);
    b = a;
    a = temp;
  }

  state[0] = state[0].wrapping_add(a);
  state[1] = state[1].wrapping_add(b);
  state[2] = state[2].wrapping_add(c);
  state[3] = state[3].wrapping_add(d);
  state[4] = state[4].wrapping_add(e);
}
