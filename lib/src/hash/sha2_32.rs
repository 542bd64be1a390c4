//! SHA-224 and SHA-256 per FIPS 180-4 §6.2/§6.3.

use byteorder::{BigEndian, ByteOrder};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::HashKind;
use crate::io::{ReadResult, Reader};

const BLOCK_LENGTH: usize = 64;
const STATE_WORDS: usize = 8;
const ROUNDS: usize = 64;

const SHA224_INITIALIZE_CONSTANTS: [u32; STATE_WORDS] = [
  0xc105_9ed8, 0x367c_d507, 0x3070_dd17, 0xf70e_5939, 0xffc0_0b31, 0x6858_1511, 0x64f9_8fa7,
  0xbefa_4fa4,
];

const SHA256_INITIALIZE_CONSTANTS: [u32; STATE_WORDS] = [
  0x6a09_e667, 0xbb67_ae85, 0x3c6e_f372, 0xa54f_f53a, 0x510e_527f, 0x9b05_688c, 0x1f83_d9ab,
  0x5be0_cd19,
];

#[rustfmt::skip]
const ROUND_CONSTANTS: [u32; ROUNDS] = [
  0x428a2f98, 0x71374491, 0xb5c0fbcf, 0xe9b5dba5, 0x3956c25b, 0x59f111f1, 0x923f82a4, 0xab1c5ed5,
  0xd807aa98, 0x12835b01, 0x243185be, 0x550c7dc3, 0x72be5d74, 0x80deb1fe, 0x9bdc06a7, 0xc19bf174,
  0xe49b69c1, 0xefbe4786, 0x0fc19dc6, 0x240ca1cc, 0x2de92c6f, 0x4a7484aa, 0x5cb0a9dc, 0x76f988da,
  0x983e5152, 0xa831c66d, 0xb00327c8, 0xbf597fc7, 0xc6e00bf3, 0xd5a79147, 0x06ca6351, 0x14292967,
  0x27b70a85, 0x2e1b2138, 0x4d2c6dfc, 0x53380d13, 0x650a7354, 0x766a0abb, 0x81c2c92e, 0x92722c85,
  0xa2bfe8a1, 0xa81a664b, 0xc24b8b70, 0xc76c51a3, 0xd192e819, 0xd6990624, 0xf40e3585, 0x106aa070,
  0x19a4c116, 0x1e376c08, 0x2748774c, 0x34b0bcb5, 0x391c0cb3, 0x4ed8aa4a, 0x5b9cca4f, 0x682e6ff3,
  0x748f82ee, 0x78a5636f, 0x84c87814, 0x8cc70208, 0x90befffa, 0xa4506ceb, 0xbef9a3f7, 0xc67178f2,
];

#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Sha232Context {
  #[zeroize(skip)]
  kind: HashKind,
  state: [u32; STATE_WORDS],
  ring: [u8; BLOCK_LENGTH],
  capacity: usize,
  total: u64,
  digest: [u8; STATE_WORDS * 4],
}

impl Sha232Context {
  /// `kind` must be one of the 32-bit SHA-2 family members.
  pub fn new(kind: HashKind) -> Sha232Context {
    debug_assert!(matches!(kind, HashKind::Sha224 | HashKind::Sha256));

    let mut context = Sha232Context {
      kind,
      state: [0; STATE_WORDS],
      ring: [0; BLOCK_LENGTH],
      capacity: 0,
      total: 0,
      digest: [0; STATE_WORDS * 4],
    };
    context.initialize();
    context
  }

  pub fn kind(&self) -> HashKind {
    self.kind
  }

  pub fn initialize(&mut self) {
    self.state = match self.kind {
      HashKind::Sha224 => SHA224_INITIALIZE_CONSTANTS,
      _ => SHA256_INITIALIZE_CONSTANTS,
    };
    self.capacity = BLOCK_LENGTH;
    self.total = 0;
  }

  pub fn digest(&mut self, reader: &mut dyn Reader, bytes: usize) -> ReadResult {
    let Sha232Context {
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
    let Sha232Context {
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

    &self.digest[..self.kind.digest_length()]
  }
}

fn ch(x: u32, y: u32, z: u32) -> u32 {
  (x & y) ^ (!x & z)
}

fn maj(x: u32, y: u32, z: u32) -> u32 {
  (x & y) ^ (x & z) ^ (y & z)
}

fn sigma_upper_0(x: u32) -> u32 {
  x.rotate_right(2) ^ x.rotate_right(13) ^ x.rotate_right(22)
}

fn sigma_upper_1(x: u32) -> u32 {
  x.rotate_right(6) ^ x.rotate_right(11) ^ x.rotate_right(25)
}

fn sigma_lower_0(x: u32) -> u32 {
  x.rotate_right(7) ^ x.rotate_right(18) ^ (x >> 3)
}

fn sigma_lower_1(x: u32) -> u32 {
  x.rotate_right(17) ^ x.rotate_right(19) ^ (x >> 10)
}

fn compress(state: &mut [u32; STATE_WORDS], block: &[u8; BLOCK_LENGTH]) {
  let mut schedule = [0u32; ROUNDS];
  BigEndian::read_u32_into(block, &mut schedule[..16]);

  for t in 16..ROUNDS {
    schedule[t] = sigma_lower_1(schedule[t - 2])
      .wrapping_add(schedule[t - 7])
      .wrapping_add(sigma_lower_0(schedule[t - 15]))
      .wrapping_add(schedule[t - 16]);
  }

  let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *state;

  for t in 0..ROUNDS {
    let t1 = h
      .wrapping_add(sigma_upper_1(e))
      .wrapping_add(ch(e, f, g))
      .wrapping_add(ROUND_CONSTANTS[t])
      .wrapping_add(schedule[t]);
    let t2 = sigma_upper_0(a).wrapping_add(maj(a, b, c));

    h = g;
    g = f;
    f = e;
    e = d.wrapping_add(t1);
    d = c;
    c = b;
    b = a;
    a = t1.wrapping_add(t2);
  }

  for (word, updated) in state.iter_mut().zip([a, b, c, d, e, f, g, h]) {
    *word = word.wrapping_add(updated);
  }
}
