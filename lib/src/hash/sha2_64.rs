//! SHA-384, SHA-512, SHA-512/224 and SHA-512/256 per FIPS 180-4 §6.4/§6.5.
//!
//! Structurally the same as the 32-bit family with 64-bit words, 80 rounds
//! and 128-byte blocks.

use byteorder::{BigEndian, ByteOrder};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::HashKind;
use crate::io::{ReadResult, Reader};

const BLOCK_LENGTH: usize = 128;
const STATE_WORDS: usize = 8;
const ROUNDS: usize = 80;

const SHA384_INITIALIZE_CONSTANTS: [u64; STATE_WORDS] = [
  0xcbbb9d5dc1059ed8,
  0x629a292a367cd507,
  0x9159015a3070dd17,
  0x152fecd8f70e5939,
  0x67332667ffc00b31,
  0x8eb44a8768581511,
  0xdb0c2e0d64f98fa7,
  0x47b5481dbefa4fa4,
];

const SHA512_INITIALIZE_CONSTANTS: [u64; STATE_WORDS] = [
  0x6a09e667f3bcc908,
  0xbb67ae8584caa73b,
  0x3c6ef372fe94f82b,
  0xa54ff53a5f1d36f1,
  0x510e527fade682d1,
  0x9b05688c2b3e6c1f,
  0x1f83d9abfb41bd6b,
  0x5be0cd19137e2179,
];

const SHA512_224_INITIALIZE_CONSTANTS: [u64; STATE_WORDS] = [
  0x8c3d37c819544da2,
  0x73e1996689dcd4d6,
  0x1dfab7ae32ff9c82,
  0x679dd514582f9fcf,
  0x0f6d2b697bd44da8,
  0x77e36f7304c48942,
  0x3f9d85a86a1d36c8,
  0x1112e6ad91d692a1,
];

const SHA512_256_INITIALIZE_CONSTANTS: [u64; STATE_WORDS] = [
  0x22312194fc2bf72c,
  0x9f555fa3c84c64c2,
  0x2393b86b6f53b151,
  0x963877195940eabd,
  0x96283ee2a88effe3,
  0xbe5e1e2553863992,
  0x2b0199fc2c85b8aa,
  0x0eb72ddc81c52ca2,
];

#[rustfmt::skip]
const ROUND_CONSTANTS: [u64; ROUNDS] = [
  0x428a2f98d728ae22, 0x7137449123ef65cd, 0xb5c0fbcfec4d3b2f, 0xe9b5dba58189dbbc,
  0x3956c25bf348b538, 0x59f111f1b605d019, 0x923f82a4af194f9b, 0xab1c5ed5da6d8118,
  0xd807aa98a3030242, 0x12835b0145706fbe, 0x243185be4ee4b28c, 0x550c7dc3d5ffb4e2,
  0x72be5d74f27b896f, 0x80deb1fe3b1696b1, 0x9bdc06a725c71235, 0xc19bf174cf692694,
  0xe49b69c19ef14ad2, 0xefbe4786384f25e3, 0x0fc19dc68b8cd5b5, 0x240ca1cc77ac9c65,
  0x2de92c6f592b0275, 0x4a7484aa6ea6e483, 0x5cb0a9dcbd41fbd4, 0x76f988da831153b5,
  0x983e5152ee66dfab, 0xa831c66d2db43210, 0xb00327c898fb213f, 0xbf597fc7beef0ee4,
  0xc6e00bf33da88fc2, 0xd5a79147930aa725, 0x06ca6351e003826f, 0x142929670a0e6e70,
  0x27b70a8546d22ffc, 0x2e1b21385c26c926, 0x4d2c6dfc5ac42aed, 0x53380d139d95b3df,
  0x650a73548baf63de, 0x766a0abb3c77b2a8, 0x81c2c92e47edaee6, 0x92722c851482353b,
  0xa2bfe8a14cf10364, 0xa81a664bbc423001, 0xc24b8b70d0f89791, 0xc76c51a30654be30,
  0xd192e819d6ef5218, 0xd69906245565a910, 0xf40e35855771202a, 0x106aa07032bbd1b8,
  0x19a4c116b8d2d0c8, 0x1e376c085141ab53, 0x2748774cdf8eeb99, 0x34b0bcb5e19b48a8,
  0x391c0cb3c5c95a63, 0x4ed8aa4ae3418acb, 0x5b9cca4f7763e373, 0x682e6ff3d6b2b8a3,
  0x748f82ee5defb2fc, 0x78a5636f43172f60, 0x84c87814a1f0ab72, 0x8cc702081a6439ec,
  0x90befffa23631e28, 0xa4506cebde82bde9, 0xbef9a3f7b2c67915, 0xc67178f2e372532b,
  0xca273eceea26619c, 0xd186b8c721c0c207, 0xeada7dd6cde0eb1e, 0xf57d4f7fee6ed178,
  0x06f067aa72176fba, 0x0a637dc5a2c898a6, 0x113f9804bef90dae, 0x1b710b35131c471b,
  0x28db77f523047d84, 0x32caab7b40c72493, 0x3c9ebe0a15c9bebc, 0x431d67c49c100d4c,
  0x4cc5d4becb3e42b6, 0x597f299cfc657e2a, 0x5fcb6fab3ad6faec, 0x6c44198c4a475817,
];

#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Sha264Context {
  #[zeroize(skip)]
  kind: HashKind,
  state: [u64; STATE_WORDS],
  ring: [u8; BLOCK_LENGTH],
  capacity: usize,
  total: u64,
  digest: [u8; STATE_WORDS * 8],
}

impl Sha264Context {
  /// `kind` must be one of the 64-bit SHA-2 family members.
  pub fn new(kind: HashKind) -> Sha264Context {
    debug_assert!(matches!(
      kind,
      HashKind::Sha384 | HashKind::Sha512 | HashKind::Sha512_224 | HashKind::Sha512_256
    ));

    let mut context = Sha264Context {
      kind,
      state: [0; STATE_WORDS],
      ring: [0; BLOCK_LENGTH],
      capacity: 0,
      total: 0,
      digest: [0; STATE_WORDS * 8],
    };
    context.initialize();
    context
  }

  pub fn kind(&self) -> HashKind {
    self.kind
  }

  pub fn initialize(&mut self) {
    self.state = match self.kind {
      HashKind::Sha384 => SHA384_INITIALIZE_CONSTANTS,
      HashKind::Sha512_224 => SHA512_224_INITIALIZE_CONSTANTS,
      HashKind::Sha512_256 => SHA512_256_INITIALIZE_CONSTANTS,
      _ => SHA512_INITIALIZE_CONSTANTS,
    };
    self.capacity = BLOCK_LENGTH;
    self.total = 0;
  }

  pub fn digest(&mut self, reader: &mut dyn Reader, bytes: usize) -> ReadResult {
    let Sha264Context {
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
    let Sha264Context {
      state,
      ring,
      capacity,
      total,
      ..
    } = self;

    super::finalize_digest(ring, capacity, *total, &mut |block| compress(state, block));

    for (chunk, word) in self.digest.chunks_exact_mut(8).zip(self.state) {
      BigEndian::write_u64(chunk, word);
    }

    &self.digest[..self.kind.digest_length()]
  }
}

fn ch(x: u64, y: u64, z: u64) -> u64 {
  (x & y) ^ (!x & z)
}

fn maj(x: u64, y: u64, z: u64) -> u64 {
  (x & y) ^ (x & z) ^ (y & z)
}

fn sigma_upper_0(x: u64) -> u64 {
  x.rotate_right(28) ^ x.rotate_right(34) ^ x.rotate_right(39)
}

fn sigma_upper_1(x: u64) -> u64 {
  x.rotate_right(14) ^ x.rotate_right(18) ^ x.rotate_right(41)
}

fn sigma_lower_0(x: u64) -> u64 {
  x.rotate_right(1) ^ x.rotate_right(8) ^ (x >> 7)
}

fn sigma_lower_1(x: u64) -> u64 {
  x.rotate_right(19) ^ x.rotate_right(61) ^ (x >> 6)
}

fn compress(state: &mut [u64; STATE_WORDS], block: &[u8; BLOCK_LENGTH]) {
  let mut schedule = [0u64; ROUNDS];
  BigEndian::read_u64_into(block, &mut schedule[..16]);

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
