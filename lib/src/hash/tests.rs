use super::*;
use crate::io::{ReadStatus, SliceReader};
use quickcheck::quickcheck;
use spectral::prelude::*;

const TWO_BLOCK_MESSAGE: &[u8] = b"abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq";

const LONG_MESSAGE: &[u8] = b"abcdefghbcdefghicdefghijdefghijkefghijklfghijklmghijklmn\
hijklmnoijklmnopjklmnopqklmnopqrlmnopqrsmnopqrstnopqrstu";

fn digest_once(kind: HashKind, message: &[u8]) -> Vec<u8> {
  let mut context = HashContext::new(kind);
  let mut reader = SliceReader::new(message);

  let result = context.digest(&mut reader, message.len());
  assert_that(&result.is_success()).is_true();
  assert_that(&result.bytes).is_equal_to(message.len());

  context.finalize().to_vec()
}

fn assert_vectors(kind: HashKind, empty: &[u8], abc: &[u8], two_block: &[u8]) {
  assert_that(&digest_once(kind, b"")).is_equal_to(empty.to_vec());
  assert_that(&digest_once(kind, b"abc")).is_equal_to(abc.to_vec());
  assert_that(&digest_once(kind, TWO_BLOCK_MESSAGE)).is_equal_to(two_block.to_vec());
}

#[test]
fn sha1_fips_vectors() {
  assert_vectors(
    HashKind::Sha1,
    &hex!("da39a3ee5e6b4b0d3255bfef95601890afd80709"),
    &hex!("a9993e364706816aba3e25717850c26c9cd0d89d"),
    &hex!("84983e441c3bd26ebaae4aa1f95129e5e54670f1"),
  );
}

#[test]
fn sha224_fips_vectors() {
  assert_vectors(
    HashKind::Sha224,
    &hex!("d14a028c2a3a2bc9476102bb288234c415a2b01f828ea62ac5b3e42f"),
    &hex!("23097d223405d8228642a477bda255b32aadbce4bda0b3f7e36c9da7"),
    &hex!("75388b16512776cc5dba5da1fd890150b0c6455cb4f58b1952522525"),
  );
}

#[test]
fn sha256_fips_vectors() {
  assert_vectors(
    HashKind::Sha256,
    &hex!("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"),
    &hex!("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"),
    &hex!("248d6a61d20638b8e5c026930c3e6039a33ce45964ff2167f6ecedd419db06c1"),
  );
}

#[test]
fn sha384_fips_vectors() {
  assert_vectors(
    HashKind::Sha384,
    &hex!(
      "38b060a751ac96384cd9327eb1b1e36a21fdb71114be07434c0cc7bf63f6e1da274edebfe76f65fbd51ad2f14898b95b"
    ),
    &hex!(
      "cb00753f45a35e8bb5a03d699ac65007272c32ab0eded1631a8b605a43ff5bed8086072ba1e7cc2358baeca134c825a7"
    ),
    &hex!(
      "3391fdddfc8dc7393707a65b1b4709397cf8b1d162af05abfe8f450de5f36bc6b0455a8520bc4e6f5fe95b1fe3c8452b"
    ),
  );
}

#[test]
fn sha512_fips_vectors() {
  assert_vectors(
    HashKind::Sha512,
    &hex!(
      "cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e"
    ),
    &hex!(
      "ddaf35a193617abacc417349ae20413112e6fa4e89a97ea20a9eeee64b55d39a2192992a274fc1a836ba3c23a3feebbd454d4423643ce80e2a9ac94fa54ca49f"
    ),
    &hex!(
      "204a8fc6dda82f0a0ced7beb8e08a41657c16ef468b228a8279be331a703c33596fd15c13b1b07f9aa1d3bea57789ca031ad85c7a71dd70354ec631238ca3445"
    ),
  );
}

#[test]
fn sha512_224_fips_vectors() {
  assert_vectors(
    HashKind::Sha512_224,
    &hex!("6ed0dd02806fa89e25de060c19d3ac86cabb87d6a0ddd05c333b84f4"),
    &hex!("4634270f707b6a54daae7530460842e20e37ed265ceee9a43e8924aa"),
    &hex!("e5302d6d54bb242275d1e7622d68df6eb02dedd13f564c13dbda2174"),
  );
}

#[test]
fn sha512_256_fips_vectors() {
  assert_vectors(
    HashKind::Sha512_256,
    &hex!("c672b8d1ef56ed28ab87c3622c5114069bfdfc3c704ebbbb873bcc5642227271"),
    &hex!("53048e2681941ef99b2e29b76b4c7dabe4c2d0c634fc6d46e0e2f13107e7af23"),
    &hex!("bde8e1f9f19bb9fd3406c90ec6bc47bd36d8ada9f11880dbc8a22a7078b6a461"),
  );
}

#[test]
fn long_message_fips_vectors() {
  let expected: [(HashKind, &[u8]); 7] = [
    (
      HashKind::Sha1,
      &hex!("a49b2446a02c645bf419f995b67091253a04a259"),
    ),
    (
      HashKind::Sha224,
      &hex!("c97ca9a559850ce97a04a96def6d99a9e0e0e2ab14e6b8df265fc0b3"),
    ),
    (
      HashKind::Sha256,
      &hex!("cf5b16a778af8380036ce59e7b0492370b249b11e8f07a51afac45037afee9d1"),
    ),
    (
      HashKind::Sha384,
      &hex!(
        "09330c33f71147e83d192fc782cd1b4753111b173b3b05d22fa08086e3b0f712fcc7c71a557e2db966c3e9fa91746039"
      ),
    ),
    (
      HashKind::Sha512,
      &hex!(
        "8e959b75dae313da8cf4f72814fc143f8f7779c6eb9f7fa17299aeadb6889018501d289e4900f7e4331b99dec4b5433ac7d329eeb6dd26545e96e55b874be909"
      ),
    ),
    (
      HashKind::Sha512_224,
      &hex!("23fec5bb94d60b23308192640b0c453335d664734fe40e7268674af9"),
    ),
    (
      HashKind::Sha512_256,
      &hex!("3928e184fb8690f840da3988121d31be65cb9d3ef83ee6146feac861e19b563a"),
    ),
  ];

  for (kind, digest) in expected {
    assert_that(&digest_once(kind, LONG_MESSAGE)).is_equal_to(digest.to_vec());
  }
}

#[test]
fn million_a_streams_across_calls() {
  let chunk = [b'a'; 1000];

  let mut sha1 = HashContext::new(HashKind::Sha1);
  let mut sha256 = HashContext::new(HashKind::Sha256);
  for _ in 0..1000 {
    let _ = sha1.digest(&mut SliceReader::new(&chunk), chunk.len());
    let _ = sha256.digest(&mut SliceReader::new(&chunk), chunk.len());
  }

  assert_that(&sha1.finalize().to_vec())
    .is_equal_to(hex!("34aa973cd4c4daa4f61eeb2bdbad27316534016f").to_vec());
  assert_that(&sha256.finalize().to_vec()).is_equal_to(
    hex!("cdc76e5c9914fb9281a1c7e284d73e67f1809a48a497200e046d39ccc7112cd0").to_vec(),
  );
}

#[test]
fn digest_splits_are_equivalent() {
  for kind in [HashKind::Sha256, HashKind::Sha512] {
    let expected = digest_once(kind, TWO_BLOCK_MESSAGE);

    for split in 0..=TWO_BLOCK_MESSAGE.len() {
      let mut context = HashContext::new(kind);
      let (head, tail) = TWO_BLOCK_MESSAGE.split_at(split);

      let _ = context.digest(&mut SliceReader::new(head), head.len());
      let _ = context.digest(&mut SliceReader::new(tail), tail.len());

      assert_that(&context.finalize().to_vec()).is_equal_to(&expected);
    }
  }
}

#[test]
fn digest_resumes_after_short_read() {
  let mut context = HashContext::new(HashKind::Sha1);

  // ask for more bytes than the reader holds
  let result = context.digest(&mut SliceReader::new(b"ab"), 10);
  assert_that(&result.status).is_equal_to(ReadStatus::EndOfStream);
  assert_that(&result.bytes).is_equal_to(2);

  let result = context.digest(&mut SliceReader::new(b"c"), 1);
  assert_that(&result.is_success()).is_true();

  assert_that(&context.finalize().to_vec()).is_equal_to(digest_once(HashKind::Sha1, b"abc"));
}

#[test]
fn context_reuse_after_initialize() {
  let mut context = HashContext::new(HashKind::Sha256);
  let _ = context.digest(&mut SliceReader::new(b"scrap"), 5);
  let _ = context.finalize();

  context.initialize();
  let _ = context.digest(&mut SliceReader::new(b"abc"), 3);
  assert_that(&context.finalize().to_vec()).is_equal_to(digest_once(HashKind::Sha256, b"abc"));
}

#[test]
fn identifier_round_trip() {
  for kind in HashKind::ALL {
    assert_that(&kind.identifier().parse::<HashKind>()).is_equal_to(Ok(kind));
  }

  assert_that(&"sha3".parse::<HashKind>()).is_equal_to(Err(UnknownHashIdentifier));
  assert_that(&"SHA1".parse::<HashKind>()).is_equal_to(Err(UnknownHashIdentifier));
}

quickcheck! {
  fn incremental_digest_equivalence(data: Vec<u8>, split: usize) -> bool {
    let split = split % (data.len() + 1);
    let (head, tail) = data.split_at(split);

    let mut context = HashContext::new(HashKind::Sha256);
    let _ = context.digest(&mut SliceReader::new(head), head.len());
    let _ = context.digest(&mut SliceReader::new(tail), tail.len());

    context.finalize().to_vec() == digest_once(HashKind::Sha256, &data)
  }
}
