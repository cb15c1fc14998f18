//! Known Answer / argument-validation tests

use lp_cbc_mac::{
    compute_tag, compute_tag_into, verify_tag, CbcMac, InvalidArgument, Key, Tag, BLOCK_SIZE,
    KEY_SIZE, LENGTH_HEADER_BYTES, TAG_SIZE,
};

const MESSAGE: &[u8] = b"Fool of a Took!";
const KEY_HEX: &str = "dc1dcb9b0073a0e06dd2e04ad31d434f91cef039925218fe99d09311f4c1773f";
const TAG_HEX: &str = "a51d7ed83b9e4037cf8da336f7a46881";

fn key() -> Vec<u8> {
    hex::decode(KEY_HEX).unwrap()
}

fn tag() -> Vec<u8> {
    hex::decode(TAG_HEX).unwrap()
}

#[test]
fn test_constants() {
    assert_eq!(KEY_SIZE, 32);
    assert_eq!(TAG_SIZE, 16);
    assert_eq!(BLOCK_SIZE, 16);
    assert_eq!(LENGTH_HEADER_BYTES, 8);
}

#[test]
fn test_vector_key_is_exactly_key_size() {
    assert_eq!(key().len(), KEY_SIZE);
    assert_eq!(tag().len(), TAG_SIZE);
}

#[test]
fn test_compute_known_answer() {
    let computed = compute_tag(MESSAGE, &key()).unwrap();
    assert_eq!(hex::encode(computed), TAG_HEX);
}

#[test]
fn test_compute_into_known_answer() {
    let mut out = [0u8; TAG_SIZE];
    compute_tag_into(&mut out, MESSAGE, &key()).unwrap();
    assert_eq!(out.as_slice(), tag().as_slice());
}

#[test]
fn test_typed_known_answer() {
    let mac = CbcMac::new(Key::from_hex(KEY_HEX).unwrap());
    let computed = mac.compute(MESSAGE);
    assert_eq!(computed.to_string(), TAG_HEX);
    assert!(mac.verify(&Tag::from_hex(TAG_HEX).unwrap(), MESSAGE));
}

#[test]
fn test_compute_different_message() {
    let mut message = MESSAGE.to_vec();
    message[0] = message[0].wrapping_add(1);
    let computed = compute_tag(&message, &key()).unwrap();
    assert_ne!(computed.as_slice(), tag().as_slice());
}

#[test]
fn test_compute_different_key() {
    let mut key = key();
    key[0] = key[0].wrapping_add(1);
    let computed = compute_tag(MESSAGE, &key).unwrap();
    assert_ne!(computed.as_slice(), tag().as_slice());
}

#[test]
fn test_verify_valid() {
    assert_eq!(verify_tag(&tag(), MESSAGE, &key()), Ok(true));
}

#[test]
fn test_verify_different_tag() {
    let mut tag = tag();
    tag[0] = tag[0].wrapping_add(1);
    assert_eq!(verify_tag(&tag, MESSAGE, &key()), Ok(false));
}

#[test]
fn test_verify_different_message() {
    let mut message = MESSAGE.to_vec();
    message[0] = message[0].wrapping_add(1);
    assert_eq!(verify_tag(&tag(), &message, &key()), Ok(false));
}

#[test]
fn test_verify_different_key() {
    let mut key = key();
    key[0] = key[0].wrapping_add(1);
    assert_eq!(verify_tag(&tag(), MESSAGE, &key), Ok(false));
}

#[test]
fn test_rejects_wrong_key_lengths() {
    for len in [0usize, 1, 16, 24, 31, 33, 64] {
        let key = vec![0u8; len];
        assert_eq!(
            compute_tag(MESSAGE, &key),
            Err(InvalidArgument::KeyLength { actual: len })
        );
        assert_eq!(
            compute_tag(b"", &key),
            Err(InvalidArgument::KeyLength { actual: len })
        );
        assert_eq!(
            verify_tag(&tag(), MESSAGE, &key),
            Err(InvalidArgument::KeyLength { actual: len })
        );
    }
}

#[test]
fn test_oversized_key_is_not_truncated() {
    let mut long_key = key();
    long_key.push(0x00);
    assert!(compute_tag(MESSAGE, &long_key).is_err());
    assert!(Key::from_bytes(&long_key).is_err());
}

#[test]
fn test_rejects_wrong_tag_lengths() {
    for len in [0usize, 1, 8, 15, 17, 32] {
        let bad_tag = vec![0u8; len];
        assert_eq!(
            verify_tag(&bad_tag, MESSAGE, &key()),
            Err(InvalidArgument::TagLength { actual: len })
        );
        let mut out = vec![0u8; len];
        assert_eq!(
            compute_tag_into(&mut out, MESSAGE, &key()),
            Err(InvalidArgument::TagLength { actual: len })
        );
    }
}

#[test]
fn test_error_messages() {
    assert_eq!(
        InvalidArgument::KeyLength { actual: 33 }.to_string(),
        "key must be 32 bytes long (got 33)"
    );
    assert_eq!(
        InvalidArgument::TagLength { actual: 4 }.to_string(),
        "tag must be 16 bytes long (got 4)"
    );
}
