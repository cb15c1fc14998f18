//! Length-prepended CBC-MAC over AES-256
//!
//! plaintext = len(message) as u64 LE[8] || zero[8] || message || pkcs7
//! tag       = last block of AES-256-CBC(key, iv = zero[16], plaintext)
//!
//! The length block is chained into every later block, which closes the
//! extension forgery of plain CBC-MAC. The IV is fixed at zero and is not a
//! parameter anywhere in the crate.

extern crate alloc;
use alloc::vec::Vec;

use aes::Aes256;
use cbc::cipher::{block_padding::Pkcs7, BlockEncryptMut, KeyIvInit};
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::error::InvalidArgument;

/// AES-256 key size.
pub const KEY_SIZE: usize = 32;

/// Tag size (one cipher block).
pub const TAG_SIZE: usize = 16;

/// AES block size.
pub const BLOCK_SIZE: usize = 16;

/// Bytes of the length block actually carrying the length.
pub const LENGTH_HEADER_BYTES: usize = 8;

const ZERO_IV: [u8; BLOCK_SIZE] = [0u8; BLOCK_SIZE];

// Every slice length must fit the 8-byte header.
const _: () = assert!(usize::BITS <= u64::BITS);

type Aes256CbcEnc = cbc::Encryptor<Aes256>;

/// Compute the 16-byte tag of `message` under a 32-byte `key`.
pub fn compute_tag(message: &[u8], key: &[u8]) -> Result<[u8; TAG_SIZE], InvalidArgument> {
    let key = key_array(key)?;
    Ok(tag_with_key(message, key))
}

/// Compute the tag into a caller-provided buffer of exactly `TAG_SIZE` bytes.
pub fn compute_tag_into(
    tag_out: &mut [u8],
    message: &[u8],
    key: &[u8],
) -> Result<(), InvalidArgument> {
    if tag_out.len() != TAG_SIZE {
        tracing::debug!(actual = tag_out.len(), "rejected tag buffer length");
        return Err(InvalidArgument::TagLength {
            actual: tag_out.len(),
        });
    }
    let key = key_array(key)?;
    let tag = Zeroizing::new(tag_with_key(message, key));
    tag_out.copy_from_slice(tag.as_slice());
    Ok(())
}

/// Verify `tag` against `message` in constant time.
///
/// A mismatch is `Ok(false)`. Errors are reserved for wrongly sized
/// `tag` or `key` arguments.
pub fn verify_tag(tag: &[u8], message: &[u8], key: &[u8]) -> Result<bool, InvalidArgument> {
    if tag.len() != TAG_SIZE {
        tracing::debug!(actual = tag.len(), "rejected tag length");
        return Err(InvalidArgument::TagLength { actual: tag.len() });
    }
    let key = key_array(key)?;
    Ok(verify_with_key(tag, message, key))
}

pub(crate) fn key_array(key: &[u8]) -> Result<&[u8; KEY_SIZE], InvalidArgument> {
    key.try_into().map_err(|_| {
        tracing::debug!(actual = key.len(), "rejected key length");
        InvalidArgument::KeyLength { actual: key.len() }
    })
}

/// Caller guarantees `tag.len() == TAG_SIZE`; a shorter slice compares unequal.
pub(crate) fn verify_with_key(tag: &[u8], message: &[u8], key: &[u8; KEY_SIZE]) -> bool {
    let expected = Zeroizing::new(tag_with_key(message, key));
    bool::from(expected.as_slice().ct_eq(tag))
}

pub(crate) fn tag_with_key(message: &[u8], key: &[u8; KEY_SIZE]) -> [u8; TAG_SIZE] {
    let plaintext = length_prefixed(message);

    // Cipher context (and its key schedule) is dropped, and zeroized, on return.
    let cipher = Aes256CbcEnc::new(key.into(), &ZERO_IV.into());
    let ciphertext = Zeroizing::new(cipher.encrypt_padded_vec_mut::<Pkcs7>(&plaintext));

    let last_block = ciphertext.len() - BLOCK_SIZE;
    let mut tag = [0u8; TAG_SIZE];
    tag.copy_from_slice(&ciphertext[last_block..last_block + TAG_SIZE]);
    tag
}

/// Build `len LE[8] || zero[8] || message`. PKCS#7 padding is left to the cipher.
pub(crate) fn length_prefixed(message: &[u8]) -> Zeroizing<Vec<u8>> {
    tracing::trace!(message_len = message.len(), "building length-prefixed plaintext");

    let mut plaintext = Zeroizing::new(Vec::with_capacity(BLOCK_SIZE + message.len()));
    plaintext.extend_from_slice(&(message.len() as u64).to_le_bytes());
    plaintext.extend_from_slice(&[0u8; BLOCK_SIZE - LENGTH_HEADER_BYTES]);
    plaintext.extend_from_slice(message);
    plaintext
}
