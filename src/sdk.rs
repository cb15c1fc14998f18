//! Typed API surface
//!
//! `Key` and `Tag` carry their sizes in the type, so `CbcMac` never has to
//! report a length error. The slice-level functions in the crate root remain
//! available for callers holding raw buffers.

extern crate alloc;

use alloc::string::String;
use core::fmt;

use subtle::{Choice, ConstantTimeEq};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{InvalidArgument, RandomError};
use crate::mac::{self, KEY_SIZE, TAG_SIZE};

// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// 256-bit MAC key. Zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Key {
    bytes: [u8; KEY_SIZE],
}

impl Key {
    /// Fresh key from the operating system RNG.
    pub fn generate() -> Result<Self, RandomError> {
        // Filled in place; on failure the partial key is zeroized on drop.
        let mut key = Self::zeroed();
        getrandom::getrandom(&mut key.bytes).map_err(|_| RandomError)?;
        Ok(key)
    }

    /// Key from exactly `KEY_SIZE` bytes. Longer input is rejected, not truncated.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, InvalidArgument> {
        let bytes = mac::key_array(bytes)?;
        let mut key = Self::zeroed();
        key.bytes.copy_from_slice(bytes);
        Ok(key)
    }

    /// Key from a hex string of `2 * KEY_SIZE` characters.
    pub fn from_hex(s: &str) -> Result<Self, InvalidArgument> {
        let mut key = Self::zeroed();
        decode_hex(s, &mut key.bytes, |actual| InvalidArgument::KeyLength { actual })?;
        Ok(key)
    }

    fn zeroed() -> Self {
        Self {
            bytes: [0u8; KEY_SIZE],
        }
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }
}

impl From<[u8; KEY_SIZE]> for Key {
    fn from(bytes: [u8; KEY_SIZE]) -> Self {
        Self { bytes }
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Key([REDACTED])")
    }
}

// ---------------------------------------------------------------------------
// Tag
// ---------------------------------------------------------------------------

/// 128-bit authentication tag.
///
/// Equality is constant time.
#[derive(Clone, Copy, Debug, Eq)]
pub struct Tag {
    bytes: [u8; TAG_SIZE],
}

impl Tag {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, InvalidArgument> {
        let bytes: [u8; TAG_SIZE] = bytes
            .try_into()
            .map_err(|_| InvalidArgument::TagLength {
                actual: bytes.len(),
            })?;
        Ok(Self { bytes })
    }

    pub fn from_hex(s: &str) -> Result<Self, InvalidArgument> {
        let mut bytes = [0u8; TAG_SIZE];
        decode_hex(s, &mut bytes, |actual| InvalidArgument::TagLength { actual })?;
        Ok(Self { bytes })
    }

    pub fn as_bytes(&self) -> &[u8; TAG_SIZE] {
        &self.bytes
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }
}

impl From<[u8; TAG_SIZE]> for Tag {
    fn from(bytes: [u8; TAG_SIZE]) -> Self {
        Self { bytes }
    }
}

impl AsRef<[u8]> for Tag {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl ConstantTimeEq for Tag {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.bytes.ct_eq(&other.bytes)
    }
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in &self.bytes {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

/// Decode into `out`; on error `out` may hold partial output and the
/// caller's drop handling applies.
fn decode_hex(
    s: &str,
    out: &mut [u8],
    wrong_length: impl Fn(usize) -> InvalidArgument,
) -> Result<(), InvalidArgument> {
    let s = s.trim();
    match hex::decode_to_slice(s, out) {
        Ok(()) => Ok(()),
        Err(hex::FromHexError::InvalidStringLength) | Err(hex::FromHexError::OddLength) => {
            tracing::debug!(hex_len = s.len(), expected = 2 * out.len(), "rejected hex length");
            Err(wrong_length(s.len() / 2))
        }
        Err(_) => Err(InvalidArgument::Hex),
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Length-prepended CBC-MAC bound to one key.
///
/// # Example
///
/// ```
/// use lp_cbc_mac::{CbcMac, Key};
///
/// let mac = CbcMac::new(Key::from([7u8; 32]));
/// let tag = mac.compute(b"attack at dawn");
///
/// assert!(mac.verify(&tag, b"attack at dawn"));
/// assert!(!mac.verify(&tag, b"attack at dusk"));
/// ```
#[derive(Clone)]
pub struct CbcMac {
    key: Key,
}

impl CbcMac {
    pub fn new(key: Key) -> Self {
        Self { key }
    }

    /// Engine from a raw key slice of exactly `KEY_SIZE` bytes.
    pub fn from_key_bytes(key: &[u8]) -> Result<Self, InvalidArgument> {
        Ok(Self::new(Key::from_bytes(key)?))
    }

    pub fn compute(&self, message: &[u8]) -> Tag {
        Tag::from(mac::tag_with_key(message, self.key.as_bytes()))
    }

    /// Constant-time verification of a typed tag.
    pub fn verify(&self, tag: &Tag, message: &[u8]) -> bool {
        mac::verify_with_key(tag.as_bytes(), message, self.key.as_bytes())
    }

    /// Verification of a raw tag slice. Fails only on a wrongly sized tag.
    pub fn verify_slice(&self, tag: &[u8], message: &[u8]) -> Result<bool, InvalidArgument> {
        if tag.len() != TAG_SIZE {
            tracing::debug!(actual = tag.len(), "rejected tag length");
            return Err(InvalidArgument::TagLength { actual: tag.len() });
        }
        Ok(mac::verify_with_key(tag, message, self.key.as_bytes()))
    }
}

impl fmt::Debug for CbcMac {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CbcMac").field("key", &self.key).finish()
    }
}
