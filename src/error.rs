//! Error type for the MAC engine.
//!
//! Only fixed-size precondition violations are errors. A tag that does not
//! match is a normal `false` from verification, never an `Err`.

use core::fmt;

use crate::mac::{KEY_SIZE, TAG_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidArgument {
    /// Key was not exactly `KEY_SIZE` bytes.
    KeyLength { actual: usize },
    /// Tag (or tag output buffer) was not exactly `TAG_SIZE` bytes.
    TagLength { actual: usize },
    /// Hex-encoded key or tag contained a non-hex character.
    Hex,
}

impl fmt::Display for InvalidArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KeyLength { actual } => {
                write!(f, "key must be {} bytes long (got {})", KEY_SIZE, actual)
            }
            Self::TagLength { actual } => {
                write!(f, "tag must be {} bytes long (got {})", TAG_SIZE, actual)
            }
            Self::Hex => write!(f, "invalid hex encoding"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InvalidArgument {}

/// The operating system RNG could not produce key material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomError;

impl fmt::Display for RandomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "random key generation failed")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RandomError {}
