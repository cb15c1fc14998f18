//! # Length-prepended CBC-MAC
//!
//! Deterministic message authentication over AES-256 for variable-length
//! messages under a shared 32-byte key.
//!
//! ## Quick Start
//!
//! ```rust
//! use lp_cbc_mac::{compute_tag, verify_tag};
//!
//! let key = [0x24u8; 32];
//! let tag = compute_tag(b"Fool of a Took!", &key).unwrap();
//!
//! assert_eq!(verify_tag(&tag, b"Fool of a Took!", &key), Ok(true));
//! assert_eq!(verify_tag(&tag, b"Fool of a took!", &key), Ok(false));
//! ```
//!
//! ## Construction
//!
//! - **Length block**: `len(message)` as u64 little-endian, zero-extended to
//!   one 16-byte block, is prepended before the message
//! - **Chaining**: AES-256-CBC with a fixed all-zero IV and PKCS#7 padding
//! - **Tag**: the final ciphertext block; all other blocks are discarded and
//!   the buffer is zeroized
//! - **Verification**: constant-time comparison; a mismatch is `Ok(false)`
//!
//! ## What's NOT Provided
//!
//! - Key derivation or storage
//! - Message framing
//! - Configurable IVs
//! - Authenticated encryption

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![deny(unsafe_code)]
#![doc(html_root_url = "https://docs.rs/lp-cbc-mac/0.1.0")]

extern crate alloc;

// ---------------------------------------------------------------------------
// Internal modules
// ---------------------------------------------------------------------------

mod error;
mod mac;
mod sdk;

// ---------------------------------------------------------------------------
// Public interface
// ---------------------------------------------------------------------------

pub use error::{InvalidArgument, RandomError};
pub use mac::{
    compute_tag, compute_tag_into, verify_tag, BLOCK_SIZE, KEY_SIZE, LENGTH_HEADER_BYTES,
    TAG_SIZE,
};
pub use sdk::{CbcMac, Key, Tag};

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
