#![no_std]
#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![warn(missing_docs, rust_2018_idioms, unreachable_pub)]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/media/8f1a9894/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/media/8f1a9894/logo.svg"
)]

//! ## Usage
//!
//! ```
//! use aes::Aes256;
//! use drbg_df::{CtrDf, DerivationFunction, HashDf};
//! use sha2::Sha256;
//!
//! let seed_material = b"entropy input || nonce || personalization string";
//!
//! // Block_Cipher_df with the AES-256 parameters of SP 800-90A Table 3
//! let ctr = CtrDf::<Aes256>::for_cipher()?;
//! assert_eq!(ctr.seed_len_bits(), 384);
//! assert_eq!(ctr.derive_bytes(seed_material)?.len(), 48);
//!
//! // Hash_df / Hashgen with the SHA-256 parameters of SP 800-90A Table 2
//! let hash = HashDf::<Sha256>::for_digest();
//! let v = hash.derive_bytes(seed_material)?;
//! assert_eq!(v.len(), 55);
//! assert_eq!(hash.generate_bytes(&v, 1024)?.len(), 128);
//! # Ok::<(), drbg_df::Error>(())
//! ```

extern crate alloc;

mod bcc;
mod ctr;
mod error;
mod hash;

pub mod counter;

pub use cipher;
pub use digest;

pub use crate::{
    bcc::{Block, bcc},
    ctr::{CtrDf, DF_KEY},
    error::{Error, Result},
    hash::{HashDf, hash_df, hash_df_into, hashgen, hashgen_into},
};

use alloc::vec::Vec;

/// Largest request, in bits, a single call may ask for (SP 800-90A
/// `max_number_of_bits_per_request`).
pub const MAX_BITS_PER_REQUEST: usize = 1 << 19;

/// Security strengths defined by SP 800-57, in ascending order.
const SECURITY_STRENGTHS: [usize; 4] = [112, 128, 192, 256];

/// Kind of primitive a derivation function is built on.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Primitive {
    /// Block cipher (CTR-DF).
    BlockCipher,
    /// Hash function (`Hash_df` / `Hashgen`).
    Digest,
}

/// Parameters of a configured derivation function.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DfConfig {
    /// Underlying primitive.
    pub primitive: Primitive,
    /// `keylen` in bits. `None` for digest based functions.
    pub key_size_bits: Option<usize>,
    /// `seedlen` in bits.
    pub seed_len_bits: usize,
    /// `outlen` in bytes: the cipher block size or the digest output size.
    pub out_len: usize,
    /// Security strength in bits.
    pub security_strength_bits: usize,
}

/// Derivation function used by a DRBG at instantiate, reseed and generate.
///
/// Implemented by [`CtrDf`] and [`HashDf`]. The trait is object safe so a
/// DRBG can hold a `&dyn DerivationFunction` chosen at runtime.
pub trait DerivationFunction {
    /// `seedlen` in bits.
    fn seed_len_bits(&self) -> usize;

    /// Security strength in bits, derived from the primitive's key or output
    /// size.
    fn security_strength_bits(&self) -> usize;

    /// Derive `seedlen` bits from `seed_material`.
    fn derive_bytes(&self, seed_material: &[u8]) -> Result<Vec<u8>>;

    /// Produce `requested_bits` bits of output from the working `state`.
    fn generate_bytes(&self, state: &[u8], requested_bits: usize) -> Result<Vec<u8>>;

    /// Configured parameters.
    fn config(&self) -> DfConfig;
}

/// Highest SP 800-57 security strength not exceeding `bits`, or zero when
/// `bits` is below the weakest level.
fn security_strength(bits: usize) -> usize {
    SECURITY_STRENGTHS
        .iter()
        .rev()
        .find(|&&strength| strength <= bits)
        .copied()
        .unwrap_or(0)
}

/// Convert a requested bit count into a byte count.
fn requested_len(bits: usize) -> Result<usize> {
    if bits % 8 != 0 {
        return Err(Error::InvalidLength);
    }
    if bits > MAX_BITS_PER_REQUEST {
        log::debug!("requested {bits} bits, maximum is {MAX_BITS_PER_REQUEST}");
        return Err(Error::LengthExceeded);
    }

    Ok(bits / 8)
}

/// Validate a configured `seedlen` and convert it to bytes.
fn seed_len(bits: usize) -> Result<usize> {
    match requested_len(bits)? {
        0 => Err(Error::InvalidLength),
        len => Ok(len),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strengths() {
        assert_eq!(security_strength(64), 0);
        assert_eq!(security_strength(112), 112);
        assert_eq!(security_strength(160), 128);
        assert_eq!(security_strength(224), 192);
        assert_eq!(security_strength(256), 256);
        assert_eq!(security_strength(512), 256);
    }

    #[test]
    fn lengths() {
        assert_eq!(requested_len(0), Ok(0));
        assert_eq!(requested_len(440), Ok(55));
        assert_eq!(requested_len(441), Err(Error::InvalidLength));
        assert_eq!(
            requested_len(MAX_BITS_PER_REQUEST + 8),
            Err(Error::LengthExceeded)
        );
        assert_eq!(seed_len(0), Err(Error::InvalidLength));
    }

    #[test]
    fn fixed_key_is_ascending() {
        for (i, byte) in DF_KEY.iter().enumerate() {
            assert_eq!(usize::from(*byte), i);
        }
    }
}
