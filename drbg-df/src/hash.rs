//! Digest based `Hash_df` and `Hashgen` (NIST SP 800-90A Sections 10.3.1 and
//! 10.1.1.4).

use alloc::{vec, vec::Vec};
use core::{fmt, marker::PhantomData};

use digest::Digest;
use zeroize::{Zeroize, Zeroizing};

use crate::{
    DerivationFunction, DfConfig, Error, MAX_BITS_PER_REQUEST, Primitive, Result, counter,
    requested_len, seed_len, security_strength,
};

/// `seedlen` for digests with outputs of up to 256 bits (SP 800-90A Table 2).
const SHORT_SEED_LEN_BITS: usize = 440;

/// `seedlen` for digests with outputs wider than 256 bits.
const LONG_SEED_LEN_BITS: usize = 888;

/// Derive `bits` bits from `input` with `Hash_df`.
///
/// `bits` must be a positive multiple of 8 and no more than
/// `255 * outlen` bits, since the block counter is a single byte.
pub fn hash_df<D: Digest>(input: &[u8], bits: usize) -> Result<Vec<u8>> {
    if bits % 8 != 0 {
        return Err(Error::InvalidLength);
    }

    let mut out = vec![0u8; bits / 8];
    hash_df_into::<D>(input, &mut out)?;
    Ok(out)
}

/// `Hash_df` writing `out.len()` bytes into `out`.
pub fn hash_df_into<D: Digest>(input: &[u8], out: &mut [u8]) -> Result<()> {
    let outlen = <D as Digest>::output_size();
    if out.is_empty() {
        return Err(Error::InvalidLength);
    }
    if out.len() > usize::from(u8::MAX) * outlen {
        log::debug!("hash_df: {} bytes requested", out.len());
        return Err(Error::LengthExceeded);
    }

    let bits = out
        .len()
        .checked_mul(8)
        .and_then(|bits| u32::try_from(bits).ok())
        .ok_or(Error::LengthExceeded)?;

    for (i, chunk) in (1..=u8::MAX).zip(out.chunks_mut(outlen)) {
        let mut hasher = D::new();
        hasher.update([i]);
        hasher.update(counter::encode_u32(bits));
        hasher.update(input);

        let mut w = hasher.finalize();
        chunk.copy_from_slice(&w[..chunk.len()]);
        w[..].zeroize();
    }

    Ok(())
}

/// Expand the working state `v` to `requested_bits` bits with `Hashgen`.
///
/// The state is hashed, incremented as a big-endian integer of its own
/// width, and hashed again until `ceil(requested_bits / outlen)` digests
/// have been produced. A request for zero bits yields an empty vector.
pub fn hashgen<D: Digest>(v: &[u8], requested_bits: usize) -> Result<Vec<u8>> {
    let mut out = vec![0u8; requested_len(requested_bits)?];
    hashgen_into::<D>(v, &mut out)?;
    Ok(out)
}

/// `Hashgen` writing `out.len()` bytes into `out`.
pub fn hashgen_into<D: Digest>(v: &[u8], out: &mut [u8]) -> Result<()> {
    if out.len() > MAX_BITS_PER_REQUEST / 8 {
        log::debug!("hashgen: {} bytes requested", out.len());
        return Err(Error::LengthExceeded);
    }

    let outlen = <D as Digest>::output_size();
    let mut data = Zeroizing::new(v.to_vec());

    for chunk in out.chunks_mut(outlen) {
        let mut w = D::digest(&data[..]);
        chunk.copy_from_slice(&w[..chunk.len()]);
        w[..].zeroize();
        counter::increment(&mut data[..]);
    }

    Ok(())
}

/// Digest based derivation function over the digest `D`.
///
/// [`DerivationFunction::derive_bytes`] runs [`hash_df`] and
/// [`DerivationFunction::generate_bytes`] runs [`hashgen`].
pub struct HashDf<D> {
    /// `seedlen` in bytes
    seed_len: usize,

    digest: PhantomData<D>,
}

impl<D: Digest> HashDf<D> {
    /// Configure with an explicit `seed_len_bits` seed length.
    pub fn new(seed_len_bits: usize) -> Result<Self> {
        let seed_len = seed_len(seed_len_bits)?;
        log::trace!(
            "hash_df: outlen={} seedlen={seed_len_bits}",
            <D as Digest>::output_size() * 8
        );

        Ok(Self {
            seed_len,
            digest: PhantomData,
        })
    }

    /// Configure with the seed length SP 800-90A Table 2 gives for `D`.
    pub fn for_digest() -> Self {
        let seed_len_bits = if <D as Digest>::output_size() * 8 <= 256 {
            SHORT_SEED_LEN_BITS
        } else {
            LONG_SEED_LEN_BITS
        };

        Self {
            seed_len: seed_len_bits / 8,
            digest: PhantomData,
        }
    }
}

impl<D: Digest> DerivationFunction for HashDf<D> {
    fn seed_len_bits(&self) -> usize {
        self.seed_len * 8
    }

    fn security_strength_bits(&self) -> usize {
        security_strength(<D as Digest>::output_size() * 8)
    }

    fn derive_bytes(&self, seed_material: &[u8]) -> Result<Vec<u8>> {
        hash_df::<D>(seed_material, self.seed_len_bits())
    }

    fn generate_bytes(&self, state: &[u8], requested_bits: usize) -> Result<Vec<u8>> {
        hashgen::<D>(state, requested_bits)
    }

    fn config(&self) -> DfConfig {
        DfConfig {
            primitive: Primitive::Digest,
            key_size_bits: None,
            seed_len_bits: self.seed_len_bits(),
            out_len: <D as Digest>::output_size(),
            security_strength_bits: self.security_strength_bits(),
        }
    }
}

impl<D> Clone for HashDf<D> {
    fn clone(&self) -> Self {
        Self {
            seed_len: self.seed_len,
            digest: PhantomData,
        }
    }
}

impl<D> fmt::Debug for HashDf<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashDf")
            .field("seed_len", &self.seed_len)
            .finish()
    }
}
