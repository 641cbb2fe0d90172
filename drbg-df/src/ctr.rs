//! `Block_Cipher_df` derivation function and counter-mode output generation
//! as described in NIST SP 800-90A Rev. 1:
//! <https://csrc.nist.gov/publications/detail/sp/800-90a/rev-1/final>

use alloc::{vec, vec::Vec};
use core::{fmt, marker::PhantomData};

use cipher::{BlockCipherEncrypt, KeyInit, typenum::Unsigned};
use zeroize::{Zeroize, Zeroizing};

use crate::{
    DerivationFunction, DfConfig, Error, MAX_BITS_PER_REQUEST, Primitive, Result,
    bcc::{self, Block},
    counter, requested_len, seed_len, security_strength,
};

/// Starting key of the `BCC` stage: `0x00 0x01 ... 0x1F`.
///
/// This value is public and fixed by SP 800-90A Section 10.3.2 step 8.
/// Only the leftmost `keylen` bytes are used.
pub const DF_KEY: [u8; 32] = [
    0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B, 0x0C, 0x0D, 0x0E, 0x0F,
    0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0x18, 0x19, 0x1A, 0x1B, 0x1C, 0x1D, 0x1E, 0x1F,
];

/// Block-cipher based derivation function (CTR-DF) over the cipher `C`.
///
/// Holds only the configured key and seed lengths; every call is a pure
/// function of its arguments.
pub struct CtrDf<C> {
    /// `keylen` in bytes
    key_len: usize,

    /// `seedlen` in bytes
    seed_len: usize,

    cipher: PhantomData<C>,
}

impl<C> CtrDf<C>
where
    C: BlockCipherEncrypt + KeyInit,
{
    /// Configure a CTR-DF using `key_size_bits` wide keys for `C` and a
    /// `seed_len_bits` seed length.
    pub fn new(key_size_bits: usize, seed_len_bits: usize) -> Result<Self> {
        if key_size_bits == 0 || key_size_bits % 8 != 0 || key_size_bits > DF_KEY.len() * 8 {
            log::debug!("ctr_df: unsupported key size of {key_size_bits} bits");
            return Err(Error::UnsupportedKeySize);
        }

        let key_len = key_size_bits / 8;
        if C::new_from_slice(&DF_KEY[..key_len]).is_err() {
            log::debug!("ctr_df: cipher rejects {key_size_bits}-bit keys");
            return Err(Error::UnsupportedKeySize);
        }

        let seed_len = seed_len(seed_len_bits)?;
        log::trace!(
            "ctr_df: keylen={key_size_bits} outlen={} seedlen={seed_len_bits}",
            C::BlockSize::USIZE * 8
        );

        Ok(Self {
            key_len,
            seed_len,
            cipher: PhantomData,
        })
    }

    /// Configure a CTR-DF with the parameters SP 800-90A Table 3 gives for
    /// `C`: `keylen` is the cipher's native key size and
    /// `seedlen = keylen + outlen`.
    pub fn for_cipher() -> Result<Self> {
        let key_bits = C::KeySize::USIZE * 8;
        Self::new(key_bits, key_bits + C::BlockSize::USIZE * 8)
    }

    /// Derive `number_of_bits_to_return` bits from `seed_material`.
    pub fn derive(&self, seed_material: &[u8], number_of_bits_to_return: usize) -> Result<Vec<u8>> {
        let len = requested_len(number_of_bits_to_return)?;
        if len == 0 {
            return Err(Error::InvalidLength);
        }

        let mut out = vec![0u8; len];
        self.derive_into(seed_material, &mut out)?;
        Ok(out)
    }

    /// Derive `out.len()` bytes from `seed_material` into `out`.
    ///
    /// `out` is only written once all checks have passed.
    pub fn derive_into(&self, seed_material: &[u8], out: &mut [u8]) -> Result<()> {
        if out.is_empty() {
            return Err(Error::InvalidLength);
        }
        if out.len() > MAX_BITS_PER_REQUEST / 8 {
            log::debug!("ctr_df: {} bytes requested", out.len());
            return Err(Error::LengthExceeded);
        }

        // Steps 2-3: L and N are 32-bit big endian byte counts
        let l = u32::try_from(seed_material.len()).map_err(|_| Error::LengthExceeded)?;
        let n = u32::try_from(out.len()).map_err(|_| Error::LengthExceeded)?;

        let outlen = C::BlockSize::USIZE;
        let key_len = self.key_len;

        // Steps 4-5: S = L || N || seed_material || 0x80, zero padded to a
        // multiple of outlen. The first outlen bytes are reserved for IV.
        let s_len = (8 + seed_material.len() + 1).div_ceil(outlen) * outlen;
        let mut iv_s = Zeroizing::new(vec![0u8; outlen + s_len]);
        {
            let s = &mut iv_s[outlen..];
            s[..4].copy_from_slice(&counter::encode_u32(l));
            s[4..8].copy_from_slice(&counter::encode_u32(n));
            s[8..8 + seed_material.len()].copy_from_slice(seed_material);
            s[8 + seed_material.len()] = 0x80;
        }

        // Step 8: K = leftmost keylen bits of 0x00010203...1D1E1F
        let k = C::new_from_slice(&DF_KEY[..key_len]).map_err(|_| Error::UnsupportedKeySize)?;

        // Step 9: temp = temp || BCC(K, IV || S) until keylen + outlen bytes
        let mut temp = Zeroizing::new(Vec::with_capacity(key_len + 2 * outlen));
        let mut i = 0u32;
        while temp.len() < key_len + outlen {
            iv_s[..4].copy_from_slice(&counter::encode_u32(i));
            let mut chaining = bcc::chain(&k, &iv_s)?;
            temp.extend_from_slice(&chaining);
            chaining[..].zeroize();
            i += 1;
        }

        // Steps 10-11: K = leftmost keylen bytes, X = next outlen bytes
        let k = C::new_from_slice(&temp[..key_len]).map_err(|_| Error::UnsupportedKeySize)?;
        let mut x = Block::<C>::default();
        x.copy_from_slice(&temp[key_len..key_len + outlen]);

        // Steps 13-14: X = Block_Encrypt(K, X), keep the leftmost bytes
        for chunk in out.chunks_mut(outlen) {
            k.encrypt_block(&mut x);
            chunk.copy_from_slice(&x[..chunk.len()]);
        }

        x[..].zeroize();
        Ok(())
    }

    /// Generate `requested_bits` bits in counter mode from the working
    /// state `Key || V`.
    ///
    /// This is the output loop of `CTR_DRBG_Generate_algorithm` (SP 800-90A
    /// Section 10.2.1.5.2 step 4) with a full-block counter: `V` is
    /// incremented before each encryption. `state` is not modified, so the
    /// caller must advance its own `V` by the number of blocks produced.
    pub fn generate(&self, state: &[u8], requested_bits: usize) -> Result<Vec<u8>> {
        let mut out = vec![0u8; requested_len(requested_bits)?];
        self.generate_into(state, &mut out)?;
        Ok(out)
    }

    /// Counter-mode generation into `out`. See [`CtrDf::generate`].
    pub fn generate_into(&self, state: &[u8], out: &mut [u8]) -> Result<()> {
        if out.len() > MAX_BITS_PER_REQUEST / 8 {
            log::debug!("ctr_df: {} bytes requested", out.len());
            return Err(Error::LengthExceeded);
        }

        let outlen = C::BlockSize::USIZE;
        if state.len() != self.key_len + outlen {
            log::debug!(
                "ctr_df: working state is {} bytes, expected {}",
                state.len(),
                self.key_len + outlen
            );
            return Err(Error::InvalidInputLength);
        }

        let (key, v) = state.split_at(self.key_len);
        let cipher = C::new_from_slice(key).map_err(|_| Error::UnsupportedKeySize)?;

        let mut v_block = Block::<C>::default();
        v_block.copy_from_slice(v);

        for chunk in out.chunks_mut(outlen) {
            counter::increment(&mut v_block);
            let mut output_block = v_block.clone();
            cipher.encrypt_block(&mut output_block);
            chunk.copy_from_slice(&output_block[..chunk.len()]);
            output_block[..].zeroize();
        }

        v_block[..].zeroize();
        Ok(())
    }
}

impl<C> DerivationFunction for CtrDf<C>
where
    C: BlockCipherEncrypt + KeyInit,
{
    fn seed_len_bits(&self) -> usize {
        self.seed_len * 8
    }

    fn security_strength_bits(&self) -> usize {
        security_strength(self.key_len * 8)
    }

    fn derive_bytes(&self, seed_material: &[u8]) -> Result<Vec<u8>> {
        self.derive(seed_material, self.seed_len_bits())
    }

    fn generate_bytes(&self, state: &[u8], requested_bits: usize) -> Result<Vec<u8>> {
        self.generate(state, requested_bits)
    }

    fn config(&self) -> DfConfig {
        DfConfig {
            primitive: Primitive::BlockCipher,
            key_size_bits: Some(self.key_len * 8),
            seed_len_bits: self.seed_len_bits(),
            out_len: C::BlockSize::USIZE,
            security_strength_bits: self.security_strength_bits(),
        }
    }
}

impl<C> Clone for CtrDf<C> {
    fn clone(&self) -> Self {
        Self {
            key_len: self.key_len,
            seed_len: self.seed_len,
            cipher: PhantomData,
        }
    }
}

impl<C> fmt::Debug for CtrDf<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CtrDf")
            .field("key_len", &self.key_len)
            .field("seed_len", &self.seed_len)
            .finish()
    }
}
