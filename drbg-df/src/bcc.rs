//! `BCC` block-cipher chaining function (NIST SP 800-90A Section 10.3.3).
//!
//! Structurally a CBC-MAC with an all-zero initial chaining value.

use cipher::{Array, BlockCipherEncrypt, BlockSizeUser, KeyInit, typenum::Unsigned};

use crate::{Error, Result};

/// A single block of the cipher `C`.
pub type Block<C> = Array<u8, <C as BlockSizeUser>::BlockSize>;

/// Compute `BCC(key, data)`.
///
/// `data` must be a positive multiple of the cipher block size, otherwise
/// [`Error::InvalidInputLength`] is returned. A key the cipher does not
/// accept yields [`Error::UnsupportedKeySize`].
pub fn bcc<C>(key: &[u8], data: &[u8]) -> Result<Block<C>>
where
    C: BlockCipherEncrypt + KeyInit,
{
    let cipher = C::new_from_slice(key).map_err(|_| Error::UnsupportedKeySize)?;
    chain(&cipher, data)
}

/// `BCC` over an already keyed cipher.
pub(crate) fn chain<C>(cipher: &C, data: &[u8]) -> Result<Block<C>>
where
    C: BlockCipherEncrypt,
{
    let outlen = C::BlockSize::USIZE;
    if data.is_empty() || data.len() % outlen != 0 {
        log::debug!("bcc: {} bytes is not a multiple of {outlen}", data.len());
        return Err(Error::InvalidInputLength);
    }

    let mut chaining = Block::<C>::default();
    for block in data.chunks_exact(outlen) {
        xor_assign(&mut chaining, block);
        cipher.encrypt_block(&mut chaining);
    }

    Ok(chaining)
}

/// XOR-assignment
#[inline]
fn xor_assign(a: &mut [u8], b: &[u8]) {
    for (a_byte, b_byte) in a.iter_mut().zip(b.iter()) {
        *a_byte ^= b_byte;
    }
}
