//! Fixed-width big-endian integer helpers.
//!
//! Buffers are interpreted as unsigned big-endian integers of `8 * len`
//! bits. All arithmetic is modulo `2^(8 * len)`: carries out of the most
//! significant byte are discarded.

/// Encode `value` as 4 bytes, most significant byte first.
#[inline]
pub fn encode_u32(value: u32) -> [u8; 4] {
    value.to_be_bytes()
}

/// Add 1 to `buf` modulo `2^(8 * buf.len())`.
///
/// The carry is propagated through every byte, so the running time does
/// not depend on the value. An empty buffer is left untouched.
#[inline]
pub fn increment(buf: &mut [u8]) {
    let mut carry = 1u16;

    for byte in buf.iter_mut().rev() {
        let sum = u16::from(*byte) + carry;
        *byte = (sum & 0xFF) as u8;
        carry = sum >> u8::BITS;
    }
}

/// Compute `buf = (buf + addend) mod 2^(8 * buf.len())`.
///
/// `addend` is right-aligned against `buf`. Any of its bytes that lie
/// beyond the width of `buf` only contribute multiples of the modulus and
/// are ignored.
pub fn add_assign(buf: &mut [u8], addend: &[u8]) {
    let mut carry = 0u16;
    let mut rhs = addend.iter().rev();

    for byte in buf.iter_mut().rev() {
        let b = rhs.next().copied().unwrap_or(0);
        let sum = u16::from(*byte) + u16::from(b) + carry;
        *byte = (sum & 0xFF) as u8;
        carry = sum >> u8::BITS;
    }
}
