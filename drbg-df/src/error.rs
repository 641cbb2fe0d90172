//! Error types

/// Errors returned by the derivation functions in this crate.
///
/// Every variant signals a caller programming or configuration error.
/// None of them are transient, and no partial output is produced when
/// one is returned.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// Input to the chaining function (or a working state) does not have
    /// the length the construction requires.
    #[error("input length is not a positive multiple of the block size")]
    InvalidInputLength,

    /// Requested bit length is not byte-aligned, or is zero where a
    /// positive length is required.
    #[error("requested bit length must be a positive multiple of 8")]
    InvalidLength,

    /// Requested length exceeds the maximum defined for the construction.
    #[error("requested length exceeds the maximum for this construction")]
    LengthExceeded,

    /// The configured key size is not supported by the block cipher.
    #[error("key size is not supported by the underlying block cipher")]
    UnsupportedKeySize,
}

/// Result type with the `drbg-df` crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
