/// Errors produced while decoding a Crockford base32 identifier.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Base32Error {
    /// The input was not exactly 13 characters long.
    #[error("invalid length: {len}")]
    DecodeInvalidLen { len: usize },
    /// The input contained a byte outside the Crockford alphabet.
    #[error("invalid ascii byte {byte:#04x} at index {index}")]
    DecodeInvalidAscii { byte: u8, index: usize },
    /// The decoded value has the reserved top bit set.
    #[error("decode overflow: {raw:#018x}")]
    DecodeOverflow { raw: u64 },
}
