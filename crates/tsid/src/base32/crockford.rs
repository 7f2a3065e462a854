use crate::Base32Error;

const ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";
const NO_VALUE: u8 = 255;
const BITS_PER_CHAR: usize = 5;

/// Number of characters in an encoded 64-bit value: `ceil(64 / 5)`.
pub const ENCODED_LEN: usize = (u64::BITS as usize).div_ceil(BITS_PER_CHAR);

/// Lookup table for Crockford base32 decoding
const LOOKUP: [u8; 256] = {
    let mut lut = [NO_VALUE; 256];
    let mut i = 0_u8;
    // Main alphabet, allow lower-case
    while i < 32 {
        let c = ALPHABET[i as usize];
        lut[c as usize] = i;
        if c.is_ascii_uppercase() {
            lut[(c + 32) as usize] = i; // lowercase letter
        }
        i += 1;
    }
    // Crockford-specific aliases
    lut[b'O' as usize] = 0;
    lut[b'o' as usize] = 0;
    lut[b'I' as usize] = 1;
    lut[b'i' as usize] = 1;
    lut[b'L' as usize] = 1;
    lut[b'l' as usize] = 1;
    lut
};

/// Encodes a `u64` into 13 Crockford base32 characters, most significant
/// first.
///
/// The first character carries only the top 4 bits, so for values with the
/// reserved bit clear it is always in `0..=7`.
pub fn encode_base32(value: u64) -> [u8; ENCODED_LEN] {
    let mut buf = [0_u8; ENCODED_LEN];
    for (i, out) in buf.iter_mut().enumerate() {
        let shift = (ENCODED_LEN - 1 - i) * BITS_PER_CHAR;
        *out = ALPHABET[((value >> shift) & 0x1F) as usize];
    }
    buf
}

/// Decodes a 13-character Crockford base32 string into a `u64`.
///
/// Accepts lower-case letters and the Crockford aliases `O`, `I` and `L`.
///
/// # Errors
///
/// - [`Base32Error::DecodeInvalidLen`] if the input is not 13 bytes.
/// - [`Base32Error::DecodeInvalidAscii`] for bytes outside the alphabet.
/// - [`Base32Error::DecodeOverflow`] if the first character encodes more
///   than 4 bits.
pub fn decode_base32(encoded: &str) -> Result<u64, Base32Error> {
    if encoded.len() != ENCODED_LEN {
        return Err(Base32Error::DecodeInvalidLen {
            len: encoded.len(),
        });
    }

    let mut acc = 0_u64;
    let mut overflow = false;
    for (index, byte) in encoded.bytes().enumerate() {
        let val = LOOKUP[byte as usize];
        if val == NO_VALUE {
            return Err(Base32Error::DecodeInvalidAscii { byte, index });
        }
        if index == 0 && val > 0x0F {
            overflow = true;
        }
        acc = (acc << BITS_PER_CHAR) | u64::from(val);
    }

    if overflow {
        return Err(Base32Error::DecodeOverflow { raw: acc });
    }
    Ok(acc)
}
