use core::{fmt, str::FromStr};

use crate::{
    Base32Error, Error, Result, Tsid,
    base32::{ENCODED_LEN, decode_base32, encode_base32},
};

impl Tsid {
    /// Encodes this ID into its canonical 13-character Crockford base32 form.
    ///
    /// The output is upper-case ASCII, fixed width and sorts
    /// lexicographically in the same order as the numeric value.
    ///
    /// # Example
    /// ```
    /// use tsid::Tsid;
    ///
    /// let id = Tsid::from_raw(2_424_242_424_242_424_242);
    /// assert_eq!(id.encode(), "23953MG16DJDJ");
    /// ```
    #[must_use]
    pub fn encode(&self) -> String {
        self.encode_to_buf().iter().map(|&b| b as char).collect()
    }

    /// Encodes this ID into lower-case Crockford base32.
    #[must_use]
    pub fn encode_lower(&self) -> String {
        self.encode().to_ascii_lowercase()
    }

    /// Encodes this ID into a stack buffer without heap allocation.
    ///
    /// See also: [`Tsid::encode`] for an allocation-producing version.
    #[must_use]
    pub fn encode_to_buf(&self) -> [u8; ENCODED_LEN] {
        encode_base32(self.to_raw())
    }

    /// Decodes a Crockford base32 string back into an ID.
    ///
    /// Lower-case letters and the aliases `O`, `I`, `L` are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Base32`] if the input string:
    /// - is not exactly 13 characters long
    /// - contains characters outside the Crockford alphabet
    /// - decodes to a value with the reserved top bit set (first character
    ///   above `7`)
    ///
    /// # Example
    /// ```
    /// use tsid::Tsid;
    ///
    /// let id = Tsid::decode("0AWE5HZP3SKTK").unwrap();
    /// assert_eq!(id.encode(), "0AWE5HZP3SKTK");
    /// assert!(Tsid::decode("8000000000000").is_err());
    /// ```
    pub fn decode(s: &str) -> Result<Self> {
        let raw = decode_base32(s)?;
        let id = Self::from_raw(raw);
        if !id.is_valid() {
            return Err(Error::Base32(Base32Error::DecodeOverflow { raw }));
        }
        Ok(id)
    }

    /// Returns `true` if `s` decodes to a valid ID.
    #[must_use]
    pub fn is_valid_str(s: &str) -> bool {
        Self::decode(s).is_ok()
    }
}

impl fmt::Display for Tsid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let buf = self.encode_to_buf();
        // Crockford base32 output is always ASCII.
        let s = core::str::from_utf8(&buf).map_err(|_| fmt::Error)?;
        f.write_str(s)
    }
}

impl FromStr for Tsid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::decode(s)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Base32Error, Error, Tsid};

    #[test]
    fn max_id_encodes_to_seven_then_z() {
        assert_eq!(Tsid::MAX.encode(), "7ZZZZZZZZZZZZ");
        assert_eq!(Tsid::decode("7ZZZZZZZZZZZZ").unwrap(), Tsid::MAX);
    }

    #[test]
    fn zero_encodes_to_all_zeros() {
        assert_eq!(Tsid::MIN.encode(), "0000000000000");
        assert_eq!(Tsid::MIN.to_string(), "0000000000000");
    }

    #[test]
    fn components_survive_text_form() {
        let id = Tsid::from_components(123_456_789, 17, 300, 10);
        let decoded: Tsid = id.encode().parse().unwrap();

        assert_eq!(decoded.time(), 123_456_789);
        assert_eq!(decoded.node(10), 17);
        assert_eq!(decoded.counter(10), 300);
    }

    #[test]
    fn lower_case_decodes_to_same_id() {
        let id = Tsid::from_raw(0x0123_4567_89AB_CDEF);
        assert_eq!(Tsid::decode(&id.encode_lower()).unwrap(), id);
        assert!(id.encode_lower().chars().all(|c| !c.is_ascii_uppercase()));
    }

    #[test]
    fn text_order_matches_numeric_order() {
        let ids = [
            Tsid::from_raw(1),
            Tsid::from_raw(31),
            Tsid::from_raw(32),
            Tsid::from_components(1, 0, 0, 0),
            Tsid::MAX,
        ];
        for pair in ids.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(pair[0].encode() < pair[1].encode());
        }
    }

    #[test]
    fn reserved_bit_is_rejected() {
        for s in ["8000000000000", "FZZZZZZZZZZZZ"] {
            assert!(matches!(
                Tsid::decode(s),
                Err(Error::Base32(Base32Error::DecodeOverflow { .. }))
            ));
            assert!(!Tsid::is_valid_str(s));
        }
    }

    #[test]
    fn invalid_strings_are_rejected() {
        assert!(!Tsid::is_valid_str(""));
        assert!(!Tsid::is_valid_str("0AWE5HZP3SKT"));
        assert!(!Tsid::is_valid_str("0AWE5HZP3SKT!"));
        assert!(Tsid::is_valid_str("0AWE5HZP3SKTK"));
    }
}
