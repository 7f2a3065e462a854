//! Serde support for [`Tsid`].
//!
//! By default a [`Tsid`] serializes as its canonical base32 string. Use the
//! [`as_native`] module with `#[serde(with = "...")]` to store the raw
//! integer instead, or [`as_base32`] to be explicit about the string form.
//!
//! [`Tsid`]: crate::Tsid

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::Tsid;

impl Serialize for Tsid {
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        as_base32::serialize(self, s)
    }
}

impl<'de> Deserialize<'de> for Tsid {
    fn deserialize<D>(d: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        as_base32::deserialize(d)
    }
}

pub mod as_native {
    use super::{Deserialize, Deserializer, Serialize, Serializer};
    use crate::Tsid;

    /// Serialize a TSID as its native integer representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<S>(id: &Tsid, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        id.to_raw().serialize(s)
    }

    /// Deserialize a TSID from its native integer representation.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The underlying deserializer fails
    /// - The value has the reserved top bit set
    pub fn deserialize<'de, D>(d: D) -> Result<Tsid, D::Error>
    where
        D: Deserializer<'de>,
    {
        let n = u64::deserialize(d)?;
        Tsid::try_from(n).map_err(serde::de::Error::custom)
    }
}

pub mod as_base32 {
    use super::{Deserializer, Serializer};
    use crate::Tsid;

    /// Serialize a TSID as a Crockford base32 encoded string.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<S>(id: &Tsid, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_str(id.encode().as_str())
    }

    /// Deserialize a TSID from a Crockford base32 encoded string.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The underlying deserializer fails
    /// - The string is not valid Crockford base32 (invalid length or ascii)
    /// - The decoded value has the reserved top bit set
    pub fn deserialize<'de, D>(d: D) -> Result<Tsid, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct Base32Visitor;

        impl serde::de::Visitor<'_> for Base32Visitor {
            type Value = Tsid;

            fn expecting(&self, formatter: &mut core::fmt::Formatter) -> core::fmt::Result {
                formatter.write_str("a 13-character Crockford base32 encoded string")
            }

            #[inline]
            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Tsid::decode(v).map_err(E::custom)
            }
        }

        d.deserialize_str(Base32Visitor)
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use crate::{NODE_BITS_1024, Tsid, TsidConfig};

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Row {
        id: Tsid,
        #[serde(with = "super::as_native")]
        parent: Tsid,
    }

    #[test]
    fn default_form_is_base32_string() {
        let id = Tsid::from_raw(2_424_242_424_242_424_242);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"23953MG16DJDJ\"");
        assert_eq!(serde_json::from_str::<Tsid>(&json).unwrap(), id);
    }

    #[test]
    fn native_form_is_integer() {
        let row = Row {
            id: Tsid::from_raw(1),
            parent: Tsid::from_raw(42),
        };
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"id":"0000000000001","parent":42}"#);
        assert_eq!(serde_json::from_str::<Row>(&json).unwrap(), row);
    }

    #[test]
    fn reserved_bit_is_rejected() {
        let json = format!(r#"{{"id":"0000000000001","parent":{}}}"#, u64::MAX);
        assert!(serde_json::from_str::<Row>(&json).is_err());
        assert!(serde_json::from_str::<Tsid>("\"FZZZZZZZZZZZZ\"").is_err());
        assert!(serde_json::from_str::<Tsid>("\"short\"").is_err());
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: TsidConfig = serde_json::from_str(r#"{"node_bits":10,"node":7}"#).unwrap();
        assert_eq!(
            config,
            TsidConfig::default()
                .with_node_bits(NODE_BITS_1024)
                .with_node(7)
        );
    }
}
