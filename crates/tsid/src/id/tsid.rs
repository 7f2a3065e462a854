use core::{fmt, time::Duration};

use crate::{
    Error,
    id::layout::{self, ID_MASK},
};

/// A 64-bit Time-Sorted Unique Identifier.
///
/// - 1 bit reserved (always zero)
/// - 42 bits time (ms since the generator's epoch), whose top bit is the
///   reserved bit, so at most 41 of them are ever set
/// - 22 bits random, split into a node (high) and a counter (low)
///
/// ```text
///  Bit Index:  63           63 62            22 21                         0
///              +--------------+----------------+---------------------------+
///  Field:      | reserved (1) | time (42)      | node (N) | counter (22 - N) |
///              +--------------+----------------+---------------------------+
///              |<----------- MSB ---------- 64 bits ----------- LSB ------>|
/// ```
///
/// The reserved bit keeps the value non-negative when stored as a signed
/// 64-bit integer, so numeric order, base32 order and creation order agree.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Tsid {
    id: u64,
}

impl Tsid {
    /// The smallest identifier.
    pub const MIN: Self = Self::from_raw(0);

    /// The largest identifier (reserved bit clear).
    pub const MAX: Self = Self::from_raw(ID_MASK);

    /// Wraps a raw 64-bit value.
    ///
    /// The value is stored as-is. Use [`Tsid::is_valid`] or
    /// [`TryFrom<u64>`] when the reserved bit must be checked.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self { id: raw }
    }

    /// Returns the raw 64-bit value.
    #[must_use]
    pub const fn to_raw(&self) -> u64 {
        self.id
    }

    /// Builds an identifier from its time, node and counter components.
    #[must_use]
    pub const fn from_components(time: u64, node: u32, counter: u32, node_bits: u8) -> Self {
        layout::pack(time, layout::compose_random(node, counter, node_bits))
    }

    /// Extracts the time field (ms since the generator's epoch).
    #[must_use]
    pub const fn time(&self) -> u64 {
        layout::unpack(*self).0
    }

    /// Extracts the 22-bit random field.
    #[must_use]
    pub const fn random(&self) -> u64 {
        layout::unpack(*self).1
    }

    /// Extracts the node sub-field for the given node width.
    #[must_use]
    pub const fn node(&self, node_bits: u8) -> u32 {
        layout::split_random(self.random(), node_bits).0
    }

    /// Extracts the counter sub-field for the given node width.
    #[must_use]
    pub const fn counter(&self, node_bits: u8) -> u32 {
        layout::split_random(self.random(), node_bits).1
    }

    /// Returns the creation time as milliseconds since the Unix epoch, given
    /// the epoch the generator was configured with.
    #[must_use]
    pub const fn unix_millis(&self, epoch: Duration) -> u64 {
        self.time() + epoch.as_millis() as u64
    }

    /// Returns `true` if the reserved bit is clear.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.id & !ID_MASK == 0
    }

    /// Returns a copy with the reserved bit cleared.
    #[must_use]
    pub const fn into_valid(self) -> Self {
        Self::from_raw(self.id & ID_MASK)
    }

    /// Returns the big-endian byte representation.
    #[must_use]
    pub const fn to_be_bytes(&self) -> [u8; 8] {
        self.id.to_be_bytes()
    }

    /// Builds an identifier from big-endian bytes.
    #[must_use]
    pub const fn from_be_bytes(bytes: [u8; 8]) -> Self {
        Self::from_raw(u64::from_be_bytes(bytes))
    }
}

impl From<Tsid> for u64 {
    fn from(id: Tsid) -> Self {
        id.to_raw()
    }
}

impl TryFrom<u64> for Tsid {
    type Error = Error;

    fn try_from(raw: u64) -> Result<Self, Self::Error> {
        let id = Self::from_raw(raw);
        if id.is_valid() {
            Ok(id)
        } else {
            Err(Error::Base32(crate::Base32Error::DecodeOverflow { raw }))
        }
    }
}

impl fmt::Debug for Tsid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tsid")
            .field("raw", &self.id)
            .field("time", &self.time())
            .field("random", &format_args!("{:#024b}", self.random()))
            .finish()
    }
}
