//! Bit layout of a [`Tsid`].
//!
//! ```text
//!  Bit Index:  63           63 62             22 21                      0
//!              +--------------+-----------------+------------------------+
//!  Field:      | reserved (1) | time (42)       | random (22)            |
//!              +--------------+-----------------+------------------------+
//!                                               | node (N) | counter (22-N)|
//!                                               +----------+-------------+
//! ```
//!
//! The time field is 42 bits wide but its top bit overlaps the reserved bit,
//! which [`pack`] always clears. Stored times therefore range over
//! `0..=MAX_TIME` (about 69 years from the epoch) and wrap past it.
//!
//! The random field is itself split into a node sub-field (high bits) and a
//! counter sub-field (low bits). `N` is the configured node width and lies in
//! `0..=MAX_NODE_BITS`, so the counter always keeps at least two bits.
//!
//! [`Tsid`]: crate::Tsid

use crate::Tsid;

/// Number of bits holding milliseconds since the epoch.
pub const TIME_BITS: u32 = 42;

/// Number of bits holding the node and counter sub-fields.
pub const RANDOM_BITS: u32 = 22;

/// Largest accepted node width.
pub const MAX_NODE_BITS: u8 = 20;

/// Node width that leaves room for 256 nodes.
pub const NODE_BITS_256: u8 = 8;

/// Node width that leaves room for 1024 nodes.
pub const NODE_BITS_1024: u8 = 10;

/// Node width that leaves room for 4096 nodes.
pub const NODE_BITS_4096: u8 = 12;

/// Bitmask for the 42-bit time field (unshifted).
pub const TIME_MASK: u64 = (1 << TIME_BITS) - 1;

/// Bitmask for the 22-bit random field.
pub const RANDOM_MASK: u64 = (1 << RANDOM_BITS) - 1;

/// Bitmask for a whole identifier: every bit except the reserved bit 63.
pub const ID_MASK: u64 = u64::MAX >> 1;

/// Largest time value an identifier can hold.
pub const MAX_TIME: u64 = ID_MASK >> RANDOM_BITS;

/// Width of the counter sub-field for a given node width.
#[must_use]
pub const fn counter_bits(node_bits: u8) -> u32 {
    RANDOM_BITS - node_bits as u32
}

/// Bitmask for the counter sub-field (unshifted).
#[must_use]
pub const fn counter_mask(node_bits: u8) -> u32 {
    (1 << counter_bits(node_bits)) - 1
}

/// Bitmask for the node sub-field (unshifted).
#[must_use]
pub const fn node_mask(node_bits: u8) -> u32 {
    (1 << node_bits as u32) - 1
}

/// Packs a time value and a random value into a [`Tsid`].
///
/// Both inputs are truncated to their field widths and bit 63 of the result
/// is cleared, so only the low 41 bits of `time` survive.
#[must_use]
pub const fn pack(time: u64, random: u64) -> Tsid {
    Tsid::from_raw((((time & TIME_MASK) << RANDOM_BITS) | (random & RANDOM_MASK)) & ID_MASK)
}

/// Splits a [`Tsid`] into its time value and random value.
#[must_use]
pub const fn unpack(id: Tsid) -> (u64, u64) {
    let raw = id.to_raw();
    ((raw >> RANDOM_BITS) & TIME_MASK, raw & RANDOM_MASK)
}

/// Combines a node and a counter into a random field value.
///
/// `node` is masked to `node_bits` bits and `counter` to the remaining
/// `RANDOM_BITS - node_bits` bits.
#[must_use]
pub const fn compose_random(node: u32, counter: u32, node_bits: u8) -> u64 {
    let node = (node & node_mask(node_bits)) as u64;
    let counter = (counter & counter_mask(node_bits)) as u64;
    (node << counter_bits(node_bits)) | counter
}

/// Splits a random field value into its node and counter.
#[must_use]
pub const fn split_random(random: u64, node_bits: u8) -> (u32, u32) {
    let random = random & RANDOM_MASK;
    let node = (random >> counter_bits(node_bits)) as u32 & node_mask(node_bits);
    let counter = random as u32 & counter_mask(node_bits);
    (node, counter)
}
