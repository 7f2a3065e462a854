use core::time::Duration;

use crate::{MAX_NODE_BITS, TSID_EPOCH, id::layout};

/// Errors raised while validating a [`TsidConfig`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The node width is outside `0..=20`.
    #[error("node bits must be in 0..={max}, got {node_bits}")]
    InvalidNodeBits { node_bits: u8, max: u8 },
    /// The epoch does not fit in a signed 64-bit millisecond count.
    #[error("epoch of {millis} ms since the Unix epoch is out of range")]
    InvalidEpoch { millis: u128 },
}

/// Parameters frozen into a generator at construction.
///
/// Every field has a default, so `TsidConfig::default()` describes a single
/// node deployment (no node bits, full 22-bit counter) measured from
/// [`TSID_EPOCH`].
///
/// The time and entropy sources are not part of the record; they are passed
/// explicitly to [`LockTsidGenerator::try_new`], or defaulted by
/// [`LockTsidGenerator::from_config`].
///
/// # Node masking
///
/// A `node` wider than `node_bits` is **silently masked** to its low
/// `node_bits` bits. This is part of the contract, not an error.
///
/// # Example
/// ```
/// use tsid::{NODE_BITS_1024, TsidConfig};
///
/// let config = TsidConfig::default()
///     .with_node_bits(NODE_BITS_1024)
///     .with_node(1500);
///
/// let frozen = config.validate().unwrap();
/// assert_eq!(frozen.node(), 1500 & 0x3FF);
/// ```
///
/// [`LockTsidGenerator::try_new`]: crate::LockTsidGenerator::try_new
/// [`LockTsidGenerator::from_config`]: crate::LockTsidGenerator::from_config
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TsidConfig {
    /// Node identifier embedded into every generated id.
    pub node: u32,
    /// Width of the node sub-field, `0..=20`.
    pub node_bits: u8,
    /// Zero point of the time field, as a duration since the Unix epoch.
    pub epoch: Duration,
}

impl Default for TsidConfig {
    fn default() -> Self {
        Self {
            node: 0,
            node_bits: 0,
            epoch: TSID_EPOCH,
        }
    }
}

impl TsidConfig {
    /// Returns the record with `node` replaced.
    #[must_use]
    pub const fn with_node(self, node: u32) -> Self {
        Self { node, ..self }
    }

    /// Returns the record with `node_bits` replaced.
    #[must_use]
    pub const fn with_node_bits(self, node_bits: u8) -> Self {
        Self { node_bits, ..self }
    }

    /// Returns the record with `epoch` replaced.
    #[must_use]
    pub const fn with_epoch(self, epoch: Duration) -> Self {
        Self { epoch, ..self }
    }

    /// Validates the record and freezes it.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidNodeBits`] when `node_bits > 20`.
    /// - [`ConfigError::InvalidEpoch`] when the epoch exceeds `i64::MAX`
    ///   milliseconds.
    pub fn validate(&self) -> Result<ValidConfig, ConfigError> {
        if self.node_bits > MAX_NODE_BITS {
            return Err(ConfigError::InvalidNodeBits {
                node_bits: self.node_bits,
                max: MAX_NODE_BITS,
            });
        }

        let millis = self.epoch.as_millis();
        let epoch_millis =
            i64::try_from(millis).map_err(|_| ConfigError::InvalidEpoch { millis })?;

        Ok(ValidConfig {
            node: self.node & layout::node_mask(self.node_bits),
            node_bits: self.node_bits,
            epoch_millis,
        })
    }
}

/// A validated, immutable configuration.
///
/// Only obtainable through [`TsidConfig::validate`], so holding one proves
/// the node width is in range and the node value fits it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValidConfig {
    node: u32,
    node_bits: u8,
    epoch_millis: i64,
}

impl ValidConfig {
    /// The node value, already masked to [`ValidConfig::node_bits`].
    #[must_use]
    pub const fn node(&self) -> u32 {
        self.node
    }

    /// Width of the node sub-field.
    #[must_use]
    pub const fn node_bits(&self) -> u8 {
        self.node_bits
    }

    /// Width of the counter sub-field.
    #[must_use]
    pub const fn counter_bits(&self) -> u32 {
        layout::counter_bits(self.node_bits)
    }

    /// Largest counter value before the millisecond is exhausted.
    #[must_use]
    pub const fn counter_mask(&self) -> u32 {
        layout::counter_mask(self.node_bits)
    }

    /// The epoch as milliseconds since the Unix epoch. Never negative.
    #[must_use]
    pub const fn epoch_millis(&self) -> i64 {
        self.epoch_millis
    }

    /// The epoch as a duration since the Unix epoch.
    #[must_use]
    pub const fn epoch(&self) -> Duration {
        Duration::from_millis(self.epoch_millis as u64)
    }
}

impl From<ValidConfig> for TsidConfig {
    fn from(config: ValidConfig) -> Self {
        Self {
            node: config.node(),
            node_bits: config.node_bits(),
            epoch: config.epoch(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NODE_BITS_256, NODE_BITS_4096, TWITTER_EPOCH};

    #[test]
    fn default_is_single_node() {
        let config = TsidConfig::default().validate().unwrap();
        assert_eq!(config.node(), 0);
        assert_eq!(config.node_bits(), 0);
        assert_eq!(config.counter_bits(), 22);
        assert_eq!(config.epoch(), TSID_EPOCH);
    }

    #[test]
    fn every_node_width_up_to_twenty_is_accepted() {
        for node_bits in 0..=MAX_NODE_BITS {
            let config = TsidConfig::default().with_node_bits(node_bits);
            assert!(config.validate().is_ok(), "node_bits {node_bits}");
        }
    }

    #[test]
    fn node_width_above_twenty_is_rejected() {
        for node_bits in [21, 22, 64, u8::MAX] {
            let err = TsidConfig::default()
                .with_node_bits(node_bits)
                .validate()
                .unwrap_err();
            assert_eq!(
                err,
                ConfigError::InvalidNodeBits {
                    node_bits,
                    max: MAX_NODE_BITS
                }
            );
        }
    }

    #[test]
    fn epoch_beyond_i64_millis_is_rejected() {
        let too_far = Duration::from_millis(i64::MAX as u64 + 1);
        let err = TsidConfig::default()
            .with_epoch(too_far)
            .validate()
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidEpoch {
                millis: i64::MAX as u128 + 1
            }
        );

        let widest = Duration::from_millis(i64::MAX as u64);
        let config = TsidConfig::default().with_epoch(widest).validate().unwrap();
        assert_eq!(config.epoch_millis(), i64::MAX);
        assert_eq!(config.epoch(), widest);
    }

    #[test]
    fn oversized_node_is_masked() {
        let config = TsidConfig::default()
            .with_node_bits(NODE_BITS_256)
            .with_node(0x1FF)
            .validate()
            .unwrap();
        assert_eq!(config.node(), 0xFF);

        let config = TsidConfig::default().with_node(7).validate().unwrap();
        assert_eq!(config.node(), 0);
    }

    #[test]
    fn valid_config_converts_back_masked() {
        let valid = TsidConfig::default()
            .with_node_bits(NODE_BITS_256)
            .with_node(0x1FF)
            .validate()
            .unwrap();
        let config = TsidConfig::from(valid);
        assert_eq!(config.node, 0xFF);
        assert_eq!(config.validate().unwrap(), valid);
    }

    #[test]
    fn with_methods_only_touch_their_field() {
        let config = TsidConfig::default()
            .with_node(3)
            .with_node_bits(NODE_BITS_4096)
            .with_epoch(TWITTER_EPOCH);
        assert_eq!(config.node, 3);
        assert_eq!(config.node_bits, NODE_BITS_4096);
        assert_eq!(config.epoch, TWITTER_EPOCH);
    }
}
