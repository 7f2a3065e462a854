//! # tsid
//!
//! Time-Sorted Unique Identifiers: 64-bit ids that sort by creation time,
//! embed an optional node number, and can be minted concurrently from many
//! threads without coordination.
//!
//! ```text
//!  | reserved (1) | time (42) | node (0..=20) | counter (22 - node bits) |
//! ```
//!
//! ## Example
//! ```
//! use tsid::{LockTsidGenerator, NODE_BITS_1024, TsidConfig};
//!
//! let config = TsidConfig::default().with_node_bits(NODE_BITS_1024).with_node(7);
//! let generator = LockTsidGenerator::from_config(config)?;
//!
//! let id = generator.try_next_id()?;
//! assert_eq!(id.node(NODE_BITS_1024), 7);
//! assert_eq!(id.encode().len(), 13);
//! # Ok::<(), tsid::Error>(())
//! ```
//!
//! ## Features
//! - `parking-lot`: use `parking_lot::Mutex` (no lock poisoning).
//! - `cache-padded`: pad the shared state to a cache line.
//! - `serde`: `Serialize`/`Deserialize` for [`Tsid`] and [`TsidConfig`].
//! - `tracing`: trace spans and clock-anomaly events from the generator.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod base32;
mod error;
mod generator;
mod id;
mod rand;
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
#[cfg(feature = "serde")]
pub mod serde;
mod time;

pub use crate::base32::*;
pub use crate::error::*;
pub use crate::generator::*;
pub use crate::id::*;
pub use crate::rand::*;
pub use crate::time::*;
