use serde::Serialize;
use std::time::Duration;
use tsid::Tsid;

use crate::cli::config::Format;

/// Every field of an identifier, for JSON output.
#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct IdRecord {
    pub tsid: Tsid,
    pub number: u64,
    pub time: u64,
    pub unix_millis: u64,
    pub node: u32,
    pub counter: u32,
}

impl IdRecord {
    pub fn new(id: Tsid, node_bits: u8, epoch: Duration) -> Self {
        Self {
            tsid: id,
            number: id.to_raw(),
            time: id.time(),
            unix_millis: id.unix_millis(epoch),
            node: id.node(node_bits),
            counter: id.counter(node_bits),
        }
    }
}

/// Renders one identifier as a single output line (without the newline).
pub fn render(id: Tsid, format: Format, node_bits: u8, epoch: Duration) -> anyhow::Result<String> {
    Ok(match format {
        Format::Base32 => id.encode(),
        Format::Lower => id.encode_lower(),
        Format::Number => id.to_raw().to_string(),
        Format::Json => serde_json::to_string(&IdRecord::new(id, node_bits, epoch))?,
    })
}
