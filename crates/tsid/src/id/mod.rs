pub mod layout;
mod tsid;

pub use layout::{
    MAX_NODE_BITS, MAX_TIME, NODE_BITS_256, NODE_BITS_1024, NODE_BITS_4096, RANDOM_BITS, TIME_BITS,
};
pub use tsid::*;
