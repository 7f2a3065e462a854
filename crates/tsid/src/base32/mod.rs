mod crockford;
mod error;
mod tsid;

pub use crockford::*;
pub use error::*;
