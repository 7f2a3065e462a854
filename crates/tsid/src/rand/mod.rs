mod error;
mod interface;
mod os_random;
mod thread_random;

pub use error::*;
pub use interface::*;
pub use os_random::*;
pub use thread_random::*;
