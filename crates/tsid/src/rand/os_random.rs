use rand::{TryRngCore, rngs::OsRng};

use crate::{RandError, RandSource};

/// A `RandSource` that reads directly from the operating system.
///
/// Every draw is a syscall, which makes this slower than [`ThreadRandom`],
/// but it surfaces OS entropy failures as [`RandError`] instead of hiding
/// them.
///
/// [`ThreadRandom`]: crate::ThreadRandom
#[derive(Default, Clone, Copy, Debug)]
pub struct OsRandom;

impl RandSource for OsRandom {
    fn try_next_i32(&self) -> Result<i32, RandError> {
        OsRng
            .try_next_u32()
            .map(|n| n as i32)
            .map_err(RandError::new)
    }
}
