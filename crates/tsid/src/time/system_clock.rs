use std::time::SystemTime;

use crate::TimeSource;

/// A [`TimeSource`] backed by the operating system's wall clock.
///
/// Every call reads `SystemTime::now()`, so adjustments to the system clock
/// are visible to the generator, which is what lets it absorb backward jumps
/// instead of silently drifting away from real time.
#[derive(Default, Clone, Copy, Debug)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn current_millis(&self) -> i64 {
        match SystemTime::now().duration_since(SystemTime::UNIX_EPOCH) {
            Ok(elapsed) => elapsed.as_millis() as i64,
            // A clock set before 1970 still yields an ordered value.
            Err(e) => -(e.duration().as_millis() as i64),
        }
    }
}
