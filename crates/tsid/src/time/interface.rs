use core::time::Duration;

/// Default TSID epoch: Wednesday, January 1, 2020 00:00:00 UTC
pub const TSID_EPOCH: Duration = Duration::from_millis(1_577_836_800_000);

/// Twitter epoch: Thursday, November 4, 2010 1:42:54.657 UTC
pub const TWITTER_EPOCH: Duration = Duration::from_millis(1_288_834_974_657);

/// Discord epoch: Thursday, January 1, 2015 00:00:00 UTC
pub const DISCORD_EPOCH: Duration = Duration::from_millis(1_420_070_400_000);

/// Standard UNIX epoch: Thursday, January 1, 1970 00:00:00 UTC
pub const UNIX_EPOCH: Duration = Duration::from_millis(0);

/// A trait for time sources that return a wall-clock timestamp.
///
/// This abstraction allows you to plug in a real system clock or a mocked time
/// source in tests.
///
/// The unit is **milliseconds since the Unix epoch**. The generator subtracts
/// its configured epoch itself, so a time source never needs to know about it.
/// The value may move backward (NTP corrections, leap seconds); the generator
/// absorbs that.
///
/// Any `Fn() -> i64` closure is a `TimeSource`.
///
/// # Example
///
/// ```
/// use tsid::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_millis(&self) -> i64 {
///         1234
///     }
/// }
///
/// let time = FixedTime;
/// assert_eq!(time.current_millis(), 1234);
/// assert_eq!((|| 99_i64).current_millis(), 99);
/// ```
pub trait TimeSource {
    /// Returns the current time in milliseconds since the Unix epoch.
    fn current_millis(&self) -> i64;
}

impl<F> TimeSource for F
where
    F: Fn() -> i64,
{
    fn current_millis(&self) -> i64 {
        self()
    }
}
