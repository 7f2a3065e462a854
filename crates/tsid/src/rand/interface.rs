use crate::RandError;

/// A trait for entropy sources that return random signed 32-bit integers.
///
/// This abstraction allows you to plug in a real random source or a mocked
/// random source in tests. Unlike the time source, drawing entropy may fail;
/// a failure aborts the current generation without touching generator state.
///
/// Any `Fn() -> Result<i32, RandError>` closure is a `RandSource`.
///
/// # Example
/// ```
/// use tsid::{RandError, RandSource};
///
/// struct FixedRand;
/// impl RandSource for FixedRand {
///     fn try_next_i32(&self) -> Result<i32, RandError> {
///         Ok(1234)
///     }
/// }
///
/// let rng = FixedRand;
/// assert_eq!(rng.try_next_i32().unwrap(), 1234);
///
/// let zeros = || Ok::<i32, RandError>(0);
/// assert_eq!(zeros.try_next_i32().unwrap(), 0);
/// ```
pub trait RandSource {
    /// Returns the next random integer.
    ///
    /// # Errors
    ///
    /// Returns [`RandError`] if the underlying source cannot produce a value.
    fn try_next_i32(&self) -> Result<i32, RandError>;
}

impl<F> RandSource for F
where
    F: Fn() -> Result<i32, RandError>,
{
    fn try_next_i32(&self) -> Result<i32, RandError> {
        self()
    }
}
