use crate::{Error, RandSource, Result, TimeSource, Tsid};

/// A minimal interface for generating TSIDs.
pub trait TsidGenerator<T, R>
where
    T: TimeSource,
    R: RandSource,
{
    /// Generates the next identifier.
    ///
    /// Every identifier returned by one generator is strictly greater than
    /// all identifiers it returned before.
    ///
    /// # Errors
    ///
    /// - [`Error::EntropyUnavailable`] if a fresh counter was needed and the
    ///   entropy source failed. The generator state is unchanged.
    /// - [`Error::TimeOverflow`] if a restored state has no time left.
    /// - `Error::LockPoisoned` if the underlying std mutex is poisoned.
    fn try_next_id(&self) -> Result<Tsid, Error>;

    /// Generates `count` identifiers in order.
    ///
    /// Stops at the first failure and returns it. Identifiers minted before
    /// the failure are dropped and never handed out again.
    ///
    /// # Errors
    ///
    /// Propagates the first error from [`TsidGenerator::try_next_id`].
    fn try_next_ids(&self, count: usize) -> Result<Vec<Tsid>, Error> {
        (0..count).map(|_| self.try_next_id()).collect()
    }
}
