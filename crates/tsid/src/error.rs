use crate::{Base32Error, ConfigError, RandError};

/// A result type defaulting to this crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All error variants that `tsid` can emit.
///
/// Generation itself can only fail when the entropy source fails (or, with
/// the std mutex, when the lock was poisoned, or when a restored state has no
/// time left). Everything else is reported at construction or decode time.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The configuration was rejected before a generator was built.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    /// The entropy source failed while a fresh counter was being drawn.
    ///
    /// The generator state is left exactly as it was before the call, so the
    /// caller may retry.
    #[error("entropy unavailable: {0}")]
    EntropyUnavailable(#[from] RandError),

    /// The time field cannot advance any further.
    ///
    /// Only reachable from a state restored with a `last_time` near
    /// `i64::MAX`. The generator state is left unchanged.
    #[error("time field overflow")]
    TimeOverflow,

    /// The operation failed because the lock was **poisoned**.
    ///
    /// This occurs when a thread panics while holding the lock. When the
    /// `parking-lot` feature is enabled, mutexes do **not** poison, so this
    /// variant is not available.
    #[cfg_attr(docsrs, doc(cfg(not(feature = "parking-lot"))))]
    #[cfg(not(feature = "parking-lot"))]
    #[error("generator lock poisoned")]
    LockPoisoned,

    /// A textual or numeric identifier could not be decoded.
    #[error(transparent)]
    Base32(#[from] Base32Error),
}

#[cfg(not(feature = "parking-lot"))]
use crate::generator::{MutexGuard, PoisonError};
#[cfg(not(feature = "parking-lot"))]
impl<T> From<PoisonError<MutexGuard<'_, T>>> for Error {
    fn from(_: PoisonError<MutexGuard<'_, T>>) -> Self {
        Self::LockPoisoned
    }
}
