use std::{cmp::Ordering, sync::Arc, time::Duration};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    Error, RandSource, Result, SystemClock, ThreadRandom, TimeSource, Tsid, TsidConfig,
    TsidGenerator, ValidConfig, generator::Mutex,
};

/// The mutable part of a generator: the last time and counter that were
/// issued.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct GeneratorState {
    /// Milliseconds since the configured epoch.
    pub(crate) last_time: i64,
    pub(crate) last_counter: u32,
}

/// A lock-based TSID generator suitable for multi-threaded environments.
///
/// This generator wraps its state in an [`Arc<Mutex<_>>`], allowing safe
/// shared use across threads. Cloning the generator shares that state, so
/// clones behave as one generator and never hand out the same id twice.
///
/// ## Clock handling
/// - Clock advanced: the time field follows it and the counter restarts at a
///   fresh random value.
/// - Clock repeated or moved backward (drift, leap second): the time field is
///   held and the counter increments by one.
/// - Counter exhausted within a millisecond: the time field is pushed one
///   millisecond ahead of the clock and the counter restarts at a fresh random
///   value. Generation never stalls.
/// - Clock before the configured epoch: read as time zero, so it takes the
///   repeated-clock path above instead of wrapping the time field.
///
/// ## Features
/// - ✅ Thread-safe
/// - ✅ Strictly increasing ids per generator
/// - ✅ Atomic: a failed entropy draw leaves the state untouched
///
/// ## See Also
/// - [`TsidConfig`]
pub struct LockTsidGenerator<T, R>
where
    T: TimeSource,
    R: RandSource,
{
    #[cfg(feature = "cache-padded")]
    pub(crate) state: Arc<crossbeam_utils::CachePadded<Mutex<GeneratorState>>>,
    #[cfg(not(feature = "cache-padded"))]
    pub(crate) state: Arc<Mutex<GeneratorState>>,
    pub(crate) config: ValidConfig,
    pub(crate) time: T,
    pub(crate) rng: R,
}

impl LockTsidGenerator<SystemClock, ThreadRandom> {
    /// Creates a generator that reads the system wall clock and draws
    /// counters from the thread-local RNG.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `config` does not validate.
    ///
    /// # Example
    /// ```
    /// use tsid::{LockTsidGenerator, TsidConfig};
    ///
    /// let generator = LockTsidGenerator::from_config(TsidConfig::default()).unwrap();
    /// let a = generator.try_next_id().unwrap();
    /// let b = generator.try_next_id().unwrap();
    /// assert!(a < b);
    /// ```
    pub fn from_config(config: TsidConfig) -> Result<Self> {
        Self::try_new(config, SystemClock, ThreadRandom)
    }
}

impl<T, R> LockTsidGenerator<T, R>
where
    T: TimeSource,
    R: RandSource,
{
    /// Creates a new [`LockTsidGenerator`] from a configuration and explicit
    /// time and entropy sources.
    ///
    /// The time source is read once and one counter is drawn to seed the
    /// state. The seed itself is never returned as an id.
    ///
    /// # Parameters
    ///
    /// - `config`: node, node width and epoch. Validated here.
    /// - `time`: A [`TimeSource`] returning Unix milliseconds.
    /// - `rng`: A [`RandSource`] used to restart the counter.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidConfiguration`] if the node width is above 20.
    /// - [`Error::EntropyUnavailable`] if the seed draw fails.
    ///
    /// # Example
    /// ```
    /// use tsid::{LockTsidGenerator, NODE_BITS_1024, SystemClock, ThreadRandom, TsidConfig};
    ///
    /// let config = TsidConfig::default().with_node_bits(NODE_BITS_1024).with_node(42);
    /// let generator = LockTsidGenerator::try_new(config, SystemClock, ThreadRandom).unwrap();
    ///
    /// let id = generator.try_next_id().unwrap();
    /// assert_eq!(id.node(NODE_BITS_1024), 42);
    /// ```
    pub fn try_new(config: TsidConfig, time: T, rng: R) -> Result<Self> {
        let config = config.validate()?;
        let last_time = Self::elapsed(&time, &config);
        let last_counter = Self::draw_counter(&rng, &config)?;
        Ok(Self::from_components(
            config,
            last_time,
            last_counter,
            time,
            rng,
        ))
    }

    /// Creates a new generator from explicit state.
    ///
    /// This constructor is primarily useful for advanced use cases such as
    /// restoring state from persistent storage or controlling the starting
    /// point of the generator manually. `last_counter` is masked to the
    /// counter width and a negative `last_time` is raised to zero.
    ///
    /// # ⚠️ Note
    /// In typical use cases, you should prefer [`Self::try_new`] to let the
    /// generator initialize itself from the current time.
    pub fn from_components(
        config: ValidConfig,
        last_time: i64,
        last_counter: u32,
        time: T,
        rng: R,
    ) -> Self {
        let state = GeneratorState {
            last_time: last_time.max(0),
            last_counter: last_counter & config.counter_mask(),
        };
        Self {
            #[cfg(feature = "cache-padded")]
            state: Arc::new(crossbeam_utils::CachePadded::new(Mutex::new(state))),
            #[cfg(not(feature = "cache-padded"))]
            state: Arc::new(Mutex::new(state)),
            config,
            time,
            rng,
        }
    }

    /// The validated configuration this generator was built with.
    pub const fn config(&self) -> &ValidConfig {
        &self.config
    }

    /// The node embedded in every id, already masked.
    pub const fn node(&self) -> u32 {
        self.config.node()
    }

    /// Width of the node sub-field.
    pub const fn node_bits(&self) -> u8 {
        self.config.node_bits()
    }

    /// The epoch the time field is measured from.
    pub const fn epoch(&self) -> Duration {
        self.config.epoch()
    }

    /// Generates a new TSID.
    ///
    /// Returns an id strictly greater than every id this generator (and its
    /// clones) returned before. The call holds the lock while it reads the
    /// clock, draws entropy and packs the id.
    ///
    /// # Errors
    /// - [`Error::EntropyUnavailable`] if a fresh counter was needed and the
    ///   entropy source failed. Nothing is committed, so a retry continues
    ///   from the same state.
    /// - [`Error::TimeOverflow`] if the time field would have to move past
    ///   `i64::MAX`, which only a state restored through
    ///   [`Self::from_components`] can reach.
    /// - `Error::LockPoisoned` if the underlying std mutex is poisoned.
    ///
    /// # Example
    /// ```
    /// use tsid::{LockTsidGenerator, TsidConfig};
    ///
    /// let generator = LockTsidGenerator::from_config(TsidConfig::default()).unwrap();
    /// match generator.try_next_id() {
    ///     Ok(id) => println!("{id}"),
    ///     Err(e) => panic!("Generator error: {e}"),
    /// }
    /// ```
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn try_next_id(&self) -> Result<Tsid> {
        let mut state = {
            #[cfg(feature = "parking-lot")]
            {
                self.state.lock()
            }
            #[cfg(not(feature = "parking-lot"))]
            {
                self.state.lock()?
            }
        };

        let now = Self::elapsed(&self.time, &self.config);

        let next = match now.cmp(&state.last_time) {
            Ordering::Greater => GeneratorState {
                last_time: now,
                last_counter: Self::draw_counter(&self.rng, &self.config)?,
            },
            Ordering::Equal => self.increment_counter(&state)?,
            Ordering::Less => self.cold_clock_behind(now, &state)?,
        };

        let id = Tsid::from_components(
            // Never negative. Past MAX_TIME the value wraps inside the id.
            next.last_time as u64,
            self.config.node(),
            next.last_counter,
            self.config.node_bits(),
        );
        *state = next;
        Ok(id)
    }

    fn increment_counter(&self, state: &GeneratorState) -> Result<GeneratorState> {
        let counter = state.last_counter + 1;
        if counter <= self.config.counter_mask() {
            Ok(GeneratorState {
                last_time: state.last_time,
                last_counter: counter,
            })
        } else {
            self.cold_counter_exhausted(state)
        }
    }

    #[cold]
    #[inline(never)]
    fn cold_clock_behind(&self, _now: i64, state: &GeneratorState) -> Result<GeneratorState> {
        #[cfg(feature = "tracing")]
        tracing::trace!(
            drift_ms = state.last_time - _now,
            "clock behind last issued time, holding time field"
        );
        self.increment_counter(state)
    }

    #[cold]
    #[inline(never)]
    fn cold_counter_exhausted(&self, state: &GeneratorState) -> Result<GeneratorState> {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            last_time = state.last_time,
            counter_bits = self.config.counter_bits(),
            "counter exhausted, advancing time field by one"
        );
        let last_time = state
            .last_time
            .checked_add(1)
            .ok_or(Error::TimeOverflow)?;
        Ok(GeneratorState {
            last_time,
            last_counter: Self::draw_counter(&self.rng, &self.config)?,
        })
    }

    /// Milliseconds since the configured epoch, with readings before the
    /// epoch held at zero.
    fn elapsed(time: &T, config: &ValidConfig) -> i64 {
        time.current_millis()
            .saturating_sub(config.epoch_millis())
            .max(0)
    }

    fn draw_counter(rng: &R, config: &ValidConfig) -> Result<u32> {
        let n = rng.try_next_i32().map_err(Error::EntropyUnavailable)?;
        Ok(n as u32 & config.counter_mask())
    }
}

impl<T, R> Clone for LockTsidGenerator<T, R>
where
    T: TimeSource + Clone,
    R: RandSource + Clone,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            config: self.config,
            time: self.time.clone(),
            rng: self.rng.clone(),
        }
    }
}

impl<T, R> TsidGenerator<T, R> for LockTsidGenerator<T, R>
where
    T: TimeSource,
    R: RandSource,
{
    fn try_next_id(&self) -> Result<Tsid, Error> {
        self.try_next_id()
    }
}
