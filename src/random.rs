//! Random source injected into the turn engine.
//!
//! Every random decision in a game (wumpus wake-up, wumpus step, bat teleport target) goes through
//! the [`RandomSource`] trait so tests can script each draw.

use rand::{rngs::StdRng, Rng, SeedableRng as _};

/// Supplier of the two kinds of random draws the game needs.
pub trait RandomSource {
    /// Returns an integer drawn uniformly from `0..upper`.
    ///
    /// An `upper` of zero yields zero.
    fn pick(&mut self, upper: usize) -> usize;

    /// Flips a fair coin.
    fn coin(&mut self) -> bool;
}

/// Adapter turning any [`rand::Rng`] into a [`RandomSource`].
#[derive(Debug)]
pub struct RngSource<R>(R);

impl<R: Rng> RngSource<R> {
    /// Wraps an existing generator.
    pub const fn new(rng: R) -> Self {
        Self(rng)
    }
}

impl RngSource<StdRng> {
    /// Builds a reproducible source from a fixed seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    /// Builds a source seeded from operating system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn pick(&mut self, upper: usize) -> usize {
        if upper == 0 {
            return 0;
        }

        self.0.gen_range(0..upper)
    }

    fn coin(&mut self) -> bool {
        self.0.gen_bool(0.5)
    }
}

/// Random source replaying pre-recorded draws, for deterministic tests.
///
/// Once a queue runs dry, picks fall back to zero and coins to `false`.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct ScriptedSource {
    /// Queued results for [`RandomSource::pick`].
    picks: std::collections::VecDeque<usize>,
    /// Queued results for [`RandomSource::coin`].
    coins: std::collections::VecDeque<bool>,
    /// Every `upper` bound requested so far, in call order.
    bounds: Vec<usize>,
}

#[cfg(test)]
impl ScriptedSource {
    /// Creates a source with empty queues.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Appends values to the pick queue.
    pub(crate) fn with_picks<I: IntoIterator<Item = usize>>(mut self, picks: I) -> Self {
        self.picks.extend(picks);
        self
    }

    /// Appends values to the coin queue.
    pub(crate) fn with_coins<I: IntoIterator<Item = bool>>(mut self, coins: I) -> Self {
        self.coins.extend(coins);
        self
    }

    /// Returns the bounds passed to [`RandomSource::pick`] so far.
    pub(crate) fn requested_bounds(&self) -> &[usize] {
        &self.bounds
    }

    /// Reports whether every scripted draw has been consumed.
    pub(crate) fn is_exhausted(&self) -> bool {
        self.picks.is_empty() && self.coins.is_empty()
    }
}

#[cfg(test)]
impl RandomSource for ScriptedSource {
    fn pick(&mut self, upper: usize) -> usize {
        self.bounds.push(upper);
        self.picks
            .pop_front()
            .unwrap_or(0)
            .min(upper.saturating_sub(1))
    }

    fn coin(&mut self) -> bool {
        self.coins.pop_front().unwrap_or(false)
    }
}
