use std::collections::VecDeque;

use ml::QFunction;
use tracing::trace;

use crate::step::Window;
use crate::trajectory::WindowSource;
use crate::RlError;

pub const DEFAULT_CAPACITY: usize = 10_000;

/// Bounded FIFO store of windows, refilled from a [`WindowSource`].
///
/// The memory owns its source so that collection and sampling stay on one
/// owner; use [`ReplayMemory::source_mut`] to reach the generator itself.
pub struct ReplayMemory<S> {
    source: S,
    capacity: usize,
    buffer: VecDeque<Window>,
    rng: fastrand::Rng,
}

impl<S: WindowSource> ReplayMemory<S> {
    pub fn new(source: S, capacity: usize) -> Result<Self, RlError> {
        Self::with_seed(source, capacity, fastrand::u64(..))
    }

    pub fn with_seed(source: S, capacity: usize, seed: u64) -> Result<Self, RlError> {
        if capacity == 0 {
            return Err(RlError::config("replay capacity must be positive"));
        }
        Ok(Self {
            source,
            capacity,
            buffer: VecDeque::new(),
            rng: fastrand::Rng::with_seed(seed),
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Stored windows, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Window> {
        self.buffer.iter()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Pulls exactly `samples` windows from the source, then evicts the oldest
    /// windows until the buffer fits its capacity.
    ///
    /// The capacity also holds when the source fails partway: windows pulled
    /// before the failure are kept, minus whatever eviction removes.
    pub fn collect<Q: QFunction + ?Sized>(&mut self, samples: usize, q: &Q) -> Result<(), RlError> {
        for collected in 0..samples {
            match self.source.pull(q) {
                Ok(Some(window)) => self.buffer.push_back(window),
                Ok(None) => {
                    self.evict();
                    return Err(RlError::StreamExhausted { requested: samples, collected });
                }
                Err(err) => {
                    self.evict();
                    return Err(err);
                }
            }
        }
        self.evict();
        Ok(())
    }

    fn evict(&mut self) {
        let excess = self.buffer.len().saturating_sub(self.capacity);
        if excess > 0 {
            self.buffer.drain(..excess);
            trace!(evicted = excess, "replay memory full");
        }
    }

    /// Shuffles the current contents once and splits them into
    /// `len / batch_size` disjoint batches. The remainder is dropped.
    pub fn sample_batches(&mut self, batch_size: usize) -> Result<Batches<'_>, RlError> {
        if batch_size == 0 {
            return Err(RlError::config("batch size must be positive"));
        }
        let mut windows: Vec<&Window> = self.buffer.iter().collect();
        self.rng.shuffle(&mut windows);
        let remaining = windows.len() / batch_size;
        Ok(Batches { windows: windows.into_iter(), batch_size, remaining })
    }
}

/// Iterator over the batches of one [`ReplayMemory::sample_batches`] call.
pub struct Batches<'a> {
    windows: std::vec::IntoIter<&'a Window>,
    batch_size: usize,
    remaining: usize,
}

impl<'a> Iterator for Batches<'a> {
    type Item = Vec<&'a Window>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.windows.by_ref().take(self.batch_size).collect())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Batches<'_> {}
