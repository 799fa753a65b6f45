//! Fixed capacity replay buffer shared by every actor and learner.
//!
//! ```text
//! Actor 1 ─┐                                   ┌─> Learner A (sample)
//! Actor 2 ─┼─> cursor.fetch_add ─> slot lock ──┤
//! Actor N ─┘   (claims a slot)     (write)     └─> Learner B (sample)
//! ```
//!
//! Consistency: every slot sits behind its own `RwLock` and a record is always
//! written or cloned while holding it, so a sample never sees a torn record.
//! Sampling a slot that is being overwritten returns either the whole old record
//! or the whole new one. Slots claimed but not written yet are skipped, so a
//! sampled batch may come back shorter than requested.

use std::{
    num::NonZeroUsize,
    sync::atomic::{AtomicUsize, Ordering},
};

use parking_lot::RwLock;
use rand::Rng;

use super::{Transition, TransitionShape};
use crate::storage::Result;

#[derive(Debug)]
struct Slot {
    record: Transition,
    filled: bool,
}

#[derive(Debug)]
pub struct ReplayBuffer {
    shape: TransitionShape,
    capacity: NonZeroUsize,
    cursor: AtomicUsize,
    slots: Box<[RwLock<Slot>]>,
}

impl ReplayBuffer {
    /// Creates a new `ReplayBuffer` with every slot allocated upfront.
    ///
    /// # Arguments
    /// * `shape` - The shape of every record, fixed for the lifetime of the buffer.
    /// * `capacity` - The amount of records kept before the oldest are overwritten.
    ///
    /// # Returns
    /// A new `ReplayBuffer` instance.
    pub fn new(shape: TransitionShape, capacity: NonZeroUsize) -> Self {
        let slots = (0..capacity.get())
            .map(|_| {
                RwLock::new(Slot {
                    record: shape.zeroed(),
                    filled: false,
                })
            })
            .collect();

        Self {
            shape,
            capacity,
            cursor: AtomicUsize::new(0),
            slots,
        }
    }

    pub fn shape(&self) -> &TransitionShape {
        &self.shape
    }

    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Returns the amount of slots claimed so far, capped at the capacity.
    pub fn len(&self) -> usize {
        self.cursor.load(Ordering::Acquire).min(self.capacity.get())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends a record, overwriting the oldest one once the buffer is full.
    ///
    /// # Arguments
    /// * `transition` - The record to copy into the buffer.
    ///
    /// # Returns
    /// The slot the record landed in, or a `SizeMismatchErr` if the record doesn't
    /// have the buffer's shape, in which case no slot is claimed.
    pub fn append(&self, transition: &Transition) -> Result<usize> {
        self.shape.check(transition)?;

        let idx = self.cursor.fetch_add(1, Ordering::AcqRel) % self.capacity.get();

        let mut slot = self.slots[idx].write();
        slot.record.clone_from(transition);
        slot.filled = true;

        Ok(idx)
    }

    /// Samples `batch_size` records uniformly, with replacement.
    ///
    /// # Arguments
    /// * `batch_size` - The amount of records to sample.
    /// * `rng` - The caller's random number generator.
    ///
    /// # Returns
    /// `None` while the buffer holds fewer than `batch_size` records.
    pub fn sample<R: Rng>(&self, batch_size: usize, rng: &mut R) -> Option<Vec<Transition>> {
        let len = self.len();
        if batch_size == 0 || len < batch_size {
            return None;
        }

        let batch = (0..batch_size)
            .filter_map(|_| {
                let slot = self.slots[rng.random_range(0..len)].read();
                slot.filled.then(|| slot.record.clone())
            })
            .collect();

        Some(batch)
    }
}
