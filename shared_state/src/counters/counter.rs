use std::sync::atomic::{AtomicU64, Ordering};

/// A named scalar every role may bump concurrently without losing updates.
pub trait AtomicCounter {
    type Value;

    fn name(&self) -> &'static str;

    /// Atomically adds `delta` to the counter.
    fn increment(&self, delta: Self::Value);

    /// Reads the current value without modifying it.
    fn get(&self) -> Self::Value;
}

/// A counter the logger periodically drains.
pub trait Resettable: AtomicCounter {
    /// Atomically swaps the value with zero and returns what it held.
    ///
    /// A racing `increment` lands entirely before or entirely after the swap,
    /// so it's either returned here or kept for the next drain.
    fn read_and_reset(&self) -> Self::Value;
}

/// A non decreasing step counter, it has no way to be reset.
#[derive(Debug)]
pub struct MonotonicCounter {
    name: &'static str,
    value: AtomicU64,
}

impl MonotonicCounter {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            value: AtomicU64::new(0),
        }
    }

    /// Bumps the counter by one and returns the value it held before.
    pub fn step(&self) -> u64 {
        self.value.fetch_add(1, Ordering::AcqRel)
    }
}

impl AtomicCounter for MonotonicCounter {
    type Value = u64;

    fn name(&self) -> &'static str {
        self.name
    }

    fn increment(&self, delta: u64) {
        self.value.fetch_add(delta, Ordering::AcqRel);
    }

    fn get(&self) -> u64 {
        self.value.load(Ordering::Acquire)
    }
}

/// An integer statistic.
#[derive(Debug)]
pub struct IntCounter {
    name: &'static str,
    value: AtomicU64,
}

impl IntCounter {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            value: AtomicU64::new(0),
        }
    }
}

impl AtomicCounter for IntCounter {
    type Value = u64;

    fn name(&self) -> &'static str {
        self.name
    }

    fn increment(&self, delta: u64) {
        self.value.fetch_add(delta, Ordering::AcqRel);
    }

    fn get(&self) -> u64 {
        self.value.load(Ordering::Acquire)
    }
}

impl Resettable for IntCounter {
    fn read_and_reset(&self) -> u64 {
        self.value.swap(0, Ordering::AcqRel)
    }
}

/// A real valued statistic, the `f64` is stored as raw bits.
#[derive(Debug)]
pub struct RealCounter {
    name: &'static str,
    bits: AtomicU64,
}

impl RealCounter {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            bits: AtomicU64::new(0f64.to_bits()),
        }
    }
}

impl AtomicCounter for RealCounter {
    type Value = f64;

    fn name(&self) -> &'static str {
        self.name
    }

    fn increment(&self, delta: f64) {
        // The closure always returns `Some`, so the update can't fail.
        let _ = self
            .bits
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |bits| {
                Some((f64::from_bits(bits) + delta).to_bits())
            });
    }

    fn get(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Acquire))
    }
}

impl Resettable for RealCounter {
    fn read_and_reset(&self) -> f64 {
        f64::from_bits(self.bits.swap(0f64.to_bits(), Ordering::AcqRel))
    }
}
