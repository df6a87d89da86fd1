//! Bloom-backed approximate membership set.
//!
//! False positives are acceptable — they cause over-filtering, never
//! false admission — so a single mutex-guarded filter is enough; there is
//! no correctness requirement for lock-free concurrent inserts here.

use parking_lot::Mutex;

pub struct BloomSet {
    inner: Mutex<bloomfilter::Bloom<str>>,
    expected_items: usize,
    fp_rate: f64,
}

impl BloomSet {
    #[must_use]
    pub fn new(expected_items: usize, fp_rate: f64) -> Self {
        BloomSet {
            inner: Mutex::new(bloomfilter::Bloom::new_for_fp_rate(
                expected_items.max(1),
                fp_rate,
            )),
            expected_items,
            fp_rate,
        }
    }

    /// Check membership and record `key` if absent. Returns `true` if
    /// `key` was already (probably) present — the caller should drop.
    pub fn check_and_insert(&self, key: &str) -> bool {
        let mut bloom = self.inner.lock();
        if bloom.check(key) {
            true
        } else {
            bloom.set(key);
            false
        }
    }

    /// Replace the filter with a fresh, empty one of the same sizing —
    /// `reset` never clears in place, since the underlying bitset has no
    /// cheap clear operation that preserves sizing guarantees.
    pub fn reset(&self) {
        let mut bloom = self.inner.lock();
        *bloom = bloomfilter::Bloom::new_for_fp_rate(self.expected_items.max(1), self.fp_rate);
    }
}
