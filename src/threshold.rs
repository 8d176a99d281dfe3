// SPDX-License-Identifier: MIT OR Apache-2.0
/*!
The severity threshold shared by a root logger and everything derived from it.

Every clone refers to the same slot.  Reads and writes are single atomic
operations, so no lock is held across a gating check.
*/

use crate::level::Level;
use std::sync::Arc;
use std::sync::atomic::{AtomicI32, Ordering};

#[derive(Debug, Clone, Default)]
pub struct Threshold {
    slot: Arc<AtomicI32>,
}

impl Threshold {
    /// A fresh slot holding `level` as-is.
    pub fn new(level: Level) -> Self {
        Self {
            slot: Arc::new(AtomicI32::new(level as i32)),
        }
    }

    /// Clamps `requested` with [`Level::normalize`] and stores the result.
    pub fn set(&self, requested: i32) -> Level {
        let level = Level::normalize(requested);
        self.slot.store(level as i32, Ordering::Relaxed);
        level
    }

    pub fn current(&self) -> Level {
        //only normalized values or the initial value are ever stored
        Level::from_raw(self.slot.load(Ordering::Relaxed)).unwrap_or(Level::None)
    }

    /// Whether a call made at `level` passes the threshold.
    #[inline]
    pub fn admits(&self, level: Level) -> bool {
        self.slot.load(Ordering::Relaxed) >= level as i32
    }

    /// Whether two thresholds refer to the same slot.
    pub fn same_slot(&self, other: &Threshold) -> bool {
        Arc::ptr_eq(&self.slot, &other.slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_default_is_none() {
        let threshold = Threshold::default();
        assert_eq!(threshold.current(), Level::None);
        assert!(!threshold.admits(Level::Error));
    }

    #[test]
    fn test_set_normalizes() {
        let threshold = Threshold::new(Level::Info);
        assert_eq!(threshold.set(Level::None as i32), Level::Error);
        assert_eq!(threshold.current(), Level::Error);
        assert_eq!(threshold.set(7), Level::Info);
        assert_eq!(threshold.set(12), Level::Debug);
        assert_eq!(threshold.current(), Level::Debug);
    }

    #[test]
    fn test_clones_share_slot() {
        let a = Threshold::new(Level::Info);
        let b = a.clone();
        assert!(a.same_slot(&b));
        b.set(Level::Debug as i32);
        assert_eq!(a.current(), Level::Debug);
        assert!(!a.same_slot(&Threshold::new(Level::Debug)));
    }

    #[test]
    fn test_concurrent_writers_leave_a_legal_value() {
        let threshold = Threshold::new(Level::Info);
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let threshold = threshold.clone();
                thread::spawn(move || {
                    for j in 0..1000 {
                        threshold.set(i * 3 + j % 4);
                        let seen = threshold.current();
                        assert_ne!(seen, Level::None);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("writer thread panicked");
        }
        assert!(matches!(
            threshold.current(),
            Level::Error | Level::Info | Level::Debug
        ));
    }
}
