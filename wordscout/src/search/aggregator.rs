/// Lock-free collection of matches, demonstrating Rust's atomics compared to
/// .NET's `Interlocked` and concurrent collections.
///
/// # Rust vs .NET Lock-Free Aggregation
///
/// A .NET implementation would reach for a concurrent collection:
/// ```csharp
/// var matches = new ConcurrentBag<(uint Offset, uint Length)>();
/// matches.Add((offset, length)); // internal locking and segment management
/// ```
///
/// Here every worker claims a unique slot index with one atomic increment and
/// then owns that slot outright:
/// ```rust,ignore
/// let slot = self.claimed.fetch_add(1, Ordering::Relaxed);
/// if slot < self.slots.len() {
///     self.slots[slot].store(pack(offset, len), Ordering::Release);
/// }
/// ```
///
/// This is the same pattern as `Interlocked.Increment` handing out array
/// indices, but the slot array is `AtomicU64` rather than plain memory, so
/// the claim-then-write protocol needs no `unsafe` and no fences beyond the
/// store's `Release` ordering. Claims past capacity still advance the
/// counter, which is how the true match count stays observable when the
/// collection overflows.
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use tracing::warn;

use crate::results::WordMatch;

fn pack(offset: u32, len: u32) -> u64 {
    (u64::from(offset) << 32) | u64::from(len)
}

fn unpack(slot: u64) -> WordMatch {
    WordMatch {
        offset: (slot >> 32) as u32,
        len: slot as u32,
    }
}

/// Fixed-capacity, append-only match collection shared by all workers.
///
/// Each successful claim yields an index written by exactly one worker, so
/// slots are never contended. Slots are only read in `finalize`, after the
/// worker pool has been joined.
#[derive(Debug)]
pub struct MatchSink {
    slots: Box<[AtomicU64]>,
    claimed: AtomicUsize,
    overflowed: AtomicBool,
}

impl MatchSink {
    pub fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || AtomicU64::new(0));
        Self {
            slots: slots.into_boxed_slice(),
            claimed: AtomicUsize::new(0),
            overflowed: AtomicBool::new(false),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Claims the next slot and records the match.
    ///
    /// Once capacity is exhausted the record is dropped, the overflow flag is
    /// set, and a single warning is logged for the whole run.
    pub fn push(&self, offset: u32, len: u32) {
        let slot = self.claimed.fetch_add(1, Ordering::Relaxed);
        if slot < self.slots.len() {
            self.slots[slot].store(pack(offset, len), Ordering::Release);
        } else if !self.overflowed.swap(true, Ordering::Relaxed) {
            warn!(
                "Match list capacity {} exhausted, further matches are dropped",
                self.slots.len()
            );
        }
    }

    /// Number of slot claims so far, including claims that were dropped.
    pub fn claimed(&self) -> usize {
        self.claimed.load(Ordering::Relaxed)
    }

    pub fn overflowed(&self) -> bool {
        self.overflowed.load(Ordering::Relaxed)
    }

    /// Copies out the stored matches.
    ///
    /// Callers must only invoke this after every writer has finished; the
    /// engine does so after joining the worker scope.
    pub fn finalize(&self) -> Vec<WordMatch> {
        let stored = self.claimed.load(Ordering::Acquire).min(self.slots.len());
        self.slots[..stored]
            .iter()
            .map(|slot| unpack(slot.load(Ordering::Acquire)))
            .collect()
    }
}
