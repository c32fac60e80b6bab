use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

use crate::search::matcher::ScanTally;

/// Tracks scan throughput and match counts across worker threads
#[derive(Debug, Clone)]
pub struct ScanMetrics {
    // Throughput metrics
    bytes_scanned: Arc<AtomicU64>,
    max_partition_bytes: Arc<AtomicU64>,

    // Progress metrics
    partitions_completed: Arc<AtomicU64>,

    // Match metrics
    words_scanned: Arc<AtomicU64>,
    words_matched: Arc<AtomicU64>,
}

impl ScanMetrics {
    /// Creates a new ScanMetrics instance
    pub fn new() -> Self {
        Self {
            bytes_scanned: Arc::new(AtomicU64::new(0)),
            max_partition_bytes: Arc::new(AtomicU64::new(0)),
            partitions_completed: Arc::new(AtomicU64::new(0)),
            words_scanned: Arc::new(AtomicU64::new(0)),
            words_matched: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Records a fully scanned partition
    pub fn record_partition(&self, bytes: u64, tally: &ScanTally) {
        let total = self.bytes_scanned.fetch_add(bytes, Ordering::Relaxed) + bytes;
        self.partitions_completed.fetch_add(1, Ordering::Relaxed);
        self.words_scanned.fetch_add(tally.words, Ordering::Relaxed);
        self.words_matched
            .fetch_add(tally.matches, Ordering::Relaxed);

        let mut max = self.max_partition_bytes.load(Ordering::Relaxed);
        while bytes > max {
            match self.max_partition_bytes.compare_exchange_weak(
                max,
                bytes,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => break,
                Err(current) => max = current,
            }
        }

        debug!(
            "Partition scanned: {} bytes, {} words, {} matches, total scanned: {} bytes",
            bytes, tally.words, tally.matches, total
        );
    }

    /// Gets current scan statistics
    pub fn get_stats(&self) -> ScanStats {
        ScanStats {
            bytes_scanned: self.bytes_scanned.load(Ordering::Relaxed),
            max_partition_bytes: self.max_partition_bytes.load(Ordering::Relaxed),
            partitions_completed: self.partitions_completed.load(Ordering::Relaxed),
            words_scanned: self.words_scanned.load(Ordering::Relaxed),
            words_matched: self.words_matched.load(Ordering::Relaxed),
        }
    }

    /// Logs current scan statistics
    pub fn log_stats(&self) {
        let stats = self.get_stats();
        info!(
            "Scan stats:\n\
             Bytes scanned: {}\n\
             Largest partition: {} bytes\n\
             Partitions completed: {}\n\
             Words scanned: {}\n\
             Words matched: {}",
            stats.bytes_scanned,
            stats.max_partition_bytes,
            stats.partitions_completed,
            stats.words_scanned,
            stats.words_matched
        );
    }
}

impl Default for ScanMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics about a scan's throughput and matches
#[derive(Debug, Clone, Copy)]
pub struct ScanStats {
    pub bytes_scanned: u64,
    pub max_partition_bytes: u64,
    pub partitions_completed: u64,
    pub words_scanned: u64,
    pub words_matched: u64,
}
