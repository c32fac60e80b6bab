use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Instant;
use tracing::{debug, info};

use super::aggregator::MatchSink;
use super::matcher::{scan_range, LetterProfile};
use super::partition::{partition_buffer, Partition};
use crate::config::SearchConfig;
use crate::dictionary::Dictionary;
use crate::errors::SearchResult;
use crate::metrics::ScanMetrics;
use crate::results::{RunStats, SearchOutput};
use crate::sort;

/// Upper bound on worker threads for one search
pub const MAX_WORKERS: usize = 32;

/// Partitions waiting to be scanned, claimed by workers one at a time.
///
/// The cursor hands out indices and the retired counter records completed
/// partitions, so the whole queue is two atomics over an immutable vector.
struct WorkQueue {
    partitions: Vec<Partition>,
    cursor: AtomicUsize,
    retired: AtomicUsize,
}

impl WorkQueue {
    fn new(partitions: Vec<Partition>) -> Self {
        Self {
            partitions,
            cursor: AtomicUsize::new(0),
            retired: AtomicUsize::new(0),
        }
    }

    /// Claims the next unscanned partition, if any remain.
    fn claim(&self) -> Option<Partition> {
        let index = self.cursor.fetch_add(1, Ordering::Relaxed);
        self.partitions.get(index).copied()
    }

    /// Marks one claimed partition as fully scanned.
    fn retire(&self) {
        self.retired.fetch_add(1, Ordering::Release);
    }

    fn retired(&self) -> usize {
        self.retired.load(Ordering::Acquire)
    }

    fn partition_count(&self) -> usize {
        self.partitions.len()
    }
}

/// Claims and scans partitions until the queue is empty.
fn drain_queue(
    queue: &WorkQueue,
    buf: &[u8],
    profile: &LetterProfile,
    min_word_len: usize,
    sink: &MatchSink,
    metrics: &ScanMetrics,
) {
    while let Some(partition) = queue.claim() {
        let tally = scan_range(buf, partition, profile, min_word_len, |offset, len| {
            sink.push(offset, len);
        });
        metrics.record_partition(partition.len() as u64, &tally);
        queue.retire();
    }
}

/// Performs a concurrent word search over the dictionary.
///
/// The query is taken as given; callers validate it first (the CLI does so
/// before loading the dictionary). An unvalidated query still scans safely,
/// it just matches nothing useful.
pub fn find_words(dictionary: &Dictionary, config: &SearchConfig) -> SearchResult<SearchOutput> {
    find_words_with_progress(dictionary, config, |_| {})
}

/// Performs a concurrent word search, reporting scan progress.
///
/// The callback receives whole percentages of completed partitions. Reports
/// are strictly increasing and the final report is always 100, so a caller
/// driving a progress display never sees it stall short of completion.
pub fn find_words_with_progress<F>(
    dictionary: &Dictionary,
    config: &SearchConfig,
    mut on_progress: F,
) -> SearchResult<SearchOutput>
where
    F: FnMut(u8),
{
    let started = Instant::now();

    let buf = dictionary.as_bytes();
    info!(
        "Starting search for letters {:?} across {} bytes",
        config.letters,
        buf.len()
    );

    let profile = LetterProfile::new(&config.letters, config.required_letter, config.allow_repeats);
    let workers = config.worker_count();
    let min_word_len = config.min_word_len;
    let queue = WorkQueue::new(partition_buffer(buf, workers));
    let sink = MatchSink::with_capacity(config.max_matches);
    let metrics = ScanMetrics::new();

    debug!(
        "Scanning with {} workers over {} partitions",
        workers,
        queue.partition_count()
    );

    thread::scope(|scope| {
        for _ in 1..workers {
            let queue = &queue;
            let sink = &sink;
            let profile = &profile;
            let metrics = &metrics;
            scope.spawn(move || drain_queue(queue, buf, profile, min_word_len, sink, metrics));
        }

        // The coordinator scans alongside the pool, then watches the retired
        // count until the stragglers finish.
        drain_queue(&queue, buf, &profile, min_word_len, &sink, &metrics);

        let total = queue.partition_count();
        let mut last_pct = u8::MAX;
        loop {
            let done = queue.retired();
            let pct = (done * 100 / total) as u8;
            if pct != last_pct {
                on_progress(pct);
                last_pct = pct;
            }
            if done == total {
                break;
            }
            std::hint::spin_loop();
        }
    });

    let mut matches = sink.finalize();
    let words_stored = matches.len() as u64;
    if let Some(mode) = config.sort {
        sort::apply(&mut matches, buf, mode);
    }

    metrics.log_stats();
    let scan_stats = metrics.get_stats();

    let stats = RunStats {
        worker_count: workers,
        partition_count: queue.partition_count(),
        dictionary_bytes: buf.len() as u64,
        words_scanned: scan_stats.words_scanned,
        words_found: sink.claimed() as u64,
        words_stored,
        overflowed: sink.overflowed(),
        elapsed: started.elapsed(),
    };

    info!(
        "Search complete. Found {} matching words among {} candidates",
        stats.words_found, stats.words_scanned
    );

    Ok(SearchOutput { matches, stats })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::SortMode;
    use std::num::NonZeroUsize;

    fn test_config(letters: &str, threads: usize) -> SearchConfig {
        SearchConfig {
            letters: letters.to_string(),
            required_letter: None,
            allow_repeats: false,
            sort: None,
            dictionary_path: "dictionary.txt".into(),
            thread_count: NonZeroUsize::new(threads).unwrap(),
            max_matches: 1000,
            min_word_len: 3,
            stats_only: false,
            log_level: "warn".to_string(),
        }
    }

    #[test]
    fn test_find_words_single_thread() {
        let dictionary = Dictionary::from_bytes(b"cat\nact\ntack\nat\n".to_vec()).unwrap();
        let config = test_config("tac", 1);

        let output = find_words(&dictionary, &config).unwrap();
        assert_eq!(output.len(), 2);
        assert_eq!(output.matches[0].bytes(dictionary.as_bytes()), b"cat");
        assert_eq!(output.matches[1].bytes(dictionary.as_bytes()), b"act");

        assert_eq!(output.stats.worker_count, 1);
        assert_eq!(output.stats.partition_count, 1);
        assert_eq!(output.stats.words_scanned, 4);
        assert_eq!(output.stats.words_found, 2);
        assert_eq!(output.stats.words_stored, 2);
        assert!(!output.stats.overflowed);
    }

    #[test]
    fn test_find_words_sorted() {
        let dictionary = Dictionary::from_bytes(b"tack\ncat\nact\nat\n".to_vec()).unwrap();
        let mut config = test_config("tack", 2);
        config.sort = Some(SortMode::Alpha);

        let output = find_words(&dictionary, &config).unwrap();
        let words: Vec<&[u8]> = output
            .matches
            .iter()
            .map(|m| m.bytes(dictionary.as_bytes()))
            .collect();
        assert_eq!(words, vec![b"act" as &[u8], b"cat", b"tack"]);
    }

    #[test]
    fn test_progress_reaches_completion() {
        let dictionary = Dictionary::from_bytes(Vec::new()).unwrap();
        let config = test_config("tac", 8);

        let mut reports = Vec::new();
        let output =
            find_words_with_progress(&dictionary, &config, |pct| reports.push(pct)).unwrap();

        assert!(output.is_empty());
        assert_eq!(output.stats.partition_count, 8);
        assert_eq!(reports.last(), Some(&100));
        assert!(reports.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_worker_cap_applies() {
        let dictionary = Dictionary::from_bytes(b"cat\n".to_vec()).unwrap();
        let config = test_config("tac", 64);

        let output = find_words(&dictionary, &config).unwrap();
        assert_eq!(output.stats.worker_count, MAX_WORKERS);
        assert_eq!(output.stats.partition_count, MAX_WORKERS);
    }

    #[test]
    fn test_overflow_reported() {
        let dictionary = Dictionary::from_bytes(b"cat\nact\ntac\n".to_vec()).unwrap();
        let mut config = test_config("tac", 1);
        config.max_matches = 1;

        let output = find_words(&dictionary, &config).unwrap();
        assert_eq!(output.stats.words_found, 3);
        assert_eq!(output.stats.words_stored, 1);
        assert!(output.stats.overflowed);
    }

    #[test]
    fn test_repeat_query_below_min_query_len() {
        // Validation is the caller's job; a two-letter repeat query is still
        // scanned correctly when handed to the engine directly.
        let dictionary = Dictionary::from_bytes(b"aabb\nabab\nabc\na\n".to_vec()).unwrap();
        let mut config = test_config("ab", 2);
        config.allow_repeats = true;

        let output = find_words(&dictionary, &config).unwrap();
        let words: Vec<&[u8]> = output
            .matches
            .iter()
            .map(|m| m.bytes(dictionary.as_bytes()))
            .collect();
        assert_eq!(words.len(), 2);
        assert!(words.contains(&(b"aabb" as &[u8])));
        assert!(words.contains(&(b"abab" as &[u8])));
    }
}
