/// This module implements the search result types, demonstrating how Rust's
/// borrowing rules make a zero-copy result representation safe.
///
/// # Rust Ownership vs .NET References
///
/// A .NET implementation would typically materialize every match as a string:
/// ```csharp
/// public class SearchOutput {
///     public List<string> Matches { get; set; }
///     // Each match is a fresh allocation copied out of the dictionary
/// }
/// ```
///
/// Here a match is only a byte range into the dictionary buffer:
/// ```rust,ignore
/// pub struct WordMatch {
///     pub offset: u32,
///     pub len: u32,
/// }
/// let text = word_match.bytes(dictionary.as_bytes());
/// ```
///
/// No word is copied at any point between scanning and rendering. The borrow
/// checker enforces what a .NET version can only document: the dictionary
/// buffer must outlive every view taken into it, so a `WordMatch` can never
/// dangle.
use serde::Serialize;
use std::time::Duration;

/// One matched word, recorded as a byte range into the dictionary buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordMatch {
    /// Byte offset of the first letter
    pub offset: u32,
    /// Length of the word in bytes
    pub len: u32,
}

impl WordMatch {
    /// Resolves the match against the buffer it was recorded from.
    pub fn bytes<'a>(&self, buf: &'a [u8]) -> &'a [u8] {
        let start = self.offset as usize;
        &buf[start..start + self.len as usize]
    }
}

/// Counters describing one completed run.
#[derive(Debug, Clone, Serialize)]
pub struct RunStats {
    /// Workers that took part in the scan
    pub worker_count: usize,
    /// Partitions the dictionary was split into (one per worker)
    pub partition_count: usize,
    /// Size of the dictionary buffer
    pub dictionary_bytes: u64,
    /// Candidate words inspected across all partitions
    pub words_scanned: u64,
    /// Words that matched, including any dropped past capacity
    pub words_found: u64,
    /// Words actually kept in the match list
    pub words_stored: u64,
    /// Whether the match list filled up and later matches were dropped
    pub overflowed: bool,
    /// Wall-clock duration of the scan
    pub elapsed: Duration,
}

/// The complete result of one search run.
#[derive(Debug, Clone)]
pub struct SearchOutput {
    /// Matched words, in sort order if a sort mode was configured
    pub matches: Vec<WordMatch>,
    /// Run counters for the statistics display
    pub stats: RunStats,
}

impl SearchOutput {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_resolves_against_buffer() {
        let buf = b"cat\nact\ntack\n";
        let m = WordMatch { offset: 4, len: 3 };
        assert_eq!(m.bytes(buf), b"act");

        let m = WordMatch { offset: 8, len: 4 };
        assert_eq!(m.bytes(buf), b"tack");
    }

    #[test]
    fn test_output_len() {
        let output = SearchOutput {
            matches: vec![WordMatch { offset: 0, len: 3 }],
            stats: RunStats {
                worker_count: 1,
                partition_count: 1,
                dictionary_bytes: 4,
                words_scanned: 1,
                words_found: 1,
                words_stored: 1,
                overflowed: false,
                elapsed: Duration::from_millis(1),
            },
        };
        assert_eq!(output.len(), 1);
        assert!(!output.is_empty());
    }
}
