use serde::{Deserialize, Serialize};

use crate::results::WordMatch;

/// Orderings that can be applied to the finalized match list.
///
/// All modes are deterministic: equal words are tie-broken by buffer offset,
/// so the output sequence does not depend on which worker found a match
/// first, and applying a mode twice gives the same sequence as applying it
/// once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Shortest words first, equal lengths in byte order
    Length,
    /// Byte-wise lexicographic order
    Alpha,
    /// Keep only the words of maximal length (a filter, not an ordering)
    Longest,
}

/// Applies the selected mode to the match list in place.
pub fn apply(matches: &mut Vec<WordMatch>, buf: &[u8], mode: SortMode) {
    match mode {
        SortMode::Length => {
            matches.sort_unstable_by(|a, b| {
                a.len
                    .cmp(&b.len)
                    .then_with(|| a.bytes(buf).cmp(b.bytes(buf)))
                    .then_with(|| a.offset.cmp(&b.offset))
            });
        }
        SortMode::Alpha => {
            matches.sort_unstable_by(|a, b| {
                a.bytes(buf)
                    .cmp(b.bytes(buf))
                    .then_with(|| a.offset.cmp(&b.offset))
            });
        }
        SortMode::Longest => {
            let longest = matches.iter().map(|m| m.len).max().unwrap_or(0);
            matches.retain(|m| m.len == longest);
        }
    }
}
