use super::partition::Partition;

/// Bytes that separate words in the dictionary buffer.
const fn is_delimiter(b: u8) -> bool {
    matches!(b, b'\n' | b'\r' | b' ')
}

/// Strategy for deciding whether a candidate can be spelled from the query.
#[derive(Debug, Clone)]
pub enum MatchStrategy {
    /// Each query letter may be consumed at most as often as it occurs
    Budget([u32; 26]),
    /// Only letter presence is constrained; query letters may be reused freely
    Presence(u32),
}

/// The query letters, digested into whichever form the matching rule needs.
///
/// Built once per run and then shared read-only across all workers.
#[derive(Debug, Clone)]
pub struct LetterProfile {
    strategy: MatchStrategy,
    required: Option<u8>,
}

impl LetterProfile {
    /// Builds a profile from the query letters.
    ///
    /// Letters are folded to lowercase; bytes outside the alphabet are
    /// ignored (validation happens in the configuration layer). When a
    /// required letter is set in budget mode, one extra unit of budget is
    /// reserved for it so a candidate can spend that letter beyond what the
    /// query itself supplies.
    pub fn new(letters: &str, required_letter: Option<char>, allow_repeats: bool) -> Self {
        let required = required_letter
            .filter(char::is_ascii_alphabetic)
            .map(|c| c.to_ascii_lowercase() as u8 - b'a');

        let strategy = if allow_repeats {
            let mut mask = 0u32;
            for b in letters.bytes().filter(u8::is_ascii_alphabetic) {
                mask |= 1 << (b.to_ascii_lowercase() - b'a');
            }
            if let Some(r) = required {
                mask |= 1 << r;
            }
            MatchStrategy::Presence(mask)
        } else {
            let mut counts = [0u32; 26];
            for b in letters.bytes().filter(u8::is_ascii_alphabetic) {
                counts[(b.to_ascii_lowercase() - b'a') as usize] += 1;
            }
            if let Some(r) = required {
                counts[r as usize] += 1;
            }
            MatchStrategy::Budget(counts)
        };

        Self { strategy, required }
    }

    /// Decides whether a candidate word can be spelled under this profile.
    ///
    /// `word` must contain only bytes in `a..=z`; the scanner filters
    /// candidates before calling this. The required-letter presence test
    /// runs before the spelling test in both modes.
    pub fn matches(&self, word: &[u8]) -> bool {
        match &self.strategy {
            MatchStrategy::Budget(budget) => {
                if let Some(r) = self.required {
                    if !word.contains(&(b'a' + r)) {
                        return false;
                    }
                }
                let mut used = [0u32; 26];
                for &b in word {
                    let i = (b - b'a') as usize;
                    used[i] += 1;
                    if used[i] > budget[i] {
                        return false;
                    }
                }
                true
            }
            MatchStrategy::Presence(letters) => {
                let mut mask = 0u32;
                for &b in word {
                    mask |= 1 << (b - b'a');
                }
                if let Some(r) = self.required {
                    if mask & (1 << r) == 0 {
                        return false;
                    }
                }
                mask & !letters == 0
            }
        }
    }
}

/// Per-partition scan totals.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScanTally {
    /// Candidate tokens inspected
    pub words: u64,
    /// Candidates that matched the profile
    pub matches: u64,
}

/// Scans one partition for words that match the profile.
///
/// A candidate is a maximal run of non-delimiter bytes; a run cut off by the
/// end of the partition is still a complete token, so the last word of an
/// unterminated file is evaluated like any other. Candidates shorter than
/// `min_word_len` or containing anything but lowercase letters are skipped.
/// Each match is reported through `on_match` as a `(offset, length)` pair.
pub fn scan_range<F>(
    buf: &[u8],
    range: Partition,
    profile: &LetterProfile,
    min_word_len: usize,
    mut on_match: F,
) -> ScanTally
where
    F: FnMut(u32, u32),
{
    let mut tally = ScanTally::default();
    let mut pos = range.start;

    while pos < range.end {
        if is_delimiter(buf[pos]) {
            pos += 1;
            continue;
        }
        let start = pos;
        while pos < range.end && !is_delimiter(buf[pos]) {
            pos += 1;
        }
        tally.words += 1;

        let token = &buf[start..pos];
        if token.len() >= min_word_len
            && token.iter().all(u8::is_ascii_lowercase)
            && profile.matches(token)
        {
            tally.matches += 1;
            on_match(start as u32, token.len() as u32);
        }
    }

    tally
}
