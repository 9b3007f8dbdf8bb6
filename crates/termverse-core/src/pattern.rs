//! Suffix-pattern chaining for poetry draws.
//!
//! After each accepted line the last few characters of its final word become
//! the pattern. The next poetry draw prefers a raw line containing that
//! pattern, which gives the output a loose echo or rhyme.

use rand::Rng;

use crate::CorpusPool;

/// Characters taken from the end of the last word.
pub const PATTERN_LEN: usize = 3;

/// Tail of the last whitespace-delimited token of `line`.
///
/// Shorter tokens are returned whole; a blank line gives an empty pattern.
pub fn tail_pattern(line: &str) -> String {
    let Some(word) = line.split_whitespace().next_back() else {
        return String::new();
    };
    let count = word.chars().count();
    word.chars().skip(count.saturating_sub(PATTERN_LEN)).collect()
}

/// Draw from `pool`, preferring lines that contain `pattern`.
///
/// Matching is case-sensitive against raw text. With several matches the last
/// one in pool order wins. An empty pattern, or no match, falls back to a
/// uniform draw. Returns `None` only when the pool is exhausted.
pub fn find<R: Rng + ?Sized>(
    pool: &mut CorpusPool,
    pattern: &str,
    rng: &mut R,
) -> Option<String> {
    if !pattern.is_empty()
        && let Some(line) = pool.take_last_matching(|l| l.contains(pattern))
    {
        return Some(line);
    }
    pool.draw(rng)
}
