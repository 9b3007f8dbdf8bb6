//! Word-count bounding for policy lines.
//!
//! A line longer than `max_words` tokens is cut down to exactly `max_words`
//! tokens by one of three retention strategies, chosen uniformly:
//!
//! - prefix: keep the start, drop the last `excess` tokens
//! - centered: drop `excess / 2` tokens from the front and the rest from the
//!   back; left out when `excess / 2` is zero
//! - suffix: keep the end, drop the first `excess` tokens

use rand::Rng;
use rand::seq::SliceRandom;

/// Outcome of [`trim_words`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trimmed {
    pub line: String,
    pub words_removed: usize,
}

/// The three retention candidates for `line`, empty ones excluded.
///
/// Returns an empty vec when the line already fits.
pub fn candidates(line: &str, max_words: usize) -> Vec<String> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let n = tokens.len();
    if n <= max_words {
        return Vec::new();
    }
    let excess = n - max_words;
    let lead = excess / 2;

    // With `lead == 0` the centered cut would just repeat the prefix.
    let centered: &[&str] = if lead == 0 {
        &[]
    } else {
        &tokens[lead..lead + max_words]
    };

    [&tokens[..n - excess], centered, &tokens[excess..]]
        .into_iter()
        .filter(|kept| !kept.is_empty())
        .map(|kept| kept.join(" "))
        .collect()
}

/// Bound `line` to at most `max_words` whitespace-delimited tokens.
pub fn trim_words<R: Rng + ?Sized>(line: &str, max_words: usize, rng: &mut R) -> Trimmed {
    let count = line.split_whitespace().count();
    if count <= max_words {
        return Trimmed {
            line: line.to_string(),
            words_removed: 0,
        };
    }

    let options = candidates(line, max_words);
    match options.choose(rng) {
        Some(chosen) => Trimmed {
            line: chosen.clone(),
            words_removed: count - max_words,
        },
        None => Trimmed {
            line: String::new(),
            words_removed: count,
        },
    }
}
