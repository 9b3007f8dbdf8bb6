//! Line normalisation for raw corpus lines.
//!
//! Turns one raw line into a candidate line:
//!
//! 1. Fold fully uppercase lines (headings, shouted clauses) to lowercase.
//!    Mixed-case and lowercase lines are left alone.
//! 2. Keep a single sentence, chosen by [`SentencePolicy`].
//! 3. Drop every character other than word characters, `'`, `-` and
//!    whitespace.
//! 4. Collapse whitespace runs to one space and trim the ends.
//!
//! The result may be empty; callers decide what to do with that.

use std::sync::LazyLock;

use rand::Rng;
use rand::seq::SliceRandom;
use regex::Regex;

use crate::SentencePolicy;

static STRAY_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w'\-\s]").expect("stray character pattern is valid"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

#[derive(Debug, Clone, Copy, Default)]
pub struct LineNormalizer {
    sentence: SentencePolicy,
}

impl LineNormalizer {
    pub fn new(sentence: SentencePolicy) -> Self {
        Self { sentence }
    }

    /// Normalise a raw line. `rng` is only consulted under [`SentencePolicy::Random`].
    pub fn normalize<R: Rng + ?Sized>(&self, raw: &str, rng: &mut R) -> String {
        let folded = fold_if_uppercase(raw);
        let sentence = match self.sentence {
            SentencePolicy::First => first_sentence(&folded),
            SentencePolicy::Random => random_sentence(&folded, rng),
        };

        clean(sentence)
    }
}

/// Normalise with the default first-sentence policy. Deterministic.
pub fn normalize_line(raw: &str) -> String {
    clean(first_sentence(&fold_if_uppercase(raw)))
}

fn fold_if_uppercase(raw: &str) -> String {
    if is_all_uppercase(raw) {
        raw.to_lowercase()
    } else {
        raw.to_string()
    }
}

/// True when the line has at least one cased character and none are lowercase.
pub fn is_all_uppercase(line: &str) -> bool {
    line.chars().any(char::is_uppercase) && !line.chars().any(char::is_lowercase)
}

fn first_sentence(line: &str) -> &str {
    line.split('.').next().unwrap_or_default()
}

fn random_sentence<'a, R: Rng + ?Sized>(line: &'a str, rng: &mut R) -> &'a str {
    let segments: Vec<&str> = line
        .split('.')
        .filter(|s| !s.trim().is_empty())
        .collect();
    segments.choose(rng).copied().unwrap_or_default()
}

fn clean(sentence: &str) -> String {
    let stripped = STRAY_CHARS.replace_all(sentence, "");
    WHITESPACE_RUN.replace_all(stripped.trim(), " ").into_owned()
}
