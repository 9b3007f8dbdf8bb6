//! Case-insensitive de-duplication of accepted lines.

use std::collections::HashSet;

/// Remembers every line accepted during a run, case-folded.
///
/// When disabled, every line is accepted and nothing is recorded.
#[derive(Debug, Default)]
pub struct UniquenessGuard {
    enabled: bool,
    seen: HashSet<String>,
}

impl UniquenessGuard {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            seen: HashSet::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Whether `line` would be rejected. Never mutates.
    pub fn is_duplicate(&self, line: &str) -> bool {
        self.enabled && self.seen.contains(&line.to_lowercase())
    }

    /// Record `line` and return true, or return false if it was already seen.
    pub fn accept(&mut self, line: &str) -> bool {
        if !self.enabled {
            return true;
        }
        self.seen.insert(line.to_lowercase())
    }

    /// Number of distinct lines recorded so far.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
