//! Randomised stanza breaks.

use rand::Rng;
use rand::seq::SliceRandom;

/// Blank-line runs to choose from. Zero blank lines carries four times the
/// weight of any single non-zero run.
const BLANK_RUNS: [&str; 8] = ["", "", "", "", "\n", "\n\n", "\n\n\n", "\n\n\n\n"];

#[derive(Debug, Clone, Copy)]
pub struct StanzaFormatter {
    enabled: bool,
}

impl StanzaFormatter {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Zero to four newlines to append after an accepted line.
    pub fn blank_run<R: Rng + ?Sized>(&self, rng: &mut R) -> &'static str {
        if !self.enabled {
            return "";
        }
        BLANK_RUNS.choose(rng).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn disabled_is_always_empty() {
        let stanzas = StanzaFormatter::new(false);
        let mut rng = StdRng::seed_from_u64(0);
        for _ in 0..100 {
            assert_eq!(stanzas.blank_run(&mut rng), "");
        }
    }

    #[test]
    fn distribution_favours_zero() {
        let stanzas = StanzaFormatter::new(true);
        let mut rng = StdRng::seed_from_u64(21);
        let mut counts = [0usize; 5];
        for _ in 0..8000 {
            let run = stanzas.blank_run(&mut rng);
            assert!(run.chars().all(|c| c == '\n'));
            counts[run.len()] += 1;
        }
        // Expected: 4000 zero runs, 1000 of each non-zero length.
        assert!((3700..4300).contains(&counts[0]), "zero runs: {}", counts[0]);
        for len in 1..=4 {
            assert!(
                (850..1150).contains(&counts[len]),
                "{len}-line runs: {}",
                counts[len]
            );
        }
    }
}
