//! The selection loop.
//!
//! Each [`step`](SelectionEngine::step) draws one raw line from the pool picked
//! by the configured [`DrawPolicy`], pushes it through normalisation and (for
//! policy lines) word trimming, applies the rejection rules and, if the line
//! survives, writes it followed by a random stanza break. Draws are permanent:
//! a rejected line is gone from its pool for the rest of the run.
//!
//! The run ends once `max_lines` lines have been accepted or a pool is empty.
//! Under the alternating policies a round is policy then poetry, and a pool
//! that empties mid-round still lets the round's poetry draw happen. All randomness comes from the single `R: Rng` owned by the
//! engine, so a seeded generator replays a run exactly.

use std::io::Write;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::guard::UniquenessGuard;
use crate::normalize::LineNormalizer;
use crate::pattern;
use crate::stanza::StanzaFormatter;
use crate::trim::trim_words;
use crate::{ConfigError, CorpusPool, DrawPolicy, EngineConfig, EngineError, Source};

/// Chance that random-skip mode discards an otherwise acceptable line.
pub const SKIP_PROBABILITY: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Running,
    Done,
}

/// Why a run reached [`EngineState::Done`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    PolicyExhausted,
    PoetryExhausted,
    MaxLines,
}

/// Why a drawn line was discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Nothing left after normalisation and trimming.
    Empty,
    NonAscii,
    /// Case-folded repeat of an accepted line (uniqueness mode).
    Duplicate,
    /// Lost the random-skip coin flip.
    Skipped,
}

impl RejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::NonAscii => "non_ascii",
            Self::Duplicate => "duplicate",
            Self::Skipped => "skipped",
        }
    }
}

/// Result of a single draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    Accepted {
        source: Source,
        line: String,
        words_removed: usize,
    },
    Rejected {
        source: Source,
        reason: RejectReason,
    },
}

/// Tallies for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub accepted: usize,
    pub drawn_policy: usize,
    pub drawn_poetry: usize,
    pub rejected_empty: usize,
    pub rejected_non_ascii: usize,
    pub rejected_duplicate: usize,
    pub rejected_skipped: usize,
    /// Words dropped from policy lines by trimming, over accepted lines only.
    pub words_removed: usize,
    pub stop_reason: Option<StopReason>,
}

impl RunSummary {
    pub fn rejected(&self) -> usize {
        self.rejected_empty
            + self.rejected_non_ascii
            + self.rejected_duplicate
            + self.rejected_skipped
    }

    pub fn drawn(&self) -> usize {
        self.drawn_policy + self.drawn_poetry
    }

    fn record_rejection(&mut self, reason: RejectReason) {
        match reason {
            RejectReason::Empty => self.rejected_empty += 1,
            RejectReason::NonAscii => self.rejected_non_ascii += 1,
            RejectReason::Duplicate => self.rejected_duplicate += 1,
            RejectReason::Skipped => self.rejected_skipped += 1,
        }
    }
}

pub struct SelectionEngine<R> {
    config: EngineConfig,
    policy: CorpusPool,
    poetry: CorpusPool,
    normalizer: LineNormalizer,
    guard: UniquenessGuard,
    stanzas: StanzaFormatter,
    /// Tail of the last accepted line; only maintained under pattern chaining.
    pattern: String,
    next_source: Source,
    state: EngineState,
    summary: RunSummary,
    rng: R,
}

impl<R: Rng> SelectionEngine<R> {
    pub fn new(
        config: EngineConfig,
        policy: CorpusPool,
        poetry: CorpusPool,
        rng: R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            normalizer: LineNormalizer::new(config.sentence_policy),
            guard: UniquenessGuard::new(config.unique_lines),
            stanzas: StanzaFormatter::new(!config.no_stanzas),
            config,
            policy,
            poetry,
            pattern: String::new(),
            next_source: Source::Policy,
            state: EngineState::Running,
            summary: RunSummary::default(),
            rng,
        })
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn pool(&self, source: Source) -> &CorpusPool {
        match source {
            Source::Policy => &self.policy,
            Source::Poetry => &self.poetry,
        }
    }

    /// Run to completion, writing accepted lines and stanza breaks to `out`.
    pub fn run<W: Write>(&mut self, out: &mut W) -> Result<RunSummary, EngineError> {
        info!(
            policy_lines = self.policy.len(),
            poetry_lines = self.poetry.len(),
            policy = ?self.config.draw_policy,
            "starting selection run"
        );
        while self.step(out)?.is_some() {}
        info!(
            accepted = self.summary.accepted,
            rejected = self.summary.rejected(),
            stop_reason = ?self.summary.stop_reason,
            "selection run finished"
        );
        Ok(self.summary.clone())
    }

    /// Perform one iteration. Returns `None` once the engine is done.
    pub fn step<W: Write>(&mut self, out: &mut W) -> Result<Option<LineOutcome>, EngineError> {
        if self.state == EngineState::Done {
            return Ok(None);
        }
        if let Some(reason) = self.stop_reason() {
            debug!(?reason, "selection done");
            self.summary.stop_reason = Some(reason);
            self.state = EngineState::Done;
            return Ok(None);
        }

        let source = self.choose_source();
        let Some(raw) = self.draw(source) else {
            // Unreachable while stop_reason guards both pools.
            self.state = EngineState::Done;
            return Ok(None);
        };

        let mut candidate = self.normalizer.normalize(&raw, &mut self.rng);
        let mut words_removed = 0;
        if source == Source::Policy
            && let Some(max_words) = self.config.max_words_per_line
        {
            let trimmed = trim_words(&candidate, max_words, &mut self.rng);
            candidate = trimmed.line;
            words_removed = trimmed.words_removed;
        }

        if let Some(reason) = self.admit(&candidate) {
            self.summary.record_rejection(reason);
            debug!(%source, reason = reason.as_str(), raw = %raw, "rejected line");
            return Ok(Some(LineOutcome::Rejected { source, reason }));
        }

        writeln!(out, "{candidate}")?;
        out.write_all(self.stanzas.blank_run(&mut self.rng).as_bytes())?;
        self.summary.accepted += 1;
        self.summary.words_removed += words_removed;
        if self.config.draw_policy == DrawPolicy::PatternChained {
            self.pattern = pattern::tail_pattern(&candidate);
        }
        debug!(
            %source,
            words_removed,
            total = self.summary.accepted,
            line = %candidate,
            "wrote line"
        );

        Ok(Some(LineOutcome::Accepted {
            source,
            line: candidate,
            words_removed,
        }))
    }

    /// `max_lines` is checked before every draw. Under the alternating
    /// policies pool exhaustion is only checked at round boundaries, so a
    /// round that drew the last policy line still gets its poetry line.
    fn stop_reason(&self) -> Option<StopReason> {
        if self
            .config
            .max_lines
            .is_some_and(|max| self.summary.accepted >= max)
        {
            return Some(StopReason::MaxLines);
        }
        let mid_round = match self.config.draw_policy {
            DrawPolicy::Alternating | DrawPolicy::PatternChained => {
                self.next_source == Source::Poetry
            }
            DrawPolicy::Weighted { .. } => false,
        };
        if self.poetry.is_empty() && (mid_round || !self.policy.is_empty()) {
            Some(StopReason::PoetryExhausted)
        } else if self.policy.is_empty() && !mid_round {
            Some(StopReason::PolicyExhausted)
        } else {
            None
        }
    }

    fn choose_source(&mut self) -> Source {
        match self.config.draw_policy {
            DrawPolicy::Alternating | DrawPolicy::PatternChained => {
                let source = self.next_source;
                self.next_source = source.other();
                source
            }
            DrawPolicy::Weighted { poetry_weight } => {
                if self.rng.gen_bool(poetry_weight) {
                    Source::Poetry
                } else {
                    Source::Policy
                }
            }
        }
    }

    fn draw(&mut self, source: Source) -> Option<String> {
        let raw = match (source, self.config.draw_policy) {
            (Source::Poetry, DrawPolicy::PatternChained) => {
                pattern::find(&mut self.poetry, &self.pattern, &mut self.rng)
            }
            (Source::Poetry, _) => self.poetry.draw(&mut self.rng),
            (Source::Policy, _) => self.policy.draw(&mut self.rng),
        }?;
        match source {
            Source::Policy => self.summary.drawn_policy += 1,
            Source::Poetry => self.summary.drawn_poetry += 1,
        }
        Some(raw)
    }

    /// Apply the rejection rules. A line that passes is recorded as seen.
    fn admit(&mut self, candidate: &str) -> Option<RejectReason> {
        if candidate.trim().is_empty() {
            return Some(RejectReason::Empty);
        }
        if !candidate.is_ascii() {
            return Some(RejectReason::NonAscii);
        }
        if self.guard.is_duplicate(candidate) {
            return Some(RejectReason::Duplicate);
        }
        // Thrown before recording so a skipped line is not consumed as seen.
        if self.config.random_skip && self.rng.gen_bool(SKIP_PROBABILITY) {
            return Some(RejectReason::Skipped);
        }
        self.guard.accept(candidate);
        None
    }
}
