//! Shrinking pools of raw corpus lines.

use std::fmt;
use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::EngineError;

/// Which corpus a line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Policy,
    Poetry,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Policy => "policy",
            Self::Poetry => "poetry",
        }
    }

    pub fn other(&self) -> Self {
        match self {
            Self::Policy => Self::Poetry,
            Self::Poetry => Self::Policy,
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Multiset of raw lines from one source.
///
/// Order is irrelevant: removal swaps the last element into the hole. A drawn
/// line never comes back.
#[derive(Debug, Clone)]
pub struct CorpusPool {
    source: Source,
    lines: Vec<String>,
}

impl CorpusPool {
    pub fn new(source: Source, lines: Vec<String>) -> Self {
        Self { source, lines }
    }

    /// Read a source file, one raw line per pool entry.
    pub fn load(source: Source, path: &Path) -> Result<Self, EngineError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(EngineError::SourceNotFound(path.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        };
        let lines: Vec<String> = text.lines().map(str::to_string).collect();
        info!(%source, count = lines.len(), path = %path.display(), "loaded corpus");
        Ok(Self::new(source, lines))
    }

    pub fn source(&self) -> Source {
        self.source
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Remaining lines, in current (arbitrary) order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Remove and return a uniformly chosen line, or `None` when exhausted.
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<String> {
        if self.lines.is_empty() {
            return None;
        }
        let idx = rng.gen_range(0..self.lines.len());
        Some(self.lines.swap_remove(idx))
    }

    /// Remove and return the last line (in current order) matching `pred`.
    pub fn take_last_matching<F>(&mut self, pred: F) -> Option<String>
    where
        F: Fn(&str) -> bool,
    {
        let idx = self.lines.iter().rposition(|l| pred(l))?;
        Some(self.lines.swap_remove(idx))
    }
}
