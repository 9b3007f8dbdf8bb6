//! Selection engine: draws lines from a policy corpus and a poetry corpus,
//! normalizes and trims them, and interleaves them into stanzas.

pub mod config;
pub mod engine;
mod error;
pub mod guard;
pub mod normalize;
pub mod pattern;
pub mod pool;
pub mod stanza;
pub mod trim;

pub use config::{DrawPolicy, EngineConfig, SentencePolicy};
pub use engine::{
    EngineState, LineOutcome, RejectReason, RunSummary, SelectionEngine, StopReason,
};
pub use error::{ConfigError, EngineError};
pub use pool::{CorpusPool, Source};
