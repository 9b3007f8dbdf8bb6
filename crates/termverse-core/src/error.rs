use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("source file not found: {0}")]
    SourceNotFound(std::path::PathBuf),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("max_words_per_line must be at least 1")]
    ZeroMaxWords,

    #[error("poetry_weight must be within [0, 1], got {0}")]
    PoetryWeightOutOfRange(f64),
}
