//! Artifact file names.
//!
//! `<timestamp>[_unique][_skip][_nostanzas][_maxlines<N>][_maxwords<N>][_<policy>].txt`
//!
//! The suffix order is fixed so the active options can be read back from the
//! name.

use chrono::{DateTime, Utc};
use termverse_core::EngineConfig;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H-%M-%S";

/// Build the output file name for a run started at `now`.
pub fn artifact_file_name(config: &EngineConfig, now: DateTime<Utc>) -> String {
    let mut name = now.format(TIMESTAMP_FORMAT).to_string();
    name.push_str(&option_suffix(config));
    name.push_str(".txt");
    name
}

/// Suffix tokens for the active options, in canonical order.
pub fn option_suffix(config: &EngineConfig) -> String {
    let mut suffix = String::new();
    if config.unique_lines {
        suffix.push_str("_unique");
    }
    if config.random_skip {
        suffix.push_str("_skip");
    }
    if config.no_stanzas {
        suffix.push_str("_nostanzas");
    }
    if let Some(max) = config.max_lines {
        suffix.push_str(&format!("_maxlines{max}"));
    }
    if let Some(max) = config.max_words_per_line {
        suffix.push_str(&format!("_maxwords{max}"));
    }
    if let Some(token) = config.draw_policy.name_token() {
        suffix.push('_');
        suffix.push_str(token);
    }
    suffix
}
