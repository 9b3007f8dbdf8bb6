//! Run configuration for the selection engine.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Default probability of drawing from the poetry pool under [`DrawPolicy::Weighted`].
pub const DEFAULT_POETRY_WEIGHT: f64 = 0.67;

/// How the engine picks the pool for the next draw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawPolicy {
    /// Policy, poetry, policy, ... toggled on every draw.
    #[default]
    Alternating,
    /// Each draw independently picks poetry with probability `poetry_weight`.
    Weighted { poetry_weight: f64 },
    /// Alternating, but poetry draws prefer lines containing the tail of the
    /// previously accepted line.
    PatternChained,
}

impl DrawPolicy {
    /// Short token used in artifact names; `None` for the default policy.
    pub fn name_token(&self) -> Option<&'static str> {
        match self {
            Self::Alternating => None,
            Self::Weighted { .. } => Some("weighted"),
            Self::PatternChained => Some("chained"),
        }
    }
}

/// Which sentence survives when a raw line holds several.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentencePolicy {
    /// Text before the first `.`.
    #[default]
    First,
    /// A uniformly chosen non-blank `.`-delimited segment.
    Random,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub unique_lines: bool,
    pub random_skip: bool,
    pub max_lines: Option<usize>,
    pub max_words_per_line: Option<usize>,
    pub no_stanzas: bool,
    pub draw_policy: DrawPolicy,
    pub sentence_policy: SentencePolicy,
}

impl EngineConfig {
    /// Reject settings the engine cannot honour.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_words_per_line == Some(0) {
            return Err(ConfigError::ZeroMaxWords);
        }
        if let DrawPolicy::Weighted { poetry_weight } = self.draw_policy
            && !(0.0..=1.0).contains(&poetry_weight)
        {
            // NaN fails `contains` as well.
            return Err(ConfigError::PoetryWeightOutOfRange(poetry_weight));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.draw_policy, DrawPolicy::Alternating);
        assert_eq!(config.sentence_policy, SentencePolicy::First);
    }

    #[test]
    fn zero_max_words_rejected() {
        let config = EngineConfig {
            max_words_per_line: Some(0),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroMaxWords));
    }

    #[test]
    fn poetry_weight_bounds() {
        for bad in [-0.1, 1.5, f64::NAN] {
            let config = EngineConfig {
                draw_policy: DrawPolicy::Weighted { poetry_weight: bad },
                ..Default::default()
            };
            assert!(config.validate().is_err(), "{bad} should be rejected");
        }
        let config = EngineConfig {
            draw_policy: DrawPolicy::Weighted { poetry_weight: 1.0 },
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_json_roundtrip() {
        let config = EngineConfig {
            unique_lines: true,
            max_lines: Some(10),
            max_words_per_line: Some(8),
            draw_policy: DrawPolicy::Weighted {
                poetry_weight: DEFAULT_POETRY_WEIGHT,
            },
            sentence_policy: SentencePolicy::Random,
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn partial_json_uses_defaults() {
        let json = r#"{ "unique_lines": true, "draw_policy": { "kind": "pattern_chained" } }"#;
        let parsed: EngineConfig = serde_json::from_str(json).unwrap();
        assert!(parsed.unique_lines);
        assert_eq!(parsed.draw_policy, DrawPolicy::PatternChained);
        assert!(parsed.max_lines.is_none());
    }

    #[test]
    fn policy_name_tokens() {
        assert_eq!(DrawPolicy::Alternating.name_token(), None);
        assert_eq!(
            DrawPolicy::Weighted { poetry_weight: 0.5 }.name_token(),
            Some("weighted")
        );
        assert_eq!(DrawPolicy::PatternChained.name_token(), Some("chained"));
    }
}
