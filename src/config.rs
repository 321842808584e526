use serde::{Deserialize, Serialize};

/// The five knobs that shape a typing session.
///
/// Delays are uniform draws from the inclusive `[min, max]` ranges. The typo
/// probability applies independently to every character.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TypingConfig {
    pub min_char_delay_ms: u64,
    pub max_char_delay_ms: u64,
    pub min_sentence_break_ms: u64,
    pub max_sentence_break_ms: u64,
    pub typo_probability: f64,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            min_char_delay_ms: 60,
            max_char_delay_ms: 140,
            min_sentence_break_ms: 30_000,
            max_sentence_break_ms: 120_000,
            typo_probability: 0.05,
        }
    }
}

impl TypingConfig {
    /// Bring out-of-range values back to something usable instead of
    /// aborting the run. An inverted delay pair falls back to the default
    /// pair; the typo probability is clamped to `[0.0, 1.0]` (non-finite
    /// values fall back to the default rate).
    pub fn normalized(self) -> Self {
        let defaults = Self::default();
        let mut out = self;

        if out.min_char_delay_ms > out.max_char_delay_ms {
            out.min_char_delay_ms = defaults.min_char_delay_ms;
            out.max_char_delay_ms = defaults.max_char_delay_ms;
        }
        if out.min_sentence_break_ms > out.max_sentence_break_ms {
            out.min_sentence_break_ms = defaults.min_sentence_break_ms;
            out.max_sentence_break_ms = defaults.max_sentence_break_ms;
        }

        out.typo_probability = if out.typo_probability.is_finite() {
            out.typo_probability.clamp(0.0, 1.0)
        } else {
            defaults.typo_probability
        };

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = TypingConfig::default();
        assert_eq!(cfg.min_char_delay_ms, 60);
        assert_eq!(cfg.max_char_delay_ms, 140);
        assert_eq!(cfg.min_sentence_break_ms, 30_000);
        assert_eq!(cfg.max_sentence_break_ms, 120_000);
        assert_eq!(cfg.typo_probability, 0.05);
    }

    #[test]
    fn valid_config_passes_through_unchanged() {
        let cfg = TypingConfig {
            min_char_delay_ms: 10,
            max_char_delay_ms: 20,
            min_sentence_break_ms: 100,
            max_sentence_break_ms: 200,
            typo_probability: 0.5,
        };
        assert_eq!(cfg.normalized(), cfg);
    }

    #[test]
    fn inverted_char_delay_bounds_fall_back_to_defaults() {
        let cfg = TypingConfig {
            min_char_delay_ms: 500,
            max_char_delay_ms: 10,
            ..Default::default()
        }
        .normalized();
        assert_eq!(cfg.min_char_delay_ms, 60);
        assert_eq!(cfg.max_char_delay_ms, 140);
    }

    #[test]
    fn inverted_break_bounds_fall_back_to_defaults() {
        let cfg = TypingConfig {
            min_sentence_break_ms: 9_999,
            max_sentence_break_ms: 1,
            ..Default::default()
        }
        .normalized();
        assert_eq!(cfg.min_sentence_break_ms, 30_000);
        assert_eq!(cfg.max_sentence_break_ms, 120_000);
    }

    #[test]
    fn typo_probability_is_clamped() {
        let over = TypingConfig {
            typo_probability: 1.5,
            ..Default::default()
        }
        .normalized();
        assert_eq!(over.typo_probability, 1.0);

        let under = TypingConfig {
            typo_probability: -0.1,
            ..Default::default()
        }
        .normalized();
        assert_eq!(under.typo_probability, 0.0);

        let nan = TypingConfig {
            typo_probability: f64::NAN,
            ..Default::default()
        }
        .normalized();
        assert_eq!(nan.typo_probability, 0.05);
    }
}
