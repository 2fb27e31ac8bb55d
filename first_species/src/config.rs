// Data-driven generator configuration.
//
// Every tunable of the pipeline lives in `GeneratorConfig`: scorer weights,
// search limits, and MIDI playback settings. It loads from JSON; omitted
// fields fall back to their defaults, so a config file only needs the values
// it changes:
//
//   { "search": { "max_nodes": 5000000 }, "midi": { "tempo_bpm": 90 } }
//
// Command-line flags in the `generate` binary override loaded values.

use crate::midi::{MidiConfig, MidiError};
use crate::rules::RuleWeights;
use crate::search::SearchConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid midi settings: {0}")]
    Midi(#[from] MidiError),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub rules: RuleWeights,
    pub search: SearchConfig,
    pub midi: MidiConfig,
}

impl GeneratorConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.midi.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_is_default() {
        let config = GeneratorConfig::from_json("{}").unwrap();
        assert_eq!(config, GeneratorConfig::default());
        assert_eq!(config.rules.irregular_motion_penalty, -5);
        assert_eq!(config.rules.max_imperfect_run, 3);
        assert_eq!(config.search.max_nodes, None);
        assert_eq!(config.midi.tempo_bpm, 120);
    }

    #[test]
    fn test_partial_override() {
        let config = GeneratorConfig::from_json(
            r#"{ "search": { "max_nodes": 1000 }, "midi": { "tempo_bpm": 90 } }"#,
        )
        .unwrap();
        assert_eq!(config.search.max_nodes, Some(1000));
        assert_eq!(config.midi.tempo_bpm, 90);
        assert_eq!(config.midi.beats_per_note, 2);
        assert_eq!(config.rules, RuleWeights::default());
    }

    #[test]
    fn test_unencodable_midi_settings_rejected_on_load() {
        let err = GeneratorConfig::from_json(r#"{ "midi": { "tempo_bpm": 2 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Midi(MidiError::Tempo(2))));
    }

    #[test]
    fn test_bad_json_is_error() {
        let err = GeneratorConfig::from_json("{ \"rules\": 7 }").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }
}
