// First-species counterpoint generator.
//
// Composes a second voice note-against-note with a given cantus firmus. A
// candidate generator proposes consonant scale pitches for each cantus note,
// a rule evaluator rejects prefixes that break first-species voice leading
// and scores the rest by melodic range, and a depth-first backtracking solver
// keeps the best complete line it finds.
//
// Architecture:
// - pitch.rs: Pitch classes, (class, octave) pitches, interval arithmetic
// - scale.rs: Major / natural-minor scale construction
// - voice.rs: Voice position (above/below) with register windows
// - cantus.rs: The cantus firmus value type
// - catalog.rs: Plain-text catalog of named cantus firmi
// - candidates.rs: Consonant candidate pitches per cantus note
// - rules.rs: Hard rules (verdicts) and soft scoring
// - search.rs: Backtracking solver with explicit best-so-far state
// - compose.rs: Clef placement → search → cadence inflection pipeline
// - midi.rs: Two-track MIDI export
// - config.rs: JSON-loadable tunables
// - error.rs: Crate error type
//
// The search is deterministic: the same cantus and voice always give the
// same line and score.

pub mod candidates;
pub mod cantus;
pub mod catalog;
pub mod compose;
pub mod config;
pub mod error;
pub mod midi;
pub mod pitch;
pub mod rules;
pub mod scale;
pub mod search;
pub mod voice;

pub use error::{Error, Result};
