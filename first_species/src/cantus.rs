// The cantus firmus: the fixed melody a counterpoint is composed against.
//
// Immutable once built. Construction checks the one structural invariant the
// search relies on (at least two notes); everything else about the melody,
// including notes outside the declared key, is left for the search to judge.

use crate::pitch::{Pitch, PitchClass};
use crate::scale::{Mode, Scale, build_scale};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CantusError {
    #[error("a cantus firmus needs at least 2 notes, got {0}")]
    TooShort(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CantusFirmus {
    pub author: String,
    /// Species label as written in the catalog (e.g. "1").
    pub species: String,
    pub tonic: PitchClass,
    pub mode: Mode,
    notes: Vec<Pitch>,
}

impl CantusFirmus {
    pub fn new(
        author: impl Into<String>,
        species: impl Into<String>,
        tonic: PitchClass,
        mode: Mode,
        notes: Vec<Pitch>,
    ) -> Result<Self, CantusError> {
        if notes.len() < 2 {
            return Err(CantusError::TooShort(notes.len()));
        }
        Ok(CantusFirmus {
            author: author.into(),
            species: species.into(),
            tonic,
            mode,
            notes,
        })
    }

    pub fn notes(&self) -> &[Pitch] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn scale(&self) -> Scale {
        build_scale(self.tonic, self.mode)
    }

    /// A copy with every note moved by whole octaves. Used when the
    /// counterpoint goes below and the cantus moves up to the treble clef.
    pub fn transposed(&self, octaves: i8) -> Self {
        CantusFirmus {
            notes: self.notes.iter().map(|p| p.shift_octaves(octaves)).collect(),
            ..self.clone()
        }
    }
}

impl fmt::Display for CantusFirmus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Species {} Cantus Firmus in {} {} by {}",
            self.species, self.tonic, self.mode, self.author
        )
    }
}
