// Diatonic scale construction for major and natural-minor keys.
//
// A `Scale` is the seven pitch classes of a key, tonic first. The candidate
// generator walks it by degree index (mod 7) to find consonant partners for a
// cantus firmus note, and the scorer reads its seventh degree for the minor
// cadence rule.

use crate::pitch::PitchClass;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Key mode. Only the two tonal modes are supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    Major,
    /// Natural minor (aeolian).
    Minor,
}

impl Mode {
    /// Semitone offsets from the tonic to each of the seven degrees.
    pub fn intervals(self) -> [u8; 7] {
        match self {
            Mode::Major => [0, 2, 4, 5, 7, 9, 11],
            Mode::Minor => [0, 2, 3, 5, 7, 8, 10],
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Major => f.write_str("Major"),
            Mode::Minor => f.write_str("Minor"),
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "major" => Ok(Mode::Major),
            "minor" => Ok(Mode::Minor),
            other => Err(format!("unknown mode '{}'", other)),
        }
    }
}

/// The seven pitch classes of a key. Element 0 is the tonic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scale {
    pub tonic: PitchClass,
    pub mode: Mode,
    degrees: [PitchClass; 7],
}

impl Scale {
    pub fn degrees(&self) -> &[PitchClass; 7] {
        &self.degrees
    }

    /// Pitch class of a degree; the index wraps mod 7.
    pub fn degree(&self, index: usize) -> PitchClass {
        self.degrees[index % 7]
    }

    /// Degree index (0-6) of a pitch class, or None if it is outside the key.
    pub fn degree_of(&self, class: PitchClass) -> Option<usize> {
        self.degrees.iter().position(|&pc| pc == class)
    }

    pub fn contains(&self, class: PitchClass) -> bool {
        self.degree_of(class).is_some()
    }

    /// The unaltered seventh degree.
    pub fn subtonic(&self) -> PitchClass {
        self.degrees[6]
    }

    /// Seventh degree of the parallel major, a semitone below the tonic.
    /// Equal to `subtonic()` in major keys.
    pub fn leading_tone(&self) -> PitchClass {
        self.tonic.transpose(11)
    }
}

/// Build the scale for a tonic and mode.
pub fn build_scale(tonic: PitchClass, mode: Mode) -> Scale {
    let intervals = mode.intervals();
    let mut degrees = [tonic; 7];
    for (slot, &offset) in degrees.iter_mut().zip(intervals.iter()) {
        *slot = tonic.transpose(offset);
    }
    Scale { tonic, mode, degrees }
}
