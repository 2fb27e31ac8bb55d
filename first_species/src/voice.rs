// Voice position of the counterpoint relative to the cantus firmus.
//
// The position fixes three things: which voice is the lower one when
// measuring harmonic intervals, the register windows (a wider exclusive one
// for candidate generation and a narrower inclusive one the scorer enforces),
// and whether the counterpoint is held to full leap discipline.

use crate::pitch::{Pitch, PitchClass};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoicePosition {
    /// Counterpoint sings above; the cantus firmus is the bass.
    Above,
    /// Counterpoint sings below; the cantus firmus is the upper voice.
    Below,
}

/// A pitch range with explicit bound inclusiveness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Register {
    pub low: Pitch,
    pub high: Pitch,
    pub inclusive: bool,
}

impl Register {
    pub fn contains(&self, pitch: Pitch) -> bool {
        if self.inclusive {
            pitch >= self.low && pitch <= self.high
        } else {
            pitch > self.low && pitch < self.high
        }
    }
}

impl VoicePosition {
    /// Octaves the candidate generator tries, lowest first.
    pub fn candidate_octaves(self) -> std::ops::RangeInclusive<i8> {
        match self {
            VoicePosition::Below => 2..=4,
            VoicePosition::Above => 3..=5,
        }
    }

    /// Exclusive window for candidate generation.
    /// Below: D2 < p < A4. Above: B3 < p < A5.
    pub fn candidate_window(self) -> Register {
        match self {
            VoicePosition::Below => Register {
                low: Pitch::new(PitchClass::D, 2),
                high: Pitch::new(PitchClass::A, 4),
                inclusive: false,
            },
            VoicePosition::Above => Register {
                low: Pitch::new(PitchClass::B, 3),
                high: Pitch::new(PitchClass::A, 5),
                inclusive: false,
            },
        }
    }

    /// Inclusive range the scorer enforces.
    /// Below: E2–G4. Above: C4–G5.
    pub fn range(self) -> Register {
        match self {
            VoicePosition::Below => Register {
                low: Pitch::new(PitchClass::E, 2),
                high: Pitch::new(PitchClass::G, 4),
                inclusive: true,
            },
            VoicePosition::Above => Register {
                low: Pitch::new(PitchClass::C, 4),
                high: Pitch::new(PitchClass::G, 5),
                inclusive: true,
            },
        }
    }

    /// Order a (counterpoint, cantus) pair into (lower, upper).
    pub fn lower_upper(self, counterpoint: Pitch, cantus: Pitch) -> (Pitch, Pitch) {
        match self {
            VoicePosition::Below => (counterpoint, cantus),
            VoicePosition::Above => (cantus, counterpoint),
        }
    }

    /// True if the counterpoint is on the wrong side of a cantus note.
    pub fn crosses(self, counterpoint: Pitch, cantus: Pitch) -> bool {
        match self {
            VoicePosition::Below => counterpoint.is_higher(cantus),
            VoicePosition::Above => counterpoint.is_lower(cantus),
        }
    }

    /// Whether melodic leaps in the counterpoint are hard-constrained
    /// (upper voice) or only penalized (lower voice).
    pub fn strict_leaps(self) -> bool {
        self == VoicePosition::Above
    }

    pub fn clef_name(self) -> &'static str {
        match self {
            VoicePosition::Above => "TrebleClef",
            VoicePosition::Below => "BassClef",
        }
    }
}

impl fmt::Display for VoicePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoicePosition::Above => f.write_str("above"),
            VoicePosition::Below => f.write_str("below"),
        }
    }
}

impl FromStr for VoicePosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "above" | "treble" | "t" => Ok(VoicePosition::Above),
            "below" | "bass" | "b" => Ok(VoicePosition::Below),
            other => Err(format!("unknown voice position '{}'", other)),
        }
    }
}
