// Pitch model: chromatic pitch classes, concrete pitches, and interval math.
//
// A `Pitch` is a (pitch class, octave) pair written the way the cantus firmus
// catalog writes it: `C4`, `F#3`, `Bb2`. The twelve recognized class names are
// fixed (`C C# D Eb E F F# G Ab A Bb B`); anything else is an `InvalidPitch`
// error at parse time, so everything downstream works on typed values and
// interval arithmetic is total.
//
// Ordering compares octave first, then chromatic index, which is the same as
// comparing MIDI note numbers.
//
// Used by every other module: scale.rs builds scales of `PitchClass`,
// candidates.rs enumerates `Pitch` values, rules.rs measures intervals.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors from parsing pitch names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PitchError {
    /// Not one of the twelve recognized pitch-class names.
    #[error("unknown pitch class '{0}'")]
    UnknownName(String),
    /// A pitch string without a trailing octave number, or with a bad one.
    #[error("pitch '{0}' has no valid octave")]
    BadOctave(String),
}

/// One of the twelve chromatic pitch classes, indexed from C.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PitchClass {
    C,
    CSharp,
    D,
    EFlat,
    E,
    F,
    FSharp,
    G,
    AFlat,
    A,
    BFlat,
    B,
}

impl PitchClass {
    pub const ALL: [PitchClass; 12] = [
        PitchClass::C,
        PitchClass::CSharp,
        PitchClass::D,
        PitchClass::EFlat,
        PitchClass::E,
        PitchClass::F,
        PitchClass::FSharp,
        PitchClass::G,
        PitchClass::AFlat,
        PitchClass::A,
        PitchClass::BFlat,
        PitchClass::B,
    ];

    /// Chromatic index, 0 = C through 11 = B.
    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Self {
        PitchClass::ALL[(index % 12) as usize]
    }

    pub fn name(self) -> &'static str {
        match self {
            PitchClass::C => "C",
            PitchClass::CSharp => "C#",
            PitchClass::D => "D",
            PitchClass::EFlat => "Eb",
            PitchClass::E => "E",
            PitchClass::F => "F",
            PitchClass::FSharp => "F#",
            PitchClass::G => "G",
            PitchClass::AFlat => "Ab",
            PitchClass::A => "A",
            PitchClass::BFlat => "Bb",
            PitchClass::B => "B",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, PitchError> {
        PitchClass::ALL
            .iter()
            .copied()
            .find(|pc| pc.name() == name)
            .ok_or_else(|| PitchError::UnknownName(name.to_string()))
    }

    /// The pitch class `semitones` above this one.
    pub fn transpose(self, semitones: u8) -> Self {
        PitchClass::from_index(self.index() + semitones % 12)
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PitchClass {
    type Err = PitchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PitchClass::from_name(s.trim())
    }
}

/// Upward semitone distance from pitch class `a` to pitch class `b`, 0–11.
pub fn directed_interval(a: PitchClass, b: PitchClass) -> u8 {
    (b.index() + 12 - a.index()) % 12
}

/// Name-based form of [`directed_interval`]. Unrecognized names are an error,
/// never a distance.
pub fn directed_interval_by_name(a: &str, b: &str) -> Result<u8, PitchError> {
    Ok(directed_interval(
        PitchClass::from_name(a)?,
        PitchClass::from_name(b)?,
    ))
}

/// Name-based form of [`Pitch::midi_number`].
pub fn midi_number_by_name(class: &str, octave: i8) -> Result<u8, PitchError> {
    Ok(Pitch::new(PitchClass::from_name(class)?, octave).midi_number())
}

/// A concrete pitch: class plus octave. Field order gives the derived
/// ordering (octave first, then class).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pitch {
    pub octave: i8,
    pub class: PitchClass,
}

impl Pitch {
    pub fn new(class: PitchClass, octave: i8) -> Self {
        Pitch { octave, class }
    }

    /// MIDI-style note number: class index + 12 * octave + 12 (C4 = 60).
    /// Octaves below -1 clamp to 0.
    pub fn midi_number(self) -> u8 {
        let n = self.class.index() as i16 + 12 * self.octave as i16 + 12;
        n.clamp(0, 127) as u8
    }

    /// Absolute semitone position, unclamped. Used for melodic distances.
    pub fn semitone(self) -> i16 {
        self.class.index() as i16 + 12 * self.octave as i16
    }

    pub fn is_lower(self, other: Pitch) -> bool {
        self < other
    }

    pub fn is_higher(self, other: Pitch) -> bool {
        self > other
    }

    /// Signed semitone motion from `self` to `to`.
    pub fn motion_to(self, to: Pitch) -> i16 {
        to.semitone() - self.semitone()
    }

    /// The same class shifted by whole octaves.
    pub fn shift_octaves(self, octaves: i8) -> Self {
        Pitch::new(self.class, self.octave + octaves)
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.class, self.octave)
    }
}

impl FromStr for Pitch {
    type Err = PitchError;

    /// Parses `<class><octave>`, e.g. `Bb3`. The octave is the trailing
    /// (optionally negative) integer.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s
            .find(|c: char| c.is_ascii_digit() || c == '-')
            .ok_or_else(|| PitchError::BadOctave(s.to_string()))?;
        let (name, octave) = s.split_at(split);
        let class = PitchClass::from_name(name)?;
        let octave: i8 = octave
            .parse()
            .map_err(|_| PitchError::BadOctave(s.to_string()))?;
        Ok(Pitch::new(class, octave))
    }
}
