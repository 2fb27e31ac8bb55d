// Rule evaluation: hard first-species constraints plus a melodic-interest score.
//
// `evaluate` judges a counterpoint prefix (length 1..=N) against the cantus
// firmus and returns a `Verdict`: either a structured `RuleViolation` or an
// integer score. Every hard rule only looks at indices that exist in the
// prefix, so a rejected prefix stays rejected under any extension. The search
// relies on this to prune, and on every rule being decidable from the newest
// note and its predecessors: `RuleSet::evaluate_newest` checks one position
// without re-checking the prefix or allocating.
//
// Layers, in evaluation order:
// 1. Per-note: minor cadence degree, register, crossing, overlap.
// 2. Harmonic intervals: opening, cadence, parallel perfects, tritones,
//    runs of thirds/sixths.
// 3. Melodic motion: octave-or-wider leaps (always), plus full leap
//    discipline for the upper voice. Leaps in the lower voice are only
//    penalized.
// 4. Score: melodic span of the counterpoint plus accumulated penalties.
//
// Harmonic intervals are pitch-class distances from the lower voice up to the
// upper (0-11), so compound intervals fold onto their simple class.
// Melodic motion uses signed semitone distances between concrete pitches.

use crate::cantus::CantusFirmus;
use crate::pitch::{Pitch, PitchClass, directed_interval};
use crate::scale::Mode;
use crate::voice::{Register, VoicePosition};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

/// Tunable parameters of the scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleWeights {
    /// Added once per leap of a fourth, tritone or fifth.
    pub irregular_motion_penalty: i32,
    /// Longest allowed run of consecutive thirds, and of consecutive sixths.
    pub max_imperfect_run: usize,
}

impl Default for RuleWeights {
    fn default() -> Self {
        RuleWeights {
            irregular_motion_penalty: -5,
            max_imperfect_run: 3,
        }
    }
}

/// Harmonic interval class between the two voices, 0-11 semitones above the
/// lower voice's pitch class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval(pub u8);

impl Interval {
    pub const UNISON: Interval = Interval(0);
    pub const TRITONE: Interval = Interval(6);
    pub const FIFTH: Interval = Interval(7);

    pub fn between(lower: Pitch, upper: Pitch) -> Self {
        Interval(directed_interval(lower.class, upper.class))
    }

    /// Unison/octave or fifth.
    pub fn is_perfect(self) -> bool {
        self == Interval::UNISON || self == Interval::FIFTH
    }

    pub fn is_third(self) -> bool {
        matches!(self.0, 3 | 4)
    }

    pub fn is_sixth(self) -> bool {
        matches!(self.0, 8 | 9)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A broken hard rule. `index` is the counterpoint position where the
/// violation was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleViolation {
    /// Minor key: the penultimate note is not on the seventh degree.
    MissingLeadingTone { index: usize },
    OutOfRange { index: usize },
    /// Counterpoint on the wrong side of the simultaneous cantus note.
    VoiceCrossing { index: usize },
    /// Counterpoint passes the cantus note of the neighbouring beat.
    VoiceOverlap { index: usize },
    /// First interval is neither a unison/octave nor a fifth.
    ImproperOpening,
    /// Last interval is not a unison/octave, or is approached from a fifth.
    ImproperCadence,
    /// Same perfect interval twice in a row with at least one voice moving.
    ParallelPerfect { index: usize, interval: Interval },
    HarmonicTritone { index: usize },
    ImperfectRun { index: usize },
    MelodicTritone { index: usize },
    LeapIntoPerfect { index: usize },
    /// Leap not approached by a contrary step or skip.
    UnpreparedLeap { index: usize },
    /// Leap not left by a contrary step or skip.
    UnresolvedLeap { index: usize },
    /// Two thirds, or two sixths, in the same direction.
    ConsecutiveSkips { index: usize },
    /// Melodic motion of an octave or more.
    LeapTooWide { index: usize },
}

impl fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleViolation::MissingLeadingTone { index } => {
                write!(f, "note {index}: minor cadence needs the seventh degree")
            }
            RuleViolation::OutOfRange { index } => write!(f, "note {index}: out of range"),
            RuleViolation::VoiceCrossing { index } => write!(f, "note {index}: voices cross"),
            RuleViolation::VoiceOverlap { index } => write!(f, "note {index}: voices overlap"),
            RuleViolation::ImproperOpening => f.write_str("opening is not a perfect consonance"),
            RuleViolation::ImproperCadence => f.write_str("improper final cadence"),
            RuleViolation::ParallelPerfect { index, interval } => {
                write!(f, "note {index}: parallel perfect interval ({interval})")
            }
            RuleViolation::HarmonicTritone { index } => write!(f, "note {index}: tritone"),
            RuleViolation::ImperfectRun { index } => {
                write!(f, "note {index}: too many parallel thirds or sixths")
            }
            RuleViolation::MelodicTritone { index } => write!(f, "note {index}: tritone leap"),
            RuleViolation::LeapIntoPerfect { index } => {
                write!(f, "note {index}: leap into a perfect consonance")
            }
            RuleViolation::UnpreparedLeap { index } => {
                write!(f, "note {index}: leap not approached by contrary motion")
            }
            RuleViolation::UnresolvedLeap { index } => {
                write!(f, "note {index}: leap not followed by contrary motion")
            }
            RuleViolation::ConsecutiveSkips { index } => {
                write!(f, "note {index}: consecutive skips in one direction")
            }
            RuleViolation::LeapTooWide { index } => write!(f, "note {index}: leap of an octave or more"),
        }
    }
}

/// Outcome of evaluating a counterpoint prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Score(i32),
    Reject(RuleViolation),
}

impl From<Result<i32, RuleViolation>> for Verdict {
    fn from(result: Result<i32, RuleViolation>) -> Self {
        match result {
            Ok(score) => Verdict::Score(score),
            Err(violation) => Verdict::Reject(violation),
        }
    }
}

/// Evaluate a counterpoint prefix against the cantus firmus.
///
/// `line` holds the counterpoint notes for cantus positions `0..line.len()`.
/// Notes beyond the cantus length are ignored.
pub fn evaluate(
    line: &[Pitch],
    cantus: &CantusFirmus,
    voice: VoicePosition,
    weights: &RuleWeights,
) -> Verdict {
    RuleSet::new(cantus, voice, weights).evaluate(line)
}

/// The hard rules and scoring bound to one cantus firmus and voice position.
///
/// Every rule is phrased as a check on one "newest" note against the notes
/// before it. `evaluate` runs that check for each position in turn;
/// `evaluate_newest` runs it for the last position only, which is all the
/// search needs since it only ever extends admissible prefixes.
#[derive(Debug, Clone)]
pub struct RuleSet<'a> {
    cantus: &'a CantusFirmus,
    voice: VoicePosition,
    weights: &'a RuleWeights,
    subtonic: PitchClass,
    range: Register,
    strict: bool,
}

impl<'a> RuleSet<'a> {
    pub fn new(cantus: &'a CantusFirmus, voice: VoicePosition, weights: &'a RuleWeights) -> Self {
        RuleSet {
            cantus,
            voice,
            weights,
            subtonic: cantus.scale().subtonic(),
            range: voice.range(),
            strict: voice.strict_leaps(),
        }
    }

    /// Evaluate a whole prefix from scratch.
    pub fn evaluate(&self, line: &[Pitch]) -> Verdict {
        let line = self.clip(line);
        let checked = (0..line.len()).try_for_each(|k| self.check_newest(&line[..=k]));
        Verdict::from(checked.map(|()| self.score(line)))
    }

    /// Evaluate a prefix whose shorter prefixes are all admissible. Only the
    /// rules involving the last note are checked; the verdict matches
    /// `evaluate` under that precondition.
    pub fn evaluate_newest(&self, line: &[Pitch]) -> Verdict {
        let line = self.clip(line);
        if line.is_empty() {
            return Verdict::Score(0);
        }
        Verdict::from(self.check_newest(line).map(|()| self.score(line)))
    }

    /// Melodic span of the line plus the penalty for each leap.
    pub fn score(&self, line: &[Pitch]) -> i32 {
        let leaps = line
            .windows(2)
            .filter(|w| is_leap(w[0].motion_to(w[1])))
            .count() as i32;
        melodic_span(line) + leaps * self.weights.irregular_motion_penalty
    }

    fn clip<'l>(&self, line: &'l [Pitch]) -> &'l [Pitch] {
        &line[..line.len().min(self.cantus.len())]
    }

    fn cf(&self, i: usize) -> Pitch {
        self.cantus.notes()[i]
    }

    fn interval(&self, line: &[Pitch], i: usize) -> Interval {
        let (lower, upper) = self.voice.lower_upper(line[i], self.cf(i));
        Interval::between(lower, upper)
    }

    fn check_newest(&self, line: &[Pitch]) -> Result<(), RuleViolation> {
        let k = line.len() - 1;
        self.check_note(line, k)?;
        self.check_harmony(line, k)?;
        self.check_imperfect_run(line, k)?;
        self.check_motion(line, k)
    }

    // ── Layer 1: per-note rules ──

    fn check_note(&self, line: &[Pitch], k: usize) -> Result<(), RuleViolation> {
        let (cp, c) = (line[k], self.cf(k));
        // Searched diatonically; raised to the leading tone after the search.
        if self.cantus.mode == Mode::Minor && k + 2 == self.cantus.len() && cp.class != self.subtonic
        {
            return Err(RuleViolation::MissingLeadingTone { index: k });
        }
        if !self.range.contains(cp) {
            return Err(RuleViolation::OutOfRange { index: k });
        }
        if self.voice.crosses(cp, c) {
            return Err(RuleViolation::VoiceCrossing { index: k });
        }
        if k > 0 && (self.voice.crosses(cp, self.cf(k - 1)) || self.voice.crosses(line[k - 1], c)) {
            return Err(RuleViolation::VoiceOverlap { index: k });
        }
        Ok(())
    }

    // ── Layer 2: harmonic interval rules ──

    fn check_harmony(&self, line: &[Pitch], k: usize) -> Result<(), RuleViolation> {
        let curr = self.interval(line, k);
        if k == 0 {
            if !curr.is_perfect() {
                return Err(RuleViolation::ImproperOpening);
            }
        } else {
            let prev = self.interval(line, k - 1);
            if k + 1 == self.cantus.len() && (curr != Interval::UNISON || prev == Interval::FIFTH) {
                return Err(RuleViolation::ImproperCadence);
            }
            // A sonority simply repeated is not parallel motion.
            let moved = line[k] != line[k - 1] || self.cf(k) != self.cf(k - 1);
            if curr.is_perfect() && curr == prev && moved {
                return Err(RuleViolation::ParallelPerfect {
                    index: k,
                    interval: curr,
                });
            }
        }
        if curr == Interval::TRITONE {
            return Err(RuleViolation::HarmonicTritone { index: k });
        }
        Ok(())
    }

    /// Thirds and sixths are counted as separate runs.
    fn check_imperfect_run(&self, line: &[Pitch], k: usize) -> Result<(), RuleViolation> {
        let curr = self.interval(line, k);
        let same_kind: fn(Interval) -> bool = if curr.is_third() {
            Interval::is_third
        } else if curr.is_sixth() {
            Interval::is_sixth
        } else {
            return Ok(());
        };
        let max_run = self.weights.max_imperfect_run;
        let run = (0..=k)
            .rev()
            .take(max_run + 1)
            .take_while(|&i| same_kind(self.interval(line, i)))
            .count();
        if run > max_run {
            return Err(RuleViolation::ImperfectRun { index: k });
        }
        Ok(())
    }

    // ── Layer 3: melodic motion ──

    fn check_motion(&self, line: &[Pitch], k: usize) -> Result<(), RuleViolation> {
        if k == 0 {
            return Ok(());
        }
        let m = line[k - 1].motion_to(line[k]);
        if m.abs() >= 12 {
            return Err(RuleViolation::LeapTooWide { index: k });
        }
        if !self.strict {
            return Ok(());
        }
        let prev = (k >= 2).then(|| line[k - 2].motion_to(line[k - 1]));

        if is_leap(m) {
            if m.abs() == 6 {
                return Err(RuleViolation::MelodicTritone { index: k });
            }
            if self.interval(line, k).is_perfect() {
                return Err(RuleViolation::LeapIntoPerfect { index: k });
            }
            if prev.is_some_and(|p| !contrary_recovery(m).contains(&p)) {
                return Err(RuleViolation::UnpreparedLeap { index: k });
            }
        }
        if let Some(p) = prev {
            if is_leap(p) && !contrary_recovery(p).contains(&m) {
                return Err(RuleViolation::UnresolvedLeap { index: k - 1 });
            }
            if same_direction_skips(p, m) {
                return Err(RuleViolation::ConsecutiveSkips { index: k });
            }
        }
        Ok(())
    }
}

/// Harmonic interval class at each position, measured from the lower voice.
pub fn harmonic_intervals(line: &[Pitch], cf: &[Pitch], voice: VoicePosition) -> Vec<Interval> {
    line.iter()
        .zip(cf)
        .map(|(&cp, &c)| {
            let (lower, upper) = voice.lower_upper(cp, c);
            Interval::between(lower, upper)
        })
        .collect()
}

/// Semitone distance between the lowest and highest note.
pub fn melodic_span(line: &[Pitch]) -> i32 {
    let lo = line.iter().map(|p| p.semitone()).min().unwrap_or(0);
    let hi = line.iter().map(|p| p.semitone()).max().unwrap_or(0);
    (hi - lo) as i32
}

/// A fourth, tritone or fifth.
fn is_leap(motion: i16) -> bool {
    (5..=7).contains(&motion.abs())
}

fn is_third(motion: i16) -> bool {
    (3..=4).contains(&motion.abs())
}

fn is_sixth(motion: i16) -> bool {
    (8..=9).contains(&motion.abs())
}

/// Two thirds, or two sixths, moving the same way.
fn same_direction_skips(a: i16, b: i16) -> bool {
    a.signum() == b.signum() && ((is_third(a) && is_third(b)) || (is_sixth(a) && is_sixth(b)))
}

/// Motions that count as contrary recovery for a leap in direction `leap`:
/// a repeated note or a step/skip of up to a major third the other way.
fn contrary_recovery(leap: i16) -> RangeInclusive<i16> {
    if leap < 0 { 0..=4 } else { -4..=0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pitch::PitchClass;

    fn pitches(names: &[&str]) -> Vec<Pitch> {
        names.iter().map(|n| n.parse().unwrap()).collect()
    }

    fn cantus(tonic: PitchClass, mode: Mode, names: &[&str]) -> CantusFirmus {
        CantusFirmus::new("Test", "1", tonic, mode, pitches(names)).unwrap()
    }

    fn c_major(names: &[&str]) -> CantusFirmus {
        cantus(PitchClass::C, Mode::Major, names)
    }

    fn eval(line: &[&str], cf: &CantusFirmus, voice: VoicePosition) -> Verdict {
        evaluate(&pitches(line), cf, voice, &RuleWeights::default())
    }

    fn reject(violation: RuleViolation) -> Verdict {
        Verdict::Reject(violation)
    }

    #[test]
    fn test_empty_prefix_scores_zero() {
        let cf = c_major(&["C4", "D4", "C4"]);
        assert_eq!(eval(&[], &cf, VoicePosition::Below), Verdict::Score(0));
    }

    #[test]
    fn test_opening_must_be_perfect() {
        let cf = c_major(&["C4", "D4", "C4"]);
        // E3 under C4 is a sixth.
        assert_eq!(eval(&["E3"], &cf, VoicePosition::Below), reject(RuleViolation::ImproperOpening));
        assert_eq!(eval(&["C3"], &cf, VoicePosition::Below), Verdict::Score(0));
        assert_eq!(eval(&["F3"], &cf, VoicePosition::Below), Verdict::Score(0));
    }

    #[test]
    fn test_range_and_crossing() {
        let cf = c_major(&["C4", "D4", "C4"]);
        assert_eq!(
            eval(&["G4"], &cf, VoicePosition::Below),
            reject(RuleViolation::VoiceCrossing { index: 0 })
        );
        assert_eq!(
            eval(&["C2"], &cf, VoicePosition::Below),
            reject(RuleViolation::OutOfRange { index: 0 })
        );
    }

    #[test]
    fn test_overlap_with_neighbouring_cantus_note() {
        // Cantus G4 rises above the counterpoint's previous C4.
        let cf = c_major(&["C4", "G4", "C4"]);
        assert_eq!(
            eval(&["C4", "G4"], &cf, VoicePosition::Above),
            reject(RuleViolation::VoiceOverlap { index: 1 })
        );
    }

    #[test]
    fn test_parallel_fifths_and_octaves() {
        let cf = c_major(&["C4", "D4", "E4", "F4"]);
        assert_eq!(
            eval(&["F3", "G3"], &cf, VoicePosition::Below),
            reject(RuleViolation::ParallelPerfect {
                index: 1,
                interval: Interval::FIFTH
            })
        );
        assert_eq!(
            eval(&["C3", "D3"], &cf, VoicePosition::Below),
            reject(RuleViolation::ParallelPerfect {
                index: 1,
                interval: Interval::UNISON
            })
        );
    }

    #[test]
    fn test_repeated_sonority_is_not_parallel() {
        let cf = c_major(&["C4", "C4"]);
        assert_eq!(eval(&["C3", "C3"], &cf, VoicePosition::Below), Verdict::Score(0));
    }

    #[test]
    fn test_cadence_rules() {
        let cf = c_major(&["C4", "D4", "C4"]);
        // Sixth -> octave: fine. Span is one semitone.
        assert_eq!(eval(&["C3", "B2", "C3"], &cf, VoicePosition::Below), Verdict::Score(1));
        // Fifth -> octave is rejected.
        assert_eq!(
            eval(&["C3", "G3", "C3"], &cf, VoicePosition::Below),
            reject(RuleViolation::ImproperCadence)
        );
        // Must end on a unison/octave.
        assert_eq!(
            eval(&["C3", "B2", "E3"], &cf, VoicePosition::Below),
            reject(RuleViolation::ImproperCadence)
        );
    }

    #[test]
    fn test_harmonic_tritone() {
        let cf = c_major(&["C4", "B3", "C4", "G4"]);
        assert_eq!(
            eval(&["C3", "F3"], &cf, VoicePosition::Below),
            reject(RuleViolation::HarmonicTritone { index: 1 })
        );
    }

    #[test]
    fn test_imperfect_run_limit() {
        let cf = c_major(&["C4", "D4", "E4", "F4", "G4", "A4"]);
        let line = ["C3", "B2", "C3", "D3", "E3"];
        assert_eq!(
            eval(&line, &cf, VoicePosition::Below),
            reject(RuleViolation::ImperfectRun { index: 4 })
        );

        let relaxed = RuleWeights {
            max_imperfect_run: 4,
            ..RuleWeights::default()
        };
        assert_eq!(evaluate(&pitches(&line), &cf, VoicePosition::Below, &relaxed), Verdict::Score(5));
    }

    #[test]
    fn test_octave_leap_rejected_in_lower_voice() {
        let cf = c_major(&["C4", "E4", "D4", "C4"]);
        assert_eq!(
            eval(&["C3", "C4"], &cf, VoicePosition::Below),
            reject(RuleViolation::LeapTooWide { index: 1 })
        );
    }

    #[test]
    fn test_lower_voice_leaps_only_penalized() {
        let cf = c_major(&["C4", "D4", "E4", "F4", "G4"]);
        // Two fourths: span 5, penalty -10.
        assert_eq!(eval(&["C3", "G2", "C3"], &cf, VoicePosition::Below), Verdict::Score(-5));
    }

    #[test]
    fn test_upper_voice_leap_into_perfect() {
        let cf = c_major(&["C3", "D3", "E3", "F3", "G3"]);
        assert_eq!(
            eval(&["G4", "D5"], &cf, VoicePosition::Above),
            reject(RuleViolation::LeapIntoPerfect { index: 1 })
        );
    }

    #[test]
    fn test_upper_voice_leap_recovery() {
        let cf = c_major(&["C3", "D3", "E3", "F3", "G3"]);
        assert_eq!(
            eval(&["C4", "F4", "G4"], &cf, VoicePosition::Above),
            reject(RuleViolation::UnresolvedLeap { index: 1 })
        );
        // Leap up a fourth, step back down: span 5, one leap penalty.
        assert_eq!(eval(&["C4", "F4", "E4"], &cf, VoicePosition::Above), Verdict::Score(0));
    }

    #[test]
    fn test_upper_voice_unprepared_leap() {
        let cf = c_major(&["C3", "D3", "E3", "F3", "G3"]);
        assert_eq!(
            eval(&["C4", "E4", "A4"], &cf, VoicePosition::Above),
            reject(RuleViolation::UnpreparedLeap { index: 2 })
        );
    }

    #[test]
    fn test_upper_voice_melodic_tritone() {
        let cf = c_major(&["C3", "D3", "E3", "F3", "G3"]);
        assert_eq!(
            eval(&["C4", "F#4"], &cf, VoicePosition::Above),
            reject(RuleViolation::MelodicTritone { index: 1 })
        );
    }

    #[test]
    fn test_upper_voice_consecutive_thirds() {
        let cf = c_major(&["C3", "D3", "E3", "F3", "G3", "A3"]);
        assert_eq!(
            eval(&["G4", "E4", "C4"], &cf, VoicePosition::Above),
            reject(RuleViolation::ConsecutiveSkips { index: 2 })
        );
    }

    #[test]
    fn test_minor_penultimate_degree() {
        let cf = cantus(PitchClass::A, Mode::Minor, &["A4", "B4", "A4"]);
        assert_eq!(
            eval(&["A3", "D4"], &cf, VoicePosition::Below),
            reject(RuleViolation::MissingLeadingTone { index: 1 })
        );
        assert_eq!(eval(&["A3", "G3", "A3"], &cf, VoicePosition::Below), Verdict::Score(2));
    }

    #[test]
    fn test_rejection_is_sticky_under_extension() {
        let cf = c_major(&["C4", "D4", "E4", "F4"]);
        let bad = eval(&["F3", "G3"], &cf, VoicePosition::Below);
        let extended = eval(&["F3", "G3", "C3"], &cf, VoicePosition::Below);
        assert!(matches!(bad, Verdict::Reject(_)));
        assert_eq!(extended, bad);
    }

    #[test]
    fn test_lower_voice_overlap() {
        // Counterpoint rises above the previous cantus note.
        let cf = c_major(&["C4", "G4", "C4"]);
        assert_eq!(
            eval(&["C4", "E4"], &cf, VoicePosition::Below),
            reject(RuleViolation::VoiceOverlap { index: 1 })
        );
        // Cantus falls below the previous counterpoint note.
        let cf = c_major(&["C4", "E3", "C4"]);
        assert_eq!(
            eval(&["F3", "C3"], &cf, VoicePosition::Below),
            reject(RuleViolation::VoiceOverlap { index: 1 })
        );
    }

    #[test]
    fn test_sixths_run_limit() {
        let cf = c_major(&["C4", "D4", "E4", "F4", "G4", "A4"]);
        // Unison, then four sixths.
        let line = ["C3", "F3", "G3", "A3", "B3"];
        assert_eq!(
            eval(&line, &cf, VoicePosition::Below),
            reject(RuleViolation::ImperfectRun { index: 4 })
        );

        // Span 11, one leap of a fourth.
        let relaxed = RuleWeights {
            max_imperfect_run: 4,
            ..RuleWeights::default()
        };
        assert_eq!(evaluate(&pitches(&line), &cf, VoicePosition::Below, &relaxed), Verdict::Score(6));
    }

    #[test]
    fn test_thirds_and_sixths_counted_separately() {
        let cf = c_major(&["C4", "D4", "E4", "F4", "G4", "A4"]);
        // Unison, sixth, sixth, third, third: neither run exceeds three.
        // Span 7, two leaps of a fourth.
        assert_eq!(
            eval(&["C3", "F3", "G3", "D3", "E3"], &cf, VoicePosition::Below),
            Verdict::Score(-3)
        );
    }

    #[test]
    fn test_upper_voice_consecutive_sixths() {
        let cf = c_major(&["C3", "D3", "E3", "F3", "G3"]);
        // Down a major sixth, then down a minor sixth.
        assert_eq!(
            eval(&["G5", "Bb4", "D4"], &cf, VoicePosition::Above),
            reject(RuleViolation::ConsecutiveSkips { index: 2 })
        );
    }

    fn assert_newest_matches_full(
        rules: &RuleSet<'_>,
        choices: &[Vec<Pitch>],
        line: &mut Vec<Pitch>,
        seen: &mut usize,
    ) {
        if line.len() == choices.len() {
            return;
        }
        for &candidate in &choices[line.len()] {
            line.push(candidate);
            let full = rules.evaluate(line);
            assert_eq!(rules.evaluate_newest(line), full, "line {:?}", line);
            *seen += 1;
            if matches!(full, Verdict::Score(_)) {
                assert_newest_matches_full(rules, choices, line, seen);
            }
            line.pop();
        }
    }

    #[test]
    fn test_newest_note_check_matches_full_evaluation() {
        let weights = RuleWeights::default();
        let cases = [
            (c_major(&["C4", "D4", "F4", "E4", "D4", "C4"]), VoicePosition::Below),
            (c_major(&["C3", "D3", "F3", "E3", "D3", "C3"]), VoicePosition::Above),
            (
                cantus(PitchClass::D, Mode::Minor, &["D3", "F3", "G3", "F3", "E3", "D3"]),
                VoicePosition::Above,
            ),
        ];
        for (cf, voice) in &cases {
            let rules = RuleSet::new(cf, *voice, &weights);
            let choices: Vec<Vec<Pitch>> = cf
                .notes()
                .iter()
                .map(|&note| crate::candidates::candidates(cf.tonic, note, *voice, cf.mode))
                .collect();
            let mut seen = 0;
            assert_newest_matches_full(&rules, &choices, &mut Vec::new(), &mut seen);
            assert!(seen > 0);
        }
    }
}
