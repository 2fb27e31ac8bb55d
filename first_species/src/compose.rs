// End-to-end composition of one exercise.
//
// Pipeline: clef placement → backtracking search → cadence inflection.
// When the counterpoint goes below, the cantus moves up an octave into the
// treble register so both voices fit their windows. The returned
// `Composition` holds the cantus as it sounds and the finished line, ready
// for MIDI export.

use crate::cantus::CantusFirmus;
use crate::config::GeneratorConfig;
use crate::error::{Error, Result};
use crate::midi::write_midi;
use crate::pitch::Pitch;
use crate::search::{SearchReport, Solution, Solver};
use crate::voice::VoicePosition;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composition {
    /// The cantus firmus in the register it was composed against.
    pub cantus: CantusFirmus,
    pub voice: VoicePosition,
    /// Counterpoint with cadence inflection applied.
    pub counterpoint: Solution,
    pub nodes: u64,
    pub budget_exhausted: bool,
}

impl Composition {
    pub fn write_midi(&self, config: &GeneratorConfig, path: &Path) -> Result<()> {
        write_midi(self.cantus.notes(), &self.counterpoint.notes, &config.midi, path)?;
        Ok(())
    }

    pub fn counterpoint_notes(&self) -> &[Pitch] {
        &self.counterpoint.notes
    }
}

/// Place the cantus for the chosen voice position.
pub fn place_cantus(cantus: &CantusFirmus, voice: VoicePosition) -> CantusFirmus {
    match voice {
        VoicePosition::Below => cantus.transposed(1),
        VoicePosition::Above => cantus.clone(),
    }
}

/// Search for the raw (uninflected) counterpoint against an already placed
/// cantus.
pub fn search(cantus: &CantusFirmus, voice: VoicePosition, config: &GeneratorConfig) -> SearchReport {
    Solver::new(cantus, voice, &config.rules, &config.search).run()
}

/// Compose a counterpoint for a catalog cantus firmus.
pub fn compose(
    cantus: &CantusFirmus,
    voice: VoicePosition,
    config: &GeneratorConfig,
) -> Result<Composition> {
    let placed = place_cantus(cantus, voice);
    log::info!("composing counterpoint {} {}", voice, placed);

    let report = search(&placed, voice, config);
    let Some(best) = report.best else {
        if report.budget_exhausted {
            return Err(Error::BudgetExhausted {
                nodes: report.nodes,
            });
        }
        return Err(Error::Infeasible {
            cantus: cantus.to_string(),
            voice: voice.to_string(),
        });
    };

    Ok(Composition {
        counterpoint: best.with_leading_tone(&placed),
        cantus: placed,
        voice,
        nodes: report.nodes,
        budget_exhausted: report.budget_exhausted,
    })
}

/// Default MIDI file name for an exercise, e.g.
/// `Counterpoint-Fux-Species1-DMinor-BassClef.mid`.
pub fn default_output_name(cantus: &CantusFirmus, voice: VoicePosition) -> String {
    format!(
        "Counterpoint-{}-Species{}-{}{}-{}.mid",
        cantus.author,
        cantus.species,
        cantus.tonic,
        cantus.mode,
        voice.clef_name()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pitch::PitchClass;
    use crate::scale::Mode;

    fn cantus(tonic: PitchClass, mode: Mode, names: &[&str]) -> CantusFirmus {
        let notes = names.iter().map(|n| n.parse().unwrap()).collect();
        CantusFirmus::new("Fux", "1", tonic, mode, notes).unwrap()
    }

    #[test]
    fn test_below_moves_cantus_up() {
        let cf = cantus(PitchClass::C, Mode::Major, &["C3", "C3"]);
        let placed = place_cantus(&cf, VoicePosition::Below);
        assert_eq!(placed.notes()[0], "C4".parse().unwrap());
        assert_eq!(place_cantus(&cf, VoicePosition::Above), cf);
    }

    #[test]
    fn test_compose_two_notes() {
        let cf = cantus(PitchClass::C, Mode::Major, &["C3", "C3"]);
        let composition = compose(&cf, VoicePosition::Below, &GeneratorConfig::default()).unwrap();
        assert_eq!(composition.counterpoint_notes().len(), 2);
        assert_eq!(composition.cantus.notes()[1], "C4".parse().unwrap());
    }

    #[test]
    fn test_compose_reports_infeasible() {
        let cf = cantus(PitchClass::C, Mode::Major, &["C4", "F#4", "C4"]);
        let err = compose(&cf, VoicePosition::Above, &GeneratorConfig::default()).unwrap_err();
        assert!(matches!(err, Error::Infeasible { .. }));
    }

    #[test]
    fn test_compose_reports_budget_before_any_solution() {
        let cf = cantus(PitchClass::C, Mode::Major, &["C4", "D4", "F4", "E4", "D4", "C4"]);
        let mut config = GeneratorConfig::default();
        config.search.max_nodes = Some(2);
        let err = compose(&cf, VoicePosition::Below, &config).unwrap_err();
        assert!(matches!(err, Error::BudgetExhausted { nodes: 2 }));
    }

    #[test]
    fn test_output_name() {
        let cf = cantus(PitchClass::D, Mode::Minor, &["D4", "D4"]);
        assert_eq!(
            default_output_name(&cf, VoicePosition::Below),
            "Counterpoint-Fux-Species1-DMinor-BassClef.mid"
        );
    }
}
