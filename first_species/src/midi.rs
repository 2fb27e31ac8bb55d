// MIDI output for a finished two-voice exercise.
//
// Writes a Standard MIDI File (format 1): a tempo track, then one track for
// the cantus firmus and one for the counterpoint. First species is note
// against note, so both voices share a single fixed note length.
//
// Uses the `midly` crate for encoding. midly's fixed-width integers mask
// out-of-range values, so settings are validated before any event is built.

use crate::pitch::Pitch;
use midly::{
    Format, Header, MetaMessage, MidiMessage, Smf, Timing, Track, TrackEvent, TrackEventKind,
    num::{u4, u7, u15, u24, u28},
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Ticks per quarter note in MIDI output.
const TICKS_PER_QUARTER: u16 = 480;

/// Largest tempo value (microseconds per quarter) a tempo event can hold.
const MAX_TEMPO_MICROS: u32 = (1 << 24) - 1;
/// Largest delta time (ticks) a track event can hold.
const MAX_DELTA_TICKS: u32 = (1 << 28) - 1;

#[derive(Debug, Error)]
pub enum MidiError {
    #[error("tempo of {0} bpm cannot be encoded (allowed: 4 to 65535)")]
    Tempo(u16),
    #[error("note length of {0} beats cannot be encoded")]
    NoteLength(u32),
    #[error("{field} must be 0-127, got {value}")]
    DataByte { field: &'static str, value: u8 },
    #[error("failed to write MIDI: {0}")]
    Io(#[from] std::io::Error),
}

/// Playback settings for exported files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MidiConfig {
    pub tempo_bpm: u16,
    /// Length of every note, in quarter notes.
    pub beats_per_note: u32,
    pub velocity: u8,
    /// General MIDI program for both voices (0 = acoustic grand piano).
    pub program: u8,
}

impl MidiConfig {
    /// Check that every setting fits its MIDI field.
    pub fn validate(&self) -> Result<(), MidiError> {
        self.tempo_micros()?;
        self.note_ticks()?;
        data_byte("velocity", self.velocity)?;
        data_byte("program", self.program)?;
        Ok(())
    }

    fn tempo_micros(&self) -> Result<u24, MidiError> {
        match 60_000_000u32.checked_div(self.tempo_bpm as u32) {
            Some(micros) if micros <= MAX_TEMPO_MICROS => Ok(u24::new(micros)),
            _ => Err(MidiError::Tempo(self.tempo_bpm)),
        }
    }

    fn note_ticks(&self) -> Result<u28, MidiError> {
        match (TICKS_PER_QUARTER as u32).checked_mul(self.beats_per_note) {
            Some(ticks) if ticks > 0 && ticks <= MAX_DELTA_TICKS => Ok(u28::new(ticks)),
            _ => Err(MidiError::NoteLength(self.beats_per_note)),
        }
    }
}

fn data_byte(field: &'static str, value: u8) -> Result<u7, MidiError> {
    if value > 127 {
        return Err(MidiError::DataByte { field, value });
    }
    Ok(u7::new(value))
}

impl Default for MidiConfig {
    fn default() -> Self {
        MidiConfig {
            tempo_bpm: 120,
            beats_per_note: 2,
            velocity: 100,
            program: 0,
        }
    }
}

/// Encode both voices and write them to `path`.
pub fn write_midi(
    cantus: &[Pitch],
    counterpoint: &[Pitch],
    config: &MidiConfig,
    path: &Path,
) -> Result<(), MidiError> {
    let smf = voices_to_smf(cantus, counterpoint, config)?;
    let mut buf = Vec::new();
    smf.write_std(&mut buf)?;
    std::fs::write(path, &buf)?;
    log::debug!("wrote {} bytes of MIDI to {}", buf.len(), path.display());
    Ok(())
}

fn voices_to_smf(
    cantus: &[Pitch],
    counterpoint: &[Pitch],
    config: &MidiConfig,
) -> Result<Smf<'static>, MidiError> {
    let tempo = config.tempo_micros()?;
    let settings = TrackSettings {
        note_ticks: config.note_ticks()?,
        velocity: data_byte("velocity", config.velocity)?,
        program: data_byte("program", config.program)?,
    };

    let mut smf = Smf::new(Header::new(
        Format::Parallel,
        Timing::Metrical(u15::new(TICKS_PER_QUARTER)),
    ));

    // Track 0: tempo track
    smf.tracks.push(vec![
        TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Meta(MetaMessage::Tempo(tempo)),
        },
        TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
        },
    ]);

    smf.tracks.push(voice_track(b"Cantus firmus", u4::new(0), cantus, &settings));
    smf.tracks.push(voice_track(b"Counterpoint", u4::new(1), counterpoint, &settings));
    Ok(smf)
}

/// Validated per-track event fields.
struct TrackSettings {
    note_ticks: u28,
    velocity: u7,
    program: u7,
}

fn voice_track(
    name: &'static [u8],
    channel: u4,
    notes: &[Pitch],
    settings: &TrackSettings,
) -> Track<'static> {
    let mut track: Track<'static> = Vec::with_capacity(notes.len() * 2 + 3);

    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::TrackName(name)),
    });
    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Midi {
            channel,
            message: MidiMessage::ProgramChange {
                program: settings.program,
            },
        },
    });

    for pitch in notes {
        let key = u7::new(pitch.midi_number().min(127));
        track.push(TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Midi {
                channel,
                message: MidiMessage::NoteOn {
                    key,
                    vel: settings.velocity,
                },
            },
        });
        track.push(TrackEvent {
            delta: settings.note_ticks,
            kind: TrackEventKind::Midi {
                channel,
                message: MidiMessage::NoteOff {
                    key,
                    vel: u7::new(0),
                },
            },
        });
    }

    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
    });
    track
}
