// Candidate generation: which pitches may sound against a cantus firmus note.
//
// The cantus note's scale degree is the root. Four degree offsets give the
// consonant partners (unison/octave, third, fifth, sixth), measured downward
// for a lower counterpoint and upward for an upper one. Each partner class is
// then placed in every octave of the voice's candidate window.
//
// Order is deterministic: degree offsets in the order below, octaves
// ascending. The search visits candidates in exactly this order, so ties in
// score resolve the same way on every run.

use crate::pitch::{Pitch, PitchClass};
use crate::scale::{Mode, build_scale};
use crate::voice::VoicePosition;

/// Scale-degree offsets (mod 7) from the root for each voice position.
fn degree_offsets(voice: VoicePosition) -> [usize; 4] {
    match voice {
        // Root, third below, fifth below, sixth below.
        VoicePosition::Below => [0, 5, 3, 2],
        // Root, third above, fifth above, sixth above.
        VoicePosition::Above => [0, 2, 4, 5],
    }
}

/// All admissible counterpoint pitches against `cantus_pitch`.
///
/// Returns an empty list when the cantus pitch is outside the key or when no
/// placement falls inside the window. The search treats that as a dead end.
pub fn candidates(
    tonic: PitchClass,
    cantus_pitch: Pitch,
    voice: VoicePosition,
    mode: Mode,
) -> Vec<Pitch> {
    let scale = build_scale(tonic, mode);
    let Some(root) = scale.degree_of(cantus_pitch.class) else {
        return Vec::new();
    };

    let window = voice.candidate_window();
    let mut out = Vec::with_capacity(12);
    for offset in degree_offsets(voice) {
        let class = scale.degree(root + offset);
        for octave in voice.candidate_octaves() {
            let pitch = Pitch::new(class, octave);
            if window.contains(pitch) {
                out.push(pitch);
            }
        }
    }
    out
}
