// Cantus firmus catalog: a plain-text list of named melodies.
//
// One entry per line, five `;`-separated fields:
//
//   author;species;tonic;mode;P1,P2,...,Pn
//
// e.g. `Fux;1;D;Minor;D4,F4,E4,D4,G4,F4,A4,G4,F4,E4,D4`. Blank lines and
// lines starting with `#` are skipped. Parse errors carry the 1-based line
// number so a broken catalog points at the offending entry.

use crate::cantus::{CantusError, CantusFirmus};
use crate::pitch::{Pitch, PitchClass, PitchError};
use crate::scale::Mode;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("line {line}: expected 5 ';'-separated fields, found {found}")]
    FieldCount { line: usize, found: usize },
    #[error("line {line}: {source}")]
    Pitch { line: usize, source: PitchError },
    #[error("line {line}: {message}")]
    Mode { line: usize, message: String },
    #[error("line {line}: {source}")]
    Cantus { line: usize, source: CantusError },
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
}

/// Parse a whole catalog.
pub fn parse_catalog(text: &str) -> Result<Vec<CantusFirmus>, CatalogError> {
    let mut entries = Vec::new();
    for (i, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        entries.push(parse_entry(line, i + 1)?);
    }
    Ok(entries)
}

/// Read and parse a catalog file.
pub fn load_catalog(path: &Path) -> Result<Vec<CantusFirmus>, CatalogError> {
    let text = std::fs::read_to_string(path)?;
    let entries = parse_catalog(&text)?;
    log::debug!("loaded {} cantus firmi from {}", entries.len(), path.display());
    Ok(entries)
}

fn parse_entry(line: &str, line_no: usize) -> Result<CantusFirmus, CatalogError> {
    let fields: Vec<&str> = line.split(';').map(str::trim).collect();
    if fields.len() != 5 {
        return Err(CatalogError::FieldCount {
            line: line_no,
            found: fields.len(),
        });
    }

    let pitch_err = |source| CatalogError::Pitch { line: line_no, source };

    let tonic = PitchClass::from_name(fields[2]).map_err(pitch_err)?;
    let mode: Mode = fields[3].parse().map_err(|message| CatalogError::Mode {
        line: line_no,
        message,
    })?;
    let notes = fields[4]
        .split(',')
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.parse::<Pitch>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(pitch_err)?;

    CantusFirmus::new(fields[0], fields[1], tonic, mode, notes).map_err(|source| {
        CatalogError::Cantus {
            line: line_no,
            source,
        }
    })
}
