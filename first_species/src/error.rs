// Crate-level error type for the front-end pipeline.
//
// The search itself never fails: rule violations are verdicts and an
// unsolvable cantus is `None`. Errors come from loading inputs and writing
// output, plus the CLI's decision to treat infeasibility as a failure.

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::midi::MidiError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("catalog entry {index} does not exist (catalog has {len})")]
    NoSuchEntry { index: usize, len: usize },
    #[error("no admissible counterpoint {voice} for: {cantus}")]
    Infeasible { cantus: String, voice: String },
    #[error("node budget of {nodes} ran out before any complete counterpoint was found")]
    BudgetExhausted { nodes: u64 },
    #[error(transparent)]
    Midi(#[from] MidiError),
}
