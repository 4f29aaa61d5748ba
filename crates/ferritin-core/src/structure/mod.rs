//! Structure records: the chain-level view of a solved structure that the
//! featurizers need (sequence, atom37 coordinates, resolution, release date).
mod header;
mod pdb;

pub use header::StructureHeader;
pub use pdb::PdbStructure;

use chrono::NaiveDate;
use ndarray::{Array2, Array3};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StructureError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not read structure file {path:?}: {message}")]
    Read { path: PathBuf, message: String },

    #[error("Structure path {0:?} is not valid UTF-8.")]
    NonUtf8Path(PathBuf),
}

/// Atom37 coordinates for one chain.
///
/// `positions` has shape `[num_res, 37, 3]` and `mask` has shape `[num_res, 37]`,
/// with a mask value of `1.0` wherever the atom was observed.
#[derive(Debug, Clone)]
pub struct ChainAtoms {
    pub positions: Array3<f32>,
    pub mask: Array2<f32>,
}

/// Read access to a parsed structure.
pub trait StructureRecord {
    /// Identifier of the source file, used to name the chain's features.
    fn file_id(&self) -> &str;

    /// Chain identifiers in file order.
    fn chain_ids(&self) -> Vec<String>;

    /// One-letter sequence of a chain, `None` if the chain does not exist.
    fn chain_sequence(&self, chain_id: &str) -> Option<String>;

    /// Atom37 positions and masks of a chain, row-aligned with `chain_sequence`.
    fn atom_coords(&self, chain_id: &str) -> Option<ChainAtoms>;

    /// Resolution in Angstrom, `0.0` when unknown.
    fn resolution(&self) -> f32;

    fn release_date(&self) -> Option<NaiveDate>;
}
