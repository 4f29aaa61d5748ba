//! # ferritin-core
//!
//! Residue constants and structure access shared by the ferritin featurizers.
//!
//! __ferritin-core__ provides:
//! * Residue alphabets, the one-hot `aatype` encoding and the HHblits MSA encoding
//! * The atom37 atom ordering
//! * [`StructureRecord`], a chain-level view of a solved structure, and
//!   [`PdbStructure`], its pdbtbx-backed implementation
//!
mod info;
mod structure;

pub use self::info::residue_constants;
pub use self::structure::{
    ChainAtoms, PdbStructure, StructureError, StructureHeader, StructureRecord,
};
