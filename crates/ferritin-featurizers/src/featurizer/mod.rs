//! Feature builders for structure-prediction inputs.
//!
//! Each builder returns a fresh [`FeatureDict`](crate::FeatureDict):
//! - sequence features from a single query sequence
//! - MSA features from several deduplicated alignments
//! - structure features from one chain of a solved structure
//! - template features from template-search hits
mod msa;
mod sequence;
mod structure;
mod templates;

pub use msa::make_msa_features;
pub use sequence::make_sequence_features;
pub use structure::make_structure_features;
pub use templates::{EmptyTemplateFeaturizer, TemplateFeaturizer};
