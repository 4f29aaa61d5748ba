//! ferritin-featurizers
//!
//! - run the sequence and profile searches for a query (jackhmmer, hhblits, hhsearch).
//! - turn a query sequence or structure chain plus its alignments into model-ready features.
//! - CLI to handle the above.
//!
//! ```ignore
//! use ferritin_featurizers::{DataPipeline, DeepSearchBranch, EmptyTemplateFeaturizer};
//!
//! let pipeline = DataPipeline::new(EmptyTemplateFeaturizer, DeepSearchBranch::ClusteredReference);
//! let features = pipeline.process_fasta("query.fasta".as_ref(), "alignments/".as_ref())?;
//! features.to_safetensors("features.safetensors")?;
//! ```
pub mod alignment;
mod error;
mod features;
pub mod featurizer;
mod pipeline;

pub use alignment::{
    AlignmentBundle, AlignmentConfig, AlignmentRunner, DeepSearch, DeepSearchBranch,
};
pub use error::{FeatureError, Result};
pub use features::{FeatureArray, FeatureDict};
pub use featurizer::{
    make_msa_features, make_sequence_features, make_structure_features, EmptyTemplateFeaturizer,
    TemplateFeaturizer,
};
pub use pipeline::DataPipeline;
