//! Assembles the complete feature dictionary for one query.
use crate::alignment::{parse_file, AlignmentBundle, DeepSearchBranch};
use crate::error::{FeatureError, Result};
use crate::features::FeatureDict;
use crate::featurizer::{
    make_msa_features, make_sequence_features, make_structure_features, TemplateFeaturizer,
};
use ferritin_core::StructureRecord;
use ferritin_io::parse_fasta;
use log::info;
use std::path::Path;

/// Builds features for a FASTA query or a structure chain from precomputed alignments.
pub struct DataPipeline<T: TemplateFeaturizer> {
    template_featurizer: T,
    branch: DeepSearchBranch,
}

impl<T: TemplateFeaturizer> DataPipeline<T> {
    pub fn new(template_featurizer: T, branch: DeepSearchBranch) -> Self {
        Self {
            template_featurizer,
            branch,
        }
    }

    pub fn branch(&self) -> DeepSearchBranch {
        self.branch
    }

    /// Features for the single sequence in `fasta_path`.
    pub fn process_fasta(&self, fasta_path: &Path, alignment_dir: &Path) -> Result<FeatureDict> {
        let (sequences, descriptions) = parse_file(fasta_path, parse_fasta)?;
        let (sequence, description) = match (sequences.as_slice(), descriptions.as_slice()) {
            ([sequence], [description]) => (sequence, description),
            ([], _) => {
                return Err(FeatureError::EmptyQuery {
                    path: fasta_path.to_path_buf(),
                });
            }
            _ => {
                return Err(FeatureError::MultiSequence {
                    path: fasta_path.to_path_buf(),
                    count: sequences.len(),
                });
            }
        };
        let num_res = sequence.chars().count();
        info!("Featurizing {description} ({num_res} residues)");

        let bundle = AlignmentBundle::load(alignment_dir, self.branch)?;
        let template_features = self
            .template_featurizer
            .get_templates(sequence, None, &bundle.hhsearch_hits)?;
        let sequence_features = make_sequence_features(sequence, description, num_res);
        let msa_features = make_msa_features(&bundle.msas_in_merge_order())?;

        Ok(FeatureDict::merged([sequence_features, msa_features, template_features]))
    }

    /// Features for one chain of `structure`; the first chain when `chain_id` is `None`.
    pub fn process_structure<S: StructureRecord>(
        &self,
        structure: &S,
        alignment_dir: &Path,
        chain_id: Option<&str>,
    ) -> Result<FeatureDict> {
        let chain_id = match chain_id {
            Some(chain_id) => chain_id.to_string(),
            None => structure
                .chain_ids()
                .into_iter()
                .next()
                .ok_or(FeatureError::NoChain)?,
        };
        info!("Featurizing chain {chain_id} of {}", structure.file_id());

        let structure_features = make_structure_features(structure, &chain_id)?;
        let sequence = structure
            .chain_sequence(&chain_id)
            .ok_or_else(|| FeatureError::UnknownChain {
                chain_id: chain_id.clone(),
            })?;

        let bundle = AlignmentBundle::load(alignment_dir, self.branch)?;
        let template_features = self
            .template_featurizer
            .get_templates(&sequence, structure.release_date(), &bundle.hhsearch_hits)?;
        let msa_features = make_msa_features(&bundle.msas_in_merge_order())?;

        Ok(FeatureDict::merged([structure_features, template_features, msa_features]))
    }
}
