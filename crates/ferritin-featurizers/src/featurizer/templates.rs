use crate::error::Result;
use crate::features::FeatureDict;
use chrono::NaiveDate;
use ferritin_core::residue_constants::ATOM_TYPE_NUM;
use ferritin_io::TemplateHit;
use ndarray::{Array2, Array3, Array4};

/// Number of residue classes in `template_aatype`: 20 residues, `X` and gap.
const TEMPLATE_AATYPE_NUM: usize = 22;

/// Turns template-search hits into template features.
///
/// `query_release_date`, when known, lets an implementation drop templates
/// released after the query.
pub trait TemplateFeaturizer {
    fn get_templates(
        &self,
        query_sequence: &str,
        query_release_date: Option<NaiveDate>,
        hits: &[TemplateHit],
    ) -> Result<FeatureDict>;
}

/// Produces zero-template features for every query, ignoring the hits.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyTemplateFeaturizer;

impl TemplateFeaturizer for EmptyTemplateFeaturizer {
    fn get_templates(
        &self,
        query_sequence: &str,
        _query_release_date: Option<NaiveDate>,
        hits: &[TemplateHit],
    ) -> Result<FeatureDict> {
        let num_res = query_sequence.chars().count();
        log::info!(
            "Skipping {} template hits; emitting empty template features",
            hits.len()
        );

        let mut features = FeatureDict::new();
        features.insert(
            "template_aatype",
            Array3::<f32>::zeros((0, num_res, TEMPLATE_AATYPE_NUM)),
        );
        features.insert(
            "template_all_atom_masks",
            Array3::<f32>::zeros((0, num_res, ATOM_TYPE_NUM)),
        );
        features.insert(
            "template_all_atom_positions",
            Array4::<f32>::zeros((0, num_res, ATOM_TYPE_NUM, 3)),
        );
        features.insert("template_domain_names", Vec::<Vec<u8>>::new());
        features.insert("template_sequence", Vec::<Vec<u8>>::new());
        features.insert("template_sum_probs", Array2::<f32>::zeros((0, 1)));
        Ok(features)
    }
}
