use crate::features::{FeatureArray, FeatureDict};
use ferritin_core::residue_constants::sequence_to_onehot;
use ndarray::Array1;

/// Per-residue and per-sequence features of a single query sequence.
///
/// `num_res` must equal the sequence length.
pub fn make_sequence_features(sequence: &str, description: &str, num_res: usize) -> FeatureDict {
    debug_assert_eq!(sequence.chars().count(), num_res);

    let mut features = FeatureDict::new();
    features.insert("aatype", sequence_to_onehot(sequence));
    features.insert("between_segment_residues", Array1::<i32>::zeros(num_res));
    features.insert("domain_name", FeatureArray::bytes(description));
    features.insert("residue_index", Array1::from_iter(0..num_res as i32));
    features.insert("seq_length", Array1::from_elem(num_res, num_res as i32));
    features.insert("sequence", FeatureArray::bytes(sequence));
    features
}
