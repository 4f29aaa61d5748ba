use super::sequence::make_sequence_features;
use crate::error::{FeatureError, Result};
use crate::features::{FeatureArray, FeatureDict};
use ferritin_core::StructureRecord;
use ndarray::arr1;

/// Sequence features plus atom37 coordinates, resolution and release date of one chain.
///
/// The domain name is `{file_id}_{chain_id}`. A structure without a release date
/// gets an empty `release_date` value.
pub fn make_structure_features(
    structure: &impl StructureRecord,
    chain_id: &str,
) -> Result<FeatureDict> {
    let unknown_chain = || FeatureError::UnknownChain {
        chain_id: chain_id.to_string(),
    };
    let input_sequence = structure.chain_sequence(chain_id).ok_or_else(unknown_chain)?;
    let atoms = structure.atom_coords(chain_id).ok_or_else(unknown_chain)?;
    let description = format!("{}_{}", structure.file_id(), chain_id);
    let num_res = input_sequence.chars().count();

    let mut features = make_sequence_features(&input_sequence, &description, num_res);
    features.insert("all_atom_positions", atoms.positions);
    features.insert("all_atom_mask", atoms.mask);
    features.insert("resolution", arr1(&[structure.resolution()]));
    let release_date = structure
        .release_date()
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    features.insert("release_date", FeatureArray::bytes(release_date));
    Ok(features)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferritin_core::PdbStructure;
    use ferritin_test_data::TestFile;

    #[test]
    fn test_structure_features() {
        let (file, _temp) = TestFile::structure_01().create_temp().unwrap();
        let structure = PdbStructure::open(&file).unwrap();
        let features = make_structure_features(&structure, "B").unwrap();

        assert_eq!(features.get("aatype").unwrap().shape(), vec![2, 21]);
        assert_eq!(
            features.get("all_atom_positions").unwrap().shape(),
            vec![2, 37, 3]
        );
        assert_eq!(features.get("all_atom_mask").unwrap().shape(), vec![2, 37]);
        assert_eq!(
            features.get("release_date").unwrap().as_bytes().unwrap(),
            &[b"2001-03-14".to_vec()]
        );
        let domain_name = &features.get("domain_name").unwrap().as_bytes().unwrap()[0];
        assert!(domain_name.ends_with(b"_B"));
        let resolution = features.get("resolution").unwrap().as_float32().unwrap();
        assert!((resolution[[0]] - 1.9).abs() < 1e-6);
        features.validate_dimensions().unwrap();
    }

    #[test]
    fn test_unknown_chain() {
        let (file, _temp) = TestFile::structure_01().create_temp().unwrap();
        let structure = PdbStructure::open(&file).unwrap();
        assert!(matches!(
            make_structure_features(&structure, "Q"),
            Err(FeatureError::UnknownChain { .. })
        ));
    }
}
