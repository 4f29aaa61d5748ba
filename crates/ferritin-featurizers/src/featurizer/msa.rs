use crate::error::{FeatureError, Result};
use crate::features::FeatureDict;
use ferritin_core::residue_constants::hhblits_aa_to_id;
use ferritin_io::Msa;
use ndarray::{Array1, Array2};
use std::collections::HashSet;

/// Merge several MSAs into one deduplicated `msa` / `deletion_matrix_int` pair.
///
/// Rows are visited MSA by MSA in the given order. A row whose sequence was
/// already seen in this call, in any MSA, is dropped together with its deletion
/// row, so the order of `msas` decides which copy of a duplicate survives.
///
/// The width of the first MSA's first row is the alignment width; every other
/// row must have the same width.
pub fn make_msa_features(msas: &[&Msa]) -> Result<FeatureDict> {
    let first = msas.first().ok_or(FeatureError::NoMsas)?;
    let num_res = first.width().ok_or(FeatureError::EmptyMsa { index: 0 })?;

    let mut seen_sequences: HashSet<&str> = HashSet::new();
    let mut int_msa: Vec<i32> = Vec::new();
    let mut deletion_matrix: Vec<i32> = Vec::new();

    for (msa_index, msa) in msas.iter().enumerate() {
        if msa.is_empty() {
            return Err(FeatureError::EmptyMsa { index: msa_index });
        }
        if msa.deletion_matrix.len() != msa.len() {
            return Err(FeatureError::DeletionMatrixMismatch {
                msa_index,
                row_index: msa.len().min(msa.deletion_matrix.len()),
            });
        }
        for (row_index, (sequence, deletions)) in
            msa.sequences.iter().zip(&msa.deletion_matrix).enumerate()
        {
            if !seen_sequences.insert(sequence.as_str()) {
                continue;
            }

            let width = sequence.chars().count();
            if width != num_res {
                return Err(FeatureError::MisalignedRow {
                    msa_index,
                    row_index,
                    expected: num_res,
                    found: width,
                });
            }
            if deletions.len() != num_res {
                return Err(FeatureError::DeletionMatrixMismatch {
                    msa_index,
                    row_index,
                });
            }

            for residue in sequence.chars() {
                let id = hhblits_aa_to_id(residue).ok_or(FeatureError::UnknownResidue {
                    residue,
                    msa_index,
                    row_index,
                })?;
                int_msa.push(id);
            }
            deletion_matrix.extend_from_slice(deletions);
        }
    }

    let num_alignments = seen_sequences.len();
    log::debug!("Built MSA features with {num_alignments} alignments over {num_res} residues");

    let mut features = FeatureDict::new();
    features.insert(
        "deletion_matrix_int",
        Array2::from_shape_vec((num_alignments, num_res), deletion_matrix)?,
    );
    features.insert(
        "msa",
        Array2::from_shape_vec((num_alignments, num_res), int_msa)?,
    );
    features.insert(
        "num_alignments",
        Array1::from_elem(num_res, num_alignments as i32),
    );
    Ok(features)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferritin_core::residue_constants::HHBLITS_GAP_ID;
    use ndarray::Array2;

    fn msa(rows: &[&str]) -> Msa {
        Msa {
            sequences: rows.iter().map(|r| r.to_string()).collect(),
            deletion_matrix: rows
                .iter()
                .enumerate()
                .map(|(i, r)| vec![i as i32; r.len()])
                .collect(),
            descriptions: vec![String::new(); rows.len()],
        }
    }

    fn int_rows(features: &FeatureDict, name: &str) -> Array2<i32> {
        features
            .get(name)
            .unwrap()
            .as_int32()
            .unwrap()
            .clone()
            .into_dimensionality()
            .unwrap()
    }

    fn encode(row: &str) -> Vec<i32> {
        row.chars().map(|r| hhblits_aa_to_id(r).unwrap()).collect()
    }

    #[test]
    fn test_dedup_is_order_stable() {
        let a = msa(&["ACDE", "FGHI"]);
        let b = msa(&["FGHI", "KLMN"]);

        let features = make_msa_features(&[&a, &b]).unwrap();
        let rows = int_rows(&features, "msa");
        assert_eq!(rows.nrows(), 3);
        assert_eq!(rows.row(0).to_vec(), encode("ACDE"));
        assert_eq!(rows.row(1).to_vec(), encode("FGHI"));
        assert_eq!(rows.row(2).to_vec(), encode("KLMN"));
        // FGHI survives from A (row 1 → deletion value 1)
        let deletions = int_rows(&features, "deletion_matrix_int");
        assert_eq!(deletions.row(1).to_vec(), vec![1; 4]);

        let features = make_msa_features(&[&b, &a]).unwrap();
        let rows = int_rows(&features, "msa");
        assert_eq!(rows.row(0).to_vec(), encode("FGHI"));
        assert_eq!(rows.row(1).to_vec(), encode("KLMN"));
        assert_eq!(rows.row(2).to_vec(), encode("ACDE"));
        // FGHI survives from B (row 0 → deletion value 0)
        let deletions = int_rows(&features, "deletion_matrix_int");
        assert_eq!(deletions.row(0).to_vec(), vec![0; 4]);
    }

    #[test]
    fn test_row_count_matches_distinct_sequences() {
        let a = msa(&["AC-E", "AC-E", "ACDE"]);
        let b = msa(&["ACDE", "WYVT", "AC-E"]);
        let c = msa(&["WYVT"]);
        let features = make_msa_features(&[&a, &b, &c]).unwrap();

        let rows = int_rows(&features, "msa");
        let deletions = int_rows(&features, "deletion_matrix_int");
        assert_eq!(rows.nrows(), 3);
        assert_eq!(deletions.nrows(), 3);
        assert_eq!(rows.ncols(), 4);
        assert_eq!(rows[[0, 2]], HHBLITS_GAP_ID);

        let num_alignments = features.get("num_alignments").unwrap().as_int32().unwrap();
        assert_eq!(num_alignments.as_slice().unwrap(), &[3, 3, 3, 3]);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(matches!(make_msa_features(&[]), Err(FeatureError::NoMsas)));

        let empty = Msa::default();
        assert!(matches!(
            make_msa_features(&[&empty]),
            Err(FeatureError::EmptyMsa { index: 0 })
        ));

        let a = msa(&["ACDE"]);
        assert!(matches!(
            make_msa_features(&[&a, &empty]),
            Err(FeatureError::EmptyMsa { index: 1 })
        ));
    }

    #[test]
    fn test_unknown_residue() {
        let a = msa(&["ACDE", "AC*E"]);
        assert!(matches!(
            make_msa_features(&[&a]),
            Err(FeatureError::UnknownResidue {
                residue: '*',
                msa_index: 0,
                row_index: 1
            })
        ));
    }

    #[test]
    fn test_misaligned_row() {
        let a = msa(&["ACDE"]);
        let b = msa(&["ACD"]);
        assert!(matches!(
            make_msa_features(&[&a, &b]),
            Err(FeatureError::MisalignedRow {
                msa_index: 1,
                row_index: 0,
                expected: 4,
                found: 3
            })
        ));
    }

    #[test]
    fn test_deletion_matrix_mismatch() {
        let mut a = msa(&["ACDE", "ACDF"]);
        a.deletion_matrix.pop();
        assert!(matches!(
            make_msa_features(&[&a]),
            Err(FeatureError::DeletionMatrixMismatch { msa_index: 0, .. })
        ));
    }

    #[test]
    fn test_deterministic() {
        let a = msa(&["ACDE", "FGHI"]);
        let b = msa(&["FGHI", "KLMN"]);
        assert_eq!(
            make_msa_features(&[&a, &b]).unwrap(),
            make_msa_features(&[&a, &b]).unwrap()
        );
    }
}
