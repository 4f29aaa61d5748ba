//! Named feature arrays and the dictionary that collects them.
use crate::error::{FeatureError, Result};
use log::warn;
use ndarray::{Array, ArrayD, Dimension};
use safetensors::tensor::{Dtype, TensorView};
use std::collections::BTreeMap;
use std::path::Path;

// leading axis is the residue axis
const PER_RESIDUE_FEATURES: [&str; 7] = [
    "aatype",
    "between_segment_residues",
    "residue_index",
    "seq_length",
    "num_alignments",
    "all_atom_positions",
    "all_atom_mask",
];

// [num_alignments, num_res]
const PER_ALIGNMENT_FEATURES: [&str; 2] = ["msa", "deletion_matrix_int"];

// [num_templates, num_res, ..]
const PER_TEMPLATE_RESIDUE_FEATURES: [&str; 3] = [
    "template_aatype",
    "template_all_atom_masks",
    "template_all_atom_positions",
];

/// A single feature value.
///
/// `Bytes` holds a one-dimensional list of opaque byte strings such as names,
/// sequences or dates.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureArray {
    Int32(ArrayD<i32>),
    Float32(ArrayD<f32>),
    Bytes(Vec<Vec<u8>>),
}

impl FeatureArray {
    /// A one-element byte-string feature.
    pub fn bytes(value: impl AsRef<[u8]>) -> Self {
        Self::Bytes(vec![value.as_ref().to_vec()])
    }

    pub fn shape(&self) -> Vec<usize> {
        match self {
            Self::Int32(array) => array.shape().to_vec(),
            Self::Float32(array) => array.shape().to_vec(),
            Self::Bytes(values) => vec![values.len()],
        }
    }

    pub fn as_int32(&self) -> Option<&ArrayD<i32>> {
        match self {
            Self::Int32(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_float32(&self) -> Option<&ArrayD<f32>> {
        match self {
            Self::Float32(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[Vec<u8>]> {
        match self {
            Self::Bytes(values) => Some(values),
            _ => None,
        }
    }

    /// Raw little-endian tensor data as `(dtype, shape, bytes)`.
    ///
    /// Byte strings are right-padded with zeros into a `[n, max_len]` U8 matrix.
    fn to_tensor_bytes(&self) -> (Dtype, Vec<usize>, Vec<u8>) {
        match self {
            Self::Int32(array) => (
                Dtype::I32,
                array.shape().to_vec(),
                array.iter().flat_map(|v| v.to_le_bytes()).collect(),
            ),
            Self::Float32(array) => (
                Dtype::F32,
                array.shape().to_vec(),
                array.iter().flat_map(|v| v.to_le_bytes()).collect(),
            ),
            Self::Bytes(values) => {
                let width = values.iter().map(Vec::len).max().unwrap_or(0);
                let mut data = Vec::with_capacity(values.len() * width);
                for value in values {
                    data.extend_from_slice(value);
                    data.resize(data.len() + width - value.len(), 0);
                }
                (Dtype::U8, vec![values.len(), width], data)
            }
        }
    }
}

impl<D: Dimension> From<Array<i32, D>> for FeatureArray {
    fn from(array: Array<i32, D>) -> Self {
        Self::Int32(array.into_dyn())
    }
}

impl<D: Dimension> From<Array<f32, D>> for FeatureArray {
    fn from(array: Array<f32, D>) -> Self {
        Self::Float32(array.into_dyn())
    }
}

impl From<Vec<Vec<u8>>> for FeatureArray {
    fn from(values: Vec<Vec<u8>>) -> Self {
        Self::Bytes(values)
    }
}

/// Mapping from feature name to array, ordered by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureDict {
    features: BTreeMap<String, FeatureArray>,
}

impl FeatureDict {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a feature, returning the previous value stored under `name`.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<FeatureArray>,
    ) -> Option<FeatureArray> {
        self.features.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&FeatureArray> {
        self.features.get(name)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.features.contains_key(name)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.features.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FeatureArray)> {
        self.features.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Merge `other` into `self`. Keys already present are overwritten by `other`.
    pub fn merge(&mut self, other: FeatureDict) {
        for (name, value) in other.features {
            if self.features.insert(name.clone(), value).is_some() {
                warn!("Feature {name} is defined by more than one source; keeping the later value");
            }
        }
    }

    /// Merge dictionaries left to right; later dictionaries win on shared keys.
    pub fn merged(dicts: impl IntoIterator<Item = FeatureDict>) -> FeatureDict {
        let mut merged = FeatureDict::new();
        for dict in dicts {
            merged.merge(dict);
        }
        merged
    }

    /// Check that residue and alignment axes agree across the known features.
    ///
    /// `num_res` is read from `aatype` (or `msa` when there are no sequence
    /// features) and `num_alignments` from `msa`. Features absent from the
    /// dictionary are not checked.
    pub fn validate_dimensions(&self) -> Result<()> {
        let num_res = match (self.dim("aatype", 0), self.dim("msa", 1)) {
            (Some(num_res), _) | (None, Some(num_res)) => num_res,
            (None, None) => return Ok(()),
        };
        let num_alignments = self.dim("msa", 0);

        for feature in PER_RESIDUE_FEATURES {
            self.expect_dim(feature, 0, num_res)?;
        }
        for feature in PER_ALIGNMENT_FEATURES {
            if let Some(num_alignments) = num_alignments {
                self.expect_dim(feature, 0, num_alignments)?;
            }
            self.expect_dim(feature, 1, num_res)?;
        }
        for feature in PER_TEMPLATE_RESIDUE_FEATURES {
            self.expect_dim(feature, 1, num_res)?;
        }
        Ok(())
    }

    fn dim(&self, feature: &str, axis: usize) -> Option<usize> {
        self.get(feature)
            .and_then(|value| value.shape().get(axis).copied())
    }

    fn expect_dim(&self, feature: &str, axis: usize, expected: usize) -> Result<()> {
        let Some(value) = self.get(feature) else {
            return Ok(());
        };
        let found = value.shape().get(axis).copied().unwrap_or(0);
        if found != expected {
            return Err(FeatureError::ShapeMismatch {
                feature: feature.to_string(),
                axis,
                expected,
                found,
            });
        }
        Ok(())
    }

    /// Write every feature as a tensor of a safetensors file.
    pub fn to_safetensors(&self, path: impl AsRef<Path>) -> Result<()> {
        let buffers: Vec<(&str, Dtype, Vec<usize>, Vec<u8>)> = self
            .iter()
            .map(|(name, value)| {
                let (dtype, shape, data) = value.to_tensor_bytes();
                (name, dtype, shape, data)
            })
            .collect();
        let views = buffers
            .iter()
            .map(|(name, dtype, shape, data)| {
                Ok((*name, TensorView::new(*dtype, shape.clone(), data)?))
            })
            .collect::<Result<Vec<_>>>()?;
        safetensors::serialize_to_file(views, &None, path.as_ref())?;
        Ok(())
    }
}

impl IntoIterator for FeatureDict {
    type Item = (String, FeatureArray);
    type IntoIter = std::collections::btree_map::IntoIter<String, FeatureArray>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr1, Array2};
    use safetensors::SafeTensors;

    fn dict(entries: &[(&str, i32)]) -> FeatureDict {
        let mut dict = FeatureDict::new();
        for (name, value) in entries {
            dict.insert(*name, arr1(&[*value]));
        }
        dict
    }

    #[test]
    fn test_merge_disjoint_is_union() {
        let merged = FeatureDict::merged([
            dict(&[("a", 1), ("b", 2)]),
            dict(&[("c", 3)]),
            dict(&[("d", 4)]),
        ]);
        let keys: Vec<&str> = merged.keys().collect();
        assert_eq!(keys, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_merge_later_value_wins() {
        let merged = FeatureDict::merged([dict(&[("a", 1)]), dict(&[("a", 2)])]);
        assert_eq!(merged.len(), 1);
        let values = merged.get("a").unwrap().as_int32().unwrap();
        assert_eq!(values.as_slice().unwrap(), &[2]);
    }

    #[test]
    fn test_validate_dimensions() {
        let mut features = FeatureDict::new();
        features.insert("aatype", Array2::<i32>::zeros((4, 21)));
        features.insert("residue_index", arr1(&[0, 1, 2, 3]));
        features.insert("msa", Array2::<i32>::zeros((2, 4)));
        features.insert("deletion_matrix_int", Array2::<i32>::zeros((2, 4)));
        features.validate_dimensions().unwrap();

        features.insert("deletion_matrix_int", Array2::<i32>::zeros((3, 4)));
        let err = features.validate_dimensions().unwrap_err();
        assert!(matches!(
            err,
            FeatureError::ShapeMismatch { ref feature, axis: 0, expected: 2, found: 3 }
                if feature == "deletion_matrix_int"
        ));
    }

    #[test]
    fn test_safetensors_export() {
        let mut features = FeatureDict::new();
        features.insert("residue_index", arr1(&[0, 1, 2]));
        features.insert("resolution", arr1(&[1.5f32]));
        features.insert("sequence", FeatureArray::bytes("MKG"));
        features.insert("empty", Array2::<f32>::zeros((0, 3)));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("features.safetensors");
        features.to_safetensors(&path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        let tensors = SafeTensors::deserialize(&bytes).unwrap();
        assert_eq!(tensors.len(), 4);

        let residue_index = tensors.tensor("residue_index").unwrap();
        assert_eq!(residue_index.dtype(), Dtype::I32);
        assert_eq!(residue_index.shape(), &[3]);

        let sequence = tensors.tensor("sequence").unwrap();
        assert_eq!(sequence.dtype(), Dtype::U8);
        assert_eq!(sequence.shape(), &[1, 3]);
        assert_eq!(sequence.data(), b"MKG");

        assert_eq!(tensors.tensor("empty").unwrap().shape(), &[0, 3]);
    }
}
