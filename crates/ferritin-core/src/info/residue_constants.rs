//! # Residue Constants
//!
//! Residue alphabets and lookup tables shared by the sequence, MSA and
//! structure featurizers.
//!
//! Two integer encodings are in use and they are **not** interchangeable:
//!
//! - `restype_order_with_x` orders residues as `ARNDCQEGHILKMFPSTWYV` with
//!   `X` at 20. It backs the one-hot `aatype` feature.
//! - the HHblits encoding orders residues alphabetically, folds the ambiguity
//!   codes onto their closest standard residue, and adds a gap class at 21.
//!   It backs the integer `msa` feature.
//!
use ndarray::Array2;
use strum::{Display, EnumIter, EnumString};

/// The 20 standard residues in model order.
pub const RESTYPES: [char; 20] = [
    'A', 'R', 'N', 'D', 'C', 'Q', 'E', 'G', 'H', 'I', 'L', 'K', 'M', 'F', 'P', 'S', 'T', 'W',
    'Y', 'V',
];

/// Number of residue classes including the unknown residue `X`.
pub const RESTYPE_NUM_WITH_X: usize = 21;

/// Index of the unknown residue `X` in `restype_order_with_x`.
pub const UNKNOWN_RESTYPE: usize = 20;

/// Index of the gap class in the HHblits encoding.
pub const HHBLITS_GAP_ID: i32 = 21;

/// Number of atom slots in the atom37 representation.
pub const ATOM_TYPE_NUM: usize = 37;

/// Position of a one-letter residue code in `restype_order_with_x`.
pub fn restype_order_with_x(aa: char) -> Option<usize> {
    match aa {
        'X' => Some(UNKNOWN_RESTYPE),
        _ => RESTYPES.iter().position(|&r| r == aa),
    }
}

/// One-hot encode a sequence over `restype_order_with_x`.
///
/// Symbols outside the alphabet are mapped to `X` so that every row sums to one.
pub fn sequence_to_onehot(sequence: &str) -> Array2<i32> {
    let num_res = sequence.chars().count();
    let mut onehot = Array2::<i32>::zeros((num_res, RESTYPE_NUM_WITH_X));
    for (idx, aa) in sequence.chars().enumerate() {
        let aa_id = restype_order_with_x(aa).unwrap_or(UNKNOWN_RESTYPE);
        onehot[[idx, aa_id]] = 1;
    }
    onehot
}

#[rustfmt::skip]
/// HHblits residue encoding used for alignment rows.
///
/// Returns `None` for symbols that HHblits does not emit.
pub fn hhblits_aa_to_id(aa: char) -> Option<i32> {
    let id = match aa {
        'A' => 0,  'B' => 2,  'C' => 1,  'D' => 2,
        'E' => 3,  'F' => 4,  'G' => 5,  'H' => 6,
        'I' => 7,  'J' => 20, 'K' => 8,  'L' => 9,
        'M' => 10, 'N' => 11, 'O' => 20, 'P' => 12,
        'Q' => 13, 'R' => 14, 'S' => 15, 'T' => 16,
        'U' => 1,  'V' => 17, 'W' => 18, 'Y' => 19,
        'X' => 20, 'Z' => 3,  '-' => HHBLITS_GAP_ID,
        _ => return None,
    };
    Some(id)
}

#[rustfmt::skip]
pub fn aa3to1(aa: &str) -> char {
    match aa {
        "ALA" => 'A', "CYS" => 'C', "ASP" => 'D',
        "GLU" => 'E', "PHE" => 'F', "GLY" => 'G',
        "HIS" => 'H', "ILE" => 'I', "LYS" => 'K',
        "LEU" => 'L', "MET" => 'M', "ASN" => 'N',
        "PRO" => 'P', "GLN" => 'Q', "ARG" => 'R',
        "SER" => 'S', "THR" => 'T', "VAL" => 'V',
        "TRP" => 'W', "TYR" => 'Y', "MSE" => 'M',
        _     => 'X',
    }
}

/// Atom names in atom37 order.
#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
pub enum AAAtom {
    N = 0,    CA = 1,   C = 2,    CB = 3,   O = 4,
    CG = 5,   CG1 = 6,  CG2 = 7,  OG = 8,   OG1 = 9,
    SG = 10,  CD = 11,  CD1 = 12, CD2 = 13, ND1 = 14,
    ND2 = 15, OD1 = 16, OD2 = 17, SD = 18,  CE = 19,
    CE1 = 20, CE2 = 21, CE3 = 22, NE = 23,  NE1 = 24,
    NE2 = 25, OE1 = 26, OE2 = 27, CH2 = 28, NH1 = 29,
    NH2 = 30, OH = 31,  CZ = 32,  CZ2 = 33, CZ3 = 34,
    NZ = 35,  OXT = 36,
}

impl AAAtom {
    pub fn to_index(&self) -> usize {
        *self as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_restype_order() {
        assert_eq!(restype_order_with_x('A'), Some(0));
        assert_eq!(restype_order_with_x('V'), Some(19));
        assert_eq!(restype_order_with_x('X'), Some(20));
        assert_eq!(restype_order_with_x('-'), None);
    }

    #[test]
    fn test_onehot_maps_unknown_to_x() {
        let onehot = sequence_to_onehot("AZ");
        assert_eq!(onehot.dim(), (2, RESTYPE_NUM_WITH_X));
        assert_eq!(onehot[[0, 0]], 1);
        assert_eq!(onehot[[1, UNKNOWN_RESTYPE]], 1);
        for row in onehot.rows() {
            assert_eq!(row.sum(), 1);
        }
    }

    #[test]
    fn test_hhblits_mapping() {
        assert_eq!(hhblits_aa_to_id('A'), Some(0));
        assert_eq!(hhblits_aa_to_id('C'), Some(1));
        assert_eq!(hhblits_aa_to_id('U'), Some(1));
        assert_eq!(hhblits_aa_to_id('B'), hhblits_aa_to_id('D'));
        assert_eq!(hhblits_aa_to_id('Z'), hhblits_aa_to_id('E'));
        assert_eq!(hhblits_aa_to_id('-'), Some(HHBLITS_GAP_ID));
        assert_eq!(hhblits_aa_to_id('a'), None);
        assert_eq!(hhblits_aa_to_id('.'), None);
    }

    #[test]
    fn test_atom37_order() {
        assert_eq!(AAAtom::iter().count(), ATOM_TYPE_NUM);
        assert_eq!(AAAtom::from_str("CB").unwrap().to_index(), 3);
        assert_eq!(AAAtom::OXT.to_index(), 36);
        assert!(AAAtom::from_str("HA").is_err());
    }
}
