use super::{ChainAtoms, StructureError, StructureHeader, StructureRecord};
use crate::info::residue_constants::{aa3to1, AAAtom, ATOM_TYPE_NUM};
use chrono::NaiveDate;
use itertools::Itertools;
use ndarray::{Array2, Array3};
use pdbtbx::{Chain, Residue, PDB};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// A structure file read with pdbtbx, plus the header fields pdbtbx does not keep.
pub struct PdbStructure {
    file_id: String,
    pdb: PDB,
    header: StructureHeader,
}

impl PdbStructure {
    /// Open a PDB or mmCIF file. The format is chosen by pdbtbx from the extension.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StructureError> {
        let path = path.as_ref();
        let path_str = path
            .to_str()
            .ok_or_else(|| StructureError::NonUtf8Path(path.to_path_buf()))?;
        let (pdb, _warnings) =
            pdbtbx::open(path_str).map_err(|errors| StructureError::Read {
                path: path.to_path_buf(),
                message: errors.iter().map(|e| e.to_string()).join("; "),
            })?;
        let header = StructureHeader::scan(&fs::read_to_string(path)?);
        let file_id = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_default();
        Ok(Self::new(file_id, pdb, header))
    }

    pub fn new(file_id: String, pdb: PDB, header: StructureHeader) -> Self {
        Self {
            file_id,
            pdb,
            header,
        }
    }

    fn find_chain(&self, chain_id: &str) -> Option<&Chain> {
        self.pdb.chains().find(|chain| chain.id() == chain_id)
    }
}

// polymer residues only; waters and ligands are HETATM-only
fn is_polymer_residue(residue: &Residue) -> bool {
    residue.name() == Some("MSE") || residue.atoms().any(|atom| !atom.hetero())
}

impl StructureRecord for PdbStructure {
    fn file_id(&self) -> &str {
        &self.file_id
    }

    fn chain_ids(&self) -> Vec<String> {
        self.pdb
            .chains()
            .map(|chain| chain.id().to_string())
            .unique()
            .collect()
    }

    fn chain_sequence(&self, chain_id: &str) -> Option<String> {
        let chain = self.find_chain(chain_id)?;
        Some(
            chain
                .residues()
                .filter(|residue| is_polymer_residue(residue))
                .map(|residue| aa3to1(residue.name().unwrap_or_default()))
                .collect(),
        )
    }

    fn atom_coords(&self, chain_id: &str) -> Option<ChainAtoms> {
        let chain = self.find_chain(chain_id)?;
        let residues: Vec<&Residue> = chain
            .residues()
            .filter(|residue| is_polymer_residue(residue))
            .collect();

        let mut positions = Array3::<f32>::zeros((residues.len(), ATOM_TYPE_NUM, 3));
        let mut mask = Array2::<f32>::zeros((residues.len(), ATOM_TYPE_NUM));
        for (res_idx, residue) in residues.iter().enumerate() {
            for atom in residue.atoms() {
                // selenomethionine SE sits in the SD slot
                let name = match (residue.name(), atom.name()) {
                    (Some("MSE"), "SE") => "SD",
                    (_, name) => name,
                };
                let Ok(atom_type) = AAAtom::from_str(name) else {
                    continue;
                };
                let (x, y, z) = atom.pos();
                let atom_idx = atom_type.to_index();
                positions[[res_idx, atom_idx, 0]] = x as f32;
                positions[[res_idx, atom_idx, 1]] = y as f32;
                positions[[res_idx, atom_idx, 2]] = z as f32;
                mask[[res_idx, atom_idx]] = 1.0;
            }
        }
        Some(ChainAtoms { positions, mask })
    }

    fn resolution(&self) -> f32 {
        self.header.resolution.unwrap_or(0.0)
    }

    fn release_date(&self) -> Option<NaiveDate> {
        self.header.release_date
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferritin_test_data::TestFile;

    #[test]
    fn test_open_small_structure() {
        let (file, _temp) = TestFile::structure_01().create_temp().unwrap();
        let structure = PdbStructure::open(&file).unwrap();

        assert_eq!(structure.chain_ids(), vec!["A", "B"]);
        assert_eq!(structure.chain_sequence("A").unwrap(), "MKG");
        assert_eq!(structure.chain_sequence("B").unwrap(), "AS");
        assert!(structure.chain_sequence("Z").is_none());
        assert_eq!(structure.resolution(), 1.9);
        assert_eq!(
            structure.release_date(),
            NaiveDate::from_ymd_opt(2001, 3, 14)
        );
    }

    #[test]
    fn test_atom37_coords() {
        let (file, _temp) = TestFile::structure_01().create_temp().unwrap();
        let structure = PdbStructure::open(&file).unwrap();
        let atoms = structure.atom_coords("A").unwrap();

        assert_eq!(atoms.positions.dim(), (3, ATOM_TYPE_NUM, 3));
        assert_eq!(atoms.mask.dim(), (3, ATOM_TYPE_NUM));
        // glycine has no CB
        assert_eq!(atoms.mask[[2, AAAtom::CB.to_index()]], 0.0);
        assert_eq!(atoms.mask[[2, AAAtom::CA.to_index()]], 1.0);
        assert_eq!(atoms.mask[[0, AAAtom::SD.to_index()]], 1.0);
        assert!((atoms.positions[[0, AAAtom::N.to_index(), 0]] - 10.0).abs() < 1e-3);
    }
}
