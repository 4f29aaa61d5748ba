//! ferretin-test-data
//!
//! A module to provide test files embedded in the crate for use in testing.
//! Small query, alignment and structure files are included in the crate for reference.
//!
//! The test files are represented as `TestFile` objects which package the raw binary data
//! and create temporary files for programs to operate on.
use std::fs;
use std::path::Path;
use tempfile::{Builder, NamedTempFile, TempDir};

#[derive(Debug)]
/// Test File
///
/// Example usage:
///
/// ```ignore
/// // returns (filepath, _tempfile_handle).
/// // _handle ensures the tempfile remains in scope
/// use ferritin_test_data::TestFile;
/// let (fasta_file, _temp) = TestFile::query_01().create_temp().unwrap();
/// let (pdb_file, _temp) = TestFile::structure_01().create_temp().unwrap();
///
/// ```
pub struct TestFile {
    filebinary: &'static [u8],
    suffix: &'static str,
    filename: &'static str,
}

impl TestFile {
    /// Single 22-residue query.
    pub fn query_01() -> Self {
        Self {
            filebinary: include_bytes!("../data/queries/query.fasta"),
            suffix: "fasta",
            filename: "query.fasta",
        }
    }
    /// Two records; rejected where a single query is required.
    pub fn query_multi_01() -> Self {
        Self {
            filebinary: include_bytes!("../data/queries/two_queries.fasta"),
            suffix: "fasta",
            filename: "two_queries.fasta",
        }
    }
    /// 1TST: chains A (MKG + water) and B (AS), 1.9 Angstrom, released 2001-03-14.
    pub fn structure_01() -> Self {
        Self {
            filebinary: include_bytes!("../data/structures/1tst.pdb"),
            suffix: "pdb",
            filename: "1tst.pdb",
        }
    }
    pub fn uniref90_a3m_01() -> Self {
        Self {
            filebinary: include_bytes!("../data/alignments/uniref90_hits.a3m"),
            suffix: "a3m",
            filename: "uniref90_hits.a3m",
        }
    }
    pub fn mgnify_a3m_01() -> Self {
        Self {
            filebinary: include_bytes!("../data/alignments/mgnify_hits.a3m"),
            suffix: "a3m",
            filename: "mgnify_hits.a3m",
        }
    }
    pub fn bfd_uniclust_a3m_01() -> Self {
        Self {
            filebinary: include_bytes!("../data/alignments/bfd_uniclust_hits.a3m"),
            suffix: "a3m",
            filename: "bfd_uniclust_hits.a3m",
        }
    }
    pub fn small_bfd_sto_01() -> Self {
        Self {
            filebinary: include_bytes!("../data/alignments/small_bfd_hits.sto"),
            suffix: "sto",
            filename: "small_bfd_hits.sto",
        }
    }
    pub fn pdb70_hhr_01() -> Self {
        Self {
            filebinary: include_bytes!("../data/alignments/pdb70_hits.hhr"),
            suffix: "hhr",
            filename: "pdb70_hits.hhr",
        }
    }

    pub fn as_str(&self) -> &'static str {
        std::str::from_utf8(self.filebinary).unwrap_or_default()
    }

    pub fn create_temp(&self) -> std::io::Result<(String, NamedTempFile)> {
        let temp = Builder::new()
            .suffix(&format!(".{}", self.suffix))
            .tempfile()?;

        fs::write(&temp, self.filebinary)?;
        let path = temp.path().to_string_lossy().into_owned();

        Ok((path, temp))
    }

    /// Write the file into `dir` under its original file name.
    pub fn write_into(&self, dir: &Path) -> std::io::Result<()> {
        fs::write(dir.join(self.filename), self.filebinary)
    }

    /// A temporary alignment directory as written by a full search run.
    ///
    /// Holds uniref90, mgnify and pdb70 results plus the small BFD Stockholm
    /// file or the BFD/Uniclust A3M file, depending on `use_small_bfd`.
    pub fn alignment_dir(use_small_bfd: bool) -> std::io::Result<TempDir> {
        let dir = tempfile::tempdir()?;
        Self::uniref90_a3m_01().write_into(dir.path())?;
        Self::mgnify_a3m_01().write_into(dir.path())?;
        Self::pdb70_hhr_01().write_into(dir.path())?;
        if use_small_bfd {
            Self::small_bfd_sto_01().write_into(dir.path())?;
        } else {
            Self::bfd_uniclust_a3m_01().write_into(dir.path())?;
        }
        Ok(dir)
    }
}
