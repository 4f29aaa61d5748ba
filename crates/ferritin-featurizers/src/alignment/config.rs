use super::DeepSearchBranch;
use crate::error::{FeatureError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Tool binaries and reference databases for an alignment run.
///
/// Binary paths default to the tool names so they are looked up on `PATH`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlignmentConfig {
    #[serde(default = "default_jackhmmer")]
    pub jackhmmer_binary_path: PathBuf,
    #[serde(default = "default_hhblits")]
    pub hhblits_binary_path: PathBuf,
    #[serde(default = "default_hhsearch")]
    pub hhsearch_binary_path: PathBuf,

    pub uniref90_database_path: PathBuf,
    pub mgnify_database_path: PathBuf,
    pub pdb70_database_path: PathBuf,
    #[serde(default)]
    pub bfd_database_path: Option<PathBuf>,
    #[serde(default)]
    pub uniclust30_database_path: Option<PathBuf>,
    #[serde(default)]
    pub small_bfd_database_path: Option<PathBuf>,

    /// Search the reduced BFD with jackhmmer instead of BFD + Uniclust30 with hhblits.
    #[serde(default)]
    pub use_small_bfd: bool,
    #[serde(default = "default_no_cpus")]
    pub no_cpus: usize,
    #[serde(default = "default_uniref_max_hits")]
    pub uniref_max_hits: usize,
    #[serde(default = "default_mgnify_max_hits")]
    pub mgnify_max_hits: usize,
}

fn default_jackhmmer() -> PathBuf {
    PathBuf::from("jackhmmer")
}

fn default_hhblits() -> PathBuf {
    PathBuf::from("hhblits")
}

fn default_hhsearch() -> PathBuf {
    PathBuf::from("hhsearch")
}

fn default_no_cpus() -> usize {
    8
}

fn default_uniref_max_hits() -> usize {
    10_000
}

fn default_mgnify_max_hits() -> usize {
    5_000
}

impl AlignmentConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| FeatureError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    pub fn branch(&self) -> DeepSearchBranch {
        DeepSearchBranch::from_use_small_bfd(self.use_small_bfd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "uniref90_database_path": "/db/uniref90.fasta",
                "mgnify_database_path": "/db/mgy_clusters.fa",
                "pdb70_database_path": "/db/pdb70/pdb70",
                "bfd_database_path": "/db/bfd",
                "uniclust30_database_path": "/db/uniclust30"
            }}"#
        )
        .unwrap();

        let config = AlignmentConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.jackhmmer_binary_path, PathBuf::from("jackhmmer"));
        assert_eq!(config.hhsearch_binary_path, PathBuf::from("hhsearch"));
        assert_eq!(config.no_cpus, 8);
        assert_eq!(config.uniref_max_hits, 10_000);
        assert_eq!(config.mgnify_max_hits, 5_000);
        assert!(config.small_bfd_database_path.is_none());
        assert_eq!(config.branch(), DeepSearchBranch::ClusteredReference);
    }

    #[test]
    fn test_missing_database_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"use_small_bfd": true}}"#).unwrap();
        assert!(AlignmentConfig::from_json_file(file.path()).is_err());
    }
}
