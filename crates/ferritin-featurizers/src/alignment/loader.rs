use super::{DeepSearchBranch, MGNIFY_HITS, PDB70_HITS, UNIREF90_HITS};
use crate::error::{FeatureError, Result};
use ferritin_io::{parse_a3m, parse_hhr, parse_stockholm, Msa, TemplateHit};
use log::debug;
use std::fs;
use std::path::Path;

/// The parsed contents of an alignment directory.
#[derive(Debug, Clone)]
pub struct AlignmentBundle {
    pub uniref90_msa: Msa,
    pub mgnify_msa: Msa,
    /// Output of whichever deep search the directory was produced with.
    pub bfd_msa: Msa,
    pub hhsearch_hits: Vec<TemplateHit>,
}

impl AlignmentBundle {
    /// Read the alignment files in `alignment_dir`.
    ///
    /// Every expected file is checked before any is parsed, so a missing file is
    /// reported as [`FeatureError::MissingArtifact`] rather than a parse failure.
    pub fn load(alignment_dir: &Path, branch: DeepSearchBranch) -> Result<Self> {
        let paths = [UNIREF90_HITS, MGNIFY_HITS, branch.artifact(), PDB70_HITS]
            .map(|name| alignment_dir.join(name));
        if let Some(missing) = paths.iter().find(|path| !path.is_file()) {
            return Err(FeatureError::MissingArtifact {
                path: missing.clone(),
            });
        }
        let [uniref90_path, mgnify_path, bfd_path, hhr_path] = paths;

        let uniref90_msa = parse_file(&uniref90_path, parse_a3m)?;
        let mgnify_msa = parse_file(&mgnify_path, parse_a3m)?;
        let bfd_msa = match branch {
            DeepSearchBranch::SmallReference => parse_file(&bfd_path, parse_stockholm)?,
            DeepSearchBranch::ClusteredReference => parse_file(&bfd_path, parse_a3m)?,
        };
        let hhsearch_hits = parse_file(&hhr_path, parse_hhr)?;

        debug!(
            "Loaded alignments from {alignment_dir:?}: uniref90={}, mgnify={}, {branch}={}, templates={}",
            uniref90_msa.len(),
            mgnify_msa.len(),
            bfd_msa.len(),
            hhsearch_hits.len()
        );

        Ok(Self {
            uniref90_msa,
            mgnify_msa,
            bfd_msa,
            hhsearch_hits,
        })
    }

    /// The three MSAs in the order their rows are merged: uniref90, deep search, mgnify.
    pub fn msas_in_merge_order(&self) -> [&Msa; 3] {
        [&self.uniref90_msa, &self.bfd_msa, &self.mgnify_msa]
    }
}

/// Read and parse one file, naming it in any error.
pub(crate) fn parse_file<T>(path: &Path, parse: fn(&str) -> ferritin_io::Result<T>) -> Result<T> {
    let text = fs::read_to_string(path).map_err(|source| FeatureError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&text).map_err(|source| FeatureError::ArtifactParse {
        path: path.to_path_buf(),
        source,
    })
}
