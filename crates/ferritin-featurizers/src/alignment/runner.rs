use super::config::AlignmentConfig;
use super::tools::{HHBlits, HHSearch, Jackhmmer, SearchTool, ToolError};
use super::{DeepSearchBranch, MGNIFY_HITS, PDB70_HITS, UNIREF90_HITS};
use crate::error::{FeatureError, Result};
use ferritin_io::convert_stockholm_to_a3m;
use log::info;
use std::fs;
use std::path::Path;

const DEFAULT_UNIREF_MAX_HITS: usize = 10_000;
const DEFAULT_MGNIFY_MAX_HITS: usize = 5_000;

/// The deep search, fixed when the runner is built.
pub enum DeepSearch {
    /// Search of the reduced BFD; its Stockholm output is persisted as is.
    SmallReference(Box<dyn SearchTool>),
    /// Search of the clustered BFD + Uniclust30 databases; A3M output.
    ClusteredReference(Box<dyn SearchTool>),
}

impl DeepSearch {
    pub fn branch(&self) -> DeepSearchBranch {
        match self {
            Self::SmallReference(_) => DeepSearchBranch::SmallReference,
            Self::ClusteredReference(_) => DeepSearchBranch::ClusteredReference,
        }
    }
}

/// Runs the alignment searches for one query and persists their outputs.
pub struct AlignmentRunner {
    uniref90: Box<dyn SearchTool>,
    mgnify: Box<dyn SearchTool>,
    pdb70: Box<dyn SearchTool>,
    deep: DeepSearch,
    uniref_max_hits: usize,
    mgnify_max_hits: usize,
}

impl AlignmentRunner {
    pub fn new(
        uniref90: Box<dyn SearchTool>,
        mgnify: Box<dyn SearchTool>,
        pdb70: Box<dyn SearchTool>,
        deep: DeepSearch,
    ) -> Self {
        Self {
            uniref90,
            mgnify,
            pdb70,
            deep,
            uniref_max_hits: DEFAULT_UNIREF_MAX_HITS,
            mgnify_max_hits: DEFAULT_MGNIFY_MAX_HITS,
        }
    }

    /// Cap the number of rows kept from the uniref90 and mgnify searches.
    pub fn with_max_hits(mut self, uniref_max_hits: usize, mgnify_max_hits: usize) -> Self {
        self.uniref_max_hits = uniref_max_hits;
        self.mgnify_max_hits = mgnify_max_hits;
        self
    }

    /// Build the subprocess-backed tools described by `config`.
    pub fn from_config(config: &AlignmentConfig) -> Result<Self> {
        let n_cpu = config.no_cpus;
        let uniref90 = Jackhmmer::new(
            &config.jackhmmer_binary_path,
            &config.uniref90_database_path,
            n_cpu,
        );
        let mgnify = Jackhmmer::new(
            &config.jackhmmer_binary_path,
            &config.mgnify_database_path,
            n_cpu,
        );
        let pdb70 = HHSearch::new(
            &config.hhsearch_binary_path,
            vec![config.pdb70_database_path.clone()],
        );

        let branch = config.branch();
        let deep = match branch {
            DeepSearchBranch::SmallReference => {
                let Some(database) = &config.small_bfd_database_path else {
                    return Err(missing_database("small_bfd_database_path", branch));
                };
                let tool = Jackhmmer::new(&config.jackhmmer_binary_path, database, n_cpu);
                DeepSearch::SmallReference(Box::new(tool))
            }
            DeepSearchBranch::ClusteredReference => {
                let databases = [&config.bfd_database_path, &config.uniclust30_database_path];
                let [Some(bfd), Some(uniclust30)] = databases else {
                    let names = "bfd_database_path and uniclust30_database_path";
                    return Err(missing_database(names, branch));
                };
                let databases = vec![bfd.clone(), uniclust30.clone()];
                let tool = HHBlits::new(&config.hhblits_binary_path, databases, n_cpu);
                DeepSearch::ClusteredReference(Box::new(tool))
            }
        };

        let (uniref90, mgnify) = (Box::new(uniref90), Box::new(mgnify));
        Ok(Self::new(uniref90, mgnify, Box::new(pdb70), deep)
            .with_max_hits(config.uniref_max_hits, config.mgnify_max_hits))
    }

    pub fn branch(&self) -> DeepSearchBranch {
        self.deep.branch()
    }

    /// Run every search for `query_path` and write the results into `output_dir`.
    ///
    /// Stages run in a fixed order: uniref90, mgnify, pdb70 (seeded with the
    /// uniref90 alignment), then the deep search. The first failure aborts the
    /// run; files written by earlier stages are left in place.
    pub fn run(&self, query_path: &Path, output_dir: &Path) -> Result<()> {
        let uniref90_path = output_dir.join(UNIREF90_HITS);
        info!("Searching uniref90 for {query_path:?}");
        let uniref90_sto = stage("jackhmmer_uniref90", self.uniref90.query(query_path))?;
        let uniref90_a3m = to_a3m("jackhmmer_uniref90", &uniref90_sto, self.uniref_max_hits)?;
        write_artifact(&uniref90_path, &uniref90_a3m)?;

        info!("Searching mgnify for {query_path:?}");
        let mgnify_sto = stage("jackhmmer_mgnify", self.mgnify.query(query_path))?;
        let mgnify_a3m = to_a3m("jackhmmer_mgnify", &mgnify_sto, self.mgnify_max_hits)?;
        write_artifact(&output_dir.join(MGNIFY_HITS), &mgnify_a3m)?;

        info!("Searching pdb70 with {uniref90_path:?}");
        let hhr = stage("hhsearch_pdb70", self.pdb70.query(&uniref90_path))?;
        write_artifact(&output_dir.join(PDB70_HITS), &hhr)?;

        info!("Searching {} for {query_path:?}", self.branch());
        let deep_output = match &self.deep {
            DeepSearch::SmallReference(tool) => {
                stage("jackhmmer_small_bfd", tool.query(query_path))?
            }
            DeepSearch::ClusteredReference(tool) => {
                stage("hhblits_bfd_uniclust", tool.query(query_path))?
            }
        };
        write_artifact(&output_dir.join(self.branch().artifact()), &deep_output)?;

        info!("Alignments for {query_path:?} written to {output_dir:?}");
        Ok(())
    }
}

fn missing_database(names: &str, branch: DeepSearchBranch) -> FeatureError {
    FeatureError::Config(format!("{names} must be set for the {branch} deep search"))
}

fn stage(name: &str, result: std::result::Result<String, ToolError>) -> Result<String> {
    result.map_err(|err| FeatureError::ToolExecution {
        stage: name.to_string(),
        message: err.to_string(),
    })
}

/// Convert a stage's Stockholm output; unreadable output fails that stage.
fn to_a3m(name: &str, stockholm: &str, max_hits: usize) -> Result<String> {
    let a3m = convert_stockholm_to_a3m(stockholm, Some(max_hits));
    a3m.map_err(|err| FeatureError::ToolExecution {
        stage: name.to_string(),
        message: format!("unreadable Stockholm output: {err}"),
    })
}

fn write_artifact(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|source| FeatureError::WriteFile {
        path: path.to_path_buf(),
        source,
    })
}
