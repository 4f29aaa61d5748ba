//! Running the sequence/profile searches and reading their results back.
//!
//! [`AlignmentRunner`] writes one file per search into an alignment directory;
//! [`AlignmentBundle::load`] reads the same files. Both sides choose the deep
//! search file through [`DeepSearchBranch`].
mod config;
mod loader;
mod runner;
mod tools;

pub use config::AlignmentConfig;
pub use loader::AlignmentBundle;
pub(crate) use loader::parse_file;
pub use runner::{AlignmentRunner, DeepSearch};
pub use tools::{HHBlits, HHSearch, Jackhmmer, SearchTool, ToolError};

use std::fmt;

pub const UNIREF90_HITS: &str = "uniref90_hits.a3m";
pub const MGNIFY_HITS: &str = "mgnify_hits.a3m";
pub const PDB70_HITS: &str = "pdb70_hits.hhr";
pub const SMALL_BFD_HITS: &str = "small_bfd_hits.sto";
pub const BFD_UNICLUST_HITS: &str = "bfd_uniclust_hits.a3m";

/// Which deep search produced the third MSA.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeepSearchBranch {
    /// jackhmmer against the reduced BFD; native Stockholm output.
    SmallReference,
    /// hhblits against BFD + Uniclust30; A3M output.
    ClusteredReference,
}

impl DeepSearchBranch {
    pub fn from_use_small_bfd(use_small_bfd: bool) -> Self {
        if use_small_bfd {
            Self::SmallReference
        } else {
            Self::ClusteredReference
        }
    }

    /// File name of this branch's persisted output.
    pub fn artifact(&self) -> &'static str {
        match self {
            Self::SmallReference => SMALL_BFD_HITS,
            Self::ClusteredReference => BFD_UNICLUST_HITS,
        }
    }
}

impl fmt::Display for DeepSearchBranch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SmallReference => write!(f, "small BFD"),
            Self::ClusteredReference => write!(f, "BFD/Uniclust30"),
        }
    }
}
