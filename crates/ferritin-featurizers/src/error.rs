use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FeatureError>;

#[derive(Debug, Error)]
pub enum FeatureError {
    #[error("Structure error: {0}")]
    Structure(#[from] ferritin_core::StructureError),

    #[error("At least one MSA must be provided.")]
    NoMsas,

    #[error("MSA {index} must contain at least one sequence.")]
    EmptyMsa { index: usize },

    #[error("Residue {residue:?} in MSA {msa_index}, row {row_index} has no HHblits code.")]
    UnknownResidue {
        residue: char,
        msa_index: usize,
        row_index: usize,
    },

    #[error(
        "Row {row_index} of MSA {msa_index} has {found} columns, but the alignment width is {expected}."
    )]
    MisalignedRow {
        msa_index: usize,
        row_index: usize,
        expected: usize,
        found: usize,
    },

    #[error("The deletion matrix of MSA {msa_index} does not match its rows at row {row_index}.")]
    DeletionMatrixMismatch { msa_index: usize, row_index: usize },

    #[error("Search stage '{stage}' failed: {message}")]
    ToolExecution { stage: String, message: String },

    #[error("Could not read {path:?}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Could not write {path:?}: {source}")]
    WriteFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Could not parse {path:?}: {source}")]
    ArtifactParse {
        path: PathBuf,
        source: ferritin_io::ParseError,
    },

    #[error("Expected alignment artifact {path:?} does not exist.")]
    MissingArtifact { path: PathBuf },

    #[error("Expected exactly one input sequence in {path:?}, found {count}.")]
    MultiSequence { path: PathBuf, count: usize },

    #[error("No input sequence found in {path:?}.")]
    EmptyQuery { path: PathBuf },

    #[error("No chains in structure record.")]
    NoChain,

    #[error("Chain {chain_id} is not present in the structure record.")]
    UnknownChain { chain_id: String },

    #[error("Feature {feature} has dimension {found} on axis {axis}, expected {expected}.")]
    ShapeMismatch {
        feature: String,
        axis: usize,
        expected: usize,
        found: usize,
    },

    #[error("Array shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Could not read configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not serialize features: {0}")]
    Safetensors(#[from] safetensors::SafeTensorError),
}
