use thiserror::Error;

pub type Result<T> = std::result::Result<T, ParseError>;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("FASTA line {line} contains sequence data before any '>' header.")]
    MissingFastaHeader { line: usize },

    #[error("Stockholm alignment contains no sequences.")]
    EmptyStockholm,

    #[error("Malformed Stockholm line {line}: {content:?}.")]
    MalformedStockholm { line: usize, content: String },

    #[error("Stockholm sequence {name} has {found} columns, but the query has {expected}.")]
    StockholmWidth {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("Malformed HHR hit {hit}: {message}.")]
    MalformedHhr { hit: usize, message: String },
}
