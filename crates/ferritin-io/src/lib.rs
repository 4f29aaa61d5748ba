//! ferritin-io
//!
//! Parsers for the text formats emitted by sequence and profile search tools:
//!
//! - FASTA query files
//! - A3M alignments (hhblits, or converted jackhmmer output)
//! - Stockholm alignments (jackhmmer), including conversion to A3M
//! - HHR hit reports (hhsearch)
//!
//! Alignments are returned as an [`Msa`] with the aligned rows, their per-column
//! deletion counts and the row descriptions.
mod a3m;
mod error;
mod fasta;
mod hhr;
mod msa;
mod stockholm;

pub use a3m::parse_a3m;
pub use error::{ParseError, Result};
pub use fasta::parse_fasta;
pub use hhr::{parse_hhr, TemplateHit};
pub use msa::Msa;
pub use stockholm::{convert_stockholm_to_a3m, parse_stockholm};
