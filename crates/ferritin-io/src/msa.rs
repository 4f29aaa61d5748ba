/// A parsed multiple sequence alignment.
///
/// `sequences`, `deletion_matrix` and `descriptions` are row-aligned. Row 0 is the query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Msa {
    pub sequences: Vec<String>,
    pub deletion_matrix: Vec<Vec<i32>>,
    pub descriptions: Vec<String>,
}

impl Msa {
    /// Number of rows.
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Alignment width, taken from the first row.
    pub fn width(&self) -> Option<usize> {
        self.sequences.first().map(|row| row.chars().count())
    }
}
