use crate::error::Result;
use crate::fasta::parse_fasta;
use crate::msa::Msa;

/// Parse A3M text.
///
/// Lowercase letters are insertions relative to the query: they are removed from
/// the aligned row and counted into the deletion value of the next aligned column.
pub fn parse_a3m(text: &str) -> Result<Msa> {
    let (raw_sequences, descriptions) = parse_fasta(text)?;

    let mut sequences = Vec::with_capacity(raw_sequences.len());
    let mut deletion_matrix = Vec::with_capacity(raw_sequences.len());
    for raw in &raw_sequences {
        let mut aligned = String::with_capacity(raw.len());
        let mut deletions = Vec::with_capacity(raw.len());
        let mut deletion_count = 0;
        for residue in raw.chars() {
            if residue.is_ascii_lowercase() {
                deletion_count += 1;
            } else {
                aligned.push(residue);
                deletions.push(deletion_count);
                deletion_count = 0;
            }
        }
        sequences.push(aligned);
        deletion_matrix.push(deletions);
    }

    Ok(Msa {
        sequences,
        deletion_matrix,
        descriptions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_a3m() {
        let text = ">query\nMKTA\n>hit_1 desc\nMaaK-A\n>hit_2\nbMKTAc\n";
        let msa = parse_a3m(text).unwrap();

        assert_eq!(msa.sequences, vec!["MKTA", "MK-A", "MKTA"]);
        assert_eq!(
            msa.deletion_matrix,
            vec![vec![0, 0, 0, 0], vec![0, 2, 0, 0], vec![1, 0, 0, 0]]
        );
        assert_eq!(msa.descriptions[1], "hit_1 desc");
        assert_eq!(msa.width(), Some(4));
    }

    #[test]
    fn test_rows_match_deletions() {
        let msa = parse_a3m(">q\nAC-D\n>h\nAcC-dD\n").unwrap();
        for (row, deletions) in msa.sequences.iter().zip(&msa.deletion_matrix) {
            assert_eq!(row.len(), deletions.len());
        }
    }
}
