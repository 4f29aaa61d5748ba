use crate::error::{ParseError, Result};

/// Parse FASTA text into `(sequences, descriptions)`.
///
/// Descriptions are the header lines without the leading `>`. Sequence lines are
/// concatenated and blank lines are skipped.
pub fn parse_fasta(text: &str) -> Result<(Vec<String>, Vec<String>)> {
    let mut sequences: Vec<String> = Vec::new();
    let mut descriptions: Vec<String> = Vec::new();

    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if let Some(header) = line.strip_prefix('>') {
            descriptions.push(header.to_string());
            sequences.push(String::new());
        } else if line.is_empty() {
            continue;
        } else {
            let current = sequences
                .last_mut()
                .ok_or(ParseError::MissingFastaHeader { line: line_no + 1 })?;
            current.push_str(line);
        }
    }

    Ok((sequences, descriptions))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fasta() {
        let text = ">query some protein\nMKTA\nYIAK\n\n>second\nGG\n";
        let (sequences, descriptions) = parse_fasta(text).unwrap();
        assert_eq!(sequences, vec!["MKTAYIAK", "GG"]);
        assert_eq!(descriptions, vec!["query some protein", "second"]);
    }

    #[test]
    fn test_parse_fasta_empty() {
        let (sequences, descriptions) = parse_fasta("").unwrap();
        assert!(sequences.is_empty());
        assert!(descriptions.is_empty());
    }

    #[test]
    fn test_sequence_before_header() {
        let err = parse_fasta("MKTA\n>query\nMKTA\n").unwrap_err();
        assert!(matches!(err, ParseError::MissingFastaHeader { line: 1 }));
    }
}
