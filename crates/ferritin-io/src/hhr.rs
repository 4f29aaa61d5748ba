use crate::error::{ParseError, Result};

/// One hit of an hhsearch report.
///
/// `query` and `hit_sequence` are the aligned strings (gaps as `-`). The index
/// vectors give, per aligned column, the zero-based residue position in the query
/// or template, or `-1` for a gap.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateHit {
    pub index: usize,
    pub name: String,
    pub aligned_cols: usize,
    pub sum_probs: Option<f32>,
    pub query: String,
    pub hit_sequence: String,
    pub indices_query: Vec<i32>,
    pub indices_hit: Vec<i32>,
}

// annotation rows that share the `Q `/`T ` prefix with alignment rows
const ANNOTATION_ROWS: [&str; 4] = ["ss_dssp", "ss_pred", "ss_conf", "Consensus"];

/// Parse an HHR report into its hits, in report order.
pub fn parse_hhr(text: &str) -> Result<Vec<TemplateHit>> {
    let lines: Vec<&str> = text.lines().collect();
    let mut block_starts: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| line.starts_with("No "))
        .map(|(idx, _)| idx)
        .collect();
    if block_starts.is_empty() {
        return Ok(Vec::new());
    }
    block_starts.push(lines.len());

    block_starts
        .windows(2)
        .map(|window| parse_hit(&lines[window[0]..window[1]]))
        .collect()
}

fn parse_hit(lines: &[&str]) -> Result<TemplateHit> {
    let malformed = |hit: usize, message: &str| ParseError::MalformedHhr {
        hit,
        message: message.to_string(),
    };

    let index = lines[0]
        .split_whitespace()
        .last()
        .and_then(|n| n.parse::<usize>().ok())
        .ok_or_else(|| malformed(0, "hit number is missing"))?;
    let name = lines
        .get(1)
        .and_then(|line| line.strip_prefix('>'))
        .ok_or_else(|| malformed(index, "hit name line is missing"))?
        .to_string();
    let summary = lines
        .get(2)
        .ok_or_else(|| malformed(index, "summary line is missing"))?;

    let mut aligned_cols = None;
    let mut sum_probs = None;
    for field in summary.split_whitespace() {
        if let Some((key, value)) = field.split_once('=') {
            match key {
                "Aligned_cols" => aligned_cols = value.parse::<usize>().ok(),
                "Sum_probs" => sum_probs = value.parse::<f32>().ok(),
                _ => {}
            }
        }
    }
    let aligned_cols = aligned_cols.ok_or_else(|| malformed(index, "Aligned_cols is missing"))?;

    let mut query = String::new();
    let mut hit_sequence = String::new();
    let mut indices_query = Vec::new();
    let mut indices_hit = Vec::new();
    let mut block_length = None;

    for line in &lines[3..] {
        let is_query = line.starts_with("Q ");
        if !is_query && !line.starts_with("T ") {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 5 || ANNOTATION_ROWS.contains(&fields[1]) {
            continue;
        }
        let start = fields[2]
            .parse::<i32>()
            .map_err(|_| malformed(index, "alignment start is not a number"))?
            - 1;
        let aligned = fields[3];

        if is_query {
            block_length = Some(aligned.len());
            query.push_str(aligned);
            update_residue_indices(aligned, start, &mut indices_query);
        } else {
            if block_length != Some(aligned.len()) {
                return Err(malformed(index, "template block length differs from query block"));
            }
            hit_sequence.push_str(aligned);
            update_residue_indices(aligned, start, &mut indices_hit);
        }
    }

    Ok(TemplateHit {
        index,
        name,
        aligned_cols,
        sum_probs,
        query,
        hit_sequence,
        indices_query,
        indices_hit,
    })
}

fn update_residue_indices(aligned: &str, start: i32, indices: &mut Vec<i32>) {
    let mut counter = start;
    for symbol in aligned.chars() {
        if symbol == '-' {
            indices.push(-1);
        } else {
            indices.push(counter);
            counter += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HHR: &str = "Query         query
Match_columns 8

 No Hit                             Prob E-value P-value  Score    SS Cols Query HMM  Template HMM
  1 1abc_A Protein A               99.9 1.1E-30 1E-34  180.0   0.0    8    1-8       3-10 (20)

No 1
>1abc_A Protein A; structural genomics
Probab=99.90  E-value=1.1e-30  Score=180.00  Aligned_cols=8  Identities=75%  Similarity=0.9  Sum_probs=7.5  Template_Neff=5.1

Q ss_pred             CCCCCCCC
Q query            1 MKTAYIAK    8 (8)
Q Consensus      1 mktayiak    8 (8)
                   ||||||||
T Consensus      3 mkt-yiak    9 (20)
T 1abc_A         3 MKT-YIAK    9 (20)
T ss_dssp          CCCCCCCC

No 2
>2xyz_B Protein B
Probab=50.00  E-value=2  Score=10.00  Aligned_cols=2  Identities=50%  Similarity=0.1  Sum_probs=1.0  Template_Neff=1.0

Q query            4 AY    5 (8)
T 2xyz_B         1 AF    2 (4)
";

    #[test]
    fn test_parse_hhr() {
        let hits = parse_hhr(HHR).unwrap();
        assert_eq!(hits.len(), 2);

        let first = &hits[0];
        assert_eq!(first.index, 1);
        assert_eq!(first.name, "1abc_A Protein A; structural genomics");
        assert_eq!(first.aligned_cols, 8);
        assert_eq!(first.sum_probs, Some(7.5));
        assert_eq!(first.query, "MKTAYIAK");
        assert_eq!(first.hit_sequence, "MKT-YIAK");
        assert_eq!(first.indices_query, vec![0, 1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(first.indices_hit, vec![2, 3, 4, -1, 5, 6, 7, 8]);

        assert_eq!(hits[1].indices_query, vec![3, 4]);
        assert_eq!(hits[1].hit_sequence, "AF");
    }

    #[test]
    fn test_no_hits() {
        assert!(parse_hhr("Query query\n").unwrap().is_empty());
    }
}
