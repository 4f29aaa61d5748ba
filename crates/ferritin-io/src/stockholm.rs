use crate::error::{ParseError, Result};
use crate::msa::Msa;
use std::collections::HashMap;

fn is_gap(residue: char) -> bool {
    residue == '-' || residue == '.'
}

/// Named rows of a Stockholm file in first-seen order, with `#=GS <name> DE` descriptions.
struct StockholmRecords {
    names: Vec<String>,
    rows: Vec<String>,
    descriptions: HashMap<String, String>,
}

impl StockholmRecords {
    /// Collect rows, keeping at most `max_sequences` distinct names. A cap of zero keeps every row.
    fn read(text: &str, max_sequences: Option<usize>) -> Result<Self> {
        let max_sequences = max_sequences.filter(|&max| max > 0);
        let mut names: Vec<String> = Vec::new();
        let mut rows: Vec<String> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut descriptions = HashMap::new();

        for (line_no, line) in text.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with("//") {
                continue;
            }
            if let Some(annotation) = trimmed.strip_prefix("#=GS") {
                let mut columns = annotation.split_whitespace();
                if let (Some(name), Some("DE")) = (columns.next(), columns.next()) {
                    let value = columns.collect::<Vec<_>>().join(" ");
                    descriptions.insert(name.to_string(), value);
                }
                continue;
            }
            if trimmed.starts_with('#') {
                continue;
            }

            let mut columns = trimmed.split_whitespace();
            let (Some(name), Some(aligned), None) =
                (columns.next(), columns.next(), columns.next())
            else {
                return Err(ParseError::MalformedStockholm {
                    line: line_no + 1,
                    content: line.to_string(),
                });
            };
            match index.get(name) {
                Some(&row) => rows[row].push_str(aligned),
                None => {
                    if max_sequences.is_some_and(|max| names.len() >= max) {
                        continue;
                    }
                    index.insert(name.to_string(), names.len());
                    names.push(name.to_string());
                    rows.push(aligned.to_string());
                }
            }
        }

        if rows.is_empty() {
            return Err(ParseError::EmptyStockholm);
        }
        for (name, row) in names.iter().zip(&rows) {
            let (expected, found) = (rows[0].chars().count(), row.chars().count());
            if expected != found {
                return Err(ParseError::StockholmWidth {
                    name: name.clone(),
                    expected,
                    found,
                });
            }
        }

        Ok(Self {
            names,
            rows,
            descriptions,
        })
    }

    fn description(&self, name: &str) -> String {
        self.descriptions.get(name).cloned().unwrap_or_default()
    }
}

/// Parse Stockholm text.
///
/// Only columns where the query (first row) has a residue are kept. Residues
/// a row carries in query-gap columns are counted into the deletion value of the
/// next kept column.
pub fn parse_stockholm(text: &str) -> Result<Msa> {
    let records = StockholmRecords::read(text, None)?;
    let query: Vec<char> = records.rows[0].chars().collect();

    let mut msa = Msa::default();
    for (name, row) in records.names.iter().zip(&records.rows) {
        let mut aligned = String::with_capacity(query.len());
        let mut deletions = Vec::with_capacity(query.len());
        let mut deletion_count = 0;
        for (residue, query_residue) in row.chars().zip(query.iter().copied()) {
            if is_gap(query_residue) {
                if !is_gap(residue) {
                    deletion_count += 1;
                }
            } else {
                aligned.push(if is_gap(residue) { '-' } else { residue });
                deletions.push(deletion_count);
                deletion_count = 0;
            }
        }
        msa.sequences.push(aligned);
        msa.deletion_matrix.push(deletions);
        msa.descriptions.push(records.description(name));
    }
    Ok(msa)
}

/// A3M form of one residue given whether the query has a residue in its column.
fn a3m_column(residue: char, query_non_gap: bool) -> Option<char> {
    match (query_non_gap, is_gap(residue)) {
        (true, true) => Some('-'),
        (true, false) => Some(residue),
        (false, true) => None,
        (false, false) => Some(residue.to_ascii_lowercase()),
    }
}

/// Convert Stockholm text to A3M, keeping at most `max_sequences` rows.
///
/// Query-gap columns become lowercase insertions (or vanish where the row also
/// has a gap), so the result parses back with [`crate::parse_a3m`] to the same
/// aligned rows as [`parse_stockholm`].
pub fn convert_stockholm_to_a3m(text: &str, max_sequences: Option<usize>) -> Result<String> {
    let records = StockholmRecords::read(text, max_sequences)?;
    let query_non_gaps: Vec<bool> = records.rows[0].chars().map(|r| !is_gap(r)).collect();

    let mut a3m = String::new();
    for (name, row) in records.names.iter().zip(&records.rows) {
        let converted: String = row
            .chars()
            .zip(query_non_gaps.iter().copied())
            .filter_map(|(residue, query_non_gap)| a3m_column(residue, query_non_gap))
            .collect();
        let description = records.description(name);
        if description.is_empty() {
            a3m.push_str(&format!(">{name}\n{converted}\n"));
        } else {
            a3m.push_str(&format!(">{name} {description}\n{converted}\n"));
        }
    }
    Ok(a3m)
}
