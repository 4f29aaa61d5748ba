//! Header metadata (resolution and release date) scanned from raw structure text.
//!
//! pdbtbx does not surface these fields, so they are read directly from the
//! mmCIF categories or PDB records that carry them.
use chrono::NaiveDate;

const CIF_RESOLUTION_KEYS: [&str; 3] = [
    "_refine.ls_d_res_high",
    "_em_3d_reconstruction.resolution",
    "_reflns.d_resolution_high",
];

const CIF_REVISION_DATE: &str = "_pdbx_audit_revision_history.revision_date";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructureHeader {
    pub resolution: Option<f32>,
    pub release_date: Option<NaiveDate>,
}

impl StructureHeader {
    /// Scan mmCIF or PDB text. Unknown or malformed values are left as `None`.
    pub fn scan(text: &str) -> Self {
        if text.lines().any(|line| line.starts_with("data_")) {
            scan_cif(text)
        } else {
            scan_pdb(text)
        }
    }
}

fn scan_cif(text: &str) -> StructureHeader {
    let mut values: Vec<(String, String)> = Vec::new();
    let mut revision_dates: Vec<NaiveDate> = Vec::new();

    let lines: Vec<&str> = text.lines().collect();
    let mut idx = 0;
    while idx < lines.len() {
        let line = lines[idx].trim();
        if line == "loop_" {
            idx += 1;
            let mut headers = Vec::new();
            while idx < lines.len() && lines[idx].trim_start().starts_with('_') {
                headers.push(lines[idx].trim());
                idx += 1;
            }
            let mut tokens = Vec::new();
            while idx < lines.len() {
                let row = lines[idx].trim();
                if row.is_empty()
                    || row.starts_with('_')
                    || row.starts_with('#')
                    || row.starts_with("loop_")
                    || row.starts_with("data_")
                {
                    break;
                }
                tokens.extend(split_cif_tokens(row));
                idx += 1;
            }
            if let Some(column) = headers.iter().position(|h| *h == CIF_REVISION_DATE) {
                revision_dates.extend(
                    tokens
                        .chunks(headers.len())
                        .filter_map(|row| row.get(column))
                        .filter_map(|date| parse_cif_date(date)),
                );
            }
            continue;
        }
        if line.starts_with('_') {
            let tokens = split_cif_tokens(line);
            if let [key, value, ..] = tokens.as_slice() {
                values.push((key.to_string(), value.to_string()));
            }
        }
        idx += 1;
    }

    let resolution = CIF_RESOLUTION_KEYS.iter().find_map(|key| {
        values
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.parse::<f32>().ok())
    });

    revision_dates.extend(
        values
            .iter()
            .filter(|(k, _)| k == CIF_REVISION_DATE)
            .filter_map(|(_, v)| parse_cif_date(v)),
    );

    StructureHeader {
        resolution,
        release_date: revision_dates.into_iter().min(),
    }
}

fn scan_pdb(text: &str) -> StructureHeader {
    let resolution = text
        .lines()
        .filter(|line| line.starts_with("REMARK   2"))
        .find_map(|line| {
            let mut fields = line.split_whitespace().skip(2);
            match fields.next() {
                Some("RESOLUTION.") => fields.next().and_then(|v| v.parse::<f32>().ok()),
                _ => None,
            }
        });

    let release_date = text
        .lines()
        .filter(|line| line.starts_with("REVDAT"))
        .filter_map(|line| line.split_whitespace().nth(2))
        .filter_map(|date| NaiveDate::parse_from_str(date, "%d-%b-%y").ok())
        .min();

    StructureHeader {
        resolution,
        release_date,
    }
}

fn parse_cif_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Whitespace tokenizer that keeps single- or double-quoted values together.
fn split_cif_tokens(line: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let bytes = line.as_bytes();
    let mut idx = 0;
    while idx < bytes.len() {
        if bytes[idx].is_ascii_whitespace() {
            idx += 1;
            continue;
        }
        let quote = bytes[idx];
        if quote == b'\'' || quote == b'"' {
            let start = idx + 1;
            let mut end = start;
            while end < bytes.len() && bytes[end] != quote {
                end += 1;
            }
            tokens.push(&line[start..end]);
            idx = end + 1;
        } else {
            let start = idx;
            while idx < bytes.len() && !bytes[idx].is_ascii_whitespace() {
                idx += 1;
            }
            tokens.push(&line[start..idx]);
        }
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cif_header() {
        let text = "data_1ABC
#
_refine.ls_d_res_high 1.80
#
loop_
_pdbx_audit_revision_history.ordinal
_pdbx_audit_revision_history.data_content_type
_pdbx_audit_revision_history.revision_date
1 'Structure model' 2003-04-01
2 'Structure model' 1999-10-08
#
";
        let header = StructureHeader::scan(text);
        assert_eq!(header.resolution, Some(1.8));
        assert_eq!(header.release_date, NaiveDate::from_ymd_opt(1999, 10, 8));
    }

    #[test]
    fn test_pdb_header() {
        let text = "HEADER    TEST PROTEIN                            08-OCT-99   1ABC
REVDAT   2   01-APR-03 1ABC    1       JRNL
REVDAT   1   08-OCT-99 1ABC    0
REMARK   2 RESOLUTION.    2.00 ANGSTROMS.
";
        let header = StructureHeader::scan(text);
        assert_eq!(header.resolution, Some(2.0));
        assert_eq!(header.release_date, NaiveDate::from_ymd_opt(1999, 10, 8));
    }

    #[test]
    fn test_missing_header() {
        assert_eq!(StructureHeader::scan("ATOM"), StructureHeader::default());
    }

    #[test]
    fn test_quoted_tokens() {
        assert_eq!(
            split_cif_tokens("1 'Structure model' \"a b\" x"),
            vec!["1", "Structure model", "a b", "x"]
        );
    }
}
