//! Document-table ingestion.
//!
//! One document per line, tab-delimited:
//! `doi<TAB>YYYY-MM<TAB>ref;ref;...<TAB>token token ...`
//! Lines starting with `#` are skipped; `.gz` paths are decompressed
//! transparently. The reference and token columns may be empty.

use crate::common::*;

use chrono::NaiveDate;
use graph_util::edge_list::open_buf_reader;
use std::io::BufRead;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("data integrity failure at line {line}: {reason}")]
    DataIntegrity { line: usize, reason: String },
}

/// One parsed document row, immutable after parse.
#[derive(Debug, Clone, PartialEq)]
pub struct DocRecord {
    pub doi: Box<str>,
    pub date: NaiveDate,
    pub refs: Vec<Box<str>>,
    pub tokens: Vec<Box<str>>,
}

/// Tokens dropped during cleaning, over and above the length filter.
pub const STOP_WORDS: &[&str] = &[
    "about", "after", "all", "also", "among", "and", "are", "based", "been", "being", "between",
    "both", "but", "can", "could", "did", "does", "during", "each", "for", "from", "had", "has",
    "have", "here", "how", "into", "its", "may", "more", "most", "new", "not", "other", "our",
    "over", "several", "should", "some", "such", "than", "that", "the", "their", "them", "then",
    "there", "these", "they", "this", "those", "through", "under", "use", "used", "using", "very",
    "was", "were", "what", "when", "where", "which", "while", "who", "will", "with", "within",
    "without", "would",
];

/// Lowercase a DOI and strip an optional `doi:` prefix.
pub fn normalize_doi(raw: &str) -> String {
    let lower = raw.trim().to_lowercase();
    lower.strip_prefix("doi:").unwrap_or(&lower).to_string()
}

/// Lowercase, strip non-alphanumeric edges, then apply the length and
/// stopword filters; `None` drops the token.
pub fn clean_token(raw: &str, stop_words: &[&str]) -> Option<Box<str>> {
    let token: String = raw
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '-')
        .collect();
    let token = token.trim_matches('-');
    if token.len() < 3 || stop_words.contains(&token) {
        None
    } else {
        Some(token.into())
    }
}

/// `YYYY-MM` mapped onto the first day of the month.
fn parse_month(raw: &str, line: usize) -> Result<NaiveDate, InputError> {
    let bad = |reason: String| InputError::DataIntegrity { line, reason };
    let (y, m) = raw
        .trim()
        .split_once('-')
        .ok_or_else(|| bad(format!("expected YYYY-MM date, found {:?}", raw)))?;
    let year: i32 = y
        .parse()
        .map_err(|_| bad(format!("unparseable year {:?}", y)))?;
    let month: u32 = m
        .parse()
        .map_err(|_| bad(format!("unparseable month {:?}", m)))?;
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| bad(format!("date {}-{} out of range", year, month)))
}

/// Read the whole table, failing fast on the first malformed row.
pub fn read_doc_table(input_file: &str, stop_words: &[&str]) -> anyhow::Result<Vec<DocRecord>> {
    let buf = open_buf_reader(input_file)?;
    let mut docs = vec![];

    for (i, line) in buf.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        let lineno = i + 1;
        if fields.len() < 2 {
            return Err(InputError::DataIntegrity {
                line: lineno,
                reason: format!("expected at least 2 columns, found {}", fields.len()),
            }
            .into());
        }

        let doi = normalize_doi(fields[0]);
        if doi.is_empty() {
            return Err(InputError::DataIntegrity {
                line: lineno,
                reason: "missing doi".into(),
            }
            .into());
        }
        let date = parse_month(fields[1], lineno)?;

        let refs = fields
            .get(2)
            .map(|col| {
                col.split(';')
                    .map(normalize_doi)
                    .filter(|r| !r.is_empty())
                    .map(Box::from)
                    .collect()
            })
            .unwrap_or_default();
        let tokens = fields
            .get(3)
            .map(|col| {
                col.split_whitespace()
                    .filter_map(|t| clean_token(t, stop_words))
                    .collect()
            })
            .unwrap_or_default();

        docs.push(DocRecord {
            doi: doi.into(),
            date,
            refs,
            tokens,
        });
    }

    info!("read {} document(s) from {}", docs.len(), input_file);
    Ok(docs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_table(rows: &str) -> (TempDir, String) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("docs.tsv").to_str().unwrap().to_string();
        std::fs::write(&path, rows).unwrap();
        (dir, path)
    }

    #[test]
    fn test_read_doc_table() {
        let (_dir, path) = write_table(
            "# comment\n\
             DOI:10.1/A\t2001-03\t10.1/b;10.1/c\tGraph Theory the\n\
             10.1/b\t2000-11\t\tgraphs\n",
        );
        let docs = read_doc_table(&path, STOP_WORDS).unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(&*docs[0].doi, "10.1/a");
        assert_eq!(docs[0].date, NaiveDate::from_ymd_opt(2001, 3, 1).unwrap());
        assert_eq!(docs[0].refs, vec![Box::from("10.1/b"), Box::from("10.1/c")]);
        // "the" is a stopword, the rest survive lowercased
        assert_eq!(docs[0].tokens, vec![Box::from("graph"), Box::from("theory")]);
        assert!(docs[1].refs.is_empty());
    }

    #[test]
    fn test_missing_doi_fails_fast() {
        let (_dir, path) = write_table("\t2001-03\t\t\n");
        let err = read_doc_table(&path, STOP_WORDS).unwrap_err();
        assert!(err.to_string().contains("missing doi"));
    }

    #[test]
    fn test_bad_date_fails_fast() {
        let (_dir, path) = write_table("10.1/a\t2001-13\t\t\n");
        assert!(read_doc_table(&path, STOP_WORDS).is_err());
        let (_dir, path) = write_table("10.1/a\tMarch 2001\t\t\n");
        assert!(read_doc_table(&path, STOP_WORDS).is_err());
    }

    #[test]
    fn test_clean_token_filters() {
        assert_eq!(clean_token("Networks,", STOP_WORDS), Some("networks".into()));
        assert_eq!(clean_token("of", STOP_WORDS), None); // too short
        assert_eq!(clean_token("with", STOP_WORDS), None); // stopword
        assert_eq!(clean_token("(co-author)", STOP_WORDS), Some("co-author".into()));
    }
}
