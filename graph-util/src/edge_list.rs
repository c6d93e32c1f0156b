//! Plain-text edge-list I/O.
//!
//! One edge per line, `u v [weight]`, whitespace separated, no header.
//! Files ending in `.gz` are compressed/decompressed transparently. The
//! format round-trips: reading back yields an identical edge set
//! (weights included) regardless of row order.

use crate::error::GraphError;
use crate::graph::{CitationGraph, PairGraph};

use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};

#[derive(Debug, Clone, PartialEq)]
pub struct EdgeRec {
    pub source: Box<str>,
    pub target: Box<str>,
    pub weight: Option<f64>,
}

/// Open a buffered reader, decompressing when the path ends in `.gz`.
pub fn open_buf_reader(input_file: &str) -> anyhow::Result<Box<dyn BufRead>> {
    let file = File::open(input_file)?;
    if input_file.ends_with(".gz") {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Open a buffered writer, compressing when the path ends in `.gz`.
pub fn open_buf_writer(output_file: &str) -> anyhow::Result<Box<dyn Write>> {
    let file = File::create(output_file)?;
    if output_file.ends_with(".gz") {
        Ok(Box::new(BufWriter::new(GzEncoder::new(
            file,
            Compression::default(),
        ))))
    } else {
        Ok(Box::new(BufWriter::new(file)))
    }
}

/// Write edges one per line; the weight column is omitted when `None`.
pub fn write_edge_list(edges: &[EdgeRec], output_file: &str) -> anyhow::Result<()> {
    let mut buf = open_buf_writer(output_file)?;
    for e in edges {
        match e.weight {
            Some(w) => writeln!(buf, "{} {} {}", e.source, e.target, w)?,
            None => writeln!(buf, "{} {}", e.source, e.target)?,
        }
    }
    buf.flush()?;
    Ok(())
}

/// Read an edge list; lines starting with `#` or `%` are skipped.
pub fn read_edge_list(input_file: &str) -> anyhow::Result<Vec<EdgeRec>> {
    let buf = open_buf_reader(input_file)?;
    let mut edges = vec![];
    for (i, line) in buf.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('%') {
            continue;
        }
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.len() < 2 || words.len() > 3 {
            return Err(GraphError::EdgeList {
                line: i + 1,
                reason: format!("expected 2 or 3 columns, found {}", words.len()),
            }
            .into());
        }
        let weight = match words.get(2) {
            Some(w) => Some(w.parse::<f64>().map_err(|_| GraphError::EdgeList {
                line: i + 1,
                reason: format!("unparseable weight {:?}", w),
            })?),
            None => None,
        };
        edges.push(EdgeRec {
            source: words[0].into(),
            target: words[1].into(),
            weight,
        });
    }
    Ok(edges)
}

/// Read an edge list as an undirected weighted graph; missing weights
/// default to 1.
pub fn read_pair_graph(input_file: &str) -> anyhow::Result<PairGraph> {
    let mut pg = PairGraph::default();
    for e in read_edge_list(input_file)? {
        let u = pg.labels.intern(&e.source);
        let v = pg.labels.intern(&e.target);
        pg.graph.add_edge(u, v, e.weight.unwrap_or(1.0));
    }
    Ok(pg)
}

/// Read an edge list as a directed graph (weights ignored).
pub fn read_citation_graph(input_file: &str) -> anyhow::Result<CitationGraph> {
    let mut cg = CitationGraph::default();
    for e in read_edge_list(input_file)? {
        let u = cg.labels.intern(&e.source);
        let v = cg.labels.intern(&e.target);
        cg.graph.add_edge(u, v, ());
    }
    Ok(cg)
}
