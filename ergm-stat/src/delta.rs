//! Change-statistic matrices.
//!
//! For every unordered node pair, evaluate the statistic on the graph
//! with the pair's edge forced present and forced absent; the cell
//! holds `f(G + e) - f(G - e)`. The pair loop is an O(n^2) sweep with a
//! full statistic evaluation per toggle, an intentionally expensive
//! primitive for small-to-medium graphs.

use crate::statistic::{StatError, Statistic};
use graph_util::edge_list::open_buf_writer;
use graph_util::graph::{sorted_nodes, NodeId, Ungraph};

use indicatif::{ParallelProgressIterator, ProgressBar, ProgressDrawTarget};
use ndarray::Array2;
use rayon::prelude::*;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DeltaError {
    #[error("delta computation cancelled")]
    Cancelled,
    #[error(transparent)]
    Stat(#[from] StatError),
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DeltaLayout {
    /// Mirror each delta across the diagonal; diagonal stays zero.
    #[default]
    Symmetric,
    /// Populate the strict lower triangle only, row > column.
    LowerTriangle,
}

#[derive(Default, Clone)]
pub struct DeltaOptions {
    pub layout: DeltaLayout,
    /// Checked between pair evaluations; setting it aborts the sweep.
    pub cancel: Option<Arc<AtomicBool>>,
    /// Draw an indicatif progress count over the pair loop.
    pub progress: bool,
}

pub struct DeltaMatrix {
    pub values: Array2<f64>,
    /// Row/column order: ascending node ids.
    pub nodes: Vec<NodeId>,
}

impl DeltaMatrix {
    /// Row-major numeric TSV, one row per line, `.gz` transparent.
    pub fn write_tsv(&self, output_file: &str) -> anyhow::Result<()> {
        let mut buf = open_buf_writer(output_file)?;
        for row in self.values.rows() {
            let line = row
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join("\t");
            writeln!(buf, "{}", line)?;
        }
        buf.flush()?;
        Ok(())
    }
}

fn pair_delta(
    g: &Ungraph,
    stat: &Statistic,
    u: NodeId,
    v: NodeId,
    cancel: Option<&Arc<AtomicBool>>,
) -> Result<f64, DeltaError> {
    if let Some(flag) = cancel {
        if flag.load(Ordering::Relaxed) {
            return Err(DeltaError::Cancelled);
        }
    }

    let mut with = g.clone();
    if !with.contains_edge(u, v) {
        with.add_edge(u, v, 1.0);
    }
    let mut without = g.clone();
    without.remove_edge(u, v);

    Ok(stat.evaluate(&with)? - stat.evaluate(&without)?)
}

/// Change-statistic matrix over every unordered node pair.
pub fn delta_matrix(
    g: &Ungraph,
    stat: &Statistic,
    options: &DeltaOptions,
) -> Result<DeltaMatrix, DeltaError> {
    let nodes = sorted_nodes(g);
    let n = nodes.len();

    let pairs: Vec<(usize, usize)> = (0..n)
        .flat_map(|i| ((i + 1)..n).map(move |j| (i, j)))
        .collect();

    let cancel = options.cancel.as_ref();
    let eval = |&(i, j): &(usize, usize)| pair_delta(g, stat, nodes[i], nodes[j], cancel);

    let deltas: Vec<f64> = if options.progress {
        let bar = ProgressBar::new(pairs.len() as u64);
        bar.set_draw_target(ProgressDrawTarget::stderr());
        pairs
            .par_iter()
            .progress_with(bar)
            .map(eval)
            .collect::<Result<_, _>>()?
    } else {
        pairs.par_iter().map(eval).collect::<Result<_, _>>()?
    };

    let mut values = Array2::<f64>::zeros((n, n));
    for (&(i, j), &d) in pairs.iter().zip(deltas.iter()) {
        match options.layout {
            DeltaLayout::Symmetric => {
                values[[i, j]] = d;
                values[[j, i]] = d;
            }
            DeltaLayout::LowerTriangle => {
                values[[j, i]] = d;
            }
        }
    }

    Ok(DeltaMatrix { values, nodes })
}
