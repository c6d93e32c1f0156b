//! Citation graph construction and document-level queries.

use crate::common::*;
use crate::input::DocRecord;

use graph_util::graph::{CitationGraph, NodeId};
use graph_util::prune::{
    break_cycles, is_acyclic, remove_isolates_directed, restrict_to_largest_weak_component,
};
use std::collections::{HashMap, HashSet, VecDeque};

/// Build the pruned citation graph from parsed documents.
///
/// An edge `u -> v` is inserted when `u` lists `v` among its references,
/// `v` is itself a known document, and `v` is not dated after `u`
/// (look-ahead references are dropped; equal dates are kept, which is
/// why citation cycles can occur at all). Self-citations are skipped.
/// The result is then cycle-broken, restricted to its largest
/// weakly-connected component, and stripped of isolates.
pub fn build_citation_graph(docs: &[DocRecord]) -> CitationGraph {
    let mut cg = CitationGraph::default();
    let mut date_of = HashMap::new();
    for doc in docs {
        let id = cg.labels.intern(&doc.doi);
        cg.graph.add_node(id);
        date_of.insert(id, doc.date);
    }

    let mut dangling = 0usize;
    let mut look_ahead = 0usize;
    for doc in docs {
        let u = cg.labels.get(&doc.doi).unwrap();
        for r in &doc.refs {
            let Some(v) = cg.labels.get(r) else {
                dangling += 1;
                continue;
            };
            if v == u {
                continue;
            }
            if date_of[&v] > date_of[&u] {
                look_ahead += 1;
                continue;
            }
            cg.graph.add_edge(u, v, ());
        }
    }
    if dangling > 0 || look_ahead > 0 {
        info!(
            "dropped {} dangling and {} look-ahead reference(s)",
            dangling, look_ahead
        );
    }

    break_cycles(&mut cg.graph);
    let dropped = restrict_to_largest_weak_component(&mut cg.graph);
    let isolated = remove_isolates_directed(&mut cg.graph);
    if dropped + isolated > 0 {
        info!(
            "pruned {} node(s) outside the main component, {} isolate(s)",
            dropped, isolated
        );
    }

    assert!(is_acyclic(&cg.graph), "citation graph must be a DAG");
    cg
}

/// Documents reachable from `root` through citation edges, ascending.
pub fn descendants(cg: &CitationGraph, root: &str) -> Option<Vec<NodeId>> {
    let start = cg.labels.get(root)?;
    if !cg.graph.contains_node(start) {
        return None;
    }

    let mut seen = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(v) = queue.pop_front() {
        for w in cg.references(v) {
            if seen.insert(w) {
                queue.push_back(w);
            }
        }
    }
    seen.remove(&start);
    let mut out: Vec<NodeId> = seen.into_iter().collect();
    out.sort_unstable();
    Some(out)
}

/// The `n` most-cited documents as `(label, citation count)`, count
/// descending then label ascending.
pub fn most_referenced(cg: &CitationGraph, n: usize) -> Vec<(Box<str>, usize)> {
    let mut ranked: Vec<(Box<str>, usize)> = cg
        .graph
        .nodes()
        .map(|v| (cg.labels.label(v).into(), cg.in_degree(v)))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(n);
    ranked
}
