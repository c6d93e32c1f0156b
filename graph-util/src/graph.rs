//! Labeled graph wrappers over `petgraph`'s adjacency-map graphs.
//!
//! All algorithms in this crate operate on dense `u32` node ids; the
//! wrappers below keep the bidirectional mapping between those ids and
//! the original string identifiers (DOIs, keywords, tokens).

use petgraph::graphmap::{DiGraphMap, UnGraphMap};
use petgraph::Direction;
use std::collections::HashMap;

pub type NodeId = u32;

/// Undirected weighted graph (co-citation, co-occurrence).
pub type Ungraph = UnGraphMap<NodeId, f64>;

/// Directed unweighted graph (citation).
pub type Digraph = DiGraphMap<NodeId, ()>;

/// Bidirectional mapping between string labels and dense node ids.
#[derive(Debug, Clone, Default)]
pub struct LabelMap {
    labels: Vec<Box<str>>,
    index: HashMap<Box<str>, NodeId>,
}

impl LabelMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the id for `label`, interning it if unseen.
    pub fn intern(&mut self, label: &str) -> NodeId {
        if let Some(&id) = self.index.get(label) {
            return id;
        }
        let id = self.labels.len() as NodeId;
        self.labels.push(label.into());
        self.index.insert(label.into(), id);
        id
    }

    pub fn get(&self, label: &str) -> Option<NodeId> {
        self.index.get(label).copied()
    }

    pub fn label(&self, id: NodeId) -> &str {
        &self.labels[id as usize]
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Directed citation graph; an edge `u -> v` means document `u` cites
/// document `v`.
#[derive(Debug, Clone, Default)]
pub struct CitationGraph {
    pub graph: Digraph,
    pub labels: LabelMap,
}

impl CitationGraph {
    /// Edges as label pairs, sorted by (source, target) for stable output.
    pub fn sorted_edges(&self) -> Vec<(Box<str>, Box<str>)> {
        let mut out: Vec<(Box<str>, Box<str>)> = self
            .graph
            .all_edges()
            .map(|(u, v, _)| (self.labels.label(u).into(), self.labels.label(v).into()))
            .collect();
        out.sort();
        out
    }

    /// View the citation structure as an undirected unit-weight graph for
    /// the statistic library.
    pub fn to_undirected(&self) -> Ungraph {
        let mut g = Ungraph::new();
        for n in self.graph.nodes() {
            g.add_node(n);
        }
        for (u, v, _) in self.graph.all_edges() {
            g.add_edge(u, v, 1.0);
        }
        g
    }

    pub fn in_degree(&self, n: NodeId) -> usize {
        self.graph.neighbors_directed(n, Direction::Incoming).count()
    }

    /// Documents directly cited by `n`.
    pub fn references(&self, n: NodeId) -> Vec<NodeId> {
        self.graph.neighbors_directed(n, Direction::Outgoing).collect()
    }
}

/// Undirected weighted pair graph (co-citation / co-occurrence); edge
/// weight is the number of distinct groups in which the pair co-occurred.
#[derive(Debug, Clone, Default)]
pub struct PairGraph {
    pub graph: Ungraph,
    pub labels: LabelMap,
}

impl PairGraph {
    /// Edges as `(u, v, weight)` label triples in the documented total
    /// order: weight descending, then label pair ascending.
    pub fn sorted_edges(&self) -> Vec<(Box<str>, Box<str>, f64)> {
        let mut out: Vec<(Box<str>, Box<str>, f64)> = self
            .graph
            .all_edges()
            .map(|(u, v, w)| {
                let (a, b) = canonical_pair(self.labels.label(u), self.labels.label(v));
                (a, b, *w)
            })
            .collect();
        out.sort_by(|x, y| {
            y.2.partial_cmp(&x.2)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| (&x.0, &x.1).cmp(&(&y.0, &y.1)))
        });
        out
    }
}

/// Order a label pair lexicographically.
pub fn canonical_pair(a: &str, b: &str) -> (Box<str>, Box<str>) {
    if a <= b {
        (a.into(), b.into())
    } else {
        (b.into(), a.into())
    }
}

/// Graph nodes in ascending id order; the fixed enumeration used by the
/// delta engine and all per-node statistic vectors.
pub fn sorted_nodes(g: &Ungraph) -> Vec<NodeId> {
    let mut nodes: Vec<NodeId> = g.nodes().collect();
    nodes.sort_unstable();
    nodes
}

/// Map node id to dense position in the sorted enumeration.
pub fn node_positions(nodes: &[NodeId]) -> HashMap<NodeId, usize> {
    nodes.iter().enumerate().map(|(i, &n)| (n, i)).collect()
}

/// Subgraph induced by `nodes`, keeping edge weights.
pub fn induced_subgraph(g: &Ungraph, nodes: &[NodeId]) -> Ungraph {
    let keep: std::collections::HashSet<NodeId> = nodes.iter().copied().collect();
    let mut sub = Ungraph::new();
    for &n in nodes {
        sub.add_node(n);
    }
    for (u, v, w) in g.all_edges() {
        if keep.contains(&u) && keep.contains(&v) {
            sub.add_edge(u, v, *w);
        }
    }
    sub
}

/// Sorted neighbor list; deterministic iteration order for traversals.
pub fn sorted_neighbors(g: &Ungraph, n: NodeId) -> Vec<NodeId> {
    let mut nbrs: Vec<NodeId> = g.neighbors(n).collect();
    nbrs.sort_unstable();
    nbrs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_map_intern_is_idempotent() {
        let mut labels = LabelMap::new();
        let a = labels.intern("10.1/a");
        let b = labels.intern("10.1/b");
        assert_ne!(a, b);
        assert_eq!(labels.intern("10.1/a"), a);
        assert_eq!(labels.label(b), "10.1/b");
        assert_eq!(labels.len(), 2);
    }

    #[test]
    fn test_pair_graph_sorted_edges_order() {
        let mut pg = PairGraph::default();
        let a = pg.labels.intern("a");
        let b = pg.labels.intern("b");
        let c = pg.labels.intern("c");
        pg.graph.add_edge(a, b, 2.0);
        pg.graph.add_edge(b, c, 5.0);
        pg.graph.add_edge(a, c, 2.0);

        let edges = pg.sorted_edges();
        assert_eq!(edges[0], ("b".into(), "c".into(), 5.0));
        // Equal weights fall back to label order
        assert_eq!(edges[1], ("a".into(), "b".into(), 2.0));
        assert_eq!(edges[2], ("a".into(), "c".into(), 2.0));
    }

    #[test]
    fn test_induced_subgraph() {
        let mut g = Ungraph::new();
        g.add_edge(0, 1, 1.0);
        g.add_edge(1, 2, 1.0);
        g.add_edge(2, 3, 1.0);

        let sub = induced_subgraph(&g, &[0, 1, 2]);
        assert_eq!(sub.node_count(), 3);
        assert_eq!(sub.edge_count(), 2);
        assert!(sub.contains_edge(0, 1));
        assert!(!sub.contains_edge(2, 3));
    }
}
