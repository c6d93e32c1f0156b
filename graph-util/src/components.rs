//! Connected components via union-find.

use crate::graph::{node_positions, sorted_nodes, Digraph, NodeId, Ungraph};

/// Union-find over dense indices with union by rank and path halving.
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl UnionFind {
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    pub fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    pub fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
    }
}

fn components_from(nodes: Vec<NodeId>, edges: impl Iterator<Item = (NodeId, NodeId)>) -> Vec<Vec<NodeId>> {
    let index = node_positions(&nodes);
    let mut uf = UnionFind::new(nodes.len());
    for (u, v) in edges {
        uf.union(index[&u], index[&v]);
    }

    // Components ordered by first-encountered root over the ascending
    // node enumeration; members ascend within each component.
    let mut root_to_comp: std::collections::HashMap<usize, usize> = Default::default();
    let mut comps: Vec<Vec<NodeId>> = vec![];
    for (i, &n) in nodes.iter().enumerate() {
        let r = uf.find(i);
        let c = *root_to_comp.entry(r).or_insert_with(|| {
            comps.push(vec![]);
            comps.len() - 1
        });
        comps[c].push(n);
    }
    comps
}

/// Connected components of an undirected graph, members sorted ascending.
pub fn connected_components(g: &Ungraph) -> Vec<Vec<NodeId>> {
    components_from(sorted_nodes(g), g.all_edges().map(|(u, v, _)| (u, v)))
}

/// Weakly-connected components of a directed graph (edge direction ignored).
pub fn weak_components(g: &Digraph) -> Vec<Vec<NodeId>> {
    let mut nodes: Vec<NodeId> = g.nodes().collect();
    nodes.sort_unstable();
    components_from(nodes, g.all_edges().map(|(u, v, _)| (u, v)))
}

pub fn count_components(g: &Ungraph) -> usize {
    connected_components(g).len()
}

/// Index of the largest component; ties go to the first-encountered one
/// (the component containing the smallest node id among the tied sizes).
pub fn largest_component(components: &[Vec<NodeId>]) -> Option<usize> {
    components
        .iter()
        .enumerate()
        .max_by(|(ia, a), (ib, b)| a.len().cmp(&b.len()).then(ib.cmp(ia)))
        .map(|(i, _)| i)
}
