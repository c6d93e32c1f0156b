//! Clique enumeration.
//!
//! Enumerates every complete subgraph of size one and up, smallest
//! first, by breadth-first extension: a clique of size `k` spawns one
//! child per common neighbor with an id above its largest member, so
//! each clique is produced exactly once.

use crate::graph::{node_positions, sorted_nodes, NodeId, Ungraph};

use std::collections::VecDeque;

/// All cliques (complete subgraphs) of size one and up, members in
/// ascending id order, listed by increasing size.
pub fn enumerate_all_cliques(g: &Ungraph) -> Vec<Vec<NodeId>> {
    let nodes = sorted_nodes(g);
    let index = node_positions(&nodes);
    let n = nodes.len();

    let adj: Vec<Vec<usize>> = nodes
        .iter()
        .map(|&v| {
            let mut nbrs: Vec<usize> = g.neighbors(v).map(|w| index[&w]).collect();
            nbrs.sort_unstable();
            nbrs
        })
        .collect();

    let mut out = vec![];
    let mut queue: VecDeque<(Vec<usize>, Vec<usize>)> = (0..n)
        .map(|v| {
            let candidates: Vec<usize> = adj[v].iter().copied().filter(|&w| w > v).collect();
            (vec![v], candidates)
        })
        .collect();

    while let Some((clique, candidates)) = queue.pop_front() {
        out.push(clique.iter().map(|&i| nodes[i]).collect());
        for (pos, &w) in candidates.iter().enumerate() {
            let mut next = clique.clone();
            next.push(w);
            // Candidates after w that are also adjacent to w.
            let narrowed: Vec<usize> = candidates[pos + 1..]
                .iter()
                .copied()
                .filter(|x| adj[w].binary_search(x).is_ok())
                .collect();
            queue.push_back((next, narrowed));
        }
    }
    out
}

/// Total number of cliques of every size.
pub fn clique_count(g: &Ungraph) -> usize {
    enumerate_all_cliques(g).len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_edge() {
        let mut g = Ungraph::new();
        g.add_edge(0, 1, 1.0);
        // {0}, {1}, {0,1}
        assert_eq!(clique_count(&g), 3);
    }

    #[test]
    fn test_triangle_counts_all_sizes() {
        let mut g = Ungraph::new();
        g.add_edge(0, 1, 1.0);
        g.add_edge(1, 2, 1.0);
        g.add_edge(0, 2, 1.0);
        // 3 singletons + 3 edges + 1 triangle
        let cliques = enumerate_all_cliques(&g);
        assert_eq!(cliques.len(), 7);
        assert!(cliques.contains(&vec![0, 1, 2]));
    }

    #[test]
    fn test_k4_is_fifteen_cliques() {
        let mut g = Ungraph::new();
        for u in 0..4u32 {
            for v in (u + 1)..4 {
                g.add_edge(u, v, 1.0);
            }
        }
        // Every nonempty subset of 4 nodes: 2^4 - 1
        assert_eq!(clique_count(&g), 15);
    }

    #[test]
    fn test_no_duplicates_on_path() {
        let mut g = Ungraph::new();
        g.add_edge(0, 1, 1.0);
        g.add_edge(1, 2, 1.0);
        let mut cliques = enumerate_all_cliques(&g);
        let before = cliques.len();
        cliques.sort();
        cliques.dedup();
        assert_eq!(cliques.len(), before);
        assert_eq!(before, 5); // 3 singletons + 2 edges
    }

    #[test]
    fn test_isolated_node_is_a_clique() {
        let mut g = Ungraph::new();
        g.add_node(9);
        assert_eq!(enumerate_all_cliques(&g), vec![vec![9]]);
    }
}
