//! Centrality measures: degree, betweenness (Brandes), eigenvector
//! (power iteration).
//!
//! All vectors follow the ascending node-id enumeration.

use crate::error::GraphError;
use crate::graph::{node_positions, sorted_nodes, NodeId, Ungraph};

use std::collections::VecDeque;

/// Normalized degree centrality: `deg / (n - 1)`.
pub fn degree_centrality(g: &Ungraph) -> Vec<f64> {
    let nodes = sorted_nodes(g);
    let n = nodes.len();
    if n <= 1 {
        return vec![0.0; n];
    }
    let denom = (n - 1) as f64;
    nodes
        .iter()
        .map(|&v| g.neighbors(v).count() as f64 / denom)
        .collect()
}

/// Betweenness centrality via Brandes' algorithm, normalized by
/// `(n-1)(n-2)` — the undirected convention where each unordered pair
/// is accumulated once from either endpoint. All zeros for `n <= 2`.
pub fn betweenness_centrality(g: &Ungraph) -> Vec<f64> {
    let nodes = sorted_nodes(g);
    let index = node_positions(&nodes);
    let n = nodes.len();
    if n <= 2 {
        return vec![0.0; n];
    }

    let mut bc = vec![0.0f64; n];

    for s in 0..n {
        let mut stack: Vec<usize> = Vec::new();
        let mut predecessors: Vec<Vec<usize>> = vec![vec![]; n];
        let mut sigma = vec![0.0f64; n]; // number of shortest paths
        let mut dist = vec![-1i64; n];
        let mut delta = vec![0.0f64; n];

        sigma[s] = 1.0;
        dist[s] = 0;

        let mut queue = VecDeque::new();
        queue.push_back(s);

        while let Some(v) = queue.pop_front() {
            stack.push(v);
            for w_id in g.neighbors(nodes[v]) {
                let w = index[&w_id];
                if dist[w] < 0 {
                    queue.push_back(w);
                    dist[w] = dist[v] + 1;
                }
                if dist[w] == dist[v] + 1 {
                    sigma[w] += sigma[v];
                    predecessors[w].push(v);
                }
            }
        }

        // Back-propagation of pair dependencies
        while let Some(w) = stack.pop() {
            for &v in &predecessors[w] {
                delta[v] += (sigma[v] / sigma[w]) * (1.0 + delta[w]);
            }
            if w != s {
                bc[w] += delta[w];
            }
        }
    }

    let scale = 1.0 / ((n - 1) as f64 * (n - 2) as f64);
    for b in bc.iter_mut() {
        *b *= scale;
    }
    bc
}

/// Eigenvector centrality by power iteration, L2-normalized each step;
/// converged when the L1 drift falls below `n * tol`.
pub fn eigenvector_centrality(
    g: &Ungraph,
    max_iter: usize,
    tol: f64,
) -> Result<Vec<f64>, GraphError> {
    let nodes = sorted_nodes(g);
    let index = node_positions(&nodes);
    let n = nodes.len();
    if n == 0 {
        return Err(GraphError::EmptyGraph);
    }

    let mut x = vec![1.0 / n as f64; n];

    for _ in 0..max_iter {
        let xlast = x.clone();
        for (v, &v_id) in nodes.iter().enumerate() {
            for w_id in g.neighbors(v_id) {
                x[index[&w_id]] += xlast[v];
            }
        }

        let norm = x.iter().map(|v| v * v).sum::<f64>().sqrt();
        let norm = if norm > 0.0 { norm } else { 1.0 };
        for v in x.iter_mut() {
            *v /= norm;
        }

        let drift: f64 = x
            .iter()
            .zip(xlast.iter())
            .map(|(a, b)| (a - b).abs())
            .sum();
        if drift < n as f64 * tol {
            return Ok(x);
        }
    }

    Err(GraphError::Convergence { max_iter, tol })
}

/// Star graph on `n` nodes (ids `0..n`, node 0 is the hub), unit weights.
pub fn star_graph(n: usize) -> Ungraph {
    let mut g = Ungraph::new();
    if n == 0 {
        return g;
    }
    g.add_node(0);
    for leaf in 1..n as NodeId {
        g.add_edge(0, leaf, 1.0);
    }
    g
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn path3() -> Ungraph {
        let mut g = Ungraph::new();
        g.add_edge(0, 1, 1.0);
        g.add_edge(1, 2, 1.0);
        g
    }

    #[test]
    fn test_degree_centrality_path() {
        let d = degree_centrality(&path3());
        assert_relative_eq!(d[0], 0.5, epsilon = 1e-12);
        assert_relative_eq!(d[1], 1.0, epsilon = 1e-12);
        assert_relative_eq!(d[2], 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_betweenness_path_graph() {
        // Middle of a 3-path carries the single 0..2 geodesic: 1.0
        let b = betweenness_centrality(&path3());
        assert_relative_eq!(b[0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(b[1], 1.0, epsilon = 1e-12);
        assert_relative_eq!(b[2], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_betweenness_path5_interior() {
        let mut g = Ungraph::new();
        for i in 0..4 {
            g.add_edge(i, i + 1, 1.0);
        }
        let b = betweenness_centrality(&g);
        // Node 2 sits on geodesics for pairs (0,3),(0,4),(1,3),(1,4)
        // out of C(4,2) = 6 pairs: 4/6
        assert_relative_eq!(b[2], 4.0 / 6.0, epsilon = 1e-12);
    }

    #[test]
    fn test_betweenness_small_graphs_zero() {
        let mut g = Ungraph::new();
        g.add_edge(0, 1, 1.0);
        assert_eq!(betweenness_centrality(&g), vec![0.0, 0.0]);
    }

    #[test]
    fn test_eigenvector_star_hub_dominates() {
        let g = star_graph(5);
        let x = eigenvector_centrality(&g, 1000, 1.0e-3).unwrap();
        assert!(x[0] > x[1]);
        for leaf in 2..5 {
            assert_relative_eq!(x[1], x[leaf], epsilon = 1e-6);
        }
    }

    #[test]
    fn test_eigenvector_regular_graph_uniform() {
        // 4-cycle: all nodes equivalent
        let mut g = Ungraph::new();
        g.add_edge(0, 1, 1.0);
        g.add_edge(1, 2, 1.0);
        g.add_edge(2, 3, 1.0);
        g.add_edge(3, 0, 1.0);
        let x = eigenvector_centrality(&g, 1000, 1.0e-3).unwrap();
        for v in 1..4 {
            assert_relative_eq!(x[0], x[v], epsilon = 1e-6);
        }
    }

    #[test]
    fn test_eigenvector_empty_graph_is_an_error() {
        let g = Ungraph::new();
        assert!(matches!(
            eigenvector_centrality(&g, 1000, 1.0e-3),
            Err(GraphError::EmptyGraph)
        ));
    }

    #[test]
    fn test_eigenvector_convergence_failure_surfaces() {
        let g = path3();
        let got = eigenvector_centrality(&g, 1, 1.0e-15);
        assert!(matches!(got, Err(GraphError::Convergence { .. })));
    }
}
