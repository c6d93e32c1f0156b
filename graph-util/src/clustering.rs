//! Triangle counts, local clustering coefficients, and transitivity.

use crate::graph::{node_positions, sorted_neighbors, sorted_nodes, Ungraph};

/// Triangles through each node (ascending id order). Each triangle is
/// counted once per corner, so the graph-level total is the sum over
/// nodes divided by three.
pub fn triangles_per_node(g: &Ungraph) -> Vec<usize> {
    let nodes = sorted_nodes(g);
    let index = node_positions(&nodes);
    let n = nodes.len();

    let adj: Vec<Vec<usize>> = nodes
        .iter()
        .map(|&v| {
            sorted_neighbors(g, v)
                .into_iter()
                .map(|w| index[&w])
                .collect()
        })
        .collect();

    let mut member = vec![false; n];
    let mut tri = vec![0usize; n];
    for v in 0..n {
        for &w in &adj[v] {
            member[w] = true;
        }
        let mut count = 0;
        for &w in &adj[v] {
            count += adj[w].iter().filter(|&&x| member[x]).count();
        }
        // Every neighbor pair edge is seen from both endpoints.
        tri[v] = count / 2;
        for &w in &adj[v] {
            member[w] = false;
        }
    }
    tri
}

/// Total number of distinct triangles.
pub fn triangle_count(g: &Ungraph) -> usize {
    triangles_per_node(g).iter().sum::<usize>() / 3
}

/// Local clustering coefficient per node: triangles through the node
/// over `C(deg, 2)`; zero for degree below two.
pub fn local_clustering(g: &Ungraph) -> Vec<f64> {
    let nodes = sorted_nodes(g);
    let tri = triangles_per_node(g);
    nodes
        .iter()
        .zip(tri.iter())
        .map(|(&v, &t)| {
            let d = g.neighbors(v).count();
            if d < 2 {
                0.0
            } else {
                2.0 * t as f64 / (d * (d - 1)) as f64
            }
        })
        .collect()
}

/// Average local clustering coefficient; zero on an empty graph.
pub fn average_clustering(g: &Ungraph) -> f64 {
    let c = local_clustering(g);
    if c.is_empty() {
        0.0
    } else {
        c.iter().sum::<f64>() / c.len() as f64
    }
}

/// Global transitivity: `3 * triangles / open-and-closed triads`, where
/// the denominator is the sum of `C(deg, 2)` over nodes. Zero when no
/// node has degree two or more.
pub fn transitivity(g: &Ungraph) -> f64 {
    let nodes = sorted_nodes(g);
    let tri: usize = triangles_per_node(g).iter().sum();
    let triads: usize = nodes
        .iter()
        .map(|&v| {
            let d = g.neighbors(v).count();
            d * d.saturating_sub(1) / 2
        })
        .sum();
    if triads == 0 {
        0.0
    } else {
        tri as f64 / triads as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn triangle_plus_tail() -> Ungraph {
        // 0-1-2 triangle with a pendant 2-3 edge.
        let mut g = Ungraph::new();
        g.add_edge(0, 1, 1.0);
        g.add_edge(1, 2, 1.0);
        g.add_edge(0, 2, 1.0);
        g.add_edge(2, 3, 1.0);
        g
    }

    #[test]
    fn test_triangle_counts() {
        let g = triangle_plus_tail();
        assert_eq!(triangles_per_node(&g), vec![1, 1, 1, 0]);
        assert_eq!(triangle_count(&g), 1);
    }

    #[test]
    fn test_local_clustering() {
        let c = local_clustering(&triangle_plus_tail());
        assert_relative_eq!(c[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(c[1], 1.0, epsilon = 1e-12);
        assert_relative_eq!(c[2], 1.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(c[3], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_transitivity_triangle_with_tail() {
        // 3 triangle corners over triads 1 + 1 + 3 + 0 = 5.
        assert_relative_eq!(transitivity(&triangle_plus_tail()), 3.0 / 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_transitivity_triangle_free() {
        let mut g = Ungraph::new();
        g.add_edge(0, 1, 1.0);
        g.add_edge(1, 2, 1.0);
        assert_relative_eq!(transitivity(&g), 0.0, epsilon = 1e-12);
        assert_relative_eq!(average_clustering(&g), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_complete_graph_fully_transitive() {
        let mut g = Ungraph::new();
        for u in 0..4u32 {
            for v in (u + 1)..4 {
                g.add_edge(u, v, 1.0);
            }
        }
        assert_relative_eq!(transitivity(&g), 1.0, epsilon = 1e-12);
        assert_relative_eq!(average_clustering(&g), 1.0, epsilon = 1e-12);
        assert_eq!(triangle_count(&g), 4);
    }
}
