//! Scalar graph statistics evaluated on undirected weighted graphs.
//!
//! Each statistic is a variant of [`Statistic`]; parameterized ones
//! carry their parameters so the caller never needs special-cased entry
//! points. All evaluate on the graph topology; edge weights are ignored
//! except by community detection.

use graph_util::centrality::{
    betweenness_centrality, degree_centrality, eigenvector_centrality, star_graph,
};
use graph_util::cliques::clique_count;
use graph_util::clustering::{average_clustering, transitivity, triangle_count};
use graph_util::community::{community_count, LouvainConfig};
use graph_util::components::count_components;
use graph_util::error::GraphError;
use graph_util::graph::{sorted_nodes, Ungraph};
use graph_util::paths::{closeness_centrality, geodesic_mean};

use thiserror::Error;

pub const EIGENVECTOR_MAX_ITER: usize = 1000;
pub const EIGENVECTOR_TOL: f64 = 1.0e-3;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatError {
    #[error("statistic {0} is undefined on this graph")]
    Undefined(&'static str),
    #[error("statistic failed to converge within {max_iter} iterations (tol {tol:e})")]
    Convergence { max_iter: usize, tol: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Statistic {
    /// Number of edges.
    Edges,
    /// Number of distinct triangles.
    Triangles,
    /// Mean betweenness centrality.
    Betweenness,
    /// Mean closeness centrality.
    Closeness,
    /// Mean eigenvector centrality.
    Eigenvector,
    /// Freeman degree centralization.
    Centralization,
    /// Gini coefficient of the degree sequence.
    Gini,
    /// Average local clustering coefficient.
    Clustering,
    /// Global transitivity.
    Transitivity,
    /// Count of complete subgraphs of every size, including singletons.
    /// Exhaustive enumeration, combinatorial on dense graphs.
    Cliques,
    /// Connected component count.
    Components,
    /// Number of Louvain communities at the given resolution.
    CommunityCount { seed: u64, resolution: f64 },
    /// Number of k-stars: sum over nodes of C(deg, k).
    Star { k: usize },
    /// Mean geodesic distance within the largest component.
    Geodesic,
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn binomial(n: usize, k: usize) -> f64 {
    if k > n {
        return 0.0;
    }
    let mut acc = 1.0;
    for i in 0..k {
        acc *= (n - i) as f64 / (i + 1) as f64;
    }
    acc
}

fn degree_centralization(g: &Ungraph) -> Result<f64, StatError> {
    let n = g.node_count();
    if n < 3 {
        return Err(StatError::Undefined("centralization"));
    }
    let spread = |c: &[f64]| -> f64 {
        let max = c.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        c.iter().map(|&v| max - v).sum()
    };
    let observed = spread(&degree_centrality(g));
    let ideal = spread(&degree_centrality(&star_graph(n)));
    if ideal <= 0.0 {
        return Err(StatError::Undefined("centralization"));
    }
    Ok(observed / ideal)
}

fn degree_gini(g: &Ungraph) -> Result<f64, StatError> {
    let nodes = sorted_nodes(g);
    let deg: Vec<f64> = nodes.iter().map(|&v| g.neighbors(v).count() as f64).collect();
    let n = deg.len();
    let mu = mean(&deg);
    if n == 0 || mu <= 0.0 {
        return Err(StatError::Undefined("gini"));
    }
    let mut mad = 0.0;
    for &a in &deg {
        for &b in &deg {
            mad += (a - b).abs();
        }
    }
    mad /= (n * n) as f64;
    Ok(0.5 * mad / mu)
}

impl Statistic {
    pub fn name(&self) -> &'static str {
        match self {
            Statistic::Edges => "edges",
            Statistic::Triangles => "triangles",
            Statistic::Betweenness => "betweenness",
            Statistic::Closeness => "closeness",
            Statistic::Eigenvector => "eigenvector",
            Statistic::Centralization => "centralization",
            Statistic::Gini => "gini",
            Statistic::Clustering => "clustering",
            Statistic::Transitivity => "transitivity",
            Statistic::Cliques => "cliques",
            Statistic::Components => "components",
            Statistic::CommunityCount { .. } => "communities",
            Statistic::Star { .. } => "stars",
            Statistic::Geodesic => "geodesic",
        }
    }

    pub fn evaluate(&self, g: &Ungraph) -> Result<f64, StatError> {
        match *self {
            Statistic::Edges => Ok(g.edge_count() as f64),
            Statistic::Triangles => Ok(triangle_count(g) as f64),
            Statistic::Betweenness => Ok(mean(&betweenness_centrality(g))),
            Statistic::Closeness => Ok(mean(&closeness_centrality(g))),
            Statistic::Eigenvector => {
                let x = eigenvector_centrality(g, EIGENVECTOR_MAX_ITER, EIGENVECTOR_TOL).map_err(
                    |e| match e {
                        GraphError::Convergence { max_iter, tol } => {
                            StatError::Convergence { max_iter, tol }
                        }
                        _ => StatError::Undefined("eigenvector"),
                    },
                )?;
                Ok(mean(&x))
            }
            Statistic::Centralization => degree_centralization(g),
            Statistic::Gini => degree_gini(g),
            Statistic::Clustering => {
                if g.node_count() == 0 {
                    Err(StatError::Undefined("clustering"))
                } else {
                    Ok(average_clustering(g))
                }
            }
            Statistic::Transitivity => Ok(transitivity(g)),
            Statistic::Cliques => Ok(clique_count(g) as f64),
            Statistic::Components => Ok(count_components(g) as f64),
            Statistic::CommunityCount { seed, resolution } => {
                let config = LouvainConfig {
                    resolution,
                    seed,
                    ..Default::default()
                };
                Ok(community_count(g, &config) as f64)
            }
            Statistic::Star { k } => Ok(sorted_nodes(g)
                .iter()
                .map(|&v| binomial(g.neighbors(v).count(), k))
                .sum()),
            Statistic::Geodesic => {
                geodesic_mean(g).ok_or(StatError::Undefined("geodesic"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn triangle_plus_tail() -> Ungraph {
        let mut g = Ungraph::new();
        g.add_edge(0, 1, 1.0);
        g.add_edge(1, 2, 1.0);
        g.add_edge(0, 2, 1.0);
        g.add_edge(2, 3, 1.0);
        g
    }

    #[test]
    fn test_counting_statistics() {
        let g = triangle_plus_tail();
        assert_relative_eq!(Statistic::Edges.evaluate(&g).unwrap(), 4.0);
        assert_relative_eq!(Statistic::Triangles.evaluate(&g).unwrap(), 1.0);
        assert_relative_eq!(Statistic::Components.evaluate(&g).unwrap(), 1.0);
    }

    #[test]
    fn test_star_statistic_is_binomial_sum() {
        // Degrees 2, 2, 3, 1: C(2,2) + C(2,2) + C(3,2) + C(1,2) = 5.
        let g = triangle_plus_tail();
        assert_relative_eq!(Statistic::Star { k: 2 }.evaluate(&g).unwrap(), 5.0);
        // k = 1 reduces to twice the edge count.
        assert_relative_eq!(Statistic::Star { k: 1 }.evaluate(&g).unwrap(), 8.0);
    }

    #[test]
    fn test_star_centralization_is_one() {
        let g = star_graph(5);
        assert_relative_eq!(
            Statistic::Centralization.evaluate(&g).unwrap(),
            1.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_centralization_undefined_below_three_nodes() {
        let mut g = Ungraph::new();
        g.add_edge(0, 1, 1.0);
        assert_eq!(
            Statistic::Centralization.evaluate(&g),
            Err(StatError::Undefined("centralization"))
        );
    }

    #[test]
    fn test_gini_zero_for_regular_graph() {
        let mut g = Ungraph::new();
        g.add_edge(0, 1, 1.0);
        g.add_edge(1, 2, 1.0);
        g.add_edge(2, 0, 1.0);
        assert_relative_eq!(Statistic::Gini.evaluate(&g).unwrap(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_gini_undefined_without_edges() {
        let mut g = Ungraph::new();
        g.add_node(0);
        assert_eq!(
            Statistic::Gini.evaluate(&g),
            Err(StatError::Undefined("gini"))
        );
    }

    #[test]
    fn test_geodesic_undefined_on_singleton() {
        let mut g = Ungraph::new();
        g.add_node(0);
        assert_eq!(
            Statistic::Geodesic.evaluate(&g),
            Err(StatError::Undefined("geodesic"))
        );
    }

    #[test]
    fn test_clustering_undefined_on_empty_graph() {
        let g = Ungraph::new();
        assert_eq!(
            Statistic::Clustering.evaluate(&g),
            Err(StatError::Undefined("clustering"))
        );
    }

    #[test]
    fn test_community_count_is_seed_stable() {
        let g = triangle_plus_tail();
        let s = Statistic::CommunityCount {
            seed: 11,
            resolution: 1.0,
        };
        assert_eq!(s.evaluate(&g), s.evaluate(&g));
    }
}
