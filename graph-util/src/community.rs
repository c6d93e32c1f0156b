//! Louvain community detection with a seeded, reproducible visit order.

use crate::graph::{node_positions, sorted_nodes, NodeId, Ungraph};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

#[derive(Debug, Clone, Copy)]
pub struct LouvainConfig {
    /// Modularity resolution parameter (gamma); larger values favor
    /// more, smaller communities.
    pub resolution: f64,
    /// Cap on aggregation levels.
    pub max_iterations: usize,
    /// Seed for the node visit order inside each local-move phase.
    pub seed: u64,
}

impl Default for LouvainConfig {
    fn default() -> Self {
        Self {
            resolution: 1.0,
            max_iterations: 10,
            seed: 42,
        }
    }
}

/// Weighted adjacency over dense indices plus per-node self-loop weight,
/// the working representation across aggregation levels.
struct Level {
    adj: Vec<Vec<(usize, f64)>>,
    self_weight: Vec<f64>,
}

impl Level {
    fn node_count(&self) -> usize {
        self.adj.len()
    }

    /// Weighted degree including twice the self-loop weight.
    fn degrees(&self) -> Vec<f64> {
        self.adj
            .iter()
            .zip(self.self_weight.iter())
            .map(|(nbrs, &sw)| nbrs.iter().map(|&(_, w)| w).sum::<f64>() + 2.0 * sw)
            .collect()
    }
}

/// Community assignment after one local-move phase, renumbered densely
/// in order of first appearance.
fn local_move(level: &Level, two_m: f64, gamma: f64, rng: &mut StdRng) -> Vec<usize> {
    let n = level.node_count();
    let degree = level.degrees();

    let mut community: Vec<usize> = (0..n).collect();
    let mut tot: Vec<f64> = degree.clone();

    let mut order: Vec<usize> = (0..n).collect();
    let mut moved = true;
    while moved {
        moved = false;
        order.shuffle(rng);
        for &v in &order {
            let cur = community[v];
            tot[cur] -= degree[v];

            // Edge weight from v into each neighboring community.
            let mut w_to: Vec<(usize, f64)> = vec![];
            for &(u, w) in &level.adj[v] {
                let c = community[u];
                match w_to.iter_mut().find(|(cc, _)| *cc == c) {
                    Some((_, acc)) => *acc += w,
                    None => w_to.push((c, w)),
                }
            }
            w_to.sort_unstable_by_key(|&(c, _)| c);

            let gain = |c: usize, w_ic: f64| w_ic - gamma * degree[v] * tot[c] / two_m;

            let mut best_c = cur;
            let mut best_gain = gain(cur, w_to.iter().find(|&&(c, _)| c == cur).map_or(0.0, |&(_, w)| w));
            for &(c, w_ic) in &w_to {
                if c == cur {
                    continue;
                }
                let g = gain(c, w_ic);
                if g > best_gain {
                    best_gain = g;
                    best_c = c;
                }
            }

            tot[best_c] += degree[v];
            if best_c != cur {
                community[v] = best_c;
                moved = true;
            }
        }
    }

    // Renumber densely by first appearance.
    let mut remap: Vec<Option<usize>> = vec![None; n];
    let mut next = 0;
    community
        .iter()
        .map(|&c| {
            *remap[c].get_or_insert_with(|| {
                let id = next;
                next += 1;
                id
            })
        })
        .collect()
}

/// Collapse a level onto its communities, summing parallel edge weights.
fn aggregate(level: &Level, community: &[usize], n_comms: usize) -> Level {
    let mut self_weight = vec![0.0; n_comms];
    let mut maps: Vec<std::collections::HashMap<usize, f64>> = vec![Default::default(); n_comms];

    for (v, nbrs) in level.adj.iter().enumerate() {
        let cv = community[v];
        self_weight[cv] += level.self_weight[v];
        for &(u, w) in nbrs {
            let cu = community[u];
            if cu == cv {
                // Both endpoints visit the edge, so halve it.
                self_weight[cv] += w / 2.0;
            } else {
                *maps[cv].entry(cu).or_insert(0.0) += w;
            }
        }
    }

    let adj = maps
        .into_iter()
        .map(|m| {
            let mut nbrs: Vec<(usize, f64)> = m.into_iter().collect();
            nbrs.sort_unstable_by_key(|&(u, _)| u);
            nbrs
        })
        .collect();
    Level { adj, self_weight }
}

/// Louvain communities of a weighted undirected graph. Members ascend
/// within each community; communities are ordered by size descending,
/// then by smallest member. Fully determined by the config seed.
pub fn louvain_communities(g: &Ungraph, config: &LouvainConfig) -> Vec<Vec<NodeId>> {
    let nodes = sorted_nodes(g);
    let index = node_positions(&nodes);
    let n = nodes.len();
    if n == 0 {
        return vec![];
    }

    let mut adj: Vec<Vec<(usize, f64)>> = vec![vec![]; n];
    for (u, v, &w) in g.all_edges() {
        let (iu, iv) = (index[&u], index[&v]);
        adj[iu].push((iv, w));
        adj[iv].push((iu, w));
    }
    for nbrs in adj.iter_mut() {
        nbrs.sort_unstable_by_key(|&(u, _)| u);
    }
    let mut level = Level {
        adj,
        self_weight: vec![0.0; n],
    };

    let two_m: f64 = level.degrees().iter().sum();
    if two_m <= 0.0 {
        // No edges: every node is its own community.
        return nodes.iter().map(|&v| vec![v]).collect();
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut membership: Vec<usize> = (0..n).collect();

    for _ in 0..config.max_iterations {
        let community = local_move(&level, two_m, config.resolution, &mut rng);
        let n_comms = community.iter().max().map_or(0, |&c| c + 1);
        if n_comms == level.node_count() {
            break;
        }
        for m in membership.iter_mut() {
            *m = community[*m];
        }
        level = aggregate(&level, &community, n_comms);
    }

    let n_comms = membership.iter().max().map_or(0, |&c| c + 1);
    let mut comms: Vec<Vec<NodeId>> = vec![vec![]; n_comms];
    for (v, &c) in membership.iter().enumerate() {
        comms[c].push(nodes[v]);
    }
    comms.sort_by(|a, b| b.len().cmp(&a.len()).then(a[0].cmp(&b[0])));
    comms
}

/// Number of Louvain communities.
pub fn community_count(g: &Ungraph, config: &LouvainConfig) -> usize {
    louvain_communities(g, config).len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_cliques_with_bridge() -> Ungraph {
        let mut g = Ungraph::new();
        for block in [0u32, 10] {
            for u in 0..4 {
                for v in (u + 1)..4 {
                    g.add_edge(block + u, block + v, 1.0);
                }
            }
        }
        g.add_edge(3, 10, 1.0);
        g
    }

    #[test]
    fn test_two_cliques_split() {
        let comms = louvain_communities(&two_cliques_with_bridge(), &LouvainConfig::default());
        assert_eq!(comms.len(), 2);
        assert_eq!(comms[0], vec![0, 1, 2, 3]);
        assert_eq!(comms[1], vec![10, 11, 12, 13]);
    }

    #[test]
    fn test_same_seed_same_partition() {
        let g = two_cliques_with_bridge();
        let cfg = LouvainConfig {
            seed: 7,
            ..Default::default()
        };
        assert_eq!(
            louvain_communities(&g, &cfg),
            louvain_communities(&g, &cfg)
        );
    }

    #[test]
    fn test_partition_covers_all_nodes_once() {
        let g = two_cliques_with_bridge();
        let comms = louvain_communities(&g, &LouvainConfig::default());
        let mut seen: Vec<NodeId> = comms.into_iter().flatten().collect();
        seen.sort_unstable();
        let mut expected: Vec<NodeId> = g.nodes().collect();
        expected.sort_unstable();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_edgeless_graph_is_all_singletons() {
        let mut g = Ungraph::new();
        g.add_node(1);
        g.add_node(5);
        let comms = louvain_communities(&g, &LouvainConfig::default());
        assert_eq!(comms, vec![vec![1], vec![5]]);
    }

    #[test]
    fn test_high_resolution_fragments() {
        let g = two_cliques_with_bridge();
        let coarse = community_count(&g, &LouvainConfig::default());
        let fine = community_count(
            &g,
            &LouvainConfig {
                resolution: 100.0,
                ..Default::default()
            },
        );
        assert!(fine >= coarse);
    }
}
