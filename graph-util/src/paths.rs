//! Unweighted shortest-path routines: BFS distances, closeness
//! centrality, and the mean geodesic distance.

use crate::components::{connected_components, largest_component};
use crate::graph::{induced_subgraph, node_positions, sorted_nodes, NodeId, Ungraph};

use std::collections::{HashMap, VecDeque};

/// BFS hop distances from `source` over the dense enumeration `nodes`;
/// unreachable nodes hold -1.
pub fn bfs_distances(
    g: &Ungraph,
    source: usize,
    nodes: &[NodeId],
    index: &HashMap<NodeId, usize>,
) -> Vec<i64> {
    let n = nodes.len();
    let mut dist = vec![-1i64; n];
    dist[source] = 0;

    let mut queue = VecDeque::new();
    queue.push_back(source);

    while let Some(v) = queue.pop_front() {
        for w_id in g.neighbors(nodes[v]) {
            let w = index[&w_id];
            if dist[w] < 0 {
                dist[w] = dist[v] + 1;
                queue.push_back(w);
            }
        }
    }
    dist
}

/// Closeness centrality per node (ascending id order), using the
/// connected-component scaling `((r-1)/sum_d) * ((r-1)/(n-1))` where `r`
/// counts the nodes reachable from the source.
pub fn closeness_centrality(g: &Ungraph) -> Vec<f64> {
    let nodes = sorted_nodes(g);
    let index = node_positions(&nodes);
    let n = nodes.len();

    (0..n)
        .map(|s| {
            let dist = bfs_distances(g, s, &nodes, &index);
            let mut total = 0i64;
            let mut reachable = 0i64; // excluding the source
            for &d in &dist {
                if d > 0 {
                    total += d;
                    reachable += 1;
                }
            }
            if total > 0 && n > 1 {
                let c = reachable as f64 / total as f64;
                c * (reachable as f64 / (n - 1) as f64)
            } else {
                0.0
            }
        })
        .collect()
}

/// Mean shortest-path length over ordered node pairs of the largest
/// connected component; `None` when that component has fewer than two
/// nodes.
pub fn geodesic_mean(g: &Ungraph) -> Option<f64> {
    let comps = connected_components(g);
    let keep = largest_component(&comps)?;
    let comp = &comps[keep];
    if comp.len() < 2 {
        return None;
    }

    let sub = induced_subgraph(g, comp);
    let nodes = sorted_nodes(&sub);
    let index = node_positions(&nodes);
    let nc = nodes.len();

    let mut total = 0i64;
    for s in 0..nc {
        for &d in &bfs_distances(&sub, s, &nodes, &index) {
            if d > 0 {
                total += d;
            }
        }
    }
    Some(total as f64 / (nc * (nc - 1)) as f64)
}
