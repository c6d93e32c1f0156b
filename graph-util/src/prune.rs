//! Pruning passes applied to freshly built corpus graphs: cycle
//! breaking, restriction to the largest (weakly) connected component,
//! and isolate removal.

use crate::components::{connected_components, largest_component, weak_components};
use crate::graph::{Digraph, NodeId, Ungraph};

use log::info;
use petgraph::Direction;
use std::collections::HashMap;

/// Find one directed cycle, deterministically.
///
/// Depth-first search starting from nodes in ascending id order,
/// neighbors visited in ascending id order. The returned sequence is
/// the gray-stack suffix beginning at the back-edge target, so the
/// cycle's closing edge runs from its last node back to its first.
pub fn find_cycle(g: &Digraph) -> Option<Vec<NodeId>> {
    const WHITE: u8 = 0;
    const GRAY: u8 = 1;
    const BLACK: u8 = 2;

    let mut roots: Vec<NodeId> = g.nodes().collect();
    roots.sort_unstable();
    let mut color: HashMap<NodeId, u8> = roots.iter().map(|&n| (n, WHITE)).collect();

    let sorted_out = |n: NodeId| -> Vec<NodeId> {
        let mut nbrs: Vec<NodeId> = g.neighbors_directed(n, Direction::Outgoing).collect();
        nbrs.sort_unstable();
        nbrs
    };

    for &root in &roots {
        if color[&root] != WHITE {
            continue;
        }
        let mut path: Vec<NodeId> = vec![root];
        let mut nbrs: Vec<Vec<NodeId>> = vec![sorted_out(root)];
        let mut cursor: Vec<usize> = vec![0];
        color.insert(root, GRAY);

        while let Some(&v) = path.last() {
            let depth = path.len() - 1;
            if cursor[depth] < nbrs[depth].len() {
                let w = nbrs[depth][cursor[depth]];
                cursor[depth] += 1;
                match color[&w] {
                    WHITE => {
                        color.insert(w, GRAY);
                        path.push(w);
                        nbrs.push(sorted_out(w));
                        cursor.push(0);
                    }
                    GRAY => {
                        // Back edge v -> w closes a cycle w .. v.
                        let start = path.iter().position(|&x| x == w).unwrap();
                        return Some(path[start..].to_vec());
                    }
                    _ => {}
                }
            } else {
                color.insert(v, BLACK);
                path.pop();
                nbrs.pop();
                cursor.pop();
            }
        }
    }
    None
}

pub fn is_acyclic(g: &Digraph) -> bool {
    find_cycle(g).is_none()
}

/// Break every directed cycle by removing the closing edge (last node
/// back to first) of the first cycle found, then re-searching. One edge
/// is removed per detected cycle; the search restarts after each fix,
/// so the result is independent of edge insertion order.
pub fn break_cycles(g: &mut Digraph) -> Vec<(NodeId, NodeId)> {
    let mut removed = vec![];
    while let Some(cycle) = find_cycle(g) {
        let u = *cycle.last().unwrap();
        let v = cycle[0];
        g.remove_edge(u, v);
        removed.push((u, v));
    }
    if !removed.is_empty() {
        info!("broke {} citation cycle(s)", removed.len());
    }
    removed
}

/// Keep only the largest weakly-connected component (ties:
/// first-encountered over the ascending node enumeration). Returns the
/// number of nodes removed.
pub fn restrict_to_largest_weak_component(g: &mut Digraph) -> usize {
    let comps = weak_components(g);
    let Some(keep) = largest_component(&comps) else {
        return 0;
    };
    let mut dropped = 0;
    for (i, comp) in comps.iter().enumerate() {
        if i == keep {
            continue;
        }
        for &n in comp {
            g.remove_node(n);
            dropped += 1;
        }
    }
    dropped
}

/// Undirected counterpart of [`restrict_to_largest_weak_component`].
pub fn restrict_to_largest_component(g: &mut Ungraph) -> usize {
    let comps = connected_components(g);
    let Some(keep) = largest_component(&comps) else {
        return 0;
    };
    let mut dropped = 0;
    for (i, comp) in comps.iter().enumerate() {
        if i == keep {
            continue;
        }
        for &n in comp {
            g.remove_node(n);
            dropped += 1;
        }
    }
    dropped
}

/// Remove nodes with no incident edges. Returns the number removed.
pub fn remove_isolates_directed(g: &mut Digraph) -> usize {
    let isolates: Vec<NodeId> = g
        .nodes()
        .filter(|&n| {
            g.neighbors_directed(n, Direction::Outgoing).next().is_none()
                && g.neighbors_directed(n, Direction::Incoming).next().is_none()
        })
        .collect();
    for &n in &isolates {
        g.remove_node(n);
    }
    isolates.len()
}

/// Remove nodes with no incident edges. Returns the number removed.
pub fn remove_isolates(g: &mut Ungraph) -> usize {
    let isolates: Vec<NodeId> = g
        .nodes()
        .filter(|&n| g.neighbors(n).next().is_none())
        .collect();
    for &n in &isolates {
        g.remove_node(n);
    }
    isolates.len()
}
