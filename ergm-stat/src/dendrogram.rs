//! Linkage construction from nested community partitions.
//!
//! Levels run coarsest (index 0) to finest. Leaves are the finest-level
//! communities; every coarser community must be a disjoint union of
//! communities one level down, and a merge is recorded wherever a
//! coarser community has two or more children. When the coarsest level
//! still holds several communities they are folded under one implicit
//! root, so the result is always a single tree.

use graph_util::community::{louvain_communities, LouvainConfig};
use graph_util::graph::{induced_subgraph, NodeId, Ungraph};

use log::info;
use thiserror::Error;

pub type Partition = Vec<Vec<NodeId>>;

/// A community that still refuses to split at this Louvain resolution
/// is broken into singletons.
pub const MAX_RESOLUTION: f64 = 1024.0;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DendrogramError {
    #[error("no community levels to build from")]
    Empty,
    #[error("community levels are not nested: {0}")]
    NestingViolation(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Merge {
    /// Cluster indices: leaves are 0..L-1, merged clusters L, L+1, ...
    pub left: usize,
    pub right: usize,
    /// Node count of the merged subtree.
    pub height: f64,
    /// Node count of the merged subtree.
    pub size: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Linkage {
    pub merges: Vec<Merge>,
    /// Finest-level communities, ordered by smallest member.
    pub leaves: Vec<Vec<NodeId>>,
}

impl Linkage {
    /// Leaf node ids flattened in leaf order.
    pub fn leaf_nodes(&self) -> Vec<NodeId> {
        self.leaves.iter().flatten().copied().collect()
    }
}

fn sorted_node_set(level: &Partition) -> Vec<NodeId> {
    let mut all: Vec<NodeId> = level.iter().flatten().copied().collect();
    all.sort_unstable();
    all
}

/// Fold a coarser community onto the clusters of the finer level below
/// it, recording one binary merge per extra child.
fn fold_children(
    children: Vec<usize>,
    counts: &mut Vec<usize>,
    merges: &mut Vec<Merge>,
    n_leaves: usize,
) -> usize {
    let mut cur = children[0];
    for &next in &children[1..] {
        let combined = counts[cur] + counts[next];
        merges.push(Merge {
            left: cur,
            right: next,
            height: combined as f64,
            size: combined,
        });
        counts.push(combined);
        cur = n_leaves + merges.len() - 1;
    }
    cur
}

/// Build a linkage from nested partitions, coarsest first.
pub fn build_linkage(levels: &[Partition]) -> Result<Linkage, DendrogramError> {
    let Some(finest) = levels.last() else {
        return Err(DendrogramError::Empty);
    };
    if finest.is_empty() {
        return Err(DendrogramError::Empty);
    }

    let all_nodes = sorted_node_set(finest);
    if all_nodes.is_empty() {
        return Err(DendrogramError::Empty);
    }
    for (k, level) in levels.iter().enumerate() {
        if sorted_node_set(level) != all_nodes {
            return Err(DendrogramError::NestingViolation(format!(
                "level {} does not partition the same node set",
                k
            )));
        }
    }

    let mut leaves: Vec<Vec<NodeId>> = finest
        .iter()
        .map(|c| {
            let mut c = c.clone();
            c.sort_unstable();
            c
        })
        .collect();
    leaves.sort_by_key(|c| c[0]);
    let n_leaves = leaves.len();

    // node -> current cluster index, updated as merges happen.
    let max_node = *all_nodes.last().unwrap() as usize;
    let mut cluster_of: Vec<usize> = vec![usize::MAX; max_node + 1];
    for (i, leaf) in leaves.iter().enumerate() {
        for &n in leaf {
            cluster_of[n as usize] = i;
        }
    }
    let mut counts: Vec<usize> = leaves.iter().map(|c| c.len()).collect();
    let mut merges: Vec<Merge> = vec![];

    for level in levels.iter().rev().skip(1) {
        let mut order: Vec<&Vec<NodeId>> = level.iter().collect();
        order.sort_by_key(|c| (c.len(), c.iter().min().copied()));

        for comm in order {
            let mut children: Vec<usize> = comm.iter().map(|&n| cluster_of[n as usize]).collect();
            children.sort_unstable();
            children.dedup();

            // A child split across two parents shows up as a cluster
            // whose node total exceeds what this community covers.
            let covered: usize = children.iter().map(|&c| counts[c]).sum();
            if covered != comm.len() {
                return Err(DendrogramError::NestingViolation(format!(
                    "community with {} nodes covers child clusters totaling {}",
                    comm.len(),
                    covered
                )));
            }

            if children.len() < 2 {
                continue;
            }
            let merged = fold_children(children, &mut counts, &mut merges, n_leaves);
            for &n in comm {
                cluster_of[n as usize] = merged;
            }
        }
    }

    // A multi-community coarsest level leaves a forest; fold the
    // remaining roots under one implicit root covering the whole graph.
    let mut roots: Vec<usize> = all_nodes.iter().map(|&n| cluster_of[n as usize]).collect();
    roots.sort_unstable();
    roots.dedup();
    if roots.len() > 1 {
        fold_children(roots, &mut counts, &mut merges, n_leaves);
    }

    Ok(Linkage { merges, leaves })
}

/// Nested Louvain levels for a graph, coarsest to finest.
///
/// Level 0 is the seeded Louvain partition at the base resolution; each
/// following level re-clusters every non-singleton community on its
/// induced subgraph at doubled resolution, so nesting holds by
/// construction. A community still whole beyond [`MAX_RESOLUTION`] is
/// split into singletons; the sequence ends when everything is a
/// singleton.
pub fn nested_levels(g: &Ungraph, seed: u64, base_resolution: f64) -> Vec<Partition> {
    let mut current = louvain_communities(
        g,
        &LouvainConfig {
            resolution: base_resolution,
            seed,
            ..Default::default()
        },
    );
    if current.is_empty() {
        return vec![];
    }
    let mut levels = vec![current.clone()];
    let mut resolution = base_resolution;

    while current.iter().any(|c| c.len() > 1) {
        resolution *= 2.0;
        let mut next: Partition = vec![];
        for comm in &current {
            if comm.len() == 1 {
                next.push(comm.clone());
                continue;
            }
            let sub = induced_subgraph(g, comm);
            let parts = louvain_communities(
                &sub,
                &LouvainConfig {
                    resolution,
                    seed,
                    ..Default::default()
                },
            );
            if parts.len() <= 1 {
                if resolution > MAX_RESOLUTION {
                    next.extend(comm.iter().map(|&n| vec![n]));
                } else {
                    next.push(comm.clone());
                }
            } else {
                next.extend(parts);
            }
        }
        if next != current {
            current = next;
            levels.push(current.clone());
        } else {
            current = next;
        }
    }

    info!("{} nested community level(s)", levels.len());
    levels
}
