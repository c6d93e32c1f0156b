//! Co-occurrence pair aggregation.
//!
//! Groups are reference lists (co-citation) or token lists
//! (co-occurrence). Within a group every unordered pair of distinct
//! items counts once, however often the items repeat; counts accumulate
//! over groups, pairs seen only once are dropped, and the surviving
//! weighted graph is restricted to its largest component.

use crate::common::*;

use graph_util::graph::{canonical_pair, PairGraph};
use graph_util::prune::{remove_isolates, restrict_to_largest_component};
use std::collections::{BTreeSet, HashMap};

/// Pair counts over all groups; keys are canonical label pairs.
pub fn pair_counts(groups: &[Vec<Box<str>>]) -> HashMap<(Box<str>, Box<str>), usize> {
    let mut counts = HashMap::new();
    for group in groups {
        // Dedup first so a pair counts at most once per group.
        let distinct: BTreeSet<&str> = group.iter().map(|s| s.as_ref()).collect();
        let items: Vec<&str> = distinct.into_iter().collect();
        for (i, &a) in items.iter().enumerate() {
            for &b in &items[i + 1..] {
                *counts.entry(canonical_pair(a, b)).or_insert(0) += 1;
            }
        }
    }
    counts
}

/// Aggregate groups into the pruned pair graph: weight = number of
/// groups sharing the pair, weight > 1 kept, largest component only.
pub fn build_pair_graph(groups: &[Vec<Box<str>>]) -> PairGraph {
    let counts = pair_counts(groups);
    let total = counts.len();

    let mut pg = PairGraph::default();
    for ((a, b), count) in counts {
        if count > 1 {
            let u = pg.labels.intern(&a);
            let v = pg.labels.intern(&b);
            pg.graph.add_edge(u, v, count as f64);
        }
    }
    info!(
        "kept {} of {} candidate pair(s)",
        pg.graph.edge_count(),
        total
    );

    restrict_to_largest_component(&mut pg.graph);
    remove_isolates(&mut pg.graph);
    pg
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups(raw: &[&[&str]]) -> Vec<Vec<Box<str>>> {
        raw.iter()
            .map(|g| g.iter().map(|&s| s.into()).collect())
            .collect()
    }

    #[test]
    fn test_three_group_aggregation() {
        // Pairs: (a,b) twice, (b,c) twice, (a,c) once; only the
        // repeated pairs survive, both at weight 2.
        let pg = build_pair_graph(&groups(&[&["a", "b", "c"], &["a", "b"], &["b", "c"]]));
        let edges = pg.sorted_edges();
        assert_eq!(
            edges,
            vec![
                ("a".into(), "b".into(), 2.0),
                ("b".into(), "c".into(), 2.0),
            ]
        );
    }

    #[test]
    fn test_duplicates_in_a_group_count_once() {
        let pg = build_pair_graph(&groups(&[&["a", "b", "a", "b"], &["a", "b"]]));
        let edges = pg.sorted_edges();
        assert_eq!(edges, vec![("a".into(), "b".into(), 2.0)]);
    }

    #[test]
    fn test_counts_independent_of_group_order() {
        let fwd = groups(&[&["a", "b", "c"], &["a", "b"], &["b", "c"]]);
        let mut rev = fwd.clone();
        rev.reverse();
        assert_eq!(pair_counts(&fwd), pair_counts(&rev));
    }

    #[test]
    fn test_smaller_component_dropped() {
        let pg = build_pair_graph(&groups(&[
            &["a", "b", "c"],
            &["a", "b", "c"],
            &["x", "y"],
            &["x", "y"],
        ]));
        assert_eq!(pg.graph.edge_count(), 3);
        assert!(pg.labels.get("x").is_none() || {
            let x = pg.labels.get("x").unwrap();
            !pg.graph.contains_node(x)
        });
    }

    #[test]
    fn test_singleton_groups_contribute_nothing() {
        let pg = build_pair_graph(&groups(&[&["a"], &["b"]]));
        assert_eq!(pg.graph.edge_count(), 0);
        assert_eq!(pg.graph.node_count(), 0);
    }
}
