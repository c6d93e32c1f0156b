use crate::common::*;

use ergm_stat::dendrogram::{build_linkage, nested_levels};
use graph_util::edge_list::{open_buf_writer, read_pair_graph};

use clap::Parser;
use std::io::Write;

#[derive(Parser, Debug, Clone)]
pub struct DendrogramArgs {
    /// edge-list graph file, `u v [weight]` per line (`.gz` transparent)
    #[arg(required = true)]
    data_file: Box<str>,

    /// random seed for the Louvain refinement
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Louvain resolution at the coarsest level
    #[arg(long, default_value_t = 1.0)]
    resolution: f64,

    /// output linkage file, `left right height size` per merge; leaf
    /// labels go to `<out>.leaves`
    #[arg(long, short, required = true)]
    out: Box<str>,

    /// number of threads (0 = all cores)
    #[arg(long, default_value_t = 1)]
    threads: usize,

    /// verbosity
    #[arg(long, short)]
    verbose: bool,
}

pub fn run_dendrogram(args: DendrogramArgs) -> anyhow::Result<()> {
    setup_env(args.verbose, args.threads)?;

    let pg = read_pair_graph(&args.data_file)?;
    info!(
        "{} node(s), {} edge(s)",
        pg.graph.node_count(),
        pg.graph.edge_count()
    );

    let levels = nested_levels(&pg.graph, args.seed, args.resolution);
    let linkage = build_linkage(&levels)?;
    info!(
        "{} leaf cluster(s), {} merge(s)",
        linkage.leaves.len(),
        linkage.merges.len()
    );

    let mut buf = open_buf_writer(&args.out)?;
    for m in &linkage.merges {
        writeln!(buf, "{}\t{}\t{}\t{}", m.left, m.right, m.height, m.size)?;
    }
    buf.flush()?;

    let mut buf = open_buf_writer(&format!("{}.leaves", args.out))?;
    for id in linkage.leaf_nodes() {
        writeln!(buf, "{}", pg.labels.label(id))?;
    }
    buf.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dendrogram_end_to_end() {
        let dir = tempfile::TempDir::new().unwrap();
        let data = dir.path().join("g.edges").to_str().unwrap().to_string();
        let out = dir.path().join("linkage.tsv").to_str().unwrap().to_string();
        // Two triangles joined by one bridge.
        std::fs::write(
            &data,
            "a b 2\nb c 2\na c 2\nx y 2\ny z 2\nx z 2\nc x 2\n",
        )
        .unwrap();

        run_dendrogram(DendrogramArgs {
            data_file: data.into(),
            seed: 42,
            resolution: 1.0,
            out: out.clone().into(),
            threads: 1,
            verbose: false,
        })
        .unwrap();

        let linkage = std::fs::read_to_string(&out).unwrap();
        let merges: Vec<&str> = linkage.lines().collect();
        // Six leaves fold into a single tree: five binary merges.
        assert_eq!(merges.len(), 5);
        let last: Vec<&str> = merges.last().unwrap().split('\t').collect();
        assert_eq!(last[2], "6");
        assert_eq!(last[3], "6");

        let leaves = std::fs::read_to_string(format!("{}.leaves", out)).unwrap();
        let mut names: Vec<&str> = leaves.lines().collect();
        assert_eq!(names.len(), 6);
        names.sort_unstable();
        assert_eq!(names, vec!["a", "b", "c", "x", "y", "z"]);
    }
}
