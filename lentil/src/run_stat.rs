use crate::common::*;
use crate::corpus::{descendants, most_referenced};

use graph_util::edge_list::{open_buf_writer, read_citation_graph, read_pair_graph};

use clap::Parser;
use std::io::Write;

#[derive(Parser, Debug, Clone)]
pub struct StatArgs {
    /// edge-list graph file, `u v [weight]` per line (`.gz` transparent)
    #[arg(required = true)]
    data_file: Box<str>,

    /// statistics to evaluate (comma-separated): edges, triangles,
    /// betweenness, closeness, eigenvector, centralization, gini,
    /// clustering, transitivity, cliques, components, communities,
    /// stars, geodesic
    #[arg(long, short = 's', value_delimiter(','))]
    stats: Option<Vec<Box<str>>>,

    /// star size for the `stars` statistic
    #[arg(long, default_value_t = 2)]
    k: usize,

    /// random seed for the `communities` statistic
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Louvain resolution for the `communities` statistic
    #[arg(long, default_value_t = 1.0)]
    resolution: f64,

    /// rank the n most-cited documents (reads the input as a directed
    /// citation graph)
    #[arg(long)]
    most_referenced: Option<usize>,

    /// list documents reachable from this one (directed input)
    #[arg(long)]
    descendants: Option<Box<str>>,

    /// output file (stdout when omitted)
    #[arg(long, short)]
    out: Option<Box<str>>,

    /// number of threads
    #[arg(long, default_value_t = 1)]
    threads: usize,

    /// verbosity
    #[arg(long, short)]
    verbose: bool,
}

const DEFAULT_STATS: &[&str] = &[
    "edges",
    "triangles",
    "clustering",
    "transitivity",
    "components",
    "geodesic",
];

pub fn run_stat(args: StatArgs) -> anyhow::Result<()> {
    setup_env(args.verbose, args.threads)?;

    let mut buf: Box<dyn Write> = match &args.out {
        Some(out) => open_buf_writer(out)?,
        None => Box::new(std::io::stdout()),
    };

    if args.most_referenced.is_some() || args.descendants.is_some() {
        let cg = read_citation_graph(&args.data_file)?;
        if let Some(n) = args.most_referenced {
            for (label, count) in most_referenced(&cg, n) {
                writeln!(buf, "most_referenced\t{}\t{}", label, count)?;
            }
        }
        if let Some(root) = &args.descendants {
            let down = descendants(&cg, root)
                .ok_or_else(|| anyhow::anyhow!("unknown document: {}", root))?;
            for id in down {
                writeln!(buf, "descendant\t{}\t{}", root, cg.labels.label(id))?;
            }
        }
        buf.flush()?;
        return Ok(());
    }

    let pg = read_pair_graph(&args.data_file)?;
    info!(
        "{} node(s), {} edge(s)",
        pg.graph.node_count(),
        pg.graph.edge_count()
    );

    let names: Vec<Box<str>> = match args.stats {
        Some(names) => names,
        None => DEFAULT_STATS.iter().map(|&s| s.into()).collect(),
    };

    for name in &names {
        let stat = parse_statistic(name, args.k, args.seed, args.resolution)?;
        match stat.evaluate(&pg.graph) {
            Ok(value) => writeln!(buf, "{}\t{}", stat.name(), value)?,
            Err(e) => {
                warn!("{}: {}", stat.name(), e);
                writeln!(buf, "{}\tNA", stat.name())?;
            }
        }
    }
    buf.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_stat_report_end_to_end() {
        let dir = TempDir::new().unwrap();
        let data = dir.path().join("g.edges").to_str().unwrap().to_string();
        let out = dir.path().join("stats.tsv").to_str().unwrap().to_string();
        std::fs::write(&data, "a b 2\nb c 2\na c 2\n").unwrap();

        run_stat(StatArgs {
            data_file: data.into(),
            stats: Some(vec!["edges".into(), "triangles".into(), "geodesic".into()]),
            k: 2,
            seed: 42,
            resolution: 1.0,
            most_referenced: None,
            descendants: None,
            out: Some(out.clone().into()),
            threads: 1,
            verbose: false,
        })
        .unwrap();

        let text = std::fs::read_to_string(&out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["edges\t3", "triangles\t1", "geodesic\t1"]);
    }

    #[test]
    fn test_most_referenced_report() {
        let dir = TempDir::new().unwrap();
        let data = dir.path().join("c.edges").to_str().unwrap().to_string();
        let out = dir.path().join("rank.tsv").to_str().unwrap().to_string();
        std::fs::write(&data, "a c\nb c\na b\n").unwrap();

        run_stat(StatArgs {
            data_file: data.into(),
            stats: None,
            k: 2,
            seed: 42,
            resolution: 1.0,
            most_referenced: Some(1),
            descendants: None,
            out: Some(out.clone().into()),
            threads: 1,
            verbose: false,
        })
        .unwrap();

        let text = std::fs::read_to_string(&out).unwrap();
        assert_eq!(text.trim(), "most_referenced\tc\t2");
    }

    #[test]
    fn test_unknown_statistic_is_an_error() {
        let dir = TempDir::new().unwrap();
        let data = dir.path().join("g.edges").to_str().unwrap().to_string();
        std::fs::write(&data, "a b\n").unwrap();

        let got = run_stat(StatArgs {
            data_file: data.into(),
            stats: Some(vec!["nope".into()]),
            k: 2,
            seed: 42,
            resolution: 1.0,
            most_referenced: None,
            descendants: None,
            out: None,
            threads: 1,
            verbose: false,
        });
        assert!(got.is_err());
    }
}
