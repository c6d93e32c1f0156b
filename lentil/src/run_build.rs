use crate::common::*;
use crate::corpus::build_citation_graph;
use crate::input::{read_doc_table, STOP_WORDS};
use crate::pairs::build_pair_graph;

use graph_util::edge_list::{write_edge_list, EdgeRec};
use graph_util::graph::{CitationGraph, PairGraph};

use clap::Parser;

#[derive(Parser, Debug, Clone)]
pub struct BuildArgs {
    /// tab-delimited document table:
    /// `doi <TAB> YYYY-MM <TAB> ref;ref;... <TAB> token token ...`
    /// (`.gz` transparent, `#` comments skipped)
    #[arg(required = true)]
    data_file: Box<str>,

    /// output directory
    #[arg(long, short, required = true)]
    out: Box<str>,

    /// skip the co-occurrence (token) graph
    #[arg(long, default_value_t = false)]
    no_cooccurrence: bool,

    /// number of threads
    #[arg(long, default_value_t = 1)]
    threads: usize,

    /// verbosity
    #[arg(long, short)]
    verbose: bool,
}

fn citation_edges(cg: &CitationGraph) -> Vec<EdgeRec> {
    cg.sorted_edges()
        .into_iter()
        .map(|(source, target)| EdgeRec {
            source,
            target,
            weight: None,
        })
        .collect()
}

fn pair_edges(pg: &PairGraph) -> Vec<EdgeRec> {
    pg.sorted_edges()
        .into_iter()
        .map(|(source, target, w)| EdgeRec {
            source,
            target,
            weight: Some(w),
        })
        .collect()
}

/// Build the citation, co-citation, and co-occurrence graphs and write
/// them as edge lists under the output directory.
pub fn run_build(args: BuildArgs) -> anyhow::Result<()> {
    setup_env(args.verbose, args.threads)?;
    std::fs::create_dir_all(&*args.out)?;

    let docs = read_doc_table(&args.data_file, STOP_WORDS)?;

    let citation = build_citation_graph(&docs);
    info!(
        "citation graph: {} node(s), {} edge(s)",
        citation.graph.node_count(),
        citation.graph.edge_count()
    );
    write_edge_list(
        &citation_edges(&citation),
        &format!("{}/citation.edges.gz", args.out),
    )?;

    let ref_groups: Vec<Vec<Box<str>>> = docs.iter().map(|d| d.refs.clone()).collect();
    let cocitation = build_pair_graph(&ref_groups);
    info!(
        "co-citation graph: {} node(s), {} edge(s)",
        cocitation.graph.node_count(),
        cocitation.graph.edge_count()
    );
    write_edge_list(
        &pair_edges(&cocitation),
        &format!("{}/cocitation.edges.gz", args.out),
    )?;

    if !args.no_cooccurrence {
        let token_groups: Vec<Vec<Box<str>>> = docs.iter().map(|d| d.tokens.clone()).collect();
        let cooccurrence = build_pair_graph(&token_groups);
        info!(
            "co-occurrence graph: {} node(s), {} edge(s)",
            cooccurrence.graph.node_count(),
            cooccurrence.graph.edge_count()
        );
        write_edge_list(
            &pair_edges(&cooccurrence),
            &format!("{}/cooccurrence.edges.gz", args.out),
        )?;
    }

    Ok(())
}
