use crate::common::*;

use ergm_stat::delta::{delta_matrix, DeltaLayout, DeltaOptions};
use graph_util::edge_list::{open_buf_writer, read_pair_graph};

use clap::Parser;
use std::io::Write;

#[derive(Parser, Debug, Clone)]
pub struct DeltaArgs {
    /// edge-list graph file, `u v [weight]` per line (`.gz` transparent)
    #[arg(required = true)]
    data_file: Box<str>,

    /// statistic to difference (see `lentil stat --help` for names)
    #[arg(long, short = 's', required = true)]
    stat: Box<str>,

    /// star size for the `stars` statistic
    #[arg(long, default_value_t = 2)]
    k: usize,

    /// random seed for the `communities` statistic
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Louvain resolution for the `communities` statistic
    #[arg(long, default_value_t = 1.0)]
    resolution: f64,

    /// matrix layout: `symmetric` or `lower`
    #[arg(long, default_value = "symmetric")]
    layout: Box<str>,

    /// output matrix file; node order goes to `<out>.nodes`
    #[arg(long, short, required = true)]
    out: Box<str>,

    /// hide the pair-loop progress bar
    #[arg(long, default_value_t = false)]
    no_progress: bool,

    /// number of threads (0 = all cores)
    #[arg(long, default_value_t = 0)]
    threads: usize,

    /// verbosity
    #[arg(long, short)]
    verbose: bool,
}

fn parse_layout(name: &str) -> anyhow::Result<DeltaLayout> {
    match name.to_lowercase().as_str() {
        "symmetric" => Ok(DeltaLayout::Symmetric),
        "lower" => Ok(DeltaLayout::LowerTriangle),
        _ => anyhow::bail!("unknown layout: {}", name),
    }
}

pub fn run_delta(args: DeltaArgs) -> anyhow::Result<()> {
    setup_env(args.verbose, args.threads)?;

    let stat = parse_statistic(&args.stat, args.k, args.seed, args.resolution)?;
    let options = DeltaOptions {
        layout: parse_layout(&args.layout)?,
        cancel: None,
        progress: !args.no_progress,
    };

    let pg = read_pair_graph(&args.data_file)?;
    info!(
        "delta {} over {} node(s)",
        stat.name(),
        pg.graph.node_count()
    );

    let matrix = delta_matrix(&pg.graph, &stat, &options)?;
    matrix.write_tsv(&args.out)?;

    let mut buf = open_buf_writer(&format!("{}.nodes", args.out))?;
    for &id in &matrix.nodes {
        writeln!(buf, "{}", pg.labels.label(id))?;
    }
    buf.flush()?;
    Ok(())
}
