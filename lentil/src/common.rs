#![allow(dead_code)]

pub use log::{info, warn};

pub use ergm_stat::statistic::Statistic;

/// Logging + rayon thread pool, shared by every subcommand.
pub fn setup_env(verbose: bool, threads: usize) -> anyhow::Result<()> {
    if verbose {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::try_init().ok();

    // 0 means all available cores.
    let max_threads = num_cpus::get();
    let nthreads = if threads == 0 {
        max_threads
    } else {
        threads.min(max_threads)
    };
    if nthreads != threads {
        info!("using {} thread(s)", nthreads);
    }
    // The global pool can only be configured once per process; a second
    // subcommand invocation in-process keeps the existing pool.
    rayon::ThreadPoolBuilder::new()
        .num_threads(nthreads)
        .build_global()
        .ok();
    Ok(())
}

/// Resolve a statistic by name; `k`, `seed`, and `resolution` feed the
/// parameterized variants and are ignored otherwise.
pub fn parse_statistic(
    name: &str,
    k: usize,
    seed: u64,
    resolution: f64,
) -> anyhow::Result<Statistic> {
    let stat = match name.to_lowercase().as_str() {
        "edges" => Statistic::Edges,
        "triangles" => Statistic::Triangles,
        "betweenness" => Statistic::Betweenness,
        "closeness" => Statistic::Closeness,
        "eigenvector" => Statistic::Eigenvector,
        "centralization" => Statistic::Centralization,
        "gini" => Statistic::Gini,
        "clustering" => Statistic::Clustering,
        "transitivity" => Statistic::Transitivity,
        "cliques" => Statistic::Cliques,
        "components" => Statistic::Components,
        "communities" => Statistic::CommunityCount { seed, resolution },
        "stars" | "star" => Statistic::Star { k },
        "geodesic" => Statistic::Geodesic,
        _ => anyhow::bail!("unknown statistic: {}", name),
    };
    Ok(stat)
}
