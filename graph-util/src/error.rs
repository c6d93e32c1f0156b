use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphError {
    /// Iterative centrality failed to converge within the iteration budget.
    #[error("power iteration failed to converge within {max_iter} iterations (tol {tol})")]
    Convergence { max_iter: usize, tol: f64 },

    /// The requested quantity has no value on an empty graph.
    #[error("operation undefined on an empty graph")]
    EmptyGraph,

    /// Malformed edge-list input.
    #[error("edge list line {line}: {reason}")]
    EdgeList { line: usize, reason: String },
}
