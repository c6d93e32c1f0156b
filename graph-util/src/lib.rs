pub mod centrality;
pub mod cliques;
pub mod clustering;
pub mod community;
pub mod components;
pub mod edge_list;
pub mod error;
pub mod graph;
pub mod paths;
pub mod prune;
