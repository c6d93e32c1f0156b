pub mod delta;
pub mod dendrogram;
pub mod statistic;
