/// Categorical datasets and row partitioning
pub mod dataset;
