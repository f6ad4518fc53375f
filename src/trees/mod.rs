/// Tree induction
pub mod builder;
/// Classification against a built tree
pub mod classifier;
/// Byte form of a tree for persistence
pub mod codec;
/// Split quality criteria
pub mod impurity;
/// Tree nodes
pub mod node;
/// Hyperparameters
pub mod params;
