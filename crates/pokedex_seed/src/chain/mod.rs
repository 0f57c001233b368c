//! Evolution chains: the tree model, navigation, and the per-run cache.

pub mod cache;
pub mod tree;

pub use cache::{CachedChain, ChainCache};
pub use tree::{depth, edges_of, find_node, EvolutionEdge, EvolutionNode};
