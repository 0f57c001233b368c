//! Per-run memo of evolution chains.
//!
//! Every member of a family points at the same chain document, so a
//! three-stage line would otherwise fetch it three times.

use std::collections::HashMap;
use tracing::{debug, warn};

use super::tree::{depth, EvolutionNode};
use crate::api::{ChainReference, PokeApi};

/// A fetched chain together with its precomputed depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedChain {
    pub tree: EvolutionNode,
    pub depth: usize,
}

impl CachedChain {
    pub fn new(tree: EvolutionNode) -> Self {
        let depth = depth(&tree);
        Self { tree, depth }
    }

    /// True when `species_name` heads a line of at least three stages.
    pub fn is_starter_candidate(&self, species_name: &str) -> bool {
        self.depth >= 3 && self.tree.species_name.eq_ignore_ascii_case(species_name)
    }
}

/// Owned by a single orchestrator; entries never outlive the run.
/// A `None` entry remembers a fetch that failed.
#[derive(Debug, Default)]
pub struct ChainCache {
    entries: HashMap<ChainReference, Option<CachedChain>>,
    fetches: usize,
}

impl ChainCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chain behind `reference`, fetching it on first use.
    ///
    /// A failed fetch yields `None`, and so does every later lookup of the
    /// same reference; the upstream is asked at most once per reference.
    pub async fn get<A>(&mut self, api: &A, reference: &ChainReference) -> Option<&CachedChain>
    where
        A: PokeApi + ?Sized,
    {
        if self.entries.contains_key(reference) {
            debug!(chain = %reference, "chain cache hit");
        } else {
            debug!(chain = %reference, "chain cache miss");
            self.fetches += 1;
            let chain = match api.evolution_chain(reference).await {
                Ok(document) => Some(CachedChain::new(EvolutionNode::from_link(&document.chain))),
                Err(e) => {
                    warn!(chain = %reference, error = %e, "evolution chain unavailable");
                    None
                }
            };
            self.entries.insert(reference.clone(), chain);
        }

        self.entries.get(reference).and_then(Option::as_ref)
    }

    /// References looked up so far, failed ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Network fetches issued so far, failed ones included.
    pub fn fetch_count(&self) -> usize {
        self.fetches
    }
}
