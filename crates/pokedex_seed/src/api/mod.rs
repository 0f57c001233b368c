//! Upstream PokeAPI access.
//!
//! Every network call the pipeline makes goes through [`PokeApi`], which
//! keeps the orchestration logic testable against in-memory fixtures.

pub mod client;
pub mod models;

use async_trait::async_trait;
use std::fmt;

use crate::error::FetchError;
use crate::models::Generation;

pub use client::HttpPokeApi;
pub use models::{EvolutionChainResponse, GenerationResponse, PokemonResponse, SpeciesResponse};

/// Locator of one evolution-chain document. Opaque to the pipeline; used as
/// the chain cache key and passed back verbatim to fetch the chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChainReference(String);

impl ChainReference {
    pub fn new(locator: impl Into<String>) -> Self {
        Self(locator.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChainReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The four upstream endpoints the pipeline consumes.
#[async_trait]
pub trait PokeApi: Send + Sync {
    /// Roster of one generation.
    async fn generation(&self, generation: Generation) -> Result<GenerationResponse, FetchError>;

    /// Species metadata: varieties, localized names, chain pointer.
    async fn species(&self, name: &str) -> Result<SpeciesResponse, FetchError>;

    /// Full evolution tree behind a chain reference.
    async fn evolution_chain(
        &self,
        reference: &ChainReference,
    ) -> Result<EvolutionChainResponse, FetchError>;

    /// Typing, stats, moves and abilities of one resolved form.
    async fn pokemon(&self, form: &str) -> Result<PokemonResponse, FetchError>;
}
