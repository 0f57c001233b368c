//! pokedex_seed - builds the battle engine's pokedex from PokeAPI.
//!
//! For each generation the roster is fetched, every species is resolved to
//! its playable form, its evolution line is looked up (once per family), and
//! the resulting records are merged into `data/pokedex.json` so that
//! generations outside the run stay exactly as they were.

/// Upstream API seam and payloads
pub mod api;

/// Evolution trees, navigation and the per-run chain cache
pub mod chain;

pub mod config;
pub mod dataset;
pub mod error;
pub mod forms;
pub mod mapper;
pub mod models;
pub mod orchestrator;
pub mod resolver;
pub mod roster;

// Re-export commonly used types
pub use api::{ChainReference, HttpPokeApi, PokeApi};
pub use chain::{CachedChain, ChainCache, EvolutionEdge, EvolutionNode};
pub use config::SeedConfig;
pub use error::{ConfigError, DatasetError, FetchError, SeedError, SpeciesError};
pub use models::{EvolutionData, Generation, GenerationScope, PokemonSpecies, PokemonType, Stats};
pub use orchestrator::{seed, GenerationReport, Orchestrator, RunStats, RunSummary};
pub use resolver::ResolvedSpecies;
