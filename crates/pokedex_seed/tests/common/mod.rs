//! Shared test utilities for pipeline tests.
//!
//! `FakeApi` serves canned PokeAPI documents from memory and counts how many
//! times each endpoint was hit.

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Mutex;

use pokedex_seed::api::models::{
    EvolutionChainResponse, GenerationResponse, PokemonResponse, SpeciesResponse,
};
use pokedex_seed::{ChainReference, FetchError, Generation, PokeApi};

pub const BASE: &str = "https://pokeapi.co/api/v2";

pub fn species_url(id: u32) -> String {
    format!("{BASE}/pokemon-species/{id}/")
}

pub fn chain_url(id: u32) -> String {
    format!("{BASE}/evolution-chain/{id}/")
}

#[derive(Default)]
pub struct FakeApi {
    generations: HashMap<u8, Value>,
    species: HashMap<String, Value>,
    chains: HashMap<String, Value>,
    pokemon: HashMap<String, Value>,
    calls: Mutex<HashMap<String, usize>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a generation roster from `(name, national number)` pairs.
    pub fn with_generation(mut self, generation: u8, members: &[(&str, u32)]) -> Self {
        let members: Vec<Value> = members
            .iter()
            .map(|(name, id)| json!({"name": name, "url": species_url(*id)}))
            .collect();
        self.generations
            .insert(generation, json!({"id": generation, "pokemon_species": members}));
        self
    }

    pub fn with_species(mut self, name: &str, document: Value) -> Self {
        self.species.insert(name.to_string(), document);
        self
    }

    pub fn with_chain(mut self, url: &str, document: Value) -> Self {
        self.chains.insert(url.to_string(), document);
        self
    }

    pub fn with_pokemon(mut self, name: &str, document: Value) -> Self {
        self.pokemon.insert(name.to_string(), document);
        self
    }

    /// Species, form and display data for a plain single-form species.
    pub fn with_simple_species(self, name: &str, id: u32, chain: Option<u32>, types: &[&str]) -> Self {
        self.with_species(name, species_json(id, name, &[(name, true)], chain))
            .with_pokemon(name, pokemon_json(id, name, types, &["tackle"]))
    }

    pub fn calls(&self, endpoint: &str, key: &str) -> usize {
        let calls = self.calls.lock().unwrap();
        calls.get(&format!("{endpoint}:{key}")).copied().unwrap_or(0)
    }

    pub fn total_calls(&self, endpoint: &str) -> usize {
        let calls = self.calls.lock().unwrap();
        calls
            .iter()
            .filter(|(key, _)| key.starts_with(&format!("{endpoint}:")))
            .map(|(_, count)| *count)
            .sum()
    }

    fn record_call(&self, endpoint: &str, key: &str) {
        let mut calls = self.calls.lock().unwrap();
        *calls.entry(format!("{endpoint}:{key}")).or_insert(0) += 1;
    }

    fn serve<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        key: &str,
        document: Option<&Value>,
    ) -> Result<T, FetchError> {
        self.record_call(endpoint, key);
        let url = format!("{BASE}/{endpoint}/{key}/");
        let document = document.ok_or_else(|| FetchError::Status {
            url: url.clone(),
            status: 404,
        })?;
        serde_json::from_value(document.clone()).map_err(|e| FetchError::Decode {
            url,
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl PokeApi for FakeApi {
    async fn generation(&self, generation: Generation) -> Result<GenerationResponse, FetchError> {
        self.serve(
            "generation",
            &generation.to_string(),
            self.generations.get(&generation.number()),
        )
    }

    async fn species(&self, name: &str) -> Result<SpeciesResponse, FetchError> {
        self.serve("pokemon-species", name, self.species.get(name))
    }

    async fn evolution_chain(
        &self,
        reference: &ChainReference,
    ) -> Result<EvolutionChainResponse, FetchError> {
        self.serve(
            "evolution-chain",
            reference.as_str(),
            self.chains.get(reference.as_str()),
        )
    }

    async fn pokemon(&self, form: &str) -> Result<PokemonResponse, FetchError> {
        self.serve("pokemon", form, self.pokemon.get(form))
    }
}

// ----------------------------------------------------------------------------
// Document builders
// ----------------------------------------------------------------------------

/// `varieties` are `(form name, is_default)` pairs.
pub fn species_json(id: u32, name: &str, varieties: &[(&str, bool)], chain: Option<u32>) -> Value {
    let varieties: Vec<Value> = varieties
        .iter()
        .map(|(form, is_default)| {
            json!({"is_default": is_default, "pokemon": {"name": form, "url": ""}})
        })
        .collect();

    json!({
        "id": id,
        "name": name,
        "names": [],
        "varieties": varieties,
        "evolution_chain": chain.map(|c| json!({"url": chain_url(c)})),
    })
}

pub fn pokemon_json(id: u32, name: &str, types: &[&str], level_up_moves: &[&str]) -> Value {
    let types: Vec<Value> = types
        .iter()
        .enumerate()
        .map(|(i, t)| json!({"slot": i + 1, "type": {"name": t, "url": ""}}))
        .collect();
    let moves: Vec<Value> = level_up_moves
        .iter()
        .map(|m| {
            json!({
                "move": {"name": m, "url": ""},
                "version_group_details": [
                    {"level_learned_at": 1, "move_learn_method": {"name": "level-up", "url": ""}}
                ]
            })
        })
        .collect();

    json!({
        "id": id,
        "name": name,
        "types": types,
        "stats": [
            {"base_stat": 45, "stat": {"name": "hp", "url": ""}},
            {"base_stat": 49, "stat": {"name": "attack", "url": ""}},
            {"base_stat": 49, "stat": {"name": "defense", "url": ""}},
            {"base_stat": 65, "stat": {"name": "special-attack", "url": ""}},
            {"base_stat": 65, "stat": {"name": "special-defense", "url": ""}},
            {"base_stat": 45, "stat": {"name": "speed", "url": ""}}
        ],
        "moves": moves,
        "abilities": [],
    })
}

/// Linear chain of `(name, national number, min level into this stage)`.
pub fn linear_chain_json(id: u32, stages: &[(&str, u32, Option<u8>)]) -> Value {
    let mut link: Option<Value> = None;

    for (name, number, level) in stages.iter().rev() {
        let details = match level {
            Some(level) => json!([{"trigger": {"name": "level-up", "url": ""}, "min_level": level}]),
            None => json!([]),
        };
        let evolves_to = match link.take() {
            Some(next) => json!([next]),
            None => json!([]),
        };
        link = Some(json!({
            "species": {"name": name, "url": species_url(*number)},
            "evolution_details": details,
            "evolves_to": evolves_to,
        }));
    }

    json!({"id": id, "chain": link.unwrap_or(Value::Null)})
}

/// Fake API serving the bulbasaur line as generation 1.
pub fn bulbasaur_line_api() -> FakeApi {
    FakeApi::new()
        .with_generation(1, &[("venusaur", 3), ("bulbasaur", 1), ("ivysaur", 2)])
        .with_simple_species("bulbasaur", 1, Some(1), &["grass", "poison"])
        .with_simple_species("ivysaur", 2, Some(1), &["grass", "poison"])
        .with_simple_species("venusaur", 3, Some(1), &["grass", "poison"])
        .with_chain(
            &chain_url(1),
            linear_chain_json(
                1,
                &[("bulbasaur", 1, None), ("ivysaur", 2, Some(16)), ("venusaur", 3, Some(32))],
            ),
        )
}

pub fn gen(number: u8) -> Generation {
    Generation::new(number).expect("valid generation")
}
