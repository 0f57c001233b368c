//! JSON deserialization structures for PokeAPI responses.
//!
//! Only the fields the pipeline reads are declared; everything else in the
//! upstream documents is ignored.

use serde::Deserialize;

/// `{ name, url }` pair used by every upstream list and link.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

impl NamedResource {
    /// Numeric id embedded in the locator, e.g. `.../pokemon-species/25/` -> 25.
    pub fn id(&self) -> Option<u32> {
        resource_id(&self.url)
    }
}

/// Bare `{ url }` link (the species' evolution-chain pointer).
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ApiResource {
    pub url: String,
}

/// Extract the trailing numeric path segment of an upstream locator.
pub fn resource_id(url: &str) -> Option<u32> {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .and_then(|segment| segment.parse().ok())
}

// ----------------------------------------------------------------------------
// generation/{id}
// ----------------------------------------------------------------------------

#[derive(Deserialize, Debug, Clone)]
pub struct GenerationResponse {
    pub id: u32,
    #[serde(default)]
    pub pokemon_species: Vec<NamedResource>,
}

// ----------------------------------------------------------------------------
// pokemon-species/{name}
// ----------------------------------------------------------------------------

#[derive(Deserialize, Debug, Clone)]
pub struct SpeciesResponse {
    pub id: Option<u32>,
    pub name: String,
    #[serde(default)]
    pub names: Vec<LocalizedName>,
    #[serde(default)]
    pub varieties: Vec<Variety>,
    pub evolution_chain: Option<ApiResource>,
}

impl SpeciesResponse {
    /// Localized display name for `language` ("en"), if the upstream has one.
    pub fn localized_name(&self, language: &str) -> Option<&str> {
        self.names
            .iter()
            .find(|entry| entry.language.name == language)
            .map(|entry| entry.name.as_str())
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct LocalizedName {
    pub name: String,
    pub language: NamedResource,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Variety {
    #[serde(default)]
    pub is_default: bool,
    pub pokemon: NamedResource,
}

// ----------------------------------------------------------------------------
// evolution-chain/{id}
// ----------------------------------------------------------------------------

#[derive(Deserialize, Debug, Clone)]
pub struct EvolutionChainResponse {
    pub id: Option<u32>,
    pub chain: ChainLink,
}

/// One stage of the upstream chain. `evolution_details` describe how the
/// previous stage evolves into this one.
#[derive(Deserialize, Debug, Clone)]
pub struct ChainLink {
    pub species: NamedResource,
    #[serde(default)]
    pub evolution_details: Vec<EvolutionDetail>,
    #[serde(default)]
    pub evolves_to: Vec<ChainLink>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct EvolutionDetail {
    pub trigger: Option<NamedResource>,
    pub min_level: Option<u8>,
}

// ----------------------------------------------------------------------------
// pokemon/{name}
// ----------------------------------------------------------------------------

#[derive(Deserialize, Debug, Clone)]
pub struct PokemonResponse {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub types: Vec<TypeSlot>,
    #[serde(default)]
    pub stats: Vec<StatEntry>,
    #[serde(default)]
    pub moves: Vec<MoveEntry>,
    #[serde(default)]
    pub abilities: Vec<AbilitySlot>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct TypeSlot {
    pub slot: u8,
    #[serde(rename = "type")]
    pub type_: NamedResource,
}

#[derive(Deserialize, Debug, Clone)]
pub struct StatEntry {
    pub base_stat: u16,
    pub stat: NamedResource,
}

#[derive(Deserialize, Debug, Clone)]
pub struct MoveEntry {
    #[serde(rename = "move")]
    pub move_: NamedResource,
    #[serde(default)]
    pub version_group_details: Vec<MoveVersionDetail>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct MoveVersionDetail {
    #[serde(default)]
    pub level_learned_at: u8,
    pub move_learn_method: NamedResource,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AbilitySlot {
    pub ability: NamedResource,
    #[serde(default)]
    pub is_hidden: bool,
    pub slot: u8,
}
