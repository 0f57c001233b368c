//! Output records written to the pokedex file.
//!
//! The field layout matches what the battle engine deserializes from
//! `data/pokedex.json`, so renaming anything here is a breaking change.

use phf::phf_map;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest generation the upstream API publishes a roster for.
pub const MAX_GENERATION: u8 = 9;

/// Elemental type of a species.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PokemonType {
    Normal,
    Fire,
    Water,
    Grass,
    Electric,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
    #[default]
    Unknown,
}

static TYPE_NAMES: phf::Map<&'static str, PokemonType> = phf_map! {
    "normal" => PokemonType::Normal,
    "fire" => PokemonType::Fire,
    "water" => PokemonType::Water,
    "grass" => PokemonType::Grass,
    "electric" => PokemonType::Electric,
    "ice" => PokemonType::Ice,
    "fighting" => PokemonType::Fighting,
    "poison" => PokemonType::Poison,
    "ground" => PokemonType::Ground,
    "flying" => PokemonType::Flying,
    "psychic" => PokemonType::Psychic,
    "bug" => PokemonType::Bug,
    "rock" => PokemonType::Rock,
    "ghost" => PokemonType::Ghost,
    "dragon" => PokemonType::Dragon,
    "dark" => PokemonType::Dark,
    "steel" => PokemonType::Steel,
    "fairy" => PokemonType::Fairy,
};

impl PokemonType {
    /// Map an upstream type name (`"fire"`, `"Fire"`) to a type.
    /// Names outside the 18 known types (e.g. `"shadow"`, `"stellar"`) become `Unknown`.
    pub fn from_api_name(name: &str) -> Self {
        TYPE_NAMES
            .get(name.to_ascii_lowercase().as_str())
            .copied()
            .unwrap_or(PokemonType::Unknown)
    }
}

/// Six base stats. Stats the upstream omits stay at zero.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    pub hp: u16,
    pub attack: u16,
    pub defense: u16,
    pub special_attack: u16,
    pub special_defense: u16,
    pub speed: u16,
}

impl Stats {
    pub const fn zero() -> Self {
        Self {
            hp: 0,
            attack: 0,
            defense: 0,
            special_attack: 0,
            special_defense: 0,
            speed: 0,
        }
    }

    /// Set the stat named by its upstream identifier. Returns false for unknown names.
    pub fn set_by_api_name(&mut self, name: &str, value: u16) -> bool {
        let slot = match name {
            "hp" => &mut self.hp,
            "attack" => &mut self.attack,
            "defense" => &mut self.defense,
            "special-attack" => &mut self.special_attack,
            "special-defense" => &mut self.special_defense,
            "speed" => &mut self.speed,
            _ => return false,
        };
        *slot = value;
        true
    }

    /// Base Stat Total
    pub fn total(&self) -> u32 {
        self.hp as u32
            + self.attack as u32
            + self.defense as u32
            + self.special_attack as u32
            + self.special_defense as u32
            + self.speed as u32
    }
}

/// One outgoing evolution of a species.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct EvolutionData {
    /// Zero-padded national number of the target, or its raw name when no number is known.
    pub target_species_id: String,
    /// Only set for level-up triggers.
    pub min_level: Option<u8>,
    /// Upstream trigger name ("level-up", "use-item", "trade", ...), or "unknown".
    pub trigger: String,
}

/// The persisted unit of the pokedex file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PokemonSpecies {
    pub species_id: String,
    pub display_name: String,
    pub generation: u8,
    pub primary_type: PokemonType,
    pub secondary_type: Option<PokemonType>,
    pub base_stats: Stats,
    /// Sorted, deduplicated level-up move identifiers.
    pub move_pool: Vec<String>,
    /// Ability identifiers in upstream slot order.
    #[serde(default)]
    pub possible_abilities: Vec<String>,
    /// Base form of an evolution line with at least three stages.
    #[serde(default)]
    pub is_starter_candidate: bool,
    #[serde(default)]
    pub evolutions: Vec<EvolutionData>,
}

impl PokemonSpecies {
    /// Numeric value of `species_id`; ids that are not numbers sort after every numbered one.
    pub fn numeric_id(&self) -> u32 {
        self.species_id.parse().unwrap_or(u32::MAX)
    }
}

/// Format a national number the way `species_id` stores it.
pub fn pad_species_id(number: u32) -> String {
    format!("{:03}", number)
}

/// A generation number in `1..=MAX_GENERATION`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "u8", into = "u8")]
pub struct Generation(u8);

impl Generation {
    pub fn new(number: u8) -> Option<Self> {
        (1..=MAX_GENERATION).contains(&number).then_some(Self(number))
    }

    pub fn number(self) -> u8 {
        self.0
    }

    /// Every supported generation, in ascending order.
    pub fn all() -> impl Iterator<Item = Generation> {
        (1..=MAX_GENERATION).map(Generation)
    }
}

impl TryFrom<u8> for Generation {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Generation::new(value)
            .ok_or_else(|| format!("generation must be between 1 and {MAX_GENERATION}, got {value}"))
    }
}

impl From<Generation> for u8 {
    fn from(generation: Generation) -> u8 {
        generation.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which generations one run refreshes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationScope {
    /// Every generation; the existing dataset is discarded.
    All,
    /// One generation; only its records are replaced.
    Single(Generation),
}

impl GenerationScope {
    pub fn from_selector(selector: Option<Generation>) -> Self {
        match selector {
            Some(generation) => GenerationScope::Single(generation),
            None => GenerationScope::All,
        }
    }

    pub fn targets(&self) -> Vec<Generation> {
        match self {
            GenerationScope::All => Generation::all().collect(),
            GenerationScope::Single(generation) => vec![*generation],
        }
    }

    pub fn is_full_run(&self) -> bool {
        matches!(self, GenerationScope::All)
    }
}
