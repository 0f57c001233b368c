//! Record mapping: fold resolver, chain and form data into one [`PokemonSpecies`].

use heck::ToTitleCase;
use std::collections::BTreeSet;

use crate::chain::{edges_of, find_node, CachedChain};
use crate::forms::{FormAttributes, LearnableMove};
use crate::models::{pad_species_id, EvolutionData, Generation, PokemonSpecies, PokemonType, Stats};
use crate::resolver::ResolvedSpecies;

/// Learn method kept in the move pool.
pub const LEVEL_UP_METHOD: &str = "level-up";

/// Why a record was produced with less data than a complete one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Degradation {
    /// The species listed no varieties; resolved by input name.
    NoVarieties,
    /// Species metadata had no evolution chain pointer.
    NoChainReference,
    /// The chain fetch failed.
    ChainUnavailable,
    /// The chain did not contain the species.
    NodeNotFound,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedRecord {
    pub record: PokemonSpecies,
    pub degradations: Vec<Degradation>,
}

impl MappedRecord {
    pub fn is_degraded(&self) -> bool {
        !self.degradations.is_empty()
    }
}

/// Build the output record for `species_name`.
///
/// `lineage` is the species' cached chain, or the reason it has none. Without
/// a lineage the record has no evolutions and is never a starter candidate.
pub fn map_record(
    species_name: &str,
    generation: Generation,
    resolved: &ResolvedSpecies,
    attributes: &FormAttributes,
    lineage: Result<&CachedChain, Degradation>,
) -> MappedRecord {
    let mut degradations = Vec::new();
    let (primary_type, secondary_type) = map_types(&attributes.types);

    let (evolutions, is_starter_candidate) = match lineage {
        Ok(chain) => match find_node(&chain.tree, species_name) {
            Some(node) => (
                edges_of(node)
                    .iter()
                    .map(|edge| EvolutionData {
                        target_species_id: edge.target.species_id(),
                        min_level: edge.min_level,
                        trigger: edge.trigger.clone(),
                    })
                    .collect(),
                chain.is_starter_candidate(species_name),
            ),
            None => {
                degradations.push(Degradation::NodeNotFound);
                (Vec::new(), false)
            }
        },
        Err(reason) => {
            degradations.push(reason);
            (Vec::new(), false)
        }
    };

    let record = PokemonSpecies {
        species_id: pad_species_id(resolved.species_number.unwrap_or(attributes.form_id)),
        display_name: display_name(resolved),
        generation: generation.number(),
        primary_type,
        secondary_type,
        base_stats: map_stats(&attributes.stats),
        move_pool: level_up_move_pool(&attributes.moves),
        possible_abilities: ability_ids(&attributes.abilities),
        is_starter_candidate,
        evolutions,
    };

    MappedRecord {
        record,
        degradations,
    }
}

/// Localized name when the species has one, else the form name in title case.
pub fn display_name(resolved: &ResolvedSpecies) -> String {
    resolved
        .display_name
        .clone()
        .unwrap_or_else(|| resolved.canonical_form_name.to_title_case())
}

/// The two lowest-numbered type slots, in slot order.
pub fn map_types(slots: &[(u8, String)]) -> (PokemonType, Option<PokemonType>) {
    let mut ordered: Vec<&(u8, String)> = slots.iter().collect();
    ordered.sort_by_key(|(slot, _)| *slot);

    let mut mapped = ordered
        .into_iter()
        .map(|(_, name)| PokemonType::from_api_name(name));

    let primary = mapped.next().unwrap_or(PokemonType::Unknown);
    (primary, mapped.next())
}

/// Six named stats; anything not reported stays at zero.
pub fn map_stats(entries: &[(String, u16)]) -> Stats {
    let mut stats = Stats::zero();
    for (name, value) in entries {
        stats.set_by_api_name(name, *value);
    }
    stats
}

/// Level-up moves only, deduplicated and sorted.
pub fn level_up_move_pool(moves: &[LearnableMove]) -> Vec<String> {
    moves
        .iter()
        .filter(|m| m.is_learned_by(LEVEL_UP_METHOD))
        .map(|m| m.name.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn ability_ids(slots: &[(u8, String)]) -> Vec<String> {
    let mut ordered: Vec<&(u8, String)> = slots.iter().collect();
    ordered.sort_by_key(|(slot, _)| *slot);

    let mut ids: Vec<String> = Vec::with_capacity(ordered.len());
    for (_, name) in ordered {
        if !ids.contains(name) {
            ids.push(name.clone());
        }
    }
    ids
}
