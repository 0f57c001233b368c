//! Form attribute fetching: typing, stats, moves and abilities of a resolved form.

use crate::api::models::PokemonResponse;
use crate::api::PokeApi;
use crate::error::FetchError;

/// Raw attributes of one form, still in upstream vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormAttributes {
    pub form_id: u32,
    /// `(slot, type name)` as reported.
    pub types: Vec<(u8, String)>,
    /// `(stat name, base value)` as reported.
    pub stats: Vec<(String, u16)>,
    /// Every learnable move with the learn methods listed for it.
    pub moves: Vec<LearnableMove>,
    /// `(slot, ability name)` as reported.
    pub abilities: Vec<(u8, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LearnableMove {
    pub name: String,
    pub learn_methods: Vec<String>,
}

impl LearnableMove {
    pub fn is_learned_by(&self, method: &str) -> bool {
        self.learn_methods.iter().any(|m| m == method)
    }
}

impl From<PokemonResponse> for FormAttributes {
    fn from(pokemon: PokemonResponse) -> Self {
        Self {
            form_id: pokemon.id,
            types: pokemon
                .types
                .into_iter()
                .map(|slot| (slot.slot, slot.type_.name))
                .collect(),
            stats: pokemon
                .stats
                .into_iter()
                .map(|entry| (entry.stat.name, entry.base_stat))
                .collect(),
            moves: pokemon
                .moves
                .into_iter()
                .map(|entry| LearnableMove {
                    name: entry.move_.name,
                    learn_methods: entry
                        .version_group_details
                        .into_iter()
                        .map(|detail| detail.move_learn_method.name)
                        .collect(),
                })
                .collect(),
            abilities: pokemon
                .abilities
                .into_iter()
                .map(|slot| (slot.slot, slot.ability.name))
                .collect(),
        }
    }
}

pub async fn fetch_form_attributes<A>(api: &A, form: &str) -> Result<FormAttributes, FetchError>
where
    A: PokeApi + ?Sized,
{
    api.pokemon(form).await.map(FormAttributes::from)
}
