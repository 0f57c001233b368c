//! Generation rosters.

use tracing::debug;

use crate::api::models::NamedResource;
use crate::api::PokeApi;
use crate::error::FetchError;
use crate::models::Generation;

/// Species names of `generation`, ordered by national number.
///
/// Species are processed in this order, not in the order the upstream
/// listed them; progress lines and per-species logs follow it too.
pub async fn fetch_roster<A>(api: &A, generation: Generation) -> Result<Vec<String>, FetchError>
where
    A: PokeApi + ?Sized,
{
    let response = api.generation(generation).await?;
    let roster = order_roster(response.pokemon_species);
    debug!(generation = %generation, members = roster.len(), "fetched roster");
    Ok(roster)
}

/// Sort roster members by the national number in their locator.
///
/// The upstream lists members in no particular order, so the processing
/// order this produces differs from the listing order on purpose. Members
/// without a number in their locator go last, alphabetically.
pub fn order_roster(mut members: Vec<NamedResource>) -> Vec<String> {
    members.sort_by(|a, b| {
        let key_a = (a.id().unwrap_or(u32::MAX), &a.name);
        let key_b = (b.id().unwrap_or(u32::MAX), &b.name);
        key_a.cmp(&key_b)
    });
    members.into_iter().map(|member| member.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(name: &str, url: &str) -> NamedResource {
        NamedResource {
            name: name.to_string(),
            url: url.to_string(),
        }
    }

    #[test]
    fn test_order_roster_by_number() {
        let roster = order_roster(vec![
            member("ivysaur", "https://pokeapi.co/api/v2/pokemon-species/2/"),
            member("mew", "https://pokeapi.co/api/v2/pokemon-species/151/"),
            member("bulbasaur", "https://pokeapi.co/api/v2/pokemon-species/1/"),
            member("zzz", ""),
            member("aaa", ""),
        ]);
        assert_eq!(roster, vec!["bulbasaur", "ivysaur", "mew", "aaa", "zzz"]);
    }
}
