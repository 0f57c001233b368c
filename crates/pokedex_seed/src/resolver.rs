//! Species resolution: pick the playable form of a species and the chain it belongs to.

use tracing::debug;

use crate::api::models::SpeciesResponse;
use crate::api::{ChainReference, PokeApi};
use crate::error::FetchError;

/// Language used for display names.
pub const DISPLAY_LANGUAGE: &str = "en";

/// Which rule picked the canonical form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormSource {
    /// The variety flagged `is_default`.
    DefaultVariety,
    /// No variety was flagged; the first listed one was taken.
    FirstVariety,
    /// The species listed no varieties; the input name is used as-is and
    /// species metadata is discarded.
    InputName,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSpecies {
    pub canonical_form_name: String,
    pub chain_reference: Option<ChainReference>,
    pub variety_names: Vec<String>,
    /// National number from species metadata.
    pub species_number: Option<u32>,
    /// Localized display name from species metadata.
    pub display_name: Option<String>,
    pub source: FormSource,
}

impl ResolvedSpecies {
    /// Degraded resolution that carries only the input name.
    pub fn fallback(name: &str) -> Self {
        Self {
            canonical_form_name: name.to_string(),
            chain_reference: None,
            variety_names: Vec::new(),
            species_number: None,
            display_name: None,
            source: FormSource::InputName,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == FormSource::InputName
    }

    /// Select the canonical form from already fetched species metadata.
    pub fn from_species(name: &str, species: &SpeciesResponse) -> Self {
        let chosen = species
            .varieties
            .iter()
            .find(|variety| variety.is_default)
            .map(|variety| (variety, FormSource::DefaultVariety))
            .or_else(|| {
                species
                    .varieties
                    .first()
                    .map(|variety| (variety, FormSource::FirstVariety))
            });

        let Some((variety, source)) = chosen else {
            return Self::fallback(name);
        };

        Self {
            canonical_form_name: variety.pokemon.name.clone(),
            chain_reference: species
                .evolution_chain
                .as_ref()
                .map(|link| ChainReference::new(link.url.clone())),
            variety_names: species
                .varieties
                .iter()
                .map(|v| v.pokemon.name.clone())
                .collect(),
            species_number: species.id,
            display_name: species.localized_name(DISPLAY_LANGUAGE).map(str::to_string),
            source,
        }
    }
}

/// Fetch species metadata for `name` and resolve its canonical form.
///
/// Only a failed fetch is an error; missing varieties degrade to
/// [`ResolvedSpecies::fallback`].
pub async fn resolve_species<A>(api: &A, name: &str) -> Result<ResolvedSpecies, FetchError>
where
    A: PokeApi + ?Sized,
{
    let species = api.species(name).await?;
    let resolved = ResolvedSpecies::from_species(name, &species);
    debug!(
        species = name,
        form = %resolved.canonical_form_name,
        source = ?resolved.source,
        "resolved species"
    );
    Ok(resolved)
}
