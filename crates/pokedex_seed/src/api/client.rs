//! reqwest-backed [`PokeApi`] implementation.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use super::{ChainReference, PokeApi};
use super::models::{EvolutionChainResponse, GenerationResponse, PokemonResponse, SpeciesResponse};
use crate::config::SeedConfig;
use crate::error::{ConfigError, FetchError};
use crate::models::Generation;

pub struct HttpPokeApi {
    client: Client,
    base_url: String,
}

impl HttpPokeApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("pokedex_seed/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &SeedConfig) -> Result<Self, ConfigError> {
        Self::new(&config.base_url, config.request_timeout)
    }

    fn resource_url(&self, resource: &str, key: &str) -> String {
        format!("{}/{}/{}/", self.base_url, resource, key)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        debug!(url, "GET");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Network {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        // Read the body first so a timeout mid-body reports as a network error.
        let body = response.bytes().await.map_err(|e| FetchError::Network {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        serde_json::from_slice(&body).map_err(|e| FetchError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl PokeApi for HttpPokeApi {
    async fn generation(&self, generation: Generation) -> Result<GenerationResponse, FetchError> {
        let url = self.resource_url("generation", &generation.to_string());
        self.get_json(&url).await
    }

    async fn species(&self, name: &str) -> Result<SpeciesResponse, FetchError> {
        let url = self.resource_url("pokemon-species", name);
        self.get_json(&url).await
    }

    async fn evolution_chain(
        &self,
        reference: &ChainReference,
    ) -> Result<EvolutionChainResponse, FetchError> {
        self.get_json(reference.as_str()).await
    }

    async fn pokemon(&self, form: &str) -> Result<PokemonResponse, FetchError> {
        let url = self.resource_url("pokemon", form);
        self.get_json(&url).await
    }
}
