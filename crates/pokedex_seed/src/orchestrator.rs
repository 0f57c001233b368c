//! Sequential orchestration of a seeding run.
//!
//! Species are processed one at a time in roster order with a fixed pause
//! between upstream calls. A species that fails is counted and skipped; it
//! never stops the run. Neither does a generation whose roster is missing.

use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

use crate::api::PokeApi;
use crate::chain::ChainCache;
use crate::config::SeedConfig;
use crate::dataset;
use crate::error::{SeedError, SpeciesError};
use crate::forms::fetch_form_attributes;
use crate::mapper::{map_record, Degradation, MappedRecord};
use crate::models::{Generation, GenerationScope, PokemonSpecies};
use crate::resolver::resolve_species;
use crate::roster::fetch_roster;

/// Species between two progress lines.
pub const PROGRESS_INTERVAL: usize = 10;

/// Per-generation counters.
///
/// `failures` counts every species that hit a failure path; `degraded` is the
/// part of those that still produced a record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub processed: usize,
    pub successes: usize,
    pub failures: usize,
    pub degraded: usize,
}

impl RunStats {
    /// Failures that produced no record.
    pub fn dropped(&self) -> usize {
        self.failures - self.degraded
    }
}

#[derive(Debug, Clone)]
pub struct GenerationRun {
    pub generation: Generation,
    pub records: Vec<PokemonSpecies>,
    pub stats: RunStats,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub generation: Generation,
    pub stats: RunStats,
    /// Set when the roster could not be fetched and the generation was skipped.
    pub roster_error: Option<String>,
}

impl GenerationReport {
    pub fn is_skipped(&self) -> bool {
        self.roster_error.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub reports: Vec<GenerationReport>,
    pub output_path: PathBuf,
    pub records_written: usize,
}

impl RunSummary {
    pub fn total_failures(&self) -> usize {
        self.reports.iter().map(|r| r.stats.failures).sum()
    }

    /// Generations whose roster was unavailable; their old records were kept.
    pub fn skipped_generations(&self) -> Vec<Generation> {
        self.reports
            .iter()
            .filter(|r| r.is_skipped())
            .map(|r| r.generation)
            .collect()
    }
}

/// Drives species through the pipeline. Owns the chain cache for the run.
pub struct Orchestrator<'a, A: PokeApi + ?Sized> {
    api: &'a A,
    delay: Duration,
    chains: ChainCache,
}

impl<'a, A: PokeApi + ?Sized> Orchestrator<'a, A> {
    pub fn new(api: &'a A, delay: Duration) -> Self {
        Self {
            api,
            delay,
            chains: ChainCache::new(),
        }
    }

    pub fn chain_cache(&self) -> &ChainCache {
        &self.chains
    }

    /// Process `roster` in order and collect the records of `generation`.
    pub async fn run_generation(&mut self, generation: Generation, roster: &[String]) -> GenerationRun {
        let mut records = Vec::with_capacity(roster.len());
        let mut stats = RunStats::default();

        info!(generation = %generation, species = roster.len(), "processing generation");

        for (index, name) in roster.iter().enumerate() {
            stats.processed += 1;

            match self.process_species(name, generation).await {
                Ok(mapped) if mapped.is_degraded() => {
                    warn!(species = %name, degradations = ?mapped.degradations, "record degraded");
                    stats.failures += 1;
                    stats.degraded += 1;
                    records.push(mapped.record);
                }
                Ok(mapped) => {
                    stats.successes += 1;
                    records.push(mapped.record);
                }
                Err(e) => {
                    warn!(species = %name, error = %e, "species skipped");
                    stats.failures += 1;
                }
            }

            if (index + 1) % PROGRESS_INTERVAL == 0 {
                info!(
                    generation = %generation,
                    done = index + 1,
                    total = roster.len(),
                    failures = stats.failures,
                    "progress"
                );
            }

            pause(self.delay).await;
        }

        info!(
            generation = %generation,
            successes = stats.successes,
            failures = stats.failures,
            degraded = stats.degraded,
            "generation finished"
        );

        GenerationRun {
            generation,
            records,
            stats,
        }
    }

    /// Resolve, look up the chain, fetch the form and map one species.
    pub async fn process_species(
        &mut self,
        name: &str,
        generation: Generation,
    ) -> Result<MappedRecord, SpeciesError> {
        let resolved = resolve_species(self.api, name)
            .await
            .map_err(SpeciesError::Species)?;

        let lineage = match (&resolved.chain_reference, resolved.is_fallback()) {
            (_, true) => Err(Degradation::NoVarieties),
            (None, false) => Err(Degradation::NoChainReference),
            (Some(reference), false) => self
                .chains
                .get(self.api, reference)
                .await
                .ok_or(Degradation::ChainUnavailable),
        };

        pause(self.delay).await;

        let attributes = fetch_form_attributes(self.api, &resolved.canonical_form_name)
            .await
            .map_err(|source| SpeciesError::Form {
                form: resolved.canonical_form_name.clone(),
                source,
            })?;

        Ok(map_record(
            name,
            generation,
            &resolved,
            &attributes,
            lineage,
        ))
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

/// Run every generation of `scope`, then merge and write the pokedex file.
///
/// Per-species failures only show up in the summary. So does a generation
/// whose roster cannot be fetched: it is skipped and its existing records
/// are kept. Only a dataset that cannot be read or written aborts the run.
pub async fn seed<A>(api: &A, scope: GenerationScope, config: &SeedConfig) -> Result<RunSummary, SeedError>
where
    A: PokeApi + ?Sized,
{
    let mut orchestrator = Orchestrator::new(api, config.request_delay);
    let mut records = Vec::new();
    let mut reports = Vec::new();
    let mut retained = Vec::new();

    for generation in scope.targets() {
        let roster = fetch_roster(api, generation).await;
        pause(config.request_delay).await;

        let roster = match roster {
            Ok(roster) => roster,
            Err(e) => {
                warn!(generation = %generation, error = %e, "roster unavailable, generation skipped");
                retained.push(generation);
                reports.push(GenerationReport {
                    generation,
                    stats: RunStats::default(),
                    roster_error: Some(e.to_string()),
                });
                continue;
            }
        };

        let run = orchestrator.run_generation(generation, &roster).await;
        reports.push(GenerationReport {
            generation: run.generation,
            stats: run.stats,
            roster_error: None,
        });
        records.extend(run.records);
    }

    let records_written = dataset::persist(&config.output_path, records, scope, &retained)?;

    Ok(RunSummary {
        reports,
        output_path: config.output_path.clone(),
        records_written,
    })
}
