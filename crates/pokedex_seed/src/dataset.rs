//! Merge fresh records into the pokedex file and write it back.
//!
//! A single-generation run replaces that generation wholesale: every old
//! record of the generation goes, the new ones come in, nothing is patched.
//! The file is rewritten in one `fs::write`; a crash mid-write can leave it
//! truncated.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info};

use crate::error::DatasetError;
use crate::models::{Generation, GenerationScope, PokemonSpecies};

/// Fold `new_records` into `existing` for the generations `scope` covers.
///
/// A full run discards `existing`. The result is sorted by numeric species id;
/// records of generations outside `scope` are carried over untouched.
pub fn merge(
    existing: Vec<PokemonSpecies>,
    new_records: Vec<PokemonSpecies>,
    scope: GenerationScope,
) -> Vec<PokemonSpecies> {
    merge_retaining(existing, new_records, scope, &[])
}

/// Like [`merge`], but the existing records of every generation in
/// `retained` survive even when `scope` covers it.
///
/// Used for generations whose roster could not be fetched: nothing was
/// refreshed for them, so their old records stay.
pub fn merge_retaining(
    existing: Vec<PokemonSpecies>,
    new_records: Vec<PokemonSpecies>,
    scope: GenerationScope,
    retained: &[Generation],
) -> Vec<PokemonSpecies> {
    let refreshed = |generation: u8| {
        let covered = match scope {
            GenerationScope::All => true,
            GenerationScope::Single(target) => target.number() == generation,
        };
        covered && !retained.iter().any(|kept| kept.number() == generation)
    };

    let mut merged: Vec<PokemonSpecies> = existing
        .into_iter()
        .filter(|record| !refreshed(record.generation))
        .collect();
    merged.extend(new_records);

    sort_by_species_id(&mut merged);
    merged
}

/// Stable ascending sort on the numeric value of `species_id`.
pub fn sort_by_species_id(records: &mut [PokemonSpecies]) {
    records.sort_by_key(PokemonSpecies::numeric_id);
}

/// Read the pokedex file. A missing file is an empty dataset.
pub fn load_dataset(path: &Path) -> Result<Vec<PokemonSpecies>, DatasetError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no existing pokedex, starting empty");
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(DatasetError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    serde_json::from_str(&contents).map_err(|source| DatasetError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Write the whole dataset, creating the parent directory if needed.
pub fn write_dataset(path: &Path, records: &[PokemonSpecies]) -> Result<(), DatasetError> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|source| DatasetError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let mut json = serde_json::to_string_pretty(records).map_err(DatasetError::Serialize)?;
    json.push('\n');

    fs::write(path, json).map_err(|source| DatasetError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Merge `new_records` into the file at `path` and rewrite it, keeping the
/// old records of the `retained` generations.
/// Returns the number of records written.
pub fn persist(
    path: &Path,
    new_records: Vec<PokemonSpecies>,
    scope: GenerationScope,
    retained: &[Generation],
) -> Result<usize, DatasetError> {
    // A full run with nothing to keep never looks at the old file, so a
    // corrupt one cannot block it.
    let existing = if scope.is_full_run() && retained.is_empty() {
        Vec::new()
    } else {
        load_dataset(path)?
    };
    let previous = existing.len();

    let merged = merge_retaining(existing, new_records, scope, retained);
    write_dataset(path, &merged)?;

    info!(
        path = %path.display(),
        previous,
        written = merged.len(),
        "pokedex written"
    );
    Ok(merged.len())
}
