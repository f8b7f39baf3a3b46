//! Idempotent seeding
//!
//! A [`Dataset`] holds four candidate lists. [`seed`] applies them in
//! dependency order (species, locations, DNA sequences, links), committing
//! each list as one transaction. Every candidate goes through
//! [`keyed::find_or_create`], so running the same dataset twice creates
//! nothing the second time. Sequences and links reference their parents by
//! natural key; candidates whose parent cannot be resolved are skipped.

pub mod keyed;
pub mod sample;

use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::Result;
use crate::link::{LinkCandidate, NewSpeciesLocationLink};
use crate::location::NewLocation;
use crate::sequence::SequenceCandidate;
use crate::species::NewSpecies;
use crate::storage::BiodiversityStore;

pub use keyed::{Found, Keyed, find_or_create};

/// Candidate records to seed, grouped by entity type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub species: Vec<NewSpecies>,
    #[serde(default)]
    pub locations: Vec<NewLocation>,
    #[serde(default)]
    pub sequences: Vec<SequenceCandidate>,
    #[serde(default)]
    pub links: Vec<LinkCandidate>,
}

impl Dataset {
    /// The built-in sample dataset
    pub fn sample() -> Self {
        sample::dataset()
    }

    /// Load a dataset from a JSON document
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a dataset from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}

/// Per-list outcome counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub created: usize,
    pub existing: usize,
    /// Candidates skipped because a referenced record was missing
    pub unresolved: usize,
}

impl BatchSummary {
    fn record(&mut self, found: Found) {
        match found {
            Found::Created(_) => self.created += 1,
            Found::Existing(_) => self.existing += 1,
        }
    }
}

/// Outcome of a full seeding run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub species: BatchSummary,
    pub locations: BatchSummary,
    pub sequences: BatchSummary,
    pub links: BatchSummary,
}

impl SeedSummary {
    /// Rows inserted across all lists
    pub fn total_created(&self) -> usize {
        self.rows().iter().map(|(_, batch)| batch.created).sum()
    }

    /// Labelled batches in seeding order
    pub fn rows(&self) -> [(&'static str, BatchSummary); 4] {
        [
            ("Species", self.species),
            ("Locations", self.locations),
            ("DNA sequences", self.sequences),
            ("Species-locations", self.links),
        ]
    }
}

/// Seed `dataset` into `store`.
///
/// Each list is committed before the next one starts; a failure part way
/// through leaves earlier lists committed.
pub fn seed(store: &BiodiversityStore, dataset: &Dataset) -> Result<SeedSummary> {
    let species = store.with_transaction(|s| seed_species(s, &dataset.species))?;
    tracing::info!("Species committed: {} new, {} existing", species.created, species.existing);

    let locations = store.with_transaction(|s| seed_locations(s, &dataset.locations))?;
    tracing::info!("Locations committed: {} new, {} existing", locations.created, locations.existing);

    let sequences = store.with_transaction(|s| seed_sequences(s, &dataset.sequences))?;
    tracing::info!(
        "DNA sequences committed: {} new, {} existing, {} unresolved",
        sequences.created,
        sequences.existing,
        sequences.unresolved
    );

    let links = store.with_transaction(|s| seed_links(s, &dataset.links))?;
    tracing::info!(
        "Species-location links committed: {} new, {} existing, {} unresolved",
        links.created,
        links.existing,
        links.unresolved
    );

    Ok(SeedSummary { species, locations, sequences, links })
}

fn seed_species(store: &BiodiversityStore, candidates: &[NewSpecies]) -> Result<BatchSummary> {
    let mut batch = BatchSummary::default();
    for candidate in candidates {
        batch.record(find_or_create(store, candidate)?);
    }
    Ok(batch)
}

fn seed_locations(store: &BiodiversityStore, candidates: &[NewLocation]) -> Result<BatchSummary> {
    let mut batch = BatchSummary::default();
    for candidate in candidates {
        batch.record(find_or_create(store, candidate)?);
    }
    Ok(batch)
}

fn seed_sequences(store: &BiodiversityStore, candidates: &[SequenceCandidate]) -> Result<BatchSummary> {
    let mut batch = BatchSummary::default();
    for candidate in candidates {
        let Some(species) = store.find_species_by_name(&candidate.scientific_name)? else {
            tracing::debug!(
                "Skipping {}: unknown species '{}'",
                candidate.genbank_accession,
                candidate.scientific_name
            );
            batch.unresolved += 1;
            continue;
        };

        let record = candidate.clone().into_new(species.id);
        batch.record(find_or_create(store, &record)?);
    }
    Ok(batch)
}

fn seed_links(store: &BiodiversityStore, candidates: &[LinkCandidate]) -> Result<BatchSummary> {
    let mut batch = BatchSummary::default();
    for candidate in candidates {
        let species = store.find_species_by_name(&candidate.scientific_name)?;
        let location = store.find_location_by_name(&candidate.location_name)?;
        let (Some(species), Some(location)) = (species, location) else {
            tracing::debug!(
                "Skipping link '{}' -> '{}': unresolved name",
                candidate.scientific_name,
                candidate.location_name
            );
            batch.unresolved += 1;
            continue;
        };

        let record = NewSpeciesLocationLink {
            species_id: species.id,
            location_id: location.id,
        };
        batch.record(find_or_create(store, &record)?);
    }
    Ok(batch)
}
