//! The fixed set of illustrative lookups run by `biodiversity-query`.

use std::path::Path;
use serde::Serialize;
use crate::Result;
use crate::location::GeographicLocation;
use crate::sequence::{DnaSequence, PREVIEW_LEN, length_label};
use crate::species::Species;
use crate::storage::{BiodiversityStore, LocationSpeciesCount};
use super::QueryEngine;

/// Species whose DNA sequences are listed
pub const SEQUENCE_SPECIES: &str = "Nisaetus bartelsi";
/// Location whose species are listed. Matches no seeded location name, so
/// this lookup demonstrates the not-found path.
pub const SPECIES_LOCATION: &str = "Gunung Halimun-Salak National Park";
/// Species whose locations are listed
pub const LOCATION_SPECIES: &str = "Rhinoceros sondaicus";

/// A lookup keyed by name; `results` is `None` when the name is unknown
#[derive(Debug, Clone, Serialize)]
pub struct Lookup<T> {
    pub name: String,
    pub results: Option<Vec<T>>,
}

impl<T> Lookup<T> {
    fn new(name: &str, results: Option<Vec<T>>) -> Self {
        Self { name: name.to_string(), results }
    }
}

/// A sequence as shown by the demo: the raw bases are cut to a prefix
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SequenceRow {
    pub genbank_accession: String,
    pub gene: Option<String>,
    pub length_bp: Option<u32>,
    pub preview: String,
}

impl From<&DnaSequence> for SequenceRow {
    fn from(seq: &DnaSequence) -> Self {
        Self {
            genbank_accession: seq.genbank_accession.clone(),
            gene: seq.gene.clone(),
            length_bp: seq.length_bp,
            preview: seq.preview(PREVIEW_LEN).to_string(),
        }
    }
}

/// Results of every demonstration lookup
#[derive(Debug, Clone, Serialize)]
pub struct DemoResults {
    pub species: Vec<Species>,
    pub sequences: Lookup<SequenceRow>,
    pub species_at_location: Lookup<Species>,
    pub locations_for_species: Lookup<GeographicLocation>,
    pub species_per_location: Vec<LocationSpeciesCount>,
}

/// Run all demonstration lookups
pub fn run_demo(engine: &QueryEngine<'_>) -> Result<DemoResults> {
    Ok(DemoResults {
        species: engine.list_species()?,
        sequences: Lookup::new(
            SEQUENCE_SPECIES,
            engine
                .sequences_for_species(SEQUENCE_SPECIES)?
                .map(|seqs| seqs.iter().map(SequenceRow::from).collect()),
        ),
        species_at_location: Lookup::new(SPECIES_LOCATION, engine.species_at_location(SPECIES_LOCATION)?),
        locations_for_species: Lookup::new(LOCATION_SPECIES, engine.locations_for_species(LOCATION_SPECIES)?),
        species_per_location: engine.species_count_per_location()?,
    })
}

impl DemoResults {
    /// Results for a database that does not exist: no rows, every name unknown
    pub fn not_found() -> Self {
        Self {
            species: Vec::new(),
            sequences: Lookup::new(SEQUENCE_SPECIES, None),
            species_at_location: Lookup::new(SPECIES_LOCATION, None),
            locations_for_species: Lookup::new(LOCATION_SPECIES, None),
            species_per_location: Vec::new(),
        }
    }
}

/// Run the demo against a database file without modifying it.
///
/// A missing file yields [`DemoResults::not_found`] and is not created.
pub fn run_demo_on_file(path: &Path) -> Result<DemoResults> {
    if !path.exists() {
        tracing::debug!("{} does not exist; nothing to query", path.display());
        return Ok(DemoResults::not_found());
    }

    let store = BiodiversityStore::open_read_only(path)?;
    run_demo(&QueryEngine::new(&store))
}

impl std::fmt::Display for DemoResults {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "All species:")?;
        for species in &self.species {
            writeln!(
                f,
                "ID: {}, Scientific Name: {}, Common Name: {}",
                species.id,
                species.scientific_name,
                species.common_name_or_dash()
            )?;
        }

        writeln!(f, "\nDNA sequences for {}:", self.sequences.name)?;
        for seq in self.sequences.results.iter().flatten() {
            writeln!(
                f,
                "Accession: {}, Gene: {}, Length: {}, Sequence (first {} bp): {}...",
                seq.genbank_accession,
                seq.gene.as_deref().unwrap_or("-"),
                length_label(seq.length_bp),
                PREVIEW_LEN,
                seq.preview
            )?;
        }

        writeln!(f, "\nSpecies at {}:", self.species_at_location.name)?;
        for species in self.species_at_location.results.iter().flatten() {
            writeln!(
                f,
                "Scientific Name: {}, Common Name: {}",
                species.scientific_name,
                species.common_name_or_dash()
            )?;
        }

        writeln!(f, "\nLocations for {}:", self.locations_for_species.name)?;
        for location in self.locations_for_species.results.iter().flatten() {
            writeln!(
                f,
                "Location: {}, Coordinates: {}",
                location.location_name,
                location.coordinates()
            )?;
        }

        writeln!(f, "\nSpecies count per location:")?;
        for entry in &self.species_per_location {
            writeln!(
                f,
                "Location: {}, Species Count: {}",
                entry.location.location_name, entry.species_count
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::{Dataset, seed};

    #[test]
    fn test_demo_on_sample() {
        let store = BiodiversityStore::open_in_memory().unwrap();
        seed(&store, &Dataset::sample()).unwrap();
        let results = run_demo(&QueryEngine::new(&store)).unwrap();

        assert_eq!(results.species.len(), 10);
        assert!(results.species_at_location.results.is_none());
        assert_eq!(results.locations_for_species.results.as_ref().map(Vec::len), Some(1));

        let text = results.to_string();
        assert!(text.contains(
            "Sequence (first 50 bp): ggcatagttggcaccgcccttagcctacttatccgcgcagaactcggcca...\n"
        ));
        assert!(text.contains("Location: Taman Nasional Ujung Kulon, Coordinates: (-7.8014, 110.5041)\n"));
        assert!(text.contains("Species at Gunung Halimun-Salak National Park:\n\nLocations for"));
    }

    #[test]
    fn test_demo_on_empty_store() {
        let store = BiodiversityStore::open_in_memory().unwrap();
        let results = run_demo(&QueryEngine::new(&store)).unwrap();

        assert!(results.species.is_empty());
        assert!(results.sequences.results.is_none());
        assert!(results.locations_for_species.results.is_none());

        let json = serde_json::to_value(&results).unwrap();
        assert!(json["sequences"]["results"].is_null());
    }

    #[test]
    fn test_json_sequences_carry_prefix_only() {
        let store = BiodiversityStore::open_in_memory().unwrap();
        seed(&store, &Dataset::sample()).unwrap();
        let results = run_demo(&QueryEngine::new(&store)).unwrap();

        let json = serde_json::to_value(&results).unwrap();
        let rows = json["sequences"]["results"].as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].get("sequence").is_none());
        assert_eq!(rows[0]["preview"].as_str().unwrap().len(), PREVIEW_LEN);
        assert_eq!(rows[0]["genbank_accession"], "MT158243.1");
        assert_eq!(rows[0]["length_bp"], 625);
    }

    #[test]
    fn test_missing_file_is_not_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent").join("biodiversity.db");

        let results = run_demo_on_file(&path).unwrap();

        assert!(!path.exists());
        assert!(!dir.path().join("absent").exists());
        assert!(results.species.is_empty());
        assert!(results.sequences.results.is_none());
        assert!(results.to_string().starts_with("All species:\n\nDNA sequences for Nisaetus bartelsi:\n"));
    }

    #[test]
    fn test_existing_file_is_left_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("biodiversity.db");
        {
            let store = BiodiversityStore::open(&path).unwrap();
            seed(&store, &Dataset::sample()).unwrap();
        }
        let before = std::fs::read(&path).unwrap();

        let results = run_demo_on_file(&path).unwrap();

        assert_eq!(results.species.len(), 10);
        assert_eq!(std::fs::read(&path).unwrap(), before);
    }
}
