//! Query engine implementation
//!
//! Read-only lookups over a populated store:
//! - List all species
//! - DNA sequences owned by a species
//! - Species observed at a location, locations a species was observed at
//! - Distinct species count per location
//!
//! Lookups keyed by a name return `Ok(None)` when the name is unknown, so
//! callers can skip their output instead of failing.

use crate::Result;
use crate::location::GeographicLocation;
use crate::sequence::DnaSequence;
use crate::species::Species;
use crate::storage::{BiodiversityStore, LocationSpeciesCount};

/// Query engine over a biodiversity store
pub struct QueryEngine<'a> {
    store: &'a BiodiversityStore,
}

impl<'a> QueryEngine<'a> {
    /// Create a new query engine
    pub fn new(store: &'a BiodiversityStore) -> Self {
        Self { store }
    }

    /// Every species, in id order
    pub fn list_species(&self) -> Result<Vec<Species>> {
        self.store.all_species()
    }

    /// Sequences owned by the species with this scientific name
    pub fn sequences_for_species(&self, scientific_name: &str) -> Result<Option<Vec<DnaSequence>>> {
        match self.store.find_species_by_name(scientific_name)? {
            Some(species) => Ok(Some(self.store.sequences_for_species(species.id)?)),
            None => Ok(None),
        }
    }

    /// Species linked to the location with this name
    pub fn species_at_location(&self, location_name: &str) -> Result<Option<Vec<Species>>> {
        match self.store.find_location_by_name(location_name)? {
            Some(location) => Ok(Some(self.store.species_at_location(location.id)?)),
            None => Ok(None),
        }
    }

    /// Locations linked to the species with this scientific name
    pub fn locations_for_species(&self, scientific_name: &str) -> Result<Option<Vec<GeographicLocation>>> {
        match self.store.find_species_by_name(scientific_name)? {
            Some(species) => Ok(Some(self.store.locations_for_species(species.id)?)),
            None => Ok(None),
        }
    }

    /// Distinct linked species for every location
    pub fn species_count_per_location(&self) -> Result<Vec<LocationSpeciesCount>> {
        self.store.species_count_per_location()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::{Dataset, seed};

    fn seeded() -> BiodiversityStore {
        let store = BiodiversityStore::open_in_memory().unwrap();
        seed(&store, &Dataset::sample()).unwrap();
        store
    }

    fn location_names(locations: &[GeographicLocation]) -> Vec<&str> {
        locations.iter().map(|l| l.location_name.as_str()).collect()
    }

    #[test]
    fn test_list_species() {
        let store = seeded();
        let engine = QueryEngine::new(&store);
        let species = engine.list_species().unwrap();
        assert_eq!(species.len(), 10);
        assert_eq!(species[0].scientific_name, "Nisaetus bartelsi");
    }

    #[test]
    fn test_sequences_for_species() {
        let store = seeded();
        let engine = QueryEngine::new(&store);

        let sequences = engine.sequences_for_species("Nisaetus bartelsi").unwrap().unwrap();
        assert_eq!(sequences.len(), 1);
        assert_eq!(sequences[0].genbank_accession, "MT158243.1");
        assert!(sequences[0].sequence.starts_with("ggcatagttggcacc"));

        assert!(engine.sequences_for_species("Homo floresiensis").unwrap().is_none());
    }

    #[test]
    fn test_locations_for_species() {
        let store = seeded();
        let engine = QueryEngine::new(&store);

        let rhino = engine.locations_for_species("Rhinoceros sondaicus").unwrap().unwrap();
        assert_eq!(location_names(&rhino), vec!["Taman Nasional Ujung Kulon"]);

        let sumatran = engine.locations_for_species("Dicerorhinus sumatrensis").unwrap().unwrap();
        assert_eq!(
            location_names(&sumatran),
            vec!["Taman Nasional Gunung Leuser", "Aceh"]
        );
    }

    #[test]
    fn test_species_at_location() {
        let store = seeded();
        let engine = QueryEngine::new(&store);

        let species = engine.species_at_location("Taman Nasional Ujung Kulon").unwrap().unwrap();
        let names: Vec<_> = species.iter().map(|s| s.scientific_name.as_str()).collect();
        assert_eq!(names, vec!["Rhinoceros sondaicus", "Bos javanicus"]);

        assert!(engine
            .species_at_location("Gunung Halimun-Salak National Park")
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_species_count_per_location() {
        let store = seeded();
        let engine = QueryEngine::new(&store);
        let counts = engine.species_count_per_location().unwrap();

        assert_eq!(counts.len(), 10);
        assert_eq!(counts.iter().map(|c| c.species_count).sum::<usize>(), 12);
        let leuser = counts
            .iter()
            .find(|c| c.location.location_name == "Taman Nasional Gunung Leuser")
            .unwrap();
        assert_eq!(leuser.species_count, 2);
    }
}
