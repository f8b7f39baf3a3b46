//! Storage Layer - SQLite-backed persistence
//!
//! The database file is the sole persistent store, with tables:
//! - species(id, scientific_name UNIQUE, common_name, family, description, date_added)
//! - geographic_locations(id, latitude, longitude, location_name, source, observation_date)
//! - dna_sequences(id, species_id -> species, genbank_accession UNIQUE, gene, sequence, length_bp, source, date_updated)
//! - species_locations(id, species_id -> species, location_id -> geographic_locations)

pub mod schema;
pub mod sqlite;

pub use sqlite::{BiodiversityStore, DbStats, LocationSpeciesCount};
