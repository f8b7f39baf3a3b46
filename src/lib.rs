//! # Biodiversity - relational records for species observations
//!
//! Biodiversity provides:
//! - Typed records for species, observation locations and DNA sequences
//! - A many-to-many species/location relation backed by an explicit join table
//! - SQLite-backed storage with unique and foreign-key constraints
//! - Idempotent find-or-create seeding from a fixed or JSON dataset
//! - Read-only query operations over the populated store

pub mod species;
pub mod location;
pub mod sequence;
pub mod link;
pub mod storage;
pub mod seed;
pub mod report;
pub mod query;
pub mod config;
pub mod ui;

// Re-exports for convenient access
pub use species::{NewSpecies, Species};
pub use location::{GeographicLocation, NewLocation};
pub use sequence::{DnaSequence, NewDnaSequence};
pub use link::{LinkedNames, NewSpeciesLocationLink, SpeciesLocationLink};
pub use storage::BiodiversityStore;
pub use seed::{Dataset, SeedSummary};
pub use query::QueryEngine;

/// Result type alias for Biodiversity operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Biodiversity operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Dataset error: {0}")]
    Dataset(#[from] serde_json::Error),

    #[error("Invalid timestamp: {0}")]
    Timestamp(String),

    #[error("Record not found: {0}")]
    MissingRecord(String),
}

impl Error {
    /// True when the storage engine rejected a write because of a
    /// UNIQUE, NOT NULL or FOREIGN KEY constraint.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            Error::Storage(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation
        )
    }
}
