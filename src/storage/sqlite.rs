//! SQLite storage implementation

use std::path::Path;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OpenFlags, OptionalExtension, params};
use serde::Serialize;
use crate::{Error, Result};
use crate::link::{LinkedNames, NewSpeciesLocationLink, SpeciesLocationLink};
use crate::location::{GeographicLocation, NewLocation};
use crate::sequence::{DnaSequence, NewDnaSequence};
use crate::species::{NewSpecies, Species};
use super::schema;

const SPECIES_COLUMNS: &str =
    "s.id, s.scientific_name, s.common_name, s.family, s.description, s.date_added";
const LOCATION_COLUMNS: &str =
    "l.id, l.latitude, l.longitude, l.location_name, l.source, l.observation_date";
const SEQUENCE_COLUMNS: &str =
    "d.id, d.species_id, d.genbank_accession, d.gene, d.sequence, d.length_bp, d.source, d.date_updated";

/// SQLite-backed storage for biodiversity records.
///
/// Owns a single connection for the lifetime of the store; dropping the
/// store closes it.
pub struct BiodiversityStore {
    conn: Connection,
}

impl BiodiversityStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        tracing::debug!("Opened database at {}", path.display());
        Ok(store)
    }

    /// Open an existing database file for reading only.
    ///
    /// Fails if the file does not exist; never creates files or tables.
    pub fn open_read_only(path: &Path) -> Result<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        tracing::debug!("Opened database at {} (read-only)", path.display());
        Ok(Self { conn })
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Enable constraint enforcement and create any missing tables.
    /// A no-op on an already initialized database.
    fn initialize_schema(&self) -> Result<()> {
        self.conn.execute_batch(schema::ENABLE_FOREIGN_KEYS)?;
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        Ok(())
    }

    /// Borrow the underlying connection for ad-hoc queries
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Run `f` inside a transaction.
    ///
    /// Commits when `f` returns `Ok`; any error rolls the whole unit back.
    pub fn with_transaction<T>(&self, f: impl FnOnce(&Self) -> Result<T>) -> Result<T> {
        let tx = self.conn.unchecked_transaction()?;
        let value = f(self)?;
        tx.commit()?;
        Ok(value)
    }

    // ========== Species Operations ==========

    /// Insert a species, returning its new id.
    ///
    /// Fails with a constraint violation if the scientific name is taken.
    pub fn insert_species(&self, species: &NewSpecies) -> Result<i64> {
        self.conn.execute(
            r#"
            INSERT INTO species (scientific_name, common_name, family, description, date_added)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                species.scientific_name,
                species.common_name,
                species.family,
                species.description,
                Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Get a species by id
    pub fn get_species(&self, id: i64) -> Result<Option<Species>> {
        self.conn
            .query_row(
                &format!("SELECT {SPECIES_COLUMNS} FROM species s WHERE s.id = ?1"),
                [id],
                row_to_species,
            )
            .optional()
            .map_err(Into::into)
    }

    /// Find a species by its scientific name
    pub fn find_species_by_name(&self, scientific_name: &str) -> Result<Option<Species>> {
        self.conn
            .query_row(
                &format!("SELECT {SPECIES_COLUMNS} FROM species s WHERE s.scientific_name = ?1"),
                [scientific_name],
                row_to_species,
            )
            .optional()
            .map_err(Into::into)
    }

    /// All species in insertion order
    pub fn all_species(&self) -> Result<Vec<Species>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {SPECIES_COLUMNS} FROM species s ORDER BY s.id"))?;
        let species = stmt
            .query_map([], row_to_species)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(species)
    }

    /// Count all species
    pub fn count_species(&self) -> Result<usize> {
        self.count_rows("species")
    }

    // ========== Location Operations ==========

    /// Insert a location, returning its new id
    pub fn insert_location(&self, location: &NewLocation) -> Result<i64> {
        self.conn.execute(
            r#"
            INSERT INTO geographic_locations (latitude, longitude, location_name, source, observation_date)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                location.latitude,
                location.longitude,
                location.location_name,
                location.source,
                location.observation_date.map(|d| d.to_rfc3339()),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Get a location by id
    pub fn get_location(&self, id: i64) -> Result<Option<GeographicLocation>> {
        self.conn
            .query_row(
                &format!("SELECT {LOCATION_COLUMNS} FROM geographic_locations l WHERE l.id = ?1"),
                [id],
                row_to_location,
            )
            .optional()
            .map_err(Into::into)
    }

    /// Find the first location with the given name.
    ///
    /// Names are not unique at the storage layer; the lowest id wins.
    pub fn find_location_by_name(&self, location_name: &str) -> Result<Option<GeographicLocation>> {
        self.conn
            .query_row(
                &format!(
                    "SELECT {LOCATION_COLUMNS} FROM geographic_locations l
                     WHERE l.location_name = ?1 ORDER BY l.id LIMIT 1"
                ),
                [location_name],
                row_to_location,
            )
            .optional()
            .map_err(Into::into)
    }

    /// All locations in insertion order
    pub fn all_locations(&self) -> Result<Vec<GeographicLocation>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {LOCATION_COLUMNS} FROM geographic_locations l ORDER BY l.id"
        ))?;
        let locations = stmt
            .query_map([], row_to_location)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(locations)
    }

    /// Count all locations
    pub fn count_locations(&self) -> Result<usize> {
        self.count_rows("geographic_locations")
    }

    // ========== DNA Sequence Operations ==========

    /// Insert a DNA sequence, returning its new id.
    ///
    /// Fails with a constraint violation on a duplicate accession or an
    /// unknown species id.
    pub fn insert_sequence(&self, sequence: &NewDnaSequence) -> Result<i64> {
        self.conn.execute(
            r#"
            INSERT INTO dna_sequences (species_id, genbank_accession, gene, sequence, length_bp, source, date_updated)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                sequence.species_id,
                sequence.genbank_accession,
                sequence.gene,
                sequence.sequence,
                sequence.length_bp,
                sequence.source,
                Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Find a sequence by GenBank accession
    pub fn find_sequence_by_accession(&self, accession: &str) -> Result<Option<DnaSequence>> {
        self.conn
            .query_row(
                &format!("SELECT {SEQUENCE_COLUMNS} FROM dna_sequences d WHERE d.genbank_accession = ?1"),
                [accession],
                row_to_sequence,
            )
            .optional()
            .map_err(Into::into)
    }

    /// All sequences in insertion order
    pub fn all_sequences(&self) -> Result<Vec<DnaSequence>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {SEQUENCE_COLUMNS} FROM dna_sequences d ORDER BY d.id"))?;
        let sequences = stmt
            .query_map([], row_to_sequence)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(sequences)
    }

    /// Sequences owned by a species
    pub fn sequences_for_species(&self, species_id: i64) -> Result<Vec<DnaSequence>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {SEQUENCE_COLUMNS} FROM dna_sequences d WHERE d.species_id = ?1 ORDER BY d.id"
        ))?;
        let sequences = stmt
            .query_map([species_id], row_to_sequence)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(sequences)
    }

    /// The species that owns a sequence
    pub fn owning_species(&self, sequence: &DnaSequence) -> Result<Species> {
        self.get_species(sequence.species_id)?.ok_or_else(|| {
            Error::MissingRecord(format!(
                "species {} for sequence {}",
                sequence.species_id, sequence.genbank_accession
            ))
        })
    }

    /// Count all sequences
    pub fn count_sequences(&self) -> Result<usize> {
        self.count_rows("dna_sequences")
    }

    // ========== Species/Location Link Operations ==========

    /// Insert a join row, returning its new id.
    ///
    /// No duplicate check happens here; see `seed::find_or_create`.
    pub fn insert_link(&self, link: &NewSpeciesLocationLink) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO species_locations (species_id, location_id) VALUES (?1, ?2)",
            params![link.species_id, link.location_id],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Find the first join row for an exact (species, location) pair
    pub fn find_link(&self, species_id: i64, location_id: i64) -> Result<Option<SpeciesLocationLink>> {
        self.conn
            .query_row(
                "SELECT id, species_id, location_id FROM species_locations
                 WHERE species_id = ?1 AND location_id = ?2 ORDER BY id LIMIT 1",
                [species_id, location_id],
                row_to_link,
            )
            .optional()
            .map_err(Into::into)
    }

    /// All join rows in insertion order
    pub fn all_links(&self) -> Result<Vec<SpeciesLocationLink>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, species_id, location_id FROM species_locations ORDER BY id")?;
        let links = stmt
            .query_map([], row_to_link)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(links)
    }

    /// All join rows resolved to scientific name and location name
    pub fn linked_names(&self) -> Result<Vec<LinkedNames>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT sl.id, s.scientific_name, l.location_name
            FROM species_locations sl
            JOIN species s ON s.id = sl.species_id
            JOIN geographic_locations l ON l.id = sl.location_id
            ORDER BY sl.id
            "#,
        )?;
        let names = stmt
            .query_map([], |row| {
                Ok(LinkedNames {
                    link_id: row.get(0)?,
                    scientific_name: row.get(1)?,
                    location_name: row.get(2)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(names)
    }

    /// The set of locations a species was observed at
    pub fn locations_for_species(&self, species_id: i64) -> Result<Vec<GeographicLocation>> {
        let mut stmt = self.conn.prepare(&format!(
            r#"
            SELECT DISTINCT {LOCATION_COLUMNS}
            FROM geographic_locations l
            JOIN species_locations sl ON sl.location_id = l.id
            WHERE sl.species_id = ?1
            ORDER BY l.id
            "#
        ))?;
        let locations = stmt
            .query_map([species_id], row_to_location)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(locations)
    }

    /// The set of species observed at a location
    pub fn species_at_location(&self, location_id: i64) -> Result<Vec<Species>> {
        let mut stmt = self.conn.prepare(&format!(
            r#"
            SELECT DISTINCT {SPECIES_COLUMNS}
            FROM species s
            JOIN species_locations sl ON sl.species_id = s.id
            WHERE sl.location_id = ?1
            ORDER BY s.id
            "#
        ))?;
        let species = stmt
            .query_map([location_id], row_to_species)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(species)
    }

    /// Distinct species count for every location, including locations with none
    pub fn species_count_per_location(&self) -> Result<Vec<LocationSpeciesCount>> {
        let mut stmt = self.conn.prepare(&format!(
            r#"
            SELECT {LOCATION_COLUMNS}, COUNT(DISTINCT sl.species_id)
            FROM geographic_locations l
            LEFT JOIN species_locations sl ON sl.location_id = l.id
            GROUP BY l.id
            ORDER BY l.id
            "#
        ))?;
        let counts = stmt
            .query_map([], |row| {
                let count: i64 = row.get(6)?;
                Ok(LocationSpeciesCount {
                    location: row_to_location(row)?,
                    species_count: count as usize,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(counts)
    }

    /// Count all join rows
    pub fn count_links(&self) -> Result<usize> {
        self.count_rows("species_locations")
    }

    // ========== Bulk Operations ==========

    /// Get database statistics
    pub fn stats(&self) -> Result<DbStats> {
        Ok(DbStats {
            species: self.count_species()?,
            locations: self.count_locations()?,
            sequences: self.count_sequences()?,
            links: self.count_links()?,
        })
    }

    fn count_rows(&self, table: &str) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

/// Parse an RFC 3339 timestamp as stored in the database
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| Error::Timestamp(format!("{value}: {e}")))
}

fn timestamp_column(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    parse_timestamp(&raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}

fn row_to_species(row: &rusqlite::Row) -> rusqlite::Result<Species> {
    Ok(Species {
        id: row.get(0)?,
        scientific_name: row.get(1)?,
        common_name: row.get(2)?,
        family: row.get(3)?,
        description: row.get(4)?,
        date_added: timestamp_column(row, 5)?,
    })
}

fn row_to_location(row: &rusqlite::Row) -> rusqlite::Result<GeographicLocation> {
    let observed: Option<String> = row.get(5)?;
    let observation_date = match observed {
        Some(_) => Some(timestamp_column(row, 5)?),
        None => None,
    };

    Ok(GeographicLocation {
        id: row.get(0)?,
        latitude: row.get(1)?,
        longitude: row.get(2)?,
        location_name: row.get(3)?,
        source: row.get(4)?,
        observation_date,
    })
}

fn row_to_sequence(row: &rusqlite::Row) -> rusqlite::Result<DnaSequence> {
    Ok(DnaSequence {
        id: row.get(0)?,
        species_id: row.get(1)?,
        genbank_accession: row.get(2)?,
        gene: row.get(3)?,
        sequence: row.get(4)?,
        length_bp: row.get(5)?,
        source: row.get(6)?,
        date_updated: timestamp_column(row, 7)?,
    })
}

fn row_to_link(row: &rusqlite::Row) -> rusqlite::Result<SpeciesLocationLink> {
    Ok(SpeciesLocationLink {
        id: row.get(0)?,
        species_id: row.get(1)?,
        location_id: row.get(2)?,
    })
}

/// A location with the number of distinct species linked to it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationSpeciesCount {
    pub location: GeographicLocation,
    pub species_count: usize,
}

/// Database statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DbStats {
    pub species: usize,
    pub locations: usize,
    pub sequences: usize,
    pub links: usize,
}

impl std::fmt::Display for DbStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Database Statistics:")?;
        writeln!(f, "  Species: {}", self.species)?;
        writeln!(f, "  Locations: {}", self.locations)?;
        writeln!(f, "  DNA sequences: {}", self.sequences)?;
        writeln!(f, "  Species-location links: {}", self.links)
    }
}
