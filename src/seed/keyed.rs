//! Generic find-or-create by natural key
//!
//! Each insertable record type names its table and the columns forming its
//! natural key. `find_or_create` looks up an existing row by those columns
//! and inserts only when none is found, so repeated seeding never produces
//! duplicate rows and never trips a UNIQUE constraint.

use rusqlite::types::Value;
use rusqlite::{OptionalExtension, params_from_iter};
use crate::Result;
use crate::link::NewSpeciesLocationLink;
use crate::location::NewLocation;
use crate::sequence::NewDnaSequence;
use crate::species::NewSpecies;
use crate::storage::BiodiversityStore;

/// A record that can be deduplicated by a natural key before insertion.
pub trait Keyed {
    /// Table the record lives in
    const TABLE: &'static str;
    /// Columns that together form the natural key
    const KEY_COLUMNS: &'static [&'static str];

    /// Values for `KEY_COLUMNS`, in the same order
    fn key_values(&self) -> Vec<Value>;

    /// Insert the record, returning the new id
    fn insert(&self, store: &BiodiversityStore) -> Result<i64>;

    /// Human-readable key for log lines
    fn describe(&self) -> String;
}

/// Outcome of a find-or-create
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Found {
    /// A row with the same natural key was already present
    Existing(i64),
    /// A new row was inserted
    Created(i64),
}

impl Found {
    pub fn id(&self) -> i64 {
        match self {
            Found::Existing(id) | Found::Created(id) => *id,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, Found::Created(_))
    }
}

/// Id of the first row matching the record's natural key, if any
pub fn find_existing<K: Keyed>(store: &BiodiversityStore, record: &K) -> Result<Option<i64>> {
    let predicate = K::KEY_COLUMNS
        .iter()
        .enumerate()
        .map(|(i, column)| format!("{} = ?{}", column, i + 1))
        .collect::<Vec<_>>()
        .join(" AND ");
    let sql = format!("SELECT id FROM {} WHERE {} ORDER BY id LIMIT 1", K::TABLE, predicate);

    let id = store
        .connection()
        .query_row(&sql, params_from_iter(record.key_values()), |row| row.get(0))
        .optional()?;
    Ok(id)
}

/// Look up `record` by natural key and insert it only when absent
pub fn find_or_create<K: Keyed>(store: &BiodiversityStore, record: &K) -> Result<Found> {
    if let Some(id) = find_existing(store, record)? {
        tracing::debug!("{} {} already present (id {})", K::TABLE, record.describe(), id);
        return Ok(Found::Existing(id));
    }

    let id = record.insert(store)?;
    tracing::debug!("{} {} inserted (id {})", K::TABLE, record.describe(), id);
    Ok(Found::Created(id))
}

impl Keyed for NewSpecies {
    const TABLE: &'static str = "species";
    const KEY_COLUMNS: &'static [&'static str] = &["scientific_name"];

    fn key_values(&self) -> Vec<Value> {
        vec![Value::Text(self.scientific_name.clone())]
    }

    fn insert(&self, store: &BiodiversityStore) -> Result<i64> {
        store.insert_species(self)
    }

    fn describe(&self) -> String {
        format!("'{}'", self.scientific_name)
    }
}

impl Keyed for NewLocation {
    const TABLE: &'static str = "geographic_locations";
    const KEY_COLUMNS: &'static [&'static str] = &["location_name"];

    fn key_values(&self) -> Vec<Value> {
        vec![Value::Text(self.location_name.clone())]
    }

    fn insert(&self, store: &BiodiversityStore) -> Result<i64> {
        store.insert_location(self)
    }

    fn describe(&self) -> String {
        format!("'{}'", self.location_name)
    }
}

impl Keyed for NewDnaSequence {
    const TABLE: &'static str = "dna_sequences";
    const KEY_COLUMNS: &'static [&'static str] = &["genbank_accession"];

    fn key_values(&self) -> Vec<Value> {
        vec![Value::Text(self.genbank_accession.clone())]
    }

    fn insert(&self, store: &BiodiversityStore) -> Result<i64> {
        store.insert_sequence(self)
    }

    fn describe(&self) -> String {
        self.genbank_accession.clone()
    }
}

impl Keyed for NewSpeciesLocationLink {
    const TABLE: &'static str = "species_locations";
    const KEY_COLUMNS: &'static [&'static str] = &["species_id", "location_id"];

    fn key_values(&self) -> Vec<Value> {
        vec![Value::Integer(self.species_id), Value::Integer(self.location_id)]
    }

    fn insert(&self, store: &BiodiversityStore) -> Result<i64> {
        store.insert_link(self)
    }

    fn describe(&self) -> String {
        format!("({}, {})", self.species_id, self.location_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_or_create_species_once() {
        let store = BiodiversityStore::open_in_memory().unwrap();
        let species = NewSpecies::new("Tarsius tarsier").with_common_name("Tarsius Sulawesi");

        let first = find_or_create(&store, &species).unwrap();
        let second = find_or_create(&store, &species).unwrap();

        assert!(first.is_created());
        assert_eq!(second, Found::Existing(first.id()));
        assert_eq!(store.count_species().unwrap(), 1);
    }

    #[test]
    fn test_existing_row_is_not_overwritten() {
        let store = BiodiversityStore::open_in_memory().unwrap();
        find_or_create(&store, &NewSpecies::new("Bos javanicus").with_common_name("Banteng Jawa"))
            .unwrap();
        find_or_create(&store, &NewSpecies::new("Bos javanicus").with_common_name("Banteng"))
            .unwrap();

        let stored = store.find_species_by_name("Bos javanicus").unwrap().unwrap();
        assert_eq!(stored.common_name.as_deref(), Some("Banteng Jawa"));
    }

    #[test]
    fn test_link_pair_is_composite_key() {
        let store = BiodiversityStore::open_in_memory().unwrap();
        let species_id = store.insert_species(&NewSpecies::new("Pongo pygmaeus")).unwrap();
        let first_location = store
            .insert_location(&NewLocation::new("Taman Nasional Tanjung Puting", 1.2596, 114.8186))
            .unwrap();
        let second_location = store
            .insert_location(&NewLocation::new("Taman Nasional Gunung Leuser", 3.5894, 98.6722))
            .unwrap();

        let a = NewSpeciesLocationLink { species_id, location_id: first_location };
        let b = NewSpeciesLocationLink { species_id, location_id: second_location };

        assert!(find_or_create(&store, &a).unwrap().is_created());
        assert!(find_or_create(&store, &b).unwrap().is_created());
        assert!(!find_or_create(&store, &a).unwrap().is_created());
        assert_eq!(store.count_links().unwrap(), 2);
    }
}
