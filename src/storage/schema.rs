//! Database schema definitions

/// Foreign keys are off by default in SQLite and must be enabled per connection
pub const ENABLE_FOREIGN_KEYS: &str = "PRAGMA foreign_keys = ON";

/// SQL to create the species table
pub const CREATE_SPECIES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS species (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    scientific_name TEXT NOT NULL UNIQUE,
    common_name TEXT,
    family TEXT,
    description TEXT,
    date_added TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%SZ', 'now'))
)
"#;

/// SQL to create the geographic_locations table
pub const CREATE_LOCATIONS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS geographic_locations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    latitude REAL NOT NULL,
    longitude REAL NOT NULL,
    location_name TEXT NOT NULL,
    source TEXT,
    observation_date TEXT
)
"#;

/// SQL to create the dna_sequences table
pub const CREATE_DNA_SEQUENCES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS dna_sequences (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    species_id INTEGER NOT NULL REFERENCES species(id),
    genbank_accession TEXT NOT NULL UNIQUE,
    gene TEXT,
    sequence TEXT NOT NULL,
    length_bp INTEGER,
    source TEXT,
    date_updated TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%SZ', 'now'))
)
"#;

/// SQL to create the species_locations join table
/// No UNIQUE(species_id, location_id): duplicate pairs are checked by the caller
pub const CREATE_SPECIES_LOCATIONS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS species_locations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    species_id INTEGER NOT NULL REFERENCES species(id),
    location_id INTEGER NOT NULL REFERENCES geographic_locations(id)
)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_locations_name ON geographic_locations(location_name)",
    "CREATE INDEX IF NOT EXISTS idx_sequences_species ON dna_sequences(species_id)",
    "CREATE INDEX IF NOT EXISTS idx_species_locations_species ON species_locations(species_id)",
    "CREATE INDEX IF NOT EXISTS idx_species_locations_location ON species_locations(location_id)",
];

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![
        CREATE_SPECIES_TABLE,
        CREATE_LOCATIONS_TABLE,
        CREATE_DNA_SEQUENCES_TABLE,
        CREATE_SPECIES_LOCATIONS_TABLE,
    ];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
