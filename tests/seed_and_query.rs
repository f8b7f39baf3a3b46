//! End-to-end seeding and querying against a database file on disk.

use biodiversity::link::LinkCandidate;
use biodiversity::query::{run_demo, run_demo_on_file};
use biodiversity::sequence::SequenceCandidate;
use biodiversity::storage::DbStats;
use biodiversity::{BiodiversityStore, Dataset, NewLocation, NewSpecies, QueryEngine, report, seed};
use tempfile::TempDir;

fn seed_file(dir: &TempDir, dataset: &Dataset) -> (DbStats, String) {
    let store = BiodiversityStore::open(&dir.path().join("biodiversity.db")).unwrap();
    seed::seed(&store, dataset).unwrap();
    (store.stats().unwrap(), report::render(&store).unwrap())
}

#[test]
fn test_sample_seed_counts() {
    let dir = TempDir::new().unwrap();
    let (stats, _) = seed_file(&dir, &Dataset::sample());
    assert_eq!(stats, DbStats { species: 10, locations: 10, sequences: 10, links: 12 });
}

#[test]
fn test_reseeding_is_idempotent_across_reopen() {
    let dir = TempDir::new().unwrap();
    let (first_stats, first_report) = seed_file(&dir, &Dataset::sample());

    for _ in 0..3 {
        let (stats, report) = seed_file(&dir, &Dataset::sample());
        assert_eq!(stats, first_stats);
        assert_eq!(report, first_report);
    }
}

#[test]
fn test_same_scientific_name_stored_once() {
    let dir = TempDir::new().unwrap();
    let dataset = Dataset {
        species: vec![
            NewSpecies::new("Panthera tigris sumatrae").with_common_name("Harimau Sumatera"),
            NewSpecies::new("Panthera tigris sumatrae").with_common_name("Sumatran tiger"),
        ],
        ..Dataset::default()
    };

    let (stats, report) = seed_file(&dir, &dataset);
    assert_eq!(stats.species, 1);
    assert!(report.contains("Panthera tigris sumatrae: Harimau Sumatera\n"));
}

#[test]
fn test_sequence_for_unknown_species_adds_nothing() {
    let dir = TempDir::new().unwrap();
    let mut dataset = Dataset::sample();
    dataset.sequences.push(SequenceCandidate {
        scientific_name: "Helarctos malayanus".to_string(),
        genbank_accession: "ZZ000001.1".to_string(),
        gene: Some("COX1".to_string()),
        sequence: "acgt".to_string(),
        length_bp: Some(4),
        source: None,
    });

    let store = BiodiversityStore::open(&dir.path().join("biodiversity.db")).unwrap();
    let summary = seed::seed(&store, &dataset).unwrap();

    assert_eq!(summary.sequences.unresolved, 1);
    assert_eq!(store.count_sequences().unwrap(), 10);
    assert!(store.find_sequence_by_accession("ZZ000001.1").unwrap().is_none());
}

#[test]
fn test_relationship_symmetry() {
    let store = BiodiversityStore::open_in_memory().unwrap();
    let dataset = Dataset {
        species: vec![NewSpecies::new("Probosciger aterrimus")],
        locations: vec![NewLocation::new("Jayapura, Papua", -2.3456, 140.5167)],
        links: vec![LinkCandidate::new("Probosciger aterrimus", "Jayapura, Papua")],
        ..Dataset::default()
    };
    seed::seed(&store, &dataset).unwrap();

    let species = store.find_species_by_name("Probosciger aterrimus").unwrap().unwrap();
    let location = store.find_location_by_name("Jayapura, Papua").unwrap().unwrap();

    assert!(store.locations_for_species(species.id).unwrap().iter().any(|l| l.id == location.id));
    assert!(store.species_at_location(location.id).unwrap().iter().any(|s| s.id == species.id));
}

#[test]
fn test_location_count_of_three() {
    let store = BiodiversityStore::open_in_memory().unwrap();
    let dataset = Dataset {
        species: vec![NewSpecies::new("A"), NewSpecies::new("B"), NewSpecies::new("C"), NewSpecies::new("D")],
        locations: vec![
            NewLocation::new("Site 1", 0.0, 0.0),
            NewLocation::new("Site 2", 1.0, 1.0),
        ],
        links: vec![
            LinkCandidate::new("A", "Site 1"),
            LinkCandidate::new("B", "Site 1"),
            LinkCandidate::new("C", "Site 1"),
            LinkCandidate::new("C", "Site 1"),
            LinkCandidate::new("D", "Site 2"),
        ],
        ..Dataset::default()
    };
    seed::seed(&store, &dataset).unwrap();

    let counts = QueryEngine::new(&store).species_count_per_location().unwrap();
    assert_eq!(counts[0].location.location_name, "Site 1");
    assert_eq!(counts[0].species_count, 3);
    assert_eq!(counts[1].species_count, 1);
}

#[test]
fn test_locations_resolved_by_natural_key() {
    let dir = TempDir::new().unwrap();
    seed_file(&dir, &Dataset::sample());

    let store = BiodiversityStore::open(&dir.path().join("biodiversity.db")).unwrap();
    let engine = QueryEngine::new(&store);

    let rhino: Vec<_> = engine
        .locations_for_species("Rhinoceros sondaicus")
        .unwrap()
        .unwrap()
        .into_iter()
        .map(|l| l.location_name)
        .collect();
    assert_eq!(rhino, vec!["Taman Nasional Ujung Kulon"]);

    let sumatran: Vec<_> = engine
        .locations_for_species("Dicerorhinus sumatrensis")
        .unwrap()
        .unwrap()
        .into_iter()
        .map(|l| l.location_name)
        .collect();
    assert_eq!(sumatran, vec!["Taman Nasional Gunung Leuser", "Aceh"]);
}

#[test]
fn test_query_is_read_only() {
    let dir = TempDir::new().unwrap();
    let (before, _) = seed_file(&dir, &Dataset::sample());

    let store = BiodiversityStore::open(&dir.path().join("biodiversity.db")).unwrap();
    let results = run_demo(&QueryEngine::new(&store)).unwrap();

    assert!(results.species_at_location.results.is_none());
    assert_eq!(store.stats().unwrap(), before);
}

#[test]
fn test_query_on_missing_database_creates_nothing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("typo").join("biodiversty.db");

    let results = run_demo_on_file(&path).unwrap();

    assert!(!path.exists());
    assert!(!path.parent().unwrap().exists());
    assert!(results.species.is_empty());
    assert!(results.locations_for_species.results.is_none());
}

#[test]
fn test_query_json_has_no_full_sequence() {
    let dir = TempDir::new().unwrap();
    seed_file(&dir, &Dataset::sample());

    let results = run_demo_on_file(&dir.path().join("biodiversity.db")).unwrap();
    let json = serde_json::to_value(&results).unwrap();

    for row in json["sequences"]["results"].as_array().unwrap() {
        assert!(row.get("sequence").is_none());
        assert!(row["preview"].as_str().unwrap().len() <= 50);
    }
}
