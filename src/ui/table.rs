use tabled::{settings::Style, Table, Tabled};
use crate::seed::SeedSummary;
use crate::storage::DbStats;

#[derive(Tabled)]
struct BatchRow {
    #[tabled(rename = "Dataset")]
    dataset: &'static str,
    #[tabled(rename = "Created")]
    created: usize,
    #[tabled(rename = "Existing")]
    existing: usize,
    #[tabled(rename = "Unresolved")]
    unresolved: usize,
}

#[derive(Tabled)]
struct CountRow {
    #[tabled(rename = "Table")]
    table: &'static str,
    #[tabled(rename = "Rows")]
    rows: usize,
}

/// Created/existing/unresolved counts per seeded list
pub fn seed_summary_table(summary: &SeedSummary) -> String {
    let rows: Vec<BatchRow> = summary
        .rows()
        .into_iter()
        .map(|(dataset, batch)| BatchRow {
            dataset,
            created: batch.created,
            existing: batch.existing,
            unresolved: batch.unresolved,
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Row count per table
pub fn stats_table(stats: &DbStats) -> String {
    let rows = vec![
        CountRow { table: "species", rows: stats.species },
        CountRow { table: "geographic_locations", rows: stats.locations },
        CountRow { table: "dna_sequences", rows: stats.sequences },
        CountRow { table: "species_locations", rows: stats.links },
    ];

    Table::new(rows).with(Style::rounded()).to_string()
}
