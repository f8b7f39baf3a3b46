//! Built-in sample dataset: Indonesian endemic and threatened species,
//! national-park observation sites, and COX1/ND2 GenBank records.

use chrono::{DateTime, TimeZone, Utc};
use crate::link::LinkCandidate;
use crate::location::NewLocation;
use crate::sequence::SequenceCandidate;
use crate::species::NewSpecies;
use super::Dataset;

const NISAETUS_BARTELSI_COX1: &str = "ggcatagttggcaccgcccttagcctacttatccgcgcagaactcggccaaccgggtaccctactgggcgatgaccaaatctacaatgtagtcgtcactgcccatgctttcgtaataatcttcttcatagtcataccaatcataatcggaggctttggaaactgacttgtcccactcataatcggcgcccctgacatagccttcccacgcataaacaacataagcttctgactacttcccccatccttcctcctactagcctcttcaacagtagaagccggggctggcaccggatgaacggtctatcccccactagctggcaacatagcccatgctggcgcctcagtagacttggccatcttttctctacatctagcaggaatctcatccatcttaggggcaattaacttcatcacgaccgctattaacataaaacctccagccctctctcaataccaaacacccctattcgtctgatctgtactcatcaccgctgtcctactactactctcactcccgtcctagctgccggcattactatgctactcacagaccgaaacctcaacacaacattcttcgaccccgccggcggcggtgacccagtcctgtaccaacacctct";

pub(crate) fn dataset() -> Dataset {
    Dataset {
        species: species(),
        locations: locations(),
        sequences: sequences(),
        links: links(),
    }
}

fn species() -> Vec<NewSpecies> {
    [
        ("Nisaetus bartelsi", "Elang Jawa", "Accipitridae", "Burung elang endemik Jawa, terancam punah."),
        ("Panthera tigris sumatrae", "Harimau Sumatera", "Felidae", "Kucing besar endemik Sumatera, kritis."),
        ("Pongo pygmaeus", "Orangutan Kalimantan", "Hominidae", "Primata endemik Kalimantan, terancam."),
        ("Rhinoceros sondaicus", "Badak Jawa", "Rhinocerotidae", "Mamalia besar terancam punah di Jawa."),
        ("Dicerorhinus sumatrensis", "Badak Sumatera", "Rhinocerotidae", "Badak kecil endemik Sumatera, kritis."),
        ("Probosciger aterrimus", "Kakatua Raja", "Cacatuidae", "Burung kakatua besar endemik Papua."),
        ("Tarsius tarsier", "Tarsius Sulawesi", "Tarsiidae", "Primata kecil endemik Sulawesi."),
        ("Cacatua sulphurea", "Kakatua Jambul Kuning", "Cacatuidae", "Kakatua endemik Sulawesi dan Nusa Tenggara."),
        ("Bos javanicus", "Banteng Jawa", "Bovidae", "Sapi liar endemik Jawa, terancam."),
        ("Varanus komodoensis", "Komodo", "Varanidae", "Kadal terbesar di dunia, endemik Nusa Tenggara."),
    ]
    .into_iter()
    .map(|(scientific, common, family, description)| {
        NewSpecies::new(scientific)
            .with_common_name(common)
            .with_family(family)
            .with_description(description)
    })
    .collect()
}

fn observed(year: i32, month: u32, day: u32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).single()
}

fn locations() -> Vec<NewLocation> {
    [
        (-6.7527, 106.7314, "Taman Nasional Gunung Halimun-Salak", observed(2020, 1, 15)),
        (-6.8033, 106.9905, "Taman Nasional Gede Pangrango", observed(2021, 3, 22)),
        (3.5894, 98.6722, "Taman Nasional Gunung Leuser", observed(2019, 7, 10)),
        (1.2596, 114.8186, "Taman Nasional Tanjung Puting", observed(2021, 6, 18)),
        (-7.8014, 110.5041, "Taman Nasional Ujung Kulon", observed(2022, 2, 14)),
        (4.9530, 97.3152, "Aceh", observed(2020, 9, 9)),
        (-2.3456, 140.5167, "Jayapura, Papua", observed(2021, 8, 25)),
        (-0.8613, 119.9213, "Taman Nasional Lore Lindu", observed(2021, 12, 3)),
        (-8.4667, 117.4333, "Pulau Komodo, Taman Nasional Komodo", observed(2020, 5, 10)),
        (-7.3167, 110.1833, "Taman Nasional Baluran", observed(2021, 9, 12)),
    ]
    .into_iter()
    .map(|(lat, lon, name, date)| NewLocation::new(name, lat, lon).with_source("GBIF").observed_at(date))
    .collect()
}

fn sequences() -> Vec<SequenceCandidate> {
    [
        ("Nisaetus bartelsi", "MT158243.1", "COX1", NISAETUS_BARTELSI_COX1, 625),
        ("Panthera tigris sumatrae", "KF564297.1", "COX1", "atgtt...", 658),
        ("Pongo pygmaeus", "NC_021769.1", "COX1", "ggtat...", 681),
        ("Rhinoceros sondaicus", "JX914863.1", "COX1", "tgcga...", 655),
        ("Dicerorhinus sumatrensis", "FJ347896.1", "COX1", "agtcc...", 672),
        ("Probosciger aterrimus", "KM096453.1", "COX1", "cgtag...", 694),
        ("Tarsius tarsier", "EU784123.1", "COX1", "agctg...", 657),
        ("Cacatua sulphurea", "DQ123456.1", "COX1", "gctaa...", 709),
        ("Bos javanicus", "AF497803.1", "ND2", "ttagc...", 1041),
        ("Varanus komodoensis", "MK628540.1", "COX1", "cctag...", 680),
    ]
    .into_iter()
    .map(|(scientific, accession, gene, sequence, length_bp)| SequenceCandidate {
        scientific_name: scientific.to_string(),
        genbank_accession: accession.to_string(),
        gene: Some(gene.to_string()),
        sequence: sequence.to_string(),
        length_bp: Some(length_bp),
        source: Some("NCBI".to_string()),
    })
    .collect()
}

fn links() -> Vec<LinkCandidate> {
    [
        ("Nisaetus bartelsi", "Taman Nasional Gunung Halimun-Salak"),
        ("Nisaetus bartelsi", "Taman Nasional Gede Pangrango"),
        ("Panthera tigris sumatrae", "Taman Nasional Gunung Leuser"),
        ("Pongo pygmaeus", "Taman Nasional Tanjung Puting"),
        ("Rhinoceros sondaicus", "Taman Nasional Ujung Kulon"),
        ("Dicerorhinus sumatrensis", "Taman Nasional Gunung Leuser"),
        ("Dicerorhinus sumatrensis", "Aceh"),
        ("Probosciger aterrimus", "Jayapura, Papua"),
        ("Tarsius tarsier", "Taman Nasional Lore Lindu"),
        ("Bos javanicus", "Taman Nasional Baluran"),
        ("Bos javanicus", "Taman Nasional Ujung Kulon"),
        ("Varanus komodoensis", "Pulau Komodo, Taman Nasional Komodo"),
    ]
    .into_iter()
    .map(|(scientific, location)| LinkCandidate::new(scientific, location))
    .collect()
}
