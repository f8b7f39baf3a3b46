//! DNA sequence records
//!
//! Every sequence belongs to exactly one species (`species_id` is a required
//! foreign key) and is identified for seeding purposes by its GenBank
//! accession, which is unique across the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of bases shown by [`DnaSequence::preview`]
pub const PREVIEW_LEN: usize = 50;

/// A persisted DNA sequence row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DnaSequence {
    pub id: i64,
    pub species_id: i64,
    pub genbank_accession: String,
    pub gene: Option<String>,
    pub sequence: String,
    pub length_bp: Option<u32>,
    pub source: Option<String>,
    pub date_updated: DateTime<Utc>,
}

impl DnaSequence {
    /// First `len` characters of the raw sequence.
    pub fn preview(&self, len: usize) -> &str {
        match self.sequence.char_indices().nth(len) {
            Some((idx, _)) => &self.sequence[..idx],
            None => &self.sequence,
        }
    }

    pub fn gene_or_dash(&self) -> &str {
        self.gene.as_deref().unwrap_or("-")
    }

    /// Length in base pairs, formatted for display
    pub fn length_label(&self) -> String {
        length_label(self.length_bp)
    }
}

/// `625 bp`, or `? bp` when the length was not recorded
pub fn length_label(length_bp: Option<u32>) -> String {
    match length_bp {
        Some(bp) => format!("{} bp", bp),
        None => "? bp".to_string(),
    }
}

/// A sequence ready to be inserted; the owning species is already resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDnaSequence {
    pub species_id: i64,
    pub genbank_accession: String,
    pub gene: Option<String>,
    pub sequence: String,
    pub length_bp: Option<u32>,
    pub source: Option<String>,
}

/// A sequence candidate as it appears in a dataset: the owning species is
/// referenced by scientific name and resolved at seed time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceCandidate {
    pub scientific_name: String,
    pub genbank_accession: String,
    #[serde(default)]
    pub gene: Option<String>,
    pub sequence: String,
    #[serde(default)]
    pub length_bp: Option<u32>,
    #[serde(default)]
    pub source: Option<String>,
}

impl SequenceCandidate {
    /// Bind the candidate to a resolved species id.
    pub fn into_new(self, species_id: i64) -> NewDnaSequence {
        NewDnaSequence {
            species_id,
            genbank_accession: self.genbank_accession,
            gene: self.gene,
            sequence: self.sequence,
            length_bp: self.length_bp,
            source: self.source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(sequence: &str) -> DnaSequence {
        DnaSequence {
            id: 1,
            species_id: 1,
            genbank_accession: "MT158243.1".to_string(),
            gene: Some("COX1".to_string()),
            sequence: sequence.to_string(),
            length_bp: Some(625),
            source: Some("NCBI".to_string()),
            date_updated: Utc::now(),
        }
    }

    #[test]
    fn test_preview_truncates() {
        let seq = sample(&"acgt".repeat(20));
        assert_eq!(seq.preview(PREVIEW_LEN).len(), 50);
        assert!(seq.sequence.starts_with(seq.preview(PREVIEW_LEN)));
    }

    #[test]
    fn test_preview_short_sequence_is_whole() {
        let seq = sample("atgtt...");
        assert_eq!(seq.preview(PREVIEW_LEN), "atgtt...");
    }

    #[test]
    fn test_length_label() {
        let mut seq = sample("acgt");
        assert_eq!(seq.length_label(), "625 bp");
        seq.length_bp = None;
        assert_eq!(seq.length_label(), "? bp");
    }
}
