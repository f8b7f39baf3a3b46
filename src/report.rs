//! Plain-text dump of every record and relationship in the store.

use std::fmt;
use crate::Result;
use crate::link::LinkedNames;
use crate::location::GeographicLocation;
use crate::sequence::DnaSequence;
use crate::species::Species;
use crate::storage::BiodiversityStore;

/// Snapshot of the store taken for the seed report.
///
/// Links are held by natural key on both sides, never by raw id, so the
/// rendered text is identical across re-seeds of the same dataset.
#[derive(Debug, Clone)]
pub struct Report {
    pub species: Vec<Species>,
    pub locations: Vec<GeographicLocation>,
    pub sequences: Vec<DnaSequence>,
    pub links: Vec<LinkedNames>,
}

impl Report {
    /// Read every record from the store
    pub fn load(store: &BiodiversityStore) -> Result<Self> {
        Ok(Self {
            species: store.all_species()?,
            locations: store.all_locations()?,
            sequences: store.all_sequences()?,
            links: store.linked_names()?,
        })
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Species:")?;
        for species in &self.species {
            writeln!(f, "{}: {}", species.scientific_name, species.common_name_or_dash())?;
        }

        writeln!(f, "\nLocations:")?;
        for location in &self.locations {
            writeln!(f, "{}: {}", location.location_name, location.coordinates())?;
        }

        writeln!(f, "\nDNA Sequences:")?;
        for sequence in &self.sequences {
            writeln!(
                f,
                "{}: {}, {}",
                sequence.genbank_accession,
                sequence.gene_or_dash(),
                sequence.length_label()
            )?;
        }

        writeln!(f, "\nSpecies-Locations:")?;
        for link in &self.links {
            writeln!(f, "{} at {}", link.scientific_name, link.location_name)?;
        }
        Ok(())
    }
}

/// Render the seed report as text
pub fn render(store: &BiodiversityStore) -> Result<String> {
    Ok(Report::load(store)?.to_string())
}
