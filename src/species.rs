//! Species records
//!
//! A species is identified by an auto-assigned numeric id and carries a
//! globally unique scientific name as its natural key. It owns any number of
//! DNA sequences and is linked to observation locations through the
//! `species_locations` join table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted species row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Species {
    pub id: i64,
    pub scientific_name: String,
    pub common_name: Option<String>,
    pub family: Option<String>,
    pub description: Option<String>,
    /// Set once at insert time
    pub date_added: DateTime<Utc>,
}

impl Species {
    /// Common name, or `-` when none was recorded
    pub fn common_name_or_dash(&self) -> &str {
        self.common_name.as_deref().unwrap_or("-")
    }
}

/// A species candidate waiting to be inserted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSpecies {
    pub scientific_name: String,
    #[serde(default)]
    pub common_name: Option<String>,
    #[serde(default)]
    pub family: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl NewSpecies {
    pub fn new(scientific_name: impl Into<String>) -> Self {
        Self {
            scientific_name: scientific_name.into(),
            common_name: None,
            family: None,
            description: None,
        }
    }

    pub fn with_common_name(mut self, common_name: impl Into<String>) -> Self {
        self.common_name = Some(common_name.into());
        self
    }

    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.family = Some(family.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_optional_fields() {
        let species = NewSpecies::new("Varanus komodoensis")
            .with_common_name("Komodo")
            .with_family("Varanidae");

        assert_eq!(species.scientific_name, "Varanus komodoensis");
        assert_eq!(species.common_name.as_deref(), Some("Komodo"));
        assert_eq!(species.family.as_deref(), Some("Varanidae"));
        assert!(species.description.is_none());
    }

    #[test]
    fn test_deserialize_with_missing_optionals() {
        let species: NewSpecies =
            serde_json::from_str(r#"{"scientific_name": "Bos javanicus"}"#).unwrap();
        assert_eq!(species, NewSpecies::new("Bos javanicus"));
    }
}
