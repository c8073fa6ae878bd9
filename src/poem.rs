//! Poem records and the validated catalog they are dealt from.

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};
use crate::validate;

/// Number of poems in a complete catalog (the Hyakunin Isshu).
pub const CATALOG_SIZE: usize = 100;
pub const MIN_POEM_ID: u32 = 1;
pub const MAX_POEM_ID: u32 = 100;

/// One poem card. The upper verse is read aloud; the lower verse is printed on the card
/// the player has to find.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoemRecord {
    pub id: u32,
    pub author: String,
    pub upper_verse: String,
    pub lower_verse: String,
}

impl PoemRecord {
    pub fn new(
        id: u32,
        author: impl Into<String>,
        upper_verse: impl Into<String>,
        lower_verse: impl Into<String>,
    ) -> Self {
        Self {
            id,
            author: author.into(),
            upper_verse: upper_verse.into(),
            lower_verse: lower_verse.into(),
        }
    }
}

/// Immutable, validated set of poems. Only constructible through the validator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoemCatalog {
    records: Vec<PoemRecord>,
}

impl PoemCatalog {
    /// Parse a JSON array of poem objects, rejecting it unless every rule passes.
    pub fn from_json(text: &str) -> Result<Self> {
        let value: serde_json::Value =
            serde_json::from_str(text).map_err(|e| GameError::Catalog(format!("invalid JSON: {e}")))?;
        let report = validate::validate_collection(&value);
        if !report.valid {
            log::warn!("poem catalog rejected with {} error(s)", report.errors.len());
            return Err(GameError::Catalog(report.errors.join("; ")));
        }
        let records: Vec<PoemRecord> = serde_json::from_value(value)
            .map_err(|e| GameError::Catalog(format!("poem decode failed: {e}")))?;
        log::info!("loaded poem catalog ({} poems)", records.len());
        Ok(Self { records })
    }

    pub fn from_records(records: Vec<PoemRecord>) -> Result<Self> {
        let report = validate::validate_records(&records);
        if !report.valid {
            return Err(GameError::Catalog(report.errors.join("; ")));
        }
        Ok(Self { records })
    }

    pub fn get(&self, id: u32) -> Option<&PoemRecord> {
        self.records.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[PoemRecord] {
        &self.records
    }
}
