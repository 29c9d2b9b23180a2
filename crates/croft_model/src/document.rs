//! The dataset and the stamped snapshot exchanged between devices.

use crate::error::ModelResult;
use crate::records::{
    Contact, Container, DocumentRecord, ImageAsset, Ingredient, Note, Product, Project, Recipe,
    Tag, Weblink,
};
use crate::timestamp::Timestamp;
use serde::{Deserialize, Serialize};

/// The full set of collections one device keeps.
///
/// Collections are ordered; equality is elementwise. The empty dataset is
/// `Dataset::default()`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Free-form notes.
    #[serde(default)]
    pub notes: Vec<Note>,
    /// Production projects.
    #[serde(default)]
    pub projects: Vec<Project>,
    /// Sellable products.
    #[serde(default)]
    pub products: Vec<Product>,
    /// Vessels and storage containers.
    #[serde(default)]
    pub containers: Vec<Container>,
    /// Recipes.
    #[serde(default)]
    pub recipes: Vec<Recipe>,
    /// Raw materials.
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    /// Tags.
    #[serde(default)]
    pub tags: Vec<Tag>,
    /// Saved web links.
    #[serde(default)]
    pub weblinks: Vec<Weblink>,
    /// Contacts.
    #[serde(default)]
    pub contacts: Vec<Contact>,
    /// Attached images.
    #[serde(default)]
    pub images: Vec<ImageAsset>,
    /// Filed documents.
    #[serde(default)]
    pub documents: Vec<DocumentRecord>,
}

impl Dataset {
    /// Returns true if every collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.record_count() == 0
    }

    /// Total number of records across all collections.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.notes.len()
            + self.projects.len()
            + self.products.len()
            + self.containers.len()
            + self.recipes.len()
            + self.ingredients.len()
            + self.tags.len()
            + self.weblinks.len()
            + self.contacts.len()
            + self.images.len()
            + self.documents.len()
    }
}

/// A versioned snapshot of the entire dataset.
///
/// This is the single JSON object written to and read from the remote
/// location. `last_sync` (wire key `lastSync`) is stamped at the moment the
/// snapshot is produced for upload and never backdated. There is no schema
/// version field on the wire; a blob that does not decode as this shape is
/// corrupt as far as the engine is concerned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncDocument {
    /// The collections, flattened into the top-level object.
    #[serde(flatten)]
    pub dataset: Dataset,
    /// Stamp of the moment this snapshot was produced.
    #[serde(rename = "lastSync")]
    pub last_sync: Timestamp,
}

impl SyncDocument {
    /// Builds a snapshot of `dataset` stamped with the current time.
    #[must_use]
    pub fn snapshot(dataset: Dataset) -> Self {
        Self {
            dataset,
            last_sync: Timestamp::now(),
        }
    }

    /// Builds a snapshot with an explicit stamp.
    #[must_use]
    pub fn stamped(dataset: Dataset, last_sync: Timestamp) -> Self {
        Self { dataset, last_sync }
    }

    /// Encodes the snapshot to its wire form.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Codec` if serialization fails.
    pub fn to_json(&self) -> ModelResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decodes a snapshot from its wire form.
    ///
    /// Missing collections decode as empty (older blobs simply lack some
    /// keys), but a missing or malformed `lastSync` is a decode failure.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Codec` if the blob is not a valid snapshot.
    pub fn from_json(content: &str) -> ModelResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Discards the stamp and yields the dataset for wholesale adoption.
    #[must_use]
    pub fn into_dataset(self) -> Dataset {
        self.dataset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{Note, Project, Tag};
    use uuid::Uuid;

    fn sample_dataset() -> Dataset {
        Dataset {
            projects: vec![Project::new("Spring pressing")],
            notes: vec![Note::new("Reminder", "Order bottles")],
            tags: vec![Tag {
                id: Uuid::new_v4(),
                name: "2024".into(),
                color: None,
            }],
            ..Dataset::default()
        }
    }

    #[test]
    fn record_count_spans_collections() {
        let dataset = sample_dataset();
        assert_eq!(dataset.record_count(), 3);
        assert!(!dataset.is_empty());
        assert!(Dataset::default().is_empty());
    }

    #[test]
    fn wire_form_flattens_collections_beside_last_sync() {
        let doc = SyncDocument::snapshot(sample_dataset());
        let json = doc.to_json().unwrap();

        for key in [
            "\"notes\"",
            "\"projects\"",
            "\"products\"",
            "\"containers\"",
            "\"recipes\"",
            "\"ingredients\"",
            "\"tags\"",
            "\"weblinks\"",
            "\"contacts\"",
            "\"images\"",
            "\"documents\"",
            "\"lastSync\"",
        ] {
            assert!(json.contains(key), "missing wire key {key}");
        }
        // Flattened: no nested "dataset" object on the wire.
        assert!(!json.contains("\"dataset\""));
    }

    #[test]
    fn decode_tolerates_missing_collections() {
        let doc =
            SyncDocument::from_json(r#"{"lastSync":"2024-01-01T10:00:00.000Z"}"#).unwrap();
        assert!(doc.dataset.is_empty());
        assert_eq!(doc.last_sync.as_str(), "2024-01-01T10:00:00.000Z");
    }

    #[test]
    fn decode_requires_last_sync() {
        assert!(SyncDocument::from_json(r#"{"projects":[]}"#).is_err());
        assert!(SyncDocument::from_json("not json at all").is_err());
    }

    #[test]
    fn round_trip_preserves_dataset() {
        let doc = SyncDocument::snapshot(sample_dataset());
        let back = SyncDocument::from_json(&doc.to_json().unwrap()).unwrap();
        assert_eq!(back, doc);
        assert_eq!(back.into_dataset(), doc.dataset);
    }
}
