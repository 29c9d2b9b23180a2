//! Plain entity records for every collection a device keeps.
//!
//! These are the records the surrounding application edits; the sync core
//! treats them as opaque rows inside a snapshot. They carry just enough
//! structure to be a real dataset on the wire.

use crate::timestamp::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A production project (a batch, a season, a build).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Stable record id.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Free-form status label ("planned", "active", "done").
    #[serde(default)]
    pub status: String,
    /// Tags attached to this project.
    #[serde(default)]
    pub tag_ids: Vec<Uuid>,
    /// Creation stamp.
    pub created_at: Timestamp,
    /// Last edit stamp.
    pub updated_at: Timestamp,
}

impl Project {
    /// Creates a new project with a fresh id and current stamps.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Timestamp::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: String::new(),
            status: String::new(),
            tag_ids: Vec::new(),
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// A sellable product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Stable record id.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Stock-keeping unit, if assigned.
    #[serde(default)]
    pub sku: Option<String>,
    /// Project this product came out of.
    #[serde(default)]
    pub project_id: Option<Uuid>,
    /// Unit price in the producer's currency.
    #[serde(default)]
    pub unit_price: Option<f64>,
    /// Free-form notes.
    #[serde(default)]
    pub notes: String,
}

/// One ingredient line inside a recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeLine {
    /// The ingredient used.
    pub ingredient_id: Uuid,
    /// Quantity in `unit`.
    pub quantity: f64,
    /// Unit label ("kg", "l", "pieces").
    pub unit: String,
}

/// A recipe producing one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Stable record id.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Preparation instructions.
    #[serde(default)]
    pub instructions: String,
    /// Ingredient lines.
    #[serde(default)]
    pub lines: Vec<RecipeLine>,
    /// Expected yield quantity.
    #[serde(default)]
    pub yield_quantity: Option<f64>,
    /// Unit of the expected yield.
    #[serde(default)]
    pub yield_unit: Option<String>,
}

impl Recipe {
    /// Creates an empty recipe with a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            instructions: String::new(),
            lines: Vec::new(),
            yield_quantity: None,
            yield_unit: None,
        }
    }

    /// Appends an ingredient line.
    #[must_use]
    pub fn with_line(mut self, ingredient_id: Uuid, quantity: f64, unit: impl Into<String>) -> Self {
        self.lines.push(RecipeLine {
            ingredient_id,
            quantity,
            unit: unit.into(),
        });
        self
    }
}

/// A raw material in stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    /// Stable record id.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Supplier name, if known.
    #[serde(default)]
    pub supplier: Option<String>,
    /// Quantity currently on hand.
    #[serde(default)]
    pub quantity_on_hand: Option<f64>,
    /// Unit of the on-hand quantity.
    #[serde(default)]
    pub unit: Option<String>,
}

/// A vessel or storage container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    /// Stable record id.
    pub id: Uuid,
    /// Display name ("Tank 3", "Shelf B").
    pub name: String,
    /// Capacity in `unit`.
    #[serde(default)]
    pub capacity: Option<f64>,
    /// Unit of the capacity.
    #[serde(default)]
    pub unit: Option<String>,
    /// Where the container lives.
    #[serde(default)]
    pub location: Option<String>,
}

/// A filed document (invoice, certificate, datasheet).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    /// Stable record id.
    pub id: Uuid,
    /// Display title.
    pub title: String,
    /// Original file name.
    pub file_name: String,
    /// MIME type, if detected.
    #[serde(default)]
    pub mime_type: Option<String>,
    /// Record this document is attached to.
    #[serde(default)]
    pub related_id: Option<Uuid>,
}

/// A free-form note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Stable record id.
    pub id: Uuid,
    /// Title line.
    pub title: String,
    /// Note body.
    #[serde(default)]
    pub body: String,
    /// Whether the note is pinned in the UI.
    #[serde(default)]
    pub pinned: bool,
    /// Creation stamp.
    pub created_at: Timestamp,
    /// Last edit stamp.
    pub updated_at: Timestamp,
}

impl Note {
    /// Creates a new note with a fresh id and current stamps.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        let now = Timestamp::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            body: body.into(),
            pinned: false,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// A label records can be tagged with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    /// Stable record id.
    pub id: Uuid,
    /// Label text.
    pub name: String,
    /// Display color, as a CSS color string.
    #[serde(default)]
    pub color: Option<String>,
}

/// A saved web link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Weblink {
    /// Stable record id.
    pub id: Uuid,
    /// Display title.
    pub title: String,
    /// The link itself.
    pub url: String,
    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
}

/// A contact (supplier, customer, collaborator).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Stable record id.
    pub id: Uuid,
    /// Full name.
    pub name: String,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Company or farm name.
    #[serde(default)]
    pub company: Option<String>,
    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
}

/// An image attached to a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAsset {
    /// Stable record id.
    pub id: Uuid,
    /// Original file name.
    pub file_name: String,
    /// Caption shown in the UI.
    #[serde(default)]
    pub caption: Option<String>,
    /// Image bytes, base64-encoded inside the snapshot.
    #[serde(default)]
    pub data: Option<String>,
    /// Record this image is attached to.
    #[serde(default)]
    pub related_id: Option<Uuid>,
}
