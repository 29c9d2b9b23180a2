//! # Croft Model
//!
//! Dataset snapshot types and the JSON wire codec for Croft.
//!
//! This crate provides:
//! - Plain entity records for every collection a device keeps
//! - `Dataset`, the full set of collections on one device
//! - `SyncDocument`, the stamped snapshot exchanged between devices
//! - `Timestamp`, a fixed-width RFC 3339 instant whose string order is
//!   chronological
//!
//! This is a pure data crate with no I/O operations.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod document;
mod error;
mod records;
mod timestamp;

pub use document::{Dataset, SyncDocument};
pub use error::{ModelError, ModelResult};
pub use records::{
    Contact, Container, DocumentRecord, ImageAsset, Ingredient, Note, Product, Project, Recipe,
    RecipeLine, Tag, Weblink,
};
pub use timestamp::Timestamp;
