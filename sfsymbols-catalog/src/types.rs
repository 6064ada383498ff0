//! Data model types for the symbol catalog.
//!
//! These types represent the persistent catalog schema: releases, categories,
//! layersets, symbols, their join rows, and the search projection. Row
//! identifiers are assigned by the database on insert.

use serde::{Deserialize, Serialize};

/// A database-assigned row identifier.
pub type RowId = i64;

// ── Release ─────────────────────────────────────────────────────────────────

/// Minimum OS version per platform for a yearly SF Symbols release.
///
/// Field names follow the keys used by the `year_to_release` dictionaries in
/// the availability property lists. Platforms not listed here are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformVersions {
    #[serde(rename = "iOS")]
    pub ios: String,
    #[serde(rename = "macOS")]
    pub macos: String,
    #[serde(rename = "visionOS")]
    pub visionos: String,
    #[serde(rename = "watchOS")]
    pub watchos: String,
}

/// A yearly release, keyed by its year string (e.g. "2019", "2020.1").
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Release {
    pub id: RowId,
    pub year: String,
    pub platforms: PlatformVersions,
}

// ── Category ────────────────────────────────────────────────────────────────

/// A category definition as it appears in `categories.plist`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryEntry {
    pub key: String,
    pub label: String,
    /// Name of the symbol used as the category's icon.
    pub icon: String,
}

/// A stored category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: RowId,
    pub key: String,
    pub label: String,
    pub icon: String,
}

// ── Layerset ────────────────────────────────────────────────────────────────

/// A rendering-capability variant such as "hierarchical" or "multicolor".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Layerset {
    pub id: RowId,
    pub name: String,
}

// ── Symbol ──────────────────────────────────────────────────────────────────

/// A symbol and the release it was introduced in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Symbol {
    pub id: RowId,
    pub name: String,
    pub release_id: RowId,
}

/// Membership of a symbol in a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SymbolCategory {
    pub symbol_id: RowId,
    pub category_id: RowId,
}

/// The release in which a layerset variant of a symbol became available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LayersetAvailability {
    pub symbol_id: RowId,
    pub layerset_id: RowId,
    pub release_id: RowId,
}

// ── Search ──────────────────────────────────────────────────────────────────

/// Full-text search projection of a symbol. `id` is the symbol's row id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRecord {
    pub id: RowId,
    pub name: String,
    pub aliases: Vec<String>,
    pub keywords: Vec<String>,
}

// ── Detail ──────────────────────────────────────────────────────────────────

/// A layerset availability joined to its layerset and release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayersetRelease {
    pub layerset: Layerset,
    pub release: Release,
}

/// A symbol with all of its relations resolved. Built on read, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SymbolDetail {
    pub symbol: Symbol,
    pub release: Release,
    pub categories: Vec<Category>,
    pub layerset_availability: Vec<LayersetRelease>,
}
