//! Loading of the metadata shipped inside `SF Symbols.app`.
//!
//! The application keeps its catalog in `Contents/Resources/Metadata`:
//!
//! ```text
//! Metadata/
//!   name_availability.plist      symbols: name -> year, year_to_release
//!   layerset_availability.plist  symbols: name -> {layerset -> year}, year_to_release
//!   categories.plist             [{key, label, icon}]
//!   symbol_categories.plist      name -> [category key]
//!   symbol_search.plist          name -> [keyword]
//!   name_aliases.strings         "alias" = "name";
//!   legacy_aliases.strings       "alias" = "name";
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::strings::StringsTable;
use crate::types::{CategoryEntry, PlatformVersions};

pub const NAME_AVAILABILITY: &str = "name_availability.plist";
pub const LAYERSET_AVAILABILITY: &str = "layerset_availability.plist";
pub const CATEGORIES: &str = "categories.plist";
pub const SYMBOL_CATEGORIES: &str = "symbol_categories.plist";
pub const SYMBOL_SEARCH: &str = "symbol_search.plist";
pub const NAME_ALIASES: &str = "name_aliases.strings";
pub const LEGACY_ALIASES: &str = "legacy_aliases.strings";

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Property list error in {path}: {source}")]
    Plist {
        path: String,
        source: plist::Error,
    },
    #[error("{path} is not valid UTF-8")]
    Encoding { path: String },
    #[error("Malformed line {line} in {path}: {content:?}")]
    MalformedLine {
        path: String,
        line: usize,
        content: String,
    },
}

/// An availability property list: per-symbol items plus the release table.
#[derive(Debug, Clone, Deserialize)]
pub struct AvailabilityFile<T> {
    pub symbols: BTreeMap<String, T>,
    pub year_to_release: BTreeMap<String, PlatformVersions>,
}

/// Per-layerset introducing year, keyed by layerset name.
pub type LayersetYears = BTreeMap<String, String>;

/// Everything the importer needs, parsed and validated.
#[derive(Debug, Clone)]
pub struct SymbolResources {
    /// Symbol name -> introducing year.
    pub name_availability: AvailabilityFile<String>,
    /// Symbol name -> (layerset name -> introducing year).
    pub layerset_availability: AvailabilityFile<LayersetYears>,
    pub categories: Vec<CategoryEntry>,
    /// Symbol name -> category keys.
    pub symbol_categories: BTreeMap<String, Vec<String>>,
    /// Symbol name -> search keywords.
    pub symbol_search: BTreeMap<String, Vec<String>>,
    /// Alias -> symbol name.
    pub name_aliases: StringsTable,
    /// Retired name -> symbol name.
    pub legacy_aliases: StringsTable,
}

/// A metadata directory to read resources from.
#[derive(Debug, Clone)]
pub struct MetadataBundle {
    dir: PathBuf,
}

impl MetadataBundle {
    /// Use `dir` as the metadata directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Locate the metadata directory inside an `SF Symbols.app` bundle.
    pub fn from_app(app: &Path) -> Self {
        Self::new(app.join("Contents").join("Resources").join("Metadata"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load and parse every resource file.
    pub fn load(&self) -> Result<SymbolResources, ResourceError> {
        Ok(SymbolResources {
            name_availability: self.name_availability()?,
            layerset_availability: self.layerset_availability()?,
            categories: self.categories()?,
            symbol_categories: self.symbol_categories()?,
            symbol_search: self.symbol_search()?,
            name_aliases: self.name_aliases()?,
            legacy_aliases: self.legacy_aliases()?,
        })
    }

    pub fn name_availability(&self) -> Result<AvailabilityFile<String>, ResourceError> {
        self.load_plist(NAME_AVAILABILITY)
    }

    pub fn layerset_availability(
        &self,
    ) -> Result<AvailabilityFile<LayersetYears>, ResourceError> {
        self.load_plist(LAYERSET_AVAILABILITY)
    }

    pub fn categories(&self) -> Result<Vec<CategoryEntry>, ResourceError> {
        self.load_plist(CATEGORIES)
    }

    pub fn symbol_categories(&self) -> Result<BTreeMap<String, Vec<String>>, ResourceError> {
        self.load_plist(SYMBOL_CATEGORIES)
    }

    pub fn symbol_search(&self) -> Result<BTreeMap<String, Vec<String>>, ResourceError> {
        self.load_plist(SYMBOL_SEARCH)
    }

    pub fn name_aliases(&self) -> Result<StringsTable, ResourceError> {
        self.load_strings(NAME_ALIASES)
    }

    pub fn legacy_aliases(&self) -> Result<StringsTable, ResourceError> {
        self.load_strings(LEGACY_ALIASES)
    }

    fn read(&self, file: &str) -> Result<(PathBuf, Vec<u8>), ResourceError> {
        let path = self.dir.join(file);
        log::debug!("Loading {}", path.display());
        let bytes = std::fs::read(&path).map_err(|e| ResourceError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok((path, bytes))
    }

    fn load_plist<T: DeserializeOwned>(&self, file: &str) -> Result<T, ResourceError> {
        let (path, bytes) = self.read(file)?;
        plist::from_bytes(&bytes).map_err(|e| ResourceError::Plist {
            path: path.display().to_string(),
            source: e,
        })
    }

    fn load_strings(&self, file: &str) -> Result<StringsTable, ResourceError> {
        let (path, bytes) = self.read(file)?;
        let origin = path.display().to_string();
        let text = String::from_utf8(bytes).map_err(|_| ResourceError::Encoding {
            path: origin.clone(),
        })?;
        StringsTable::parse(&text, &origin)
    }
}
