//! Versioned list of file extensions Zed registers itself for.
//!
//! The catalog is data, not code: the built-in copy is `data/extensions.json`
//! compiled into the binary, and `--catalog` swaps in a file of the same
//! shape.

use crate::error::{Result, ZedCliError};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

const BUILTIN: &str = include_str!("../data/extensions.json");

#[derive(Debug, Deserialize)]
struct CatalogFile {
    version: u32,
    extensions: Vec<String>,
}

/// Ordered, de-duplicated set of dotted extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionCatalog {
    version: u32,
    extensions: Vec<String>,
}

impl ExtensionCatalog {
    /// Catalog shipped with this build.
    pub fn builtin() -> Result<Self> {
        Self::parse(BUILTIN)
    }

    /// Reads a catalog file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parses `{ "version": N, "extensions": [...] }`.
    ///
    /// Entries are trimmed, blank ones dropped, and later duplicates (compared
    /// case-insensitively, as the registry does) removed.
    pub fn parse(json: &str) -> Result<Self> {
        let file: CatalogFile =
            serde_json::from_str(json).map_err(|e| ZedCliError::Catalog(e.to_string()))?;
        Ok(Self::from_entries(file.version, file.extensions))
    }

    /// Builds a catalog from entries already in memory.
    pub fn from_entries<I, S>(version: u32, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let extensions = entries
            .into_iter()
            .map(|e| e.as_ref().trim().to_string())
            .filter(|e| !e.is_empty())
            .filter(|e| seen.insert(e.to_lowercase()))
            .collect();
        Self {
            version,
            extensions,
        }
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    pub fn into_extensions(self) -> Vec<String> {
        self.extensions
    }
}
