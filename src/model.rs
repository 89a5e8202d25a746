//! Implementor table data model.
//!
//! The field names on the wire follow the documentation generator's payload
//! (`text`, `synthetic`, `types`), so a table deserializes straight from the
//! generated data.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::markup;

/// Name of the library (crate) a list of records belongs to.
pub type LibraryId = String;

/// One trait-implementation occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImplementationRecord {
    /// HTML fragment such as `impl <a ..>Default</a> for <a ..>Foo</a>`.
    #[serde(rename = "text")]
    pub description_markup: String,

    /// `true` for auto trait and blanket implementations.
    #[serde(rename = "synthetic")]
    pub is_synthetic: bool,

    /// Fully-qualified path(s) of the implementing type.
    #[serde(rename = "types")]
    pub implementing_type_path: Vec<String>,
}

impl ImplementationRecord {
    pub fn new<S: Into<String>>(
        description_markup: S,
        is_synthetic: bool,
        implementing_type_path: Vec<String>,
    ) -> Self {
        Self {
            description_markup: description_markup.into(),
            is_synthetic,
            implementing_type_path,
        }
    }

    /// Path of the implemented trait, taken from the first trait link.
    pub fn trait_path(&self) -> Option<String> {
        markup::links(&self.description_markup)
            .into_iter()
            .find(|link| link.kind == "trait")
            .map(|link| link.path().to_string())
    }

    pub fn plain_text(&self) -> crate::InternalResult<String> {
        markup::plain_text(&self.description_markup)
    }
}

/// Mapping from library to its implementation records.
///
/// Keys are kept sorted, so two tables built with different insertion orders
/// compare equal and serialize identically. Record order within a library is
/// preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImplementorTable {
    libraries: BTreeMap<LibraryId, Vec<ImplementationRecord>>,
}

impl ImplementorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the records for `library`, returning the list it replaced.
    pub fn insert<S: Into<LibraryId>>(
        &mut self,
        library: S,
        records: Vec<ImplementationRecord>,
    ) -> Option<Vec<ImplementationRecord>> {
        self.libraries.insert(library.into(), records)
    }

    pub fn with_library<S: Into<LibraryId>>(
        mut self,
        library: S,
        records: Vec<ImplementationRecord>,
    ) -> Self {
        self.insert(library, records);
        self
    }

    pub fn get(&self, library: &str) -> Option<&[ImplementationRecord]> {
        self.libraries.get(library).map(Vec::as_slice)
    }

    pub fn contains_library(&self, library: &str) -> bool {
        self.libraries.contains_key(library)
    }

    pub fn libraries(&self) -> impl Iterator<Item = &str> {
        self.libraries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ImplementationRecord])> {
        self.libraries
            .iter()
            .map(|(library, records)| (library.as_str(), records.as_slice()))
    }

    /// Number of libraries.
    pub fn len(&self) -> usize {
        self.libraries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.libraries.is_empty()
    }

    /// Number of records across all libraries.
    pub fn record_count(&self) -> usize {
        self.libraries.values().map(Vec::len).sum()
    }
}

impl FromIterator<(LibraryId, Vec<ImplementationRecord>)> for ImplementorTable {
    fn from_iter<I: IntoIterator<Item = (LibraryId, Vec<ImplementationRecord>)>>(
        iter: I,
    ) -> Self {
        Self {
            libraries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ImplementorTable {
    type Item = (LibraryId, Vec<ImplementationRecord>);
    type IntoIter = std::collections::btree_map::IntoIter<LibraryId, Vec<ImplementationRecord>>;

    fn into_iter(self) -> Self::IntoIter {
        self.libraries.into_iter()
    }
}
