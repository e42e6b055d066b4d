//! Country records and the in-memory store that owns them.

use std::collections::HashMap;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// A country keyed by its short code.
///
/// Serialized as `{"Code": ..., "Name": ...}`. Absent fields decode as empty
/// strings so that validation, not decoding, reports them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Country {
    /// Unique short identifier, used as the store key
    #[serde(default)]
    pub code: String,
    /// Display name
    #[serde(default)]
    pub name: String,
}

impl Country {
    /// Creates a country from a code and a name.
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }

    /// Checks that both required attributes are present.
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.code.is_empty() {
            return Err(StoreError::MissingCode);
        }
        if self.name.is_empty() {
            return Err(StoreError::MissingName);
        }
        Ok(())
    }
}

/// In-memory mapping from country code to country.
///
/// Reads share the lock, writes hold it exclusively. The lock is only held
/// while the map is touched. Every value handed out is a clone, so callers
/// can never alias stored state.
#[derive(Debug, Default)]
pub struct CountryStore {
    countries: RwLock<HashMap<String, Country>>,
}

impl CountryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a country or replaces the one stored under the same code.
    ///
    /// # Arguments
    /// * `country` - Record to store
    ///
    /// # Returns
    /// `Result<Country, StoreError>` with a copy of the stored record, or a
    /// validation error if the code or name is empty. A rejected record
    /// leaves the store unchanged.
    pub fn upsert(&self, country: Country) -> Result<Country, StoreError> {
        country.validate()?;
        let stored = country.clone();
        self.countries.write().insert(country.code.clone(), country);
        Ok(stored)
    }

    /// Looks up a country by code.
    ///
    /// # Returns
    /// `Result<Country, StoreError>` with a copy of the record, or
    /// `StoreError::CountryNotFound` if nothing is stored under `code`.
    pub fn get(&self, code: &str) -> Result<Country, StoreError> {
        self.countries
            .read()
            .get(code)
            .cloned()
            .ok_or_else(|| StoreError::CountryNotFound {
                code: code.to_string(),
            })
    }

    /// Returns copies of every stored country, taken under a single read lock.
    ///
    /// Order is unspecified.
    pub fn list(&self) -> Vec<Country> {
        self.countries.read().values().cloned().collect()
    }

    /// Removes the country stored under `code`. Removing an absent code is a no-op.
    pub fn delete(&self, code: &str) {
        self.countries.write().remove(code);
    }

    /// Returns the number of stored countries.
    pub fn len(&self) -> usize {
        self.countries.read().len()
    }

    /// Returns true if no country is stored.
    pub fn is_empty(&self) -> bool {
        self.countries.read().is_empty()
    }
}
