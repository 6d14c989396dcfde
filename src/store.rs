//! Definition of [`MappingStore`], the in-memory two-way mapping of names and addresses.

use std::{collections::HashMap, fs::File, io::Read, path::Path};

use log::{debug, warn};

use crate::{
    error::{LoadError, ResolveError},
    name::is_valid_name,
    resolver::Resolver,
};

/// Specifies what to do with malformed names while loading mapping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NamePolicy {
    /// Log warning and register the name anyway.
    #[default]
    Lenient,
    /// Reject the whole mapping.
    Strict,
}

/// Immutable two-way mapping of names to addresses.
///
/// Address to name mapping is derived from the name to address one
/// on construction. If several names are mapped to the same address,
/// it is unspecified which of them the address resolves to.
#[derive(Debug, Default, Clone)]
pub struct MappingStore {
    /// Authoritative name to address mapping.
    by_name: HashMap<String, String>,
    /// Address to name mapping derived from `by_name`.
    by_addr: HashMap<String, String>,
}

impl MappingStore {
    /// Create store from the name to address mapping.
    /// Names are not validated.
    pub fn new(by_name: HashMap<String, String>) -> Self {
        let mut by_addr = HashMap::with_capacity(by_name.len());
        for (name, addr) in by_name.iter() {
            if let Some(prev) = by_addr.insert(addr.clone(), name.clone()) {
                debug!(
                    "address {:?} is registered for both {:?} and {:?}",
                    addr, prev, name
                );
            }
        }

        Self { by_name, by_addr }
    }

    /// Load store from JSON object of names to addresses.
    pub fn from_reader(reader: impl Read, policy: NamePolicy) -> Result<Self, LoadError> {
        let by_name: HashMap<String, String> = serde_json::from_reader(reader)?;

        let mut invalid: Vec<&String> = by_name
            .keys()
            .filter(|name| !is_valid_name(name))
            .collect();
        invalid.sort();

        match policy {
            NamePolicy::Strict => {
                if let Some(name) = invalid.first() {
                    return Err(LoadError::InvalidName(name.to_string()));
                }
            }
            NamePolicy::Lenient => {
                for name in invalid {
                    warn!("registering malformed name {:?}", name);
                }
            }
        }

        Ok(Self::new(by_name))
    }

    /// Load store from the JSON file at path.
    pub fn from_file(path: impl AsRef<Path>, policy: NamePolicy) -> Result<Self, LoadError> {
        let file = File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file), policy)
    }

    /// Returns address registered for the name.
    pub fn resolve_name(&self, name: &str) -> Option<&str> {
        self.by_name.get(name).map(String::as_str)
    }

    /// Returns name registered for the address.
    pub fn resolve_addr(&self, addr: &str) -> Option<&str> {
        self.by_addr.get(addr).map(String::as_str)
    }

    /// Returns number of registered names.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Returns `true` if no names are registered.
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

impl Resolver for MappingStore {
    fn resolve_name(&self, name: &str) -> Result<String, ResolveError> {
        MappingStore::resolve_name(self, name)
            .map(str::to_owned)
            .ok_or(ResolveError::NotRegistered)
    }

    fn resolve_addr(&self, addr: &str) -> Result<String, ResolveError> {
        MappingStore::resolve_addr(self, addr)
            .map(str::to_owned)
            .ok_or(ResolveError::NotRegistered)
    }
}

//////////////////////////////////////////////////////////////////////////////////////////
