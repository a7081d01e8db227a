//! Vendor Catalog
//!
//! Mapping vendor id -> profile. Loading is entry-by-entry: an entry that is
//! not an object or does not deserialize is skipped with a warning and the
//! rest of the catalog still loads.
use crate::{is_yaml, read_file};
use nac_core::{NacError, NacResult, VendorProfile};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct VendorCatalog {
    vendors: BTreeMap<String, VendorProfile>,
}

impl VendorCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a `.yaml`/`.yml` or JSON catalog file
    pub fn load(path: impl AsRef<Path>) -> NacResult<Self> {
        let path = path.as_ref();
        let content = read_file(path)?;
        if is_yaml(path) {
            Self::from_yaml(&content)
        } else {
            Self::from_json(&content)
        }
    }

    pub fn from_json(json: &str) -> NacResult<Self> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| NacError::CatalogError(e.to_string()))?;
        Self::from_value(value)
    }

    pub fn from_yaml(yaml: &str) -> NacResult<Self> {
        let value: Value =
            serde_yaml::from_str(yaml).map_err(|e| NacError::CatalogError(e.to_string()))?;
        Self::from_value(value)
    }

    /// Build from either an `{id: profile}` object or a `[profile]` array
    pub fn from_value(value: Value) -> NacResult<Self> {
        let entries: Vec<(Option<String>, Value)> = match value {
            Value::Object(map) => map.into_iter().map(|(k, v)| (Some(k), v)).collect(),
            Value::Array(items) => items.into_iter().map(|v| (None, v)).collect(),
            other => {
                return Err(NacError::CatalogError(format!(
                    "vendor catalog must be an object or array, got {}",
                    type_name(&other)
                )))
            }
        };

        let mut catalog = Self::new();
        for (key, entry) in entries {
            if let Some(profile) = parse_entry(key.as_deref(), entry) {
                catalog.insert(profile);
            }
        }
        Ok(catalog)
    }

    /// Insert or replace a profile, keyed by its id
    pub fn insert(&mut self, profile: VendorProfile) {
        self.vendors.insert(profile.id.clone(), profile);
    }

    pub fn get(&self, id: &str) -> Option<&VendorProfile> {
        self.vendors.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.vendors.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.vendors.keys().map(|k| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &VendorProfile> {
        self.vendors.values()
    }

    pub fn len(&self) -> usize {
        self.vendors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vendors.is_empty()
    }
}

impl FromIterator<VendorProfile> for VendorCatalog {
    fn from_iter<I: IntoIterator<Item = VendorProfile>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for profile in iter {
            catalog.insert(profile);
        }
        catalog
    }
}

fn parse_entry(key: Option<&str>, entry: Value) -> Option<VendorProfile> {
    let label = key.unwrap_or("<unnamed>").to_string();
    if !entry.is_object() {
        tracing::warn!(vendor = %label, kind = type_name(&entry), "vendor entry is not an object, skipping");
        return None;
    }

    let mut profile: VendorProfile = match serde_json::from_value(entry) {
        Ok(profile) => profile,
        Err(e) => {
            tracing::warn!(vendor = %label, error = %e, "malformed vendor entry, skipping");
            return None;
        }
    };

    // The map key is what selections refer to, so it wins over an inner id
    match key {
        Some(key) => {
            if !profile.id.is_empty() && profile.id != key {
                tracing::warn!(vendor = %key, inner_id = %profile.id, "vendor id differs from its key, using the key");
            }
            profile.id = key.to_string();
        }
        None if profile.id.is_empty() => {
            tracing::warn!("vendor entry without id, skipping");
            return None;
        }
        None => {}
    }
    if profile.name.is_empty() {
        profile.name = profile.id.clone();
    }
    Some(profile)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
