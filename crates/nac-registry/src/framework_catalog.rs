//! Compliance Framework Catalog
//!
//! Framework id -> `{name, requirements}`. Ratings are on a 0-10 scale: one
//! for the reference (primary) product and one industry average.
use crate::{is_yaml, read_file};
use nac_core::{NacError, NacResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// A single control requirement of a framework
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Requirement {
    pub name: String,
    /// Rating of the reference product, 0-10
    #[serde(alias = "portnoxRating")]
    pub primary_rating: f64,
    /// Market average rating, 0-10
    pub average_rating: f64,
}

impl Requirement {
    pub fn new(name: impl Into<String>, primary_rating: f64, average_rating: f64) -> Self {
        Self {
            name: name.into(),
            primary_rating,
            average_rating,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameworkDefinition {
    pub name: String,
    #[serde(default)]
    pub requirements: Vec<Requirement>,
}

impl FrameworkDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            requirements: Vec::new(),
        }
    }

    pub fn with_requirement(mut self, requirement: Requirement) -> Self {
        self.requirements.push(requirement);
        self
    }

    pub fn has_requirements(&self) -> bool {
        !self.requirements.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrameworkCatalog {
    frameworks: BTreeMap<String, FrameworkDefinition>,
}

impl FrameworkCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: impl AsRef<Path>) -> NacResult<Self> {
        let path = path.as_ref();
        let content = read_file(path)?;
        if is_yaml(path) {
            Self::from_yaml(&content)
        } else {
            Self::from_json(&content)
        }
    }

    pub fn from_yaml(yaml: &str) -> NacResult<Self> {
        serde_yaml::from_str(yaml).map_err(|e| NacError::CatalogError(e.to_string()))
    }

    pub fn from_json(json: &str) -> NacResult<Self> {
        serde_json::from_str(json).map_err(|e| NacError::CatalogError(e.to_string()))
    }

    pub fn insert(&mut self, id: impl Into<String>, definition: FrameworkDefinition) {
        self.frameworks.insert(id.into(), definition);
    }

    pub fn get(&self, id: &str) -> Option<&FrameworkDefinition> {
        self.frameworks.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FrameworkDefinition)> {
        self.frameworks.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.frameworks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frameworks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portnox_rating_alias() {
        let catalog = FrameworkCatalog::from_json(
            r#"{"HIPAA": {"name": "HIPAA", "requirements": [
                {"name": "Access Control", "portnoxRating": 9, "averageRating": 6}
            ]}}"#,
        )
        .unwrap();
        let hipaa = catalog.get("HIPAA").unwrap();
        assert_eq!(hipaa.requirements[0].primary_rating, 9.0);
        assert_eq!(hipaa.requirements[0].average_rating, 6.0);
    }

    #[test]
    fn test_framework_without_requirements() {
        let catalog = FrameworkCatalog::from_yaml("SOX:\n  name: Sarbanes-Oxley\n").unwrap();
        assert!(!catalog.get("SOX").unwrap().has_requirements());
    }

    #[test]
    fn test_builder() {
        let mut catalog = FrameworkCatalog::new();
        catalog.insert(
            "PCI-DSS",
            FrameworkDefinition::new("PCI DSS").with_requirement(Requirement::new("Segmentation", 9.0, 7.0)),
        );
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get("PCI-DSS").unwrap().has_requirements());
    }
}
