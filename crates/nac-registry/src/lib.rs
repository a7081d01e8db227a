//! NAC Registry: vendor and compliance-framework catalogs
//!
//! External data collaborators of the engine. Catalogs are loaded once,
//! shared read-only, and never mutated by a calculation pass.
pub mod framework_catalog;
pub mod vendor_catalog;

pub use framework_catalog::{FrameworkCatalog, FrameworkDefinition, Requirement};
pub use vendor_catalog::VendorCatalog;

use nac_core::{IndustryTable, NacError, NacResult};
use std::path::Path;

pub const VENDORS_FILE: &str = "vendors.yaml";
pub const FRAMEWORKS_FILE: &str = "compliance-frameworks.yaml";
pub const INDUSTRIES_FILE: &str = "industries.yaml";

/// All lookup data a calculation pass reads
#[derive(Debug, Clone, Default)]
pub struct Registry {
    pub vendors: VendorCatalog,
    pub frameworks: FrameworkCatalog,
    pub industries: IndustryTable,
}

impl Registry {
    /// Load the three data files from `dir`.
    ///
    /// A missing industries file falls back to the built-in table; the other
    /// two files are required.
    pub fn load_dir(dir: impl AsRef<Path>) -> NacResult<Self> {
        let dir = dir.as_ref();
        let vendors = VendorCatalog::load(dir.join(VENDORS_FILE))?;
        let frameworks = FrameworkCatalog::load(dir.join(FRAMEWORKS_FILE))?;

        let industries_path = dir.join(INDUSTRIES_FILE);
        let industries = if industries_path.exists() {
            IndustryTable::from_yaml(&read_file(&industries_path)?)?
        } else {
            tracing::info!(path = %industries_path.display(), "no industry table, using built-in factors");
            IndustryTable::builtin().clone()
        };

        tracing::info!(
            vendors = vendors.len(),
            frameworks = frameworks.len(),
            industries = industries.len(),
            "registry loaded"
        );

        Ok(Self {
            vendors,
            frameworks,
            industries,
        })
    }
}

pub(crate) fn read_file(path: &Path) -> NacResult<String> {
    std::fs::read_to_string(path).map_err(|source| NacError::Io {
        path: path.display().to_string(),
        source,
    })
}

pub(crate) fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_dir_missing() {
        let err = Registry::load_dir("/definitely/not/here").unwrap_err();
        assert!(err.to_string().starts_with("IO/"));
    }

    #[test]
    fn test_is_yaml() {
        assert!(is_yaml(Path::new("data/vendors.yaml")));
        assert!(is_yaml(Path::new("x.yml")));
        assert!(!is_yaml(Path::new("x.json")));
    }
}
