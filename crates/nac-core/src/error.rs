//! Unified Error Model
//!
//! Only the input boundary can fail. The calculation components are
//! infallible and never return these.
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NacError {
    #[error("CONFIG/{0}")]
    ConfigError(String),

    #[error("CATALOG/{0}")]
    CatalogError(String),

    #[error("ASSUMPTIONS/{0}")]
    AssumptionsError(String),

    #[error("IO/{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type NacResult<T> = Result<T, NacError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_prefixes() {
        let err = NacError::ConfigError("bad json".to_string());
        assert_eq!(err.to_string(), "CONFIG/bad json");

        let err = NacError::Io {
            path: "data/vendors.yaml".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.to_string().starts_with("IO/data/vendors.yaml"));
    }
}
