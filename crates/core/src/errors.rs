use std::path::PathBuf;

use thiserror::Error;

const UNASSIGNED: &str = "unassigned";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("could not read catalog file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse catalog `{path}`: {source}")]
    Parse { path: PathBuf, source: serde_json::Error },
    #[error("catalog contains duplicate product id `{0}`")]
    DuplicateProductId(String),
}

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("configuration failure: {0}")]
    Configuration(String),
}

/// Failures as presented to a caller, each tagged with the request's
/// correlation id.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InterfaceError {
    #[error("not found: {message}")]
    NotFound { message: String, correlation_id: String },
    #[error("bad request: {message}")]
    BadRequest { message: String, correlation_id: String },
    #[error("service unavailable: {message}")]
    ServiceUnavailable { message: String, correlation_id: String },
    #[error("internal error: {message}")]
    Internal { message: String, correlation_id: String },
}

impl InterfaceError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "The requested product does not exist.",
            Self::BadRequest { .. } => {
                "The request could not be processed. Check inputs and try again."
            }
            Self::ServiceUnavailable { .. } => {
                "The catalog is temporarily unavailable. Please retry shortly."
            }
            Self::Internal { .. } => "An unexpected internal error occurred.",
        }
    }

    pub fn correlation_id(&self) -> &str {
        match self {
            Self::NotFound { correlation_id, .. }
            | Self::BadRequest { correlation_id, .. }
            | Self::ServiceUnavailable { correlation_id, .. }
            | Self::Internal { correlation_id, .. } => correlation_id,
        }
    }
}

impl ApplicationError {
    pub fn into_interface(self, correlation_id: impl Into<String>) -> InterfaceError {
        InterfaceError::from(self).with_correlation_id(correlation_id)
    }
}

impl InterfaceError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound { message: message.into(), correlation_id: UNASSIGNED.to_owned() }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest { message: message.into(), correlation_id: UNASSIGNED.to_owned() }
    }

    pub fn with_correlation_id(mut self, correlation_id: impl Into<String>) -> Self {
        match &mut self {
            Self::NotFound { correlation_id: slot, .. }
            | Self::BadRequest { correlation_id: slot, .. }
            | Self::ServiceUnavailable { correlation_id: slot, .. }
            | Self::Internal { correlation_id: slot, .. } => *slot = correlation_id.into(),
        }
        self
    }
}

impl From<ApplicationError> for InterfaceError {
    fn from(value: ApplicationError) -> Self {
        match value {
            ApplicationError::Catalog(CatalogError::DuplicateProductId(id)) => {
                Self::bad_request(format!("catalog validation failed: duplicate id `{id}`"))
            }
            ApplicationError::Catalog(error) => Self::ServiceUnavailable {
                message: error.to_string(),
                correlation_id: UNASSIGNED.to_owned(),
            },
            ApplicationError::Configuration(message) => {
                Self::Internal { message, correlation_id: UNASSIGNED.to_owned() }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::errors::{ApplicationError, CatalogError, InterfaceError};

    #[test]
    fn duplicate_id_maps_to_bad_request_interface_error() {
        let interface = ApplicationError::from(CatalogError::DuplicateProductId("7".to_owned()))
            .into_interface("req-1");

        assert!(matches!(
            interface,
            InterfaceError::BadRequest {
                ref correlation_id,
                ..
            } if correlation_id == "req-1"
        ));
        assert_eq!(
            interface.user_message(),
            "The request could not be processed. Check inputs and try again."
        );
    }

    #[test]
    fn unreadable_catalog_maps_to_service_unavailable() {
        let interface = ApplicationError::from(CatalogError::ReadFile {
            path: PathBuf::from("missing.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        })
        .into_interface("req-2");

        assert!(matches!(interface, InterfaceError::ServiceUnavailable { .. }));
        assert_eq!(interface.correlation_id(), "req-2");
    }

    #[test]
    fn configuration_error_maps_to_internal() {
        let interface =
            ApplicationError::Configuration("bad cache size".to_owned()).into_interface("req-3");

        assert!(matches!(interface, InterfaceError::Internal { .. }));
        assert_eq!(interface.user_message(), "An unexpected internal error occurred.");
    }

    #[test]
    fn not_found_carries_request_correlation_id() {
        let interface =
            InterfaceError::not_found("product `42` not found").with_correlation_id("req-4");

        assert_eq!(interface.correlation_id(), "req-4");
        assert_eq!(interface.to_string(), "not found: product `42` not found");
        assert_eq!(interface.user_message(), "The requested product does not exist.");
    }
}
