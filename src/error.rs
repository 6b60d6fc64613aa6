use serde_dynamo::Error as SerdeDynamoError;
use thiserror::Error;

/// Expression tree and expression rendering error
#[derive(Debug, Error)]
pub enum Error {
    /// `build` was invoked a second time on the same attribute
    #[error("build is already executed on attribute {path}")]
    AlreadyBuilt {
        /// Document path assigned by the first build
        path: String,
    },
    /// A path-dependent operation ran before `build`
    #[error("build is not yet executed on attribute [{name}], cannot {action}")]
    NotBuilt {
        /// Declared attribute name
        name: String,
        /// What the caller attempted
        action: &'static str,
    },
    /// Aggregation was started without an accumulator
    #[error("nil {builder} builder passed for attribute {path}")]
    MissingAccumulator {
        /// Kind of accumulator that was missing
        builder: &'static str,
        /// Document path of the attribute
        path: String,
    },
    /// A derived value (e.g. `list_append`) was set on a non-list attribute
    #[error("attribute {path} cannot be set to a derived value expression")]
    UnsupportedUpdateValue {
        /// Document path of the attribute
        path: String,
    },
    /// Update intent on a descendant is shadowed by an ancestor operation
    /// (only reported with [`BuilderConfig::strict_updates`](crate::BuilderConfig))
    #[error("update on attribute {path} is superseded by an operation on an ancestor")]
    SupersededUpdate {
        /// Document path of the shadowed attribute
        path: String,
    },
    /// Strict lookup of a list element that was never added
    #[error("list attribute {path} has no element at index {index}")]
    MissingElement {
        /// Document path (or name, before build) of the list
        path: String,
        /// Requested index
        index: usize,
    },
    /// A required expression parameter is missing
    #[error("unset parameter: {0}")]
    UnsetParameter(&'static str),
    /// An expression parameter is malformed
    #[error("invalid parameter: {0}")]
    InvalidParameter(&'static str),
    /// Serde DynamoDB serialization error
    #[error("DynamoDB serialization error: {0}")]
    SerdeDynamo(#[from] SerdeDynamoError),
}

impl Error {
    /// Check if the error comes from using a node in the wrong lifecycle state
    ///
    /// Returns `true` for double builds, aggregation before build and
    /// missing accumulators.
    pub fn is_sequencing_error(&self) -> bool {
        matches!(
            self,
            Error::AlreadyBuilt { .. } | Error::NotBuilt { .. } | Error::MissingAccumulator { .. }
        )
    }

    /// Check if the error was raised while rendering an expression
    pub fn is_expression_error(&self) -> bool {
        matches!(
            self,
            Error::UnsetParameter(_) | Error::InvalidParameter(_)
        )
    }

    /// Check if the error is a serialization error
    ///
    /// Returns `true` when a caller value could not be marshalled into an
    /// `AttributeValue`.
    pub fn is_serialization_error(&self) -> bool {
        matches!(self, Error::SerdeDynamo(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_sequencing_error() {
        let err = Error::AlreadyBuilt {
            path: "name".to_string(),
        };
        assert!(err.is_sequencing_error());
        assert!(!err.is_expression_error());
        assert!(!err.is_serialization_error());
    }

    #[test]
    fn test_is_expression_error() {
        let err = Error::UnsetParameter("ProjectionBuilder");
        assert!(err.is_expression_error());
        assert!(!err.is_sequencing_error());
    }

    #[test]
    fn test_not_built_display_names_attribute() {
        let err = Error::NotBuilt {
            name: "bank_details".to_string(),
            action: "mark this attribute for projection",
        };
        assert_eq!(
            err.to_string(),
            "build is not yet executed on attribute [bank_details], cannot mark this attribute for projection"
        );
    }

    #[test]
    fn test_error_debug() {
        let err = Error::InvalidParameter("NameBuilder");
        let debug = format!("{:?}", err);
        assert!(debug.contains("InvalidParameter"));
    }
}
