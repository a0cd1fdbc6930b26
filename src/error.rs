#![allow(non_shorthand_field_patterns)]
#![doc = "Error handling primitives shared across the digest crate."]
// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! The derive emitted by [`masterror::Error`] expands pattern matches that
//! trigger the `non_shorthand_field_patterns` lint. The lint is disabled for
//! the module to keep the generated implementations warning-free.

use std::path::{Path, PathBuf};

/// Unified error type returned by the pipeline and the CLI.
///
/// Fetch failures never surface through this type; they are logged and
/// replaced with an empty result set by [`crate::fetch_activity`]. Every
/// variant that does reach the caller is fatal for the run.
#[derive(Debug, masterror::Error)]
pub enum Error {
    /// Returned when configuration or user input violates invariants.
    #[error("invalid configuration: {message}")]
    Validation {
        /// Human readable message describing the validation problem.
        message: String
    },
    /// Transport or client failures while talking to GitHub.
    #[error("service error: {message}")]
    Service {
        /// Human readable message describing the service error.
        message: String
    },
    /// Errors reported inside a GraphQL response body.
    #[error("GraphQL request failed: {message}")]
    GraphQl {
        /// Messages returned by the GraphQL endpoint joined together.
        message: String
    },
    /// The publish target has no discussion categories at all.
    #[error("repository {repository} has no discussion categories")]
    NoDiscussionCategory {
        /// Repository in `owner/name` form.
        repository: String
    },
    /// Wraps I/O errors that occur while writing the rendered document.
    #[error("failed to write announcement to {path:?}: {source}")]
    Io {
        /// Destination of the rendered document.
        path:   PathBuf,
        /// Underlying I/O error.
        source: std::io::Error
    },
    /// Wraps JSON encoding and decoding errors.
    #[error("failed to process GraphQL payload: {source}")]
    Serialize {
        /// Underlying serde_json error.
        source: serde_json::Error
    }
}

impl Error {
    /// Constructs a validation error from the provided displayable value.
    ///
    /// # Parameters
    ///
    /// * `message` - Human-readable description of the validation failure.
    pub fn validation<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Validation {
            message: message.into()
        }
    }

    /// Constructs a service error from the provided displayable value.
    pub fn service<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Service {
            message: message.into()
        }
    }

    /// Constructs a GraphQL error from the provided displayable value.
    pub fn graphql<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::GraphQl {
            message: message.into()
        }
    }

    /// Formats the error for diagnostics without the variant name.
    ///
    /// Intended for CLI contexts where the variant name does not add value to
    /// end users. The returned string matches the [`std::fmt::Display`]
    /// implementation.
    pub fn to_display_string(&self) -> String {
        format!("{self}")
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Self::Serialize {
            source
        }
    }
}

impl From<octocrab::Error> for Error {
    fn from(error: octocrab::Error) -> Self {
        Self::Service {
            message: error.to_string()
        }
    }
}

/// Creates an [`Error::Io`] variant capturing the failing path and source.
///
/// # Parameters
///
/// * `path` - Location of the file that could not be written.
/// * `source` - I/O error reported by the operating system.
pub fn io_error(path: &Path, source: std::io::Error) -> Error {
    Error::Io {
        path: path.to_path_buf(),
        source
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn validation_constructor_populates_message() {
        let error = Error::validation("something went wrong");
        match error {
            Error::Validation {
                ref message
            } => {
                assert_eq!(message, "something went wrong");
            }
            other => panic!("expected validation error, got {other:?}")
        }
    }

    #[test]
    fn to_display_string_matches_display() {
        let error = Error::graphql("Field 'foo' doesn't exist");
        assert_eq!(error.to_string(), error.to_display_string());
        assert_eq!(
            error.to_display_string(),
            "GraphQL request failed: Field 'foo' doesn't exist"
        );
    }

    #[test]
    fn missing_category_names_repository() {
        let error = Error::NoDiscussionCategory {
            repository: "octo/widgets".to_owned()
        };
        assert_eq!(
            error.to_display_string(),
            "repository octo/widgets has no discussion categories"
        );
    }

    #[test]
    fn io_error_helper_wraps_path_and_source() {
        let path = std::path::Path::new("/tmp/digest.md");
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error = super::io_error(path, io_error);

        match error {
            Error::Io {
                path: ref stored_path,
                ref source
            } => {
                assert_eq!(stored_path, path);
                assert_eq!(source.kind(), std::io::ErrorKind::PermissionDenied);
            }
            other => panic!("expected io error, got {other:?}")
        }
    }

    #[test]
    fn serde_json_conversion_maps_to_serialize_variant() {
        let invalid = serde_json::from_str::<serde_json::Value>("not-json").unwrap_err();
        let mapped: Error = invalid.into();
        assert!(matches!(mapped, Error::Serialize { .. }));
    }
}
