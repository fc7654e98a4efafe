//! Errors surfaced by the `rosebud` binary.
//!
//! | code | meaning                                                   |
//! |------|-----------------------------------------------------------|
//! | 2    | argument parse failure (reported by clap itself)          |
//! | 10   | generation rejected: control range, resolution, name      |
//! | 11   | filesystem: recipe read, PNG or JSON write                |
//! | 12   | user input: `--params` JSON, malformed recipe file        |
//! | 13   | JSON encoding of an output document                       |

use rosebud_core::SurfaceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Surface(SurfaceError),
    #[error("{0}")]
    Io(String),
    #[error("{0}")]
    Input(String),
    #[error("cannot encode output: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CliError {
    /// Process exit code; see the module table.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Surface(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

// Library I/O and recipe failures keep their CLI meaning instead of
// collapsing into code 10.
impl From<SurfaceError> for CliError {
    fn from(e: SurfaceError) -> Self {
        match e {
            SurfaceError::Io(msg) => CliError::Io(msg),
            SurfaceError::InvalidRecipe(_) => CliError::Input(e.to_string()),
            other => CliError::Surface(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rosebud_core::Recipe;
    use std::collections::BTreeMap;

    #[test]
    fn surface_errors_map_to_10() {
        let err = CliError::from(SurfaceError::UnknownShape("tulip".into()));
        assert_eq!(err.exit_code(), 10);
        assert!(err.to_string().contains("tulip"));

        let err = CliError::from(SurfaceError::InvalidParameterRange {
            name: "bloom".into(),
            value: 2.0,
            expected: "[0, 1]".into(),
        });
        assert_eq!(err.exit_code(), 10);
        assert!(err.to_string().contains("bloom"));
    }

    #[test]
    fn library_io_error_keeps_io_code() {
        let err = CliError::from(SurfaceError::Io("disk full".into()));
        assert_eq!(err.exit_code(), 11);
        assert_eq!(err.to_string(), "disk full");
    }

    #[test]
    fn malformed_recipe_is_input_error() {
        let err = CliError::from(Recipe::from_json("{\"shape\": \"rose\"}").unwrap_err());
        assert_eq!(err.exit_code(), 12);
        assert!(err.to_string().contains("rows"), "{err}");
    }

    #[test]
    fn unencodable_document_is_serialization_error() {
        // JSON object keys must be strings.
        let mut doc = BTreeMap::new();
        doc.insert((1, 2), "cell");
        let err = CliError::from(serde_json::to_string(&doc).unwrap_err());
        assert_eq!(err.exit_code(), 13);
        assert!(err.to_string().starts_with("cannot encode output"), "{err}");
        assert!(std::error::Error::source(&err).is_some());
    }
}
