//! Unified error types for the converter.
//!
//! One error enum covers both conversion directions so callers see a single
//! `Result` alias regardless of which pipeline they drive.
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for conversion operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Source file does not exist
    #[error("input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// XML parsing error
    #[error("XML error: {0}")]
    Xml(String),

    /// ZIP archive error
    #[error("ZIP error: {0}")]
    Zip(String),

    /// Corrupted or malformed package content
    #[error("invalid format: {0}")]
    InvalidFormat(String),

    /// Part declares a content type other than the expected one
    #[error("invalid content type: expected {expected}, got {got}")]
    InvalidContentType { expected: String, got: String },

    /// Package part or relationship not found
    #[error("part not found: {0}")]
    PartNotFound(String),

    /// No external tool available to upgrade a legacy binary document
    #[error(
        "cannot convert legacy .doc file: no upgrade tool found. \
         Install LibreOffice (soffice) or, on macOS, use the bundled textutil; \
         alternatively re-save the file as .docx"
    )]
    UpgradeToolUnavailable,

    /// The saved package could not be patched with numbering definitions
    #[error("numbering patch failed: {0}")]
    NumberingPatch(String),
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Xml(err.to_string())
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::Zip(err.to_string())
    }
}

/// Result type for conversion operations.
pub type Result<T> = std::result::Result<T, Error>;
