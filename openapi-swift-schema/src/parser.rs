//! Abstract document parser.
//!
//! This module reads the serialized form of an already-resolved API document.
//! Resolving an OpenAPI description into this form is left to the host.

use crate::document::Document;
use crate::error::ParseError;
use std::path::Path;

/// Parses an abstract API document from a JSON string.
///
/// # Arguments
/// * `json` - Document content
///
/// # Returns
/// Parsed document or parse error.
///
/// # Errors
/// Returns `ParseError` if the JSON is malformed or does not describe a document.
pub fn parse_document(json: &str) -> Result<Document, ParseError> {
    let document: Document = serde_json::from_str(json)?;

    if document.info.title.trim().is_empty() && document.info.version.trim().is_empty() {
        return Err(ParseError::InvalidStructure {
            message: "document info has neither title nor version".to_string(),
        });
    }

    Ok(document)
}

/// Parses an abstract API document from a JSON file.
///
/// # Errors
/// Returns `ParseError` if reading or parsing fails.
pub fn parse_document_file(path: &Path) -> Result<Document, ParseError> {
    let json = std::fs::read_to_string(path)?;
    parse_document(&json)
}
