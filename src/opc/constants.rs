//! Constants for OPC packages: content types and relationship types.

/// Content type constants.
pub mod content_type {
    /// Main document part of a WordprocessingML package
    pub const WML_DOCUMENT_MAIN: &str =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";

    /// Main document part of a macro-enabled WordprocessingML package
    pub const WML_DOCUMENT_MACRO_ENABLED: &str =
        "application/vnd.ms-word.document.macroEnabled.main+xml";

    /// Styles part
    pub const WML_STYLES: &str =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml";

    /// Numbering definitions part
    pub const WML_NUMBERING: &str =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml";

    /// OPC relationships part
    pub const OPC_RELATIONSHIPS: &str =
        "application/vnd.openxmlformats-package.relationships+xml";

    /// Generic XML
    pub const XML: &str = "application/xml";
}

/// Relationship type URIs.
pub mod rel_type {
    /// Package-level relationship to the main document part
    pub const OFFICE_DOCUMENT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";

    /// Part-level relationship to an embedded image
    pub const IMAGE: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";

    /// Part-level relationship to the styles part
    pub const STYLES: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";

    /// Part-level relationship to the numbering part
    pub const NUMBERING: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering";
}

/// XML namespace URIs used when generating parts.
pub mod namespace {
    /// WordprocessingML main namespace
    pub const WML_MAIN: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

    /// Relationships namespace (for `r:` attributes inside parts)
    pub const OFFICE_RELATIONSHIPS: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

    /// Relationships-part namespace (for `.rels` documents)
    pub const PACKAGE_RELATIONSHIPS: &str =
        "http://schemas.openxmlformats.org/package/2006/relationships";

    /// Content-types part namespace
    pub const CONTENT_TYPES: &str =
        "http://schemas.openxmlformats.org/package/2006/content-types";
}
