//! A single named part inside an OPC package.
use crate::opc::rel::Relationships;

/// One part of a package: an XML document, an image blob, etc.
///
/// Part names are absolute, `/`-prefixed paths inside the package, e.g.
/// `/word/document.xml`. A part's identity is its name; multiple
/// relationship ids can point at the same part.
#[derive(Debug, Clone)]
pub struct Part {
    /// Absolute part name
    name: String,
    /// Declared content type (from `[Content_Types].xml`)
    content_type: String,
    /// Raw bytes of the part
    blob: Vec<u8>,
    /// This part's relationship table
    rels: Relationships,
}

impl Part {
    pub(crate) fn new(
        name: String,
        content_type: String,
        blob: Vec<u8>,
        rels: Relationships,
    ) -> Self {
        Self {
            name,
            content_type,
            blob,
            rels,
        }
    }

    /// Get the absolute part name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the declared content type.
    #[inline]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Get the raw bytes of the part.
    #[inline]
    pub fn blob(&self) -> &[u8] {
        &self.blob
    }

    /// Get this part's relationship table.
    #[inline]
    pub fn rels(&self) -> &Relationships {
        &self.rels
    }

    /// File extension of the part name, if any.
    pub fn extension(&self) -> Option<&str> {
        let (_, file) = self.name.rsplit_once('/')?;
        let (_, ext) = file.rsplit_once('.')?;
        if ext.is_empty() { None } else { Some(ext) }
    }
}
