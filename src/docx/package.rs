//! Word document package: an OPC package whose main part is a
//! WordprocessingML document.
use std::io::{Read, Seek};
use std::path::Path;

use crate::common::error::{Error, Result};
use crate::docx::document::Document;
use crate::docx::styles::Styles;
use crate::opc::constants::{content_type, rel_type};
use crate::opc::{OpcPackage, Part, Relationships};

/// A parsed `.docx` package.
#[derive(Debug)]
pub struct Package {
    opc: OpcPackage,
}

impl Package {
    /// Open a `.docx` file from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_opc(OpcPackage::open(path)?)
    }

    /// Open a `.docx` package from an in-memory or seekable reader.
    pub fn from_reader<R: Read + Seek>(reader: R) -> Result<Self> {
        Self::from_opc(OpcPackage::from_reader(reader)?)
    }

    fn from_opc(opc: OpcPackage) -> Result<Self> {
        let main = opc.main_document_part()?;
        let ct = main.content_type();
        if ct != content_type::WML_DOCUMENT_MAIN {
            return Err(Error::InvalidContentType {
                expected: content_type::WML_DOCUMENT_MAIN.to_string(),
                got: ct.to_string(),
            });
        }
        Ok(Self { opc })
    }

    /// Parse the main document part into its block sequence.
    pub fn document(&self) -> Result<Document> {
        Document::parse(self.opc.main_document_part()?.blob())
    }

    /// The style table, or an empty one when the package has no styles
    /// part.
    pub fn styles(&self) -> Result<Styles> {
        let main = self.opc.main_document_part()?;
        let target = main
            .rels()
            .get_by_type(rel_type::STYLES)
            .and_then(|rel| main.rels().resolve_target(rel));
        let name = target.unwrap_or_else(|| "/word/styles.xml".to_string());
        match self.opc.part(&name) {
            Some(part) => Styles::parse(part.blob()),
            None => Ok(Styles::empty()),
        }
    }

    /// The relationships of the main document part.
    pub fn document_rels(&self) -> Result<&Relationships> {
        Ok(self.opc.main_document_part()?.rels())
    }

    /// Look up a part by name.
    pub fn part(&self, name: &str) -> Option<&Part> {
        self.opc.part(name)
    }

    /// The underlying OPC package.
    pub fn opc(&self) -> &OpcPackage {
        &self.opc
    }
}
