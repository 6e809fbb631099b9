//! Markdown conversion, both directions.
//!
//! [`DocxToMarkdown`] walks a document package and emits Markdown text
//! plus extracted image assets. [`MarkdownToDocx`] parses markup line by
//! line and authors a fresh package.
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::common::error::{Error, Result};
use crate::docx::package::Package;
use crate::docx::upgrade;

pub mod assets;
pub mod config;
pub mod heading;
pub mod parser;
pub mod reverse;
pub mod token;
pub mod writer;

pub use config::{DocxOptions, MarkdownOptions};
pub use heading::HeadingResolver;
pub use reverse::MarkdownToDocx;
pub use writer::MarkdownWriter;

/// Forward conversion entry point.
pub struct DocxToMarkdown {
    options: MarkdownOptions,
}

impl DocxToMarkdown {
    pub fn new(options: MarkdownOptions) -> Self {
        Self { options }
    }

    /// Convert a `.docx` (or legacy `.doc`, or macro-enabled) file to a
    /// Markdown file at `output`.
    ///
    /// Image assets land in a sibling `<stem>_images` directory. The text
    /// is written through a temporary file in the output's directory so a
    /// failed conversion never leaves a partial output file.
    pub fn convert_file(&self, input: &Path, output: &Path) -> Result<()> {
        let (pkg, _converted) = upgrade::open_prepared(input)?;
        let markdown = self.convert_package(&pkg, output)?;

        let parent = output.parent().unwrap_or_else(|| Path::new("."));
        let mut temp = NamedTempFile::new_in(parent)?;
        temp.write_all(markdown.as_bytes())?;
        temp.persist(output).map_err(|e| Error::Io(e.error))?;
        Ok(())
    }

    /// Convert an already-opened package, returning the Markdown text.
    ///
    /// `output_path` is where the text is destined to live; it anchors the
    /// relative paths of extracted image assets.
    pub fn convert_package(&self, pkg: &Package, output_path: &Path) -> Result<String> {
        MarkdownWriter::new(&self.options).convert(pkg, output_path)
    }
}
