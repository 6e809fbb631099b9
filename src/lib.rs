//! Pomelo - bidirectional conversion between Word documents and Markdown
//!
//! This library reads OOXML word-processing packages (.docx) and renders
//! their structure as Markdown, and authors new packages from Markdown
//! text. Headings, bullet lists, tables and embedded images survive the
//! trip in both directions.
//!
//! # Features
//!
//! - **OPC layer**: Zip packaging, content types and relationship tables
//! - **DOCX Reader**: Streaming WordprocessingML parsing, on demand
//! - **DOCX Writer**: Package authoring with styles and multilevel numbering
//! - **Forward conversion**: .docx (or legacy .doc) to Markdown plus
//!   extracted image assets
//! - **Reverse conversion**: Markdown to a fully styled .docx
//!
//! # Example - Converting a document to Markdown
//!
//! ```no_run
//! use pomelo::markdown::{DocxToMarkdown, MarkdownOptions};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let converter = DocxToMarkdown::new(MarkdownOptions::new());
//! converter.convert_file(Path::new("report.docx"), Path::new("report.md"))?;
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Building a document from Markdown
//!
//! ```no_run
//! use pomelo::markdown::{DocxOptions, MarkdownToDocx};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let converter = MarkdownToDocx::new(DocxOptions::default());
//! converter.convert_file(Path::new("notes.md"), Path::new("notes.docx"))?;
//! # Ok(())
//! # }
//! ```

pub mod common;
pub mod docx;
pub mod markdown;
pub mod opc;

pub use common::{Error, Result};
pub use docx::Package;
pub use markdown::{DocxOptions, DocxToMarkdown, MarkdownOptions, MarkdownToDocx};
