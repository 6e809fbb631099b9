//! Document writing: building `.docx` packages from scratch.
mod doc;
mod paragraph;
mod styles;

pub use doc::MutableDocument;
pub use paragraph::{MutableParagraph, MutableRun};
pub use styles::generate_styles_xml;
