//! WordprocessingML support: reading `.docx` packages and writing new
//! ones.
pub mod document;
pub mod numbering;
pub mod package;
pub mod paragraph;
pub mod styles;
pub mod table;
pub mod upgrade;
pub mod writer;

pub use document::{Block, Document};
pub use package::Package;
pub use paragraph::{Paragraph, Run};
pub use styles::{Style, Styles};
pub use table::{Cell, Row, Table};
