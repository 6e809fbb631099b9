//! Open Packaging Conventions support: zip-packaged parts, content types,
//! and relationship tables.
//!
//! This is the physical layer underneath the docx reader. It knows nothing
//! about WordprocessingML; it only maps part names to blobs and resolves
//! relationship ids to part names.

pub mod constants;
pub mod package;
pub mod part;
pub mod rel;

pub use package::OpcPackage;
pub use part::Part;
pub use rel::{Relationship, Relationships};
