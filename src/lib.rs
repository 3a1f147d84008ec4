//! MIME type / file extension registry used to translate upload accept filters
//! between extension lists and MIME type lists.
//!
//! ```
//! use mime_registry::{FilterDescriptor, Registry};
//!
//! let registry = Registry::new();
//! assert_eq!(registry.mime_type_of("photo.JPG"), "image/jpeg");
//! let accept = registry
//!     .extension_filter_to_mime_types(&[FilterDescriptor::untitled("jpg,png")], false);
//! assert_eq!(accept, vec!["image/jpeg", "image/png"]);
//! ```

mod ext;
mod filter;
mod hash;
mod op;
mod registry;
mod seed;
pub mod table;

pub use ext::extension_of;
pub use filter::{FILES_TITLE, FilterDescriptor, Localizer, MimeTypes, Untranslated, WILDCARD};
pub use op::Operation;
pub use registry::Registry;
pub use seed::SEED;
pub use table::{Table, TableError};
