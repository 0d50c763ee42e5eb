//! Content collections for a static site.
//!
//! A collection is a named group of content items sharing one schema. The
//! [`CollectionRegistry`] maps collection names to [`CollectionSchema`]s and
//! validates front matter against them.
//!
//! | Module        | Purpose                                         |
//! |---------------|-------------------------------------------------|
//! | `schema`      | Field declarations and schema validation        |
//! | `registry`    | Built-in collections and name lookup            |
//! | `content`     | Front matter extraction, entries, reports       |
//! | `config`      | `[collections]` TOML configuration              |
//! | `error`       | Error and diagnostic types                      |
//! | `logger`      | `log!` / `debug!` macros                        |
//!
//! # Example
//!
//! ```ignore
//! let registry = CollectionRegistry::get(RegistryVariant::BlogFeatures);
//! let schema = registry.lookup("Blog")?;
//! schema.validate(&item)?;
//! ```

pub mod logger;

pub mod config;
pub mod content;
pub mod error;
pub mod registry;
pub mod schema;
mod utils;

pub use config::CollectionsConfig;
pub use content::{ContentEntry, ValidationReport, extract_frontmatter};
pub use error::{CollectionError, ConfigError, EntryError, FrontmatterError, ItemDiagnostics};
pub use registry::{CollectionRegistry, RegistryVariant};
pub use schema::{
    CollectionSchema, ContentType, FieldDecl, FieldKind, UnknownFields, define_collection,
};
pub use utils::date::DateTimeUtc;

/// A JSON object map holding the fields of one content item.
pub type JsonMap = serde_json::Map<String, serde_json::Value>;
