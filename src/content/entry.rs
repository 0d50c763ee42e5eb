//! Validated content entries.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Component, Path};

use super::frontmatter::{extract_frontmatter, parse_data};
use crate::JsonMap;
use crate::error::{EntryError, FrontmatterError};
use crate::registry::CollectionRegistry;
use crate::schema::{ContentType, UnknownFields};

/// One content item that passed its collection schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentEntry {
    pub collection: String,
    /// Path of the source inside its collection directory, without extension.
    pub id: String,
    /// Accepted front matter (or data record) fields.
    pub data: JsonMap,
    /// Document body after the front matter. `None` for data collections.
    pub body: Option<String>,
}

/// Entry id from a path relative to the collection directory.
///
/// `posts/hello.md` becomes `posts/hello`, with `/` separators on every
/// platform.
pub fn entry_id(path: &Path) -> String {
    let stem = path.with_extension("");
    stem.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

impl CollectionRegistry {
    /// Read one source file of `collection` into a validated entry.
    ///
    /// Content collections take their fields from front matter, data
    /// collections from the whole source.
    pub fn load_entry(
        &self,
        collection: &str,
        id: &str,
        source: &str,
        unknown: UnknownFields,
    ) -> Result<ContentEntry, EntryError> {
        let schema = self.lookup(collection)?;
        let frontmatter_error = |source: FrontmatterError| EntryError::Frontmatter {
            id: id.to_owned(),
            source,
        };

        let (fields, body) = match schema.content_type() {
            ContentType::Content => {
                let (fields, body) = extract_frontmatter(source).map_err(frontmatter_error)?;
                (fields, Some(body.to_owned()))
            }
            ContentType::Data => (parse_data(source).map_err(frontmatter_error)?, None),
        };

        let data = self.parse(collection, &fields, unknown).inspect_err(|_| {
            crate::debug!("validate"; "{}/{} rejected", collection, id);
        })?;

        Ok(ContentEntry {
            collection: collection.to_owned(),
            id: id.to_owned(),
            data,
            body,
        })
    }

    /// Read `path` from disk and load it as an entry of `collection`.
    ///
    /// The id is derived from `path` relative to `root`, the collection
    /// directory.
    pub fn load_entry_file(
        &self,
        collection: &str,
        root: &Path,
        path: &Path,
        unknown: UnknownFields,
    ) -> Result<ContentEntry> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let id = entry_id(path.strip_prefix(root).unwrap_or(path));

        self.load_entry(collection, &id, &source, unknown)
            .with_context(|| format!("invalid entry {}", path.display()))
    }
}
