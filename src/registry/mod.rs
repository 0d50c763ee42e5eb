//! Collection registry: collection name to schema.
//!
//! Two variants of the built-in declarations exist. They are alternate
//! versions of the same artifact, and a process picks one:
//!
//! | Variant        | Extra collection | Blog `features` |
//! |----------------|------------------|-----------------|
//! | `BlogFeatures` | -                | optional        |
//! | `WithStack`    | `Stack`          | -               |
//!
//! Each variant is built on first use and immutable afterwards.

mod builtin;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::JsonMap;
use crate::error::{CollectionError, EntryError};
use crate::schema::{CollectionSchema, UnknownFields};

/// Which version of the built-in declarations to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RegistryVariant {
    /// Blog declares an optional `features` list, no `Stack` collection.
    #[default]
    BlogFeatures,
    /// Adds the `Stack` collection, Blog has no `features`.
    WithStack,
}

static BLOG_FEATURES: LazyLock<CollectionRegistry> =
    LazyLock::new(|| CollectionRegistry::new(RegistryVariant::BlogFeatures));

static WITH_STACK: LazyLock<CollectionRegistry> =
    LazyLock::new(|| CollectionRegistry::new(RegistryVariant::WithStack));

/// Immutable mapping from collection name to schema.
#[derive(Debug)]
pub struct CollectionRegistry {
    /// `None` for registries built from user-defined collections.
    variant: Option<RegistryVariant>,
    /// Names in declaration order.
    names: Vec<&'static str>,
    schemas: FxHashMap<&'static str, CollectionSchema>,
}

impl CollectionRegistry {
    /// Shared registry for `variant`.
    pub fn get(variant: RegistryVariant) -> &'static Self {
        match variant {
            RegistryVariant::BlogFeatures => &BLOG_FEATURES,
            RegistryVariant::WithStack => &WITH_STACK,
        }
    }

    /// Build a fresh registry for `variant`.
    pub fn new(variant: RegistryVariant) -> Self {
        let mut registry = Self::from_collections(builtin::collections(variant));
        registry.variant = Some(variant);

        crate::debug!("registry"; "{:?}: {} collections ({})",
            variant, registry.len(), registry.names.join(", "));

        registry
    }

    /// Build a registry from user-defined collections.
    ///
    /// A later collection with an already registered name replaces the
    /// earlier schema, keeping the earlier position.
    pub fn from_collections(
        collections: impl IntoIterator<Item = (&'static str, CollectionSchema)>,
    ) -> Self {
        let mut names = Vec::new();
        let mut schemas = FxHashMap::default();
        for (name, schema) in collections {
            if schemas.insert(name, schema).is_none() {
                names.push(name);
            }
        }

        Self {
            variant: None,
            names,
            schemas,
        }
    }

    /// The built-in variant, if this registry is one.
    pub fn variant(&self) -> Option<RegistryVariant> {
        self.variant
    }

    /// Schema for `name`, or `UnknownCollection`.
    pub fn lookup(&self, name: &str) -> Result<&CollectionSchema, CollectionError> {
        self.schemas
            .get(name)
            .ok_or_else(|| CollectionError::UnknownCollection(name.to_owned()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// Collection names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.names.iter().copied()
    }

    /// `(name, schema)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &CollectionSchema)> + '_ {
        self.names
            .iter()
            .filter_map(|name| self.schemas.get(name).map(|schema| (*name, schema)))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Look up `collection` and validate `item` against its schema.
    pub fn validate(&self, collection: &str, item: &JsonMap) -> Result<(), EntryError> {
        self.parse(collection, item, UnknownFields::Strip).map(|_| ())
    }

    /// Look up `collection`, validate `item`, and return the accepted data.
    pub fn parse(
        &self,
        collection: &str,
        item: &JsonMap,
        unknown: UnknownFields,
    ) -> Result<JsonMap, EntryError> {
        let schema = self.lookup(collection)?;
        schema.parse(item, unknown).map_err(|diag| {
            crate::debug!("validate"; "{}: rejected item ({} error{})",
                collection, diag.len(), crate::utils::plural_s(diag.len()));
            EntryError::Invalid(diag.with_collection(collection))
        })
    }
}
