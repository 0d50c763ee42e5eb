//! Error types.
//!
//! | Type               | Raised by                                   |
//! |--------------------|---------------------------------------------|
//! | `CollectionError`  | lookup and field validation                 |
//! | `ItemDiagnostics`  | every field error of one item, collected    |
//! | `FrontmatterError` | front matter extraction                     |
//! | `EntryError`       | `CollectionRegistry::load_entry`            |
//! | `ConfigError`      | `CollectionsConfig` loading                 |

use owo_colors::OwoColorize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::schema::FieldKind;

// ============================================================================
// CollectionError
// ============================================================================

/// A single collection-level failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CollectionError {
    /// A required field is absent from the item.
    #[error("required field `{field}` is missing")]
    MissingField { field: &'static str },

    /// A field is present but does not conform to its declared kind.
    #[error("field `{field}` expected {expected}, found {found}")]
    TypeMismatch {
        field: &'static str,
        expected: FieldKind,
        found: String,
    },

    /// No collection is registered under this name.
    #[error("unknown collection `{0}`")]
    UnknownCollection(String),
}

impl CollectionError {
    /// The offending field, if the error is about one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::MissingField { field } | Self::TypeMismatch { field, .. } => Some(*field),
            Self::UnknownCollection(_) => None,
        }
    }

    pub fn is_missing_field(&self) -> bool {
        matches!(self, Self::MissingField { .. })
    }

    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Self::TypeMismatch { .. })
    }
}

// ============================================================================
// ItemDiagnostics
// ============================================================================

/// All field errors found in one content item, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemDiagnostics {
    collection: Option<String>,
    errors: Vec<CollectionError>,
}

impl ItemDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the collection name shown in the report header.
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = Some(collection.into());
        self
    }

    pub fn push(&mut self, error: CollectionError) {
        self.errors.push(error);
    }

    pub fn collection(&self) -> Option<&str> {
        self.collection.as_deref()
    }

    pub fn errors(&self) -> &[CollectionError] {
        &self.errors
    }

    pub fn first(&self) -> Option<&CollectionError> {
        self.errors.first()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Convert to Result (returns Err if there are errors).
    pub fn into_result(self) -> Result<(), Self> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ItemDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(collection) = &self.collection {
            write!(f, "{} ", collection.cyan().bold())?;
        }
        write!(f, "{}", "front matter validation failed:".red().bold())?;
        for err in &self.errors {
            write!(f, "\n  {} ", "→".red())?;
            if let Some(field) = err.field() {
                write!(f, "{}{}{} ", "[".dimmed(), field.cyan(), "]".dimmed())?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ItemDiagnostics {}

// ============================================================================
// FrontmatterError
// ============================================================================

#[derive(Debug, Error)]
pub enum FrontmatterError {
    #[error("invalid YAML front matter")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid TOML front matter")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON data")]
    Json(#[from] serde_json::Error),

    #[error("front matter opened with `{0}` is never closed")]
    Unterminated(&'static str),

    #[error("front matter must be a mapping, found {0}")]
    NotAMapping(&'static str),
}

// ============================================================================
// EntryError
// ============================================================================

/// Why a content entry could not be loaded.
#[derive(Debug, Error)]
pub enum EntryError {
    #[error(transparent)]
    Collection(#[from] CollectionError),

    #[error("failed to read front matter of `{id}`")]
    Frontmatter {
        id: String,
        #[source]
        source: FrontmatterError,
    },

    // NOTE: No #[source] here - the diagnostics already print every field
    #[error("{0}")]
    Invalid(ItemDiagnostics),
}

impl EntryError {
    /// Field diagnostics, when the entry failed schema validation.
    pub fn diagnostics(&self) -> Option<&ItemDiagnostics> {
        match self {
            Self::Invalid(diag) => Some(diag),
            _ => None,
        }
    }
}

// ============================================================================
// ConfigError
// ============================================================================

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("config file parsing error")]
    Toml(#[from] toml::de::Error),
}
