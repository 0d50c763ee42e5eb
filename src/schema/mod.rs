//! Collection schemas.
//!
//! A [`CollectionSchema`] is a content-type marker plus an ordered set of
//! [`FieldDecl`]s. Schemas are plain values: build them once, share them
//! freely.
//!
//! # Validation Rules
//!
//! | Situation                        | Result          |
//! |----------------------------------|-----------------|
//! | required field absent            | `MissingField`  |
//! | optional field absent            | accepted        |
//! | declared field of wrong kind     | `TypeMismatch`  |
//! | declared field set to `null`     | `TypeMismatch`  |
//! | undeclared field                 | accepted, see [`UnknownFields`] |

mod field;

pub use field::{FieldDecl, FieldKind};
pub(crate) use field::json_type_name;

use serde::{Deserialize, Serialize};

use crate::JsonMap;
use crate::error::{CollectionError, ItemDiagnostics};

/// How a collection's items are stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentType {
    /// Long-form document: front matter followed by a body.
    #[default]
    Content,
    /// Plain data record: the whole file is the item.
    Data,
}

/// What happens to front matter keys the schema does not declare.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnknownFields {
    /// Drop them from the parsed output.
    #[default]
    Strip,
    /// Keep them in the parsed output unchanged.
    Passthrough,
}

/// Field declarations shared by every item of a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionSchema {
    content_type: ContentType,
    fields: Vec<FieldDecl>,
}

/// Define a schema from a content-type marker and field declarations.
///
/// Field names are unique within a schema: a later declaration replaces an
/// earlier one with the same name, keeping the earlier position.
pub fn define_collection(
    content_type: ContentType,
    fields: impl IntoIterator<Item = FieldDecl>,
) -> CollectionSchema {
    fields
        .into_iter()
        .fold(CollectionSchema::new(content_type), CollectionSchema::field)
}

impl CollectionSchema {
    pub fn new(content_type: ContentType) -> Self {
        Self {
            content_type,
            fields: Vec::new(),
        }
    }

    /// Add a field declaration (builder style).
    pub fn field(mut self, decl: FieldDecl) -> Self {
        match self.fields.iter_mut().find(|f| f.name == decl.name) {
            Some(existing) => *existing = decl,
            None => self.fields.push(decl),
        }
        self
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    pub fn fields(&self) -> &[FieldDecl] {
        &self.fields
    }

    pub fn get_field(&self, name: &str) -> Option<&FieldDecl> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &FieldDecl> {
        self.fields.iter().filter(|f| f.required)
    }

    /// Validate an item, collecting every field error.
    pub fn validate(&self, item: &JsonMap) -> Result<(), ItemDiagnostics> {
        self.parse(item, UnknownFields::Strip).map(|_| ())
    }

    /// Validate an item and return its accepted data.
    ///
    /// Declared values are normalized (dates become `YYYY-MM-DD` or RFC 3339
    /// UTC). Undeclared keys are dropped or kept per `unknown`.
    pub fn parse(
        &self,
        item: &JsonMap,
        unknown: UnknownFields,
    ) -> Result<JsonMap, ItemDiagnostics> {
        let mut diag = ItemDiagnostics::new();
        let mut output = match unknown {
            UnknownFields::Strip => JsonMap::new(),
            UnknownFields::Passthrough => item.clone(),
        };

        for decl in &self.fields {
            let Some(value) = item.get(decl.name) else {
                if decl.required {
                    diag.push(CollectionError::MissingField { field: decl.name });
                }
                continue;
            };

            match decl.kind.check(value) {
                Ok(normalized) => {
                    output.insert(decl.name.to_owned(), normalized);
                }
                Err(found) => diag.push(CollectionError::TypeMismatch {
                    field: decl.name,
                    expected: decl.kind,
                    found,
                }),
            }
        }

        diag.into_result().map(|()| output)
    }
}
