//! Built-in collection declarations.

use super::RegistryVariant;
use crate::schema::{CollectionSchema, ContentType, FieldDecl, FieldKind, define_collection};

pub const TAGS: FieldDecl = FieldDecl::required("tags", FieldKind::StringList);
pub const DATE: FieldDecl = FieldDecl::required("date", FieldKind::Date);
pub const FEATURES: FieldDecl = FieldDecl::optional("features", FieldKind::StringList);

pub const BLOG: &str = "Blog";
pub const STACK: &str = "Stack";

/// Collections that only carry tags, in every variant.
pub const TAGGED: [&str; 5] = ["Articles", "Codepens", "Libraries", "Snippets", "Tools"];

/// Tags only.
pub fn base_schema() -> CollectionSchema {
    define_collection(ContentType::Content, [TAGS])
}

/// Tags and date, plus `features` in the variant that declares it.
pub fn blog_schema(variant: RegistryVariant) -> CollectionSchema {
    let schema = define_collection(ContentType::Content, [TAGS, DATE]);
    match variant {
        RegistryVariant::BlogFeatures => schema.field(FEATURES),
        RegistryVariant::WithStack => schema,
    }
}

/// Every collection of `variant`, in declaration order.
pub fn collections(variant: RegistryVariant) -> Vec<(&'static str, CollectionSchema)> {
    let mut out = Vec::with_capacity(TAGGED.len() + 2);
    out.push((BLOG, blog_schema(variant)));
    out.extend(TAGGED.iter().map(|name| (*name, base_schema())));
    if variant == RegistryVariant::WithStack {
        out.push((STACK, base_schema()));
    }
    out
}
