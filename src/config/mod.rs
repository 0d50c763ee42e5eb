//! `[collections]` configuration.
//!
//! # Example
//!
//! ```toml
//! [collections]
//! variant = "blog-features"   # blog-features | with-stack
//! unknown_fields = "strip"    # strip | passthrough
//! verbose = false             # enable debug! output
//! ```
//!
//! Other top-level tables are ignored, so the section can live inside a
//! larger site config file.

use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::error::{ConfigError, EntryError};
use crate::registry::{CollectionRegistry, RegistryVariant};
use crate::schema::UnknownFields;
use crate::{content::ContentEntry, log, logger};

/// Config file layout: only the `[collections]` table is read.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    collections: CollectionsConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionsConfig {
    /// Which built-in declarations to use.
    pub variant: RegistryVariant,

    /// Keep or drop front matter keys no schema declares.
    pub unknown_fields: UnknownFields,

    /// Show debug output.
    pub verbose: bool,
}

impl CollectionsConfig {
    /// Parse configuration from a TOML string.
    ///
    /// Unknown keys inside `[collections]` are reported and ignored.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let (config, ignored) = Self::parse_with_ignored(content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored);
        }
        Ok(config)
    }

    /// Load configuration from a file path.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Parse TOML content, collecting unknown keys under `[collections]`.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let file: ConfigFile = serde_ignored::deserialize(deserializer, |path| {
            let path = path.to_string();
            if path.starts_with("collections.") {
                ignored.push(path);
            }
        })?;
        Ok((file.collections, ignored))
    }

    fn print_unknown_fields_warning(fields: &[String]) {
        log!("warning"; "unknown fields in [collections], ignoring:");
        for field in fields {
            eprintln!("- {field}");
        }
    }

    /// Apply process-wide settings (verbosity).
    pub fn apply(&self) {
        logger::set_verbose(self.verbose);
    }

    /// The registry this configuration selects.
    pub fn registry(&self) -> &'static CollectionRegistry {
        CollectionRegistry::get(self.variant)
    }

    /// Load one entry with this configuration's registry and key policy.
    pub fn load_entry(
        &self,
        collection: &str,
        id: &str,
        source: &str,
    ) -> Result<ContentEntry, EntryError> {
        self.registry()
            .load_entry(collection, id, source, self.unknown_fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = CollectionsConfig::from_str("").unwrap();
        assert_eq!(config, CollectionsConfig::default());
        assert_eq!(config.variant, RegistryVariant::BlogFeatures);
        assert_eq!(config.unknown_fields, UnknownFields::Strip);
        assert!(!config.verbose);
    }

    #[test]
    fn test_parse_section() {
        let config = CollectionsConfig::from_str(
            "[collections]\nvariant = \"with-stack\"\nunknown_fields = \"passthrough\"\n",
        )
        .unwrap();
        assert_eq!(config.variant, RegistryVariant::WithStack);
        assert_eq!(config.unknown_fields, UnknownFields::Passthrough);
        assert!(config.registry().contains("Stack"));
    }

    #[test]
    fn test_other_tables_ignored() {
        let (config, ignored) = CollectionsConfig::parse_with_ignored(
            "[site]\ntitle = \"blog\"\n\n[collections]\nverbose = true\nstrict = true\n",
        )
        .unwrap();
        assert!(config.verbose);
        assert_eq!(ignored, ["collections.strict"]);
    }

    #[test]
    fn test_invalid_variant() {
        let err = CollectionsConfig::from_str("[collections]\nvariant = \"videos\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[collections]\nvariant = \"with-stack\"").unwrap();

        let config = CollectionsConfig::from_path(file.path()).unwrap();
        assert_eq!(config.variant, RegistryVariant::WithStack);
    }

    #[test]
    fn test_from_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = CollectionsConfig::from_path(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(..)));
    }

    #[test]
    fn test_load_entry_uses_policy() {
        let config = CollectionsConfig {
            unknown_fields: UnknownFields::Passthrough,
            ..Default::default()
        };
        let entry = config
            .load_entry("Libraries", "serde", "---\ntags: [rust]\nstars: 9000\n---\n")
            .unwrap();
        assert_eq!(entry.data.get("stars"), Some(&serde_json::json!(9000)));
    }
}
