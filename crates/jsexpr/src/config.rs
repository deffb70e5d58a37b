//! Translator configuration.
//!
//! Example:
//! ```toml
//! inline = true
//!
//! [annotations.types]
//! Page = "this"
//!
//! [annotations.methods]
//! "Helpers.format" = "global"
//! ```

use crate::annotations::AnnotationTable;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Error loading a [`TranslatorConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid translator config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(default)]
pub struct TranslatorConfig {
    /// Emit a bare property path instead of a function literal.
    pub inline: bool,
    /// Annotation metadata for types, members and methods.
    pub annotations: AnnotationTable,
}

impl TranslatorConfig {
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&source)?;
        tracing::debug!(
            path = %path.display(),
            inline = config.inline,
            "loaded translator config"
        );
        Ok(config)
    }
}

/// JSON schema of [`TranslatorConfig`].
pub fn config_schema() -> schemars::Schema {
    schemars::schema_for!(TranslatorConfig)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::TypeRef;
    use crate::traits::{AnnotationLookup, ContextAnnotation};

    #[test]
    fn test_from_toml() {
        let config = TranslatorConfig::from_toml(
            r#"
            inline = true

            [annotations.types]
            Page = "this"

            [annotations.methods]
            "Helpers.format" = "global"
            "#,
        )
        .unwrap();

        assert!(config.inline);
        assert_eq!(
            config.annotations.type_annotation(&TypeRef::new("Page")),
            Some(ContextAnnotation::This)
        );
        assert_eq!(config.annotations.methods.len(), 1);
    }

    #[test]
    fn test_defaults() {
        let config = TranslatorConfig::from_toml("").unwrap();
        assert_eq!(config, TranslatorConfig::default());
        assert!(!config.inline);
        assert!(config.annotations.is_empty());
    }

    #[test]
    fn test_invalid_annotation() {
        let err = TranslatorConfig::from_toml(
            r#"
            [annotations.types]
            Page = "sometimes"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = TranslatorConfig::load(Path::new("/nonexistent/jsexpr.toml")).unwrap_err();
        assert!(err.to_string().starts_with("failed to read /nonexistent/jsexpr.toml"));
    }

    #[test]
    fn test_schema_lists_keys() {
        let schema = serde_json::to_string(&config_schema()).unwrap();
        assert!(schema.contains("inline"));
        assert!(schema.contains("annotations"));
        assert!(schema.contains("on-this"));
    }
}
