pub use crate::core::io::dot_bracket::{ParseConfig, ValidationMode};

use crate::core::models::segment::DEFAULT_TAG;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    parse: ParseConfig,
}

impl ParseConfig {
    /// Reads the `[parse]` table of a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let file: ConfigFile = toml::from_str(&content).map_err(|e| ConfigError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Ok(file.parse)
    }
}

#[derive(Default)]
pub struct ParseConfigBuilder {
    validation: Option<ValidationMode>,
    default_tag: Option<String>,
}

impl ParseConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn validation(mut self, mode: ValidationMode) -> Self {
        self.validation = Some(mode);
        self
    }
    pub fn default_tag(mut self, tag: &str) -> Self {
        self.default_tag = Some(tag.to_string());
        self
    }

    pub fn build(self) -> Result<ParseConfig, ConfigError> {
        let default_tag = self.default_tag.unwrap_or_else(|| DEFAULT_TAG.to_string());
        if default_tag.is_empty() {
            return Err(ConfigError::MissingParameter("default_tag"));
        }
        Ok(ParseConfig {
            validation: self.validation.unwrap_or_default(),
            default_tag,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn builder_uses_permissive_defaults() {
        let config = ParseConfigBuilder::new().build().unwrap();
        assert_eq!(config, ParseConfig::default());
        assert_eq!(config.validation, ValidationMode::Permissive);
        assert_eq!(config.default_tag, "default");
    }

    #[test]
    fn builder_applies_overrides() {
        let config = ParseConfigBuilder::new()
            .validation(ValidationMode::Strict)
            .default_tag("strand")
            .build()
            .unwrap();
        assert_eq!(config.validation, ValidationMode::Strict);
        assert_eq!(config.default_tag, "strand");
    }

    #[test]
    fn builder_rejects_empty_default_tag() {
        let result = ParseConfigBuilder::new().default_tag("").build();
        assert!(matches!(result, Err(ConfigError::MissingParameter("default_tag"))));
    }

    #[test]
    fn load_reads_parse_table() {
        let file = write_config("[parse]\nvalidation = \"strict\"\ndefault-tag = \"X\"\n");
        let config = ParseConfig::load(file.path()).unwrap();
        assert_eq!(config.validation, ValidationMode::Strict);
        assert_eq!(config.default_tag, "X");
    }

    #[test]
    fn load_fills_missing_fields_with_defaults() {
        let file = write_config("[parse]\n");
        assert_eq!(ParseConfig::load(file.path()).unwrap(), ParseConfig::default());

        let empty = write_config("");
        assert_eq!(ParseConfig::load(empty.path()).unwrap(), ParseConfig::default());
    }

    #[test]
    fn load_rejects_unknown_fields() {
        let file = write_config("[parse]\nstrictness = 3\n");
        assert!(matches!(
            ParseConfig::load(file.path()),
            Err(ConfigError::Toml { .. })
        ));
    }

    #[test]
    fn loaded_config_drives_the_dot_bracket_parser() {
        use crate::core::io::dot_bracket::{DotBracketParser, ParseError, StructureDiagnostic};
        use crate::core::models::bases::BaseType;

        let file = write_config("[parse]\nvalidation = \"strict\"\ndefault-tag = \"reporter\"\n");
        let parser = DotBracketParser::new(ParseConfig::load(file.path()).unwrap());

        let ordering = parser
            .parse("GG+CC", "((+))", &BaseType::encode("GG+CC"), None)
            .unwrap();
        assert_eq!(ordering.strand_names(), "-1:reporter,-1:reporter");
        assert_eq!(
            parser
                .parse("GG+CC", "..+..", &BaseType::encode("GG+CC"), None)
                .unwrap_err(),
            ParseError::Structure(StructureDiagnostic::DisconnectedStrand { strand: 0 })
        );
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = ParseConfig::load(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
