//! Generator configuration and options.
//!
//! [`Config`] is a typed accessor over the raw JSON configuration supplied by
//! the host. [`CodegenOptions`] is built from it once and is immutable; the
//! document-dependent defaults are applied by [`CodegenOptions::with_document_defaults`],
//! which returns a new value.

use crate::error::{CodegenError, Result};
use crate::naming::{EnumMemberStyle, NamingConvention};
use openapi_swift_schema::Info;
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Default package name.
pub const DEFAULT_PACKAGE_NAME: &str = "Api";

/// Raw generator configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    root: Map<String, Value>,
    config_path: Option<PathBuf>,
}

impl Config {
    /// Creates a configuration from a JSON value.
    ///
    /// # Errors
    /// Returns `CodegenError::Config` if the value is not a JSON object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(root) => Ok(Self {
                root,
                config_path: None,
            }),
            Value::Null => Ok(Self::default()),
            other => Err(CodegenError::config(
                "",
                format!("expected an object, found {other}"),
            )),
        }
    }

    /// Parses a configuration from a JSON string.
    ///
    /// # Errors
    /// Returns `CodegenError` if the JSON is malformed or not an object.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| CodegenError::config("", e.to_string()))?;
        Self::from_value(value)
    }

    /// Reads a configuration file, remembering its location for relative paths.
    ///
    /// # Errors
    /// Returns `CodegenError` if reading or parsing fails.
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(Self::from_json_str(&json)?.with_config_path(path))
    }

    /// Returns a copy that resolves relative paths against `path`'s directory.
    #[must_use]
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Location of the configuration file, if known.
    #[must_use]
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Looks up a dotted key such as `package.name`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        let mut parts = key.split('.');
        let first = parts.next()?;
        let mut current = self.root.get(first)?;
        for part in parts {
            current = current.as_object()?.get(part)?;
        }
        Some(current)
    }

    /// Looks up a string value.
    ///
    /// # Errors
    /// Returns `CodegenError::Config` if the value is present but not a string.
    pub fn get_str(&self, key: &str) -> Result<Option<&str>> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(other) => Err(CodegenError::config(
                key,
                format!("expected a string, found {other}"),
            )),
        }
    }

    /// Looks up a boolean value, falling back to `default`.
    ///
    /// # Errors
    /// Returns `CodegenError::Config` if the value is present but not a boolean.
    pub fn get_bool(&self, key: &str, default: bool) -> Result<bool> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(default),
            Some(Value::Bool(b)) => Ok(*b),
            Some(other) => Err(CodegenError::config(
                key,
                format!("expected a boolean, found {other}"),
            )),
        }
    }

    /// Looks up an array of strings. Numbers are accepted and converted.
    ///
    /// # Errors
    /// Returns `CodegenError::Config` if the value is not an array of strings.
    pub fn get_string_array(&self, key: &str) -> Result<Vec<String>> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s.clone()),
                    Value::Number(n) => Ok(n.to_string()),
                    other => Err(CodegenError::config(
                        key,
                        format!("expected a string item, found {other}"),
                    )),
                })
                .collect(),
            Some(other) => Err(CodegenError::config(
                key,
                format!("expected an array, found {other}"),
            )),
        }
    }
}

/// Package options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageOptions {
    /// Swift package name; `None` until inferred from the document.
    pub name: Option<String>,
}

/// Logging options for the generated client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingOptions {
    /// `os.Logger` subsystem.
    pub subsystem: String,
}

/// Resolved generator options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodegenOptions {
    /// Package options.
    pub package: PackageOptions,
    /// Source directory relative to the output path.
    pub relative_source_output_path: String,
    /// Directory of templates overriding the built-in ones.
    pub custom_templates_path: Option<PathBuf>,
    /// Omit the generation timestamp from generated files.
    pub hide_generation_timestamp: bool,
    /// Extra status codes the client retries.
    pub additional_retry_status_codes: Vec<String>,
    /// Extra status codes treated as token failures.
    pub additional_token_failure_status_codes: Vec<String>,
    /// Logging options.
    pub logging: LoggingOptions,
    /// Enum member naming style.
    pub enum_member_style: EnumMemberStyle,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        Self {
            package: PackageOptions {
                name: Some(DEFAULT_PACKAGE_NAME.to_string()),
            },
            relative_source_output_path: format!("Sources/{DEFAULT_PACKAGE_NAME}"),
            custom_templates_path: None,
            hide_generation_timestamp: false,
            additional_retry_status_codes: Vec::new(),
            additional_token_failure_status_codes: Vec::new(),
            logging: LoggingOptions {
                subsystem: DEFAULT_PACKAGE_NAME.to_string(),
            },
            enum_member_style: EnumMemberStyle::Constant,
        }
    }
}

impl CodegenOptions {
    /// Builds options from configuration.
    ///
    /// An explicitly empty `package.name` leaves the package name unset so that
    /// it can be inferred from the document title. Settings derived from the
    /// package name are then left empty until [`Self::with_document_defaults`].
    ///
    /// # Errors
    /// Returns `CodegenError::Config` if a value has the wrong type.
    pub fn from_config(config: &Config) -> Result<Self> {
        let package_name = match config.get_str("package.name")? {
            None => Some(DEFAULT_PACKAGE_NAME.to_string()),
            Some("") => None,
            Some(name) => Some(name.to_string()),
        };
        let derived = package_name.clone().unwrap_or_default();

        let relative_source_output_path = match config.get_str("relativeSourceOutputPath")? {
            Some(path) => path.to_string(),
            None if derived.is_empty() => String::new(),
            None => format!("Sources/{derived}"),
        };

        let custom_templates_path = config
            .get_str("customTemplates")?
            .filter(|path| !path.is_empty())
            .map(|path| resolve_custom_templates_path(config.config_path(), path));

        let subsystem = config
            .get_str("logging.subsystem")?
            .map_or(derived, str::to_string);

        let enum_member_style = match config.get_str("enumMemberStyle")? {
            None => EnumMemberStyle::default(),
            Some(style) => EnumMemberStyle::parse(style).ok_or_else(|| {
                CodegenError::config("enumMemberStyle", format!("unknown style '{style}'"))
            })?,
        };

        Ok(Self {
            package: PackageOptions { name: package_name },
            relative_source_output_path,
            custom_templates_path,
            hide_generation_timestamp: config.get_bool("hideGenerationTimestamp", false)?,
            additional_retry_status_codes: config.get_string_array("additionalRetryStatusCodes")?,
            additional_token_failure_status_codes: config
                .get_string_array("additionalTokenFailureStatusCodes")?,
            logging: LoggingOptions { subsystem },
            enum_member_style,
        })
    }

    /// Returns options with document-derived defaults applied.
    ///
    /// When the package name is unset it becomes the class name of the document
    /// title, and empty settings derived from it are filled in.
    #[must_use]
    pub fn with_document_defaults<N: NamingConvention + ?Sized>(
        &self,
        info: &Info,
        naming: &N,
    ) -> Self {
        let mut options = self.clone();
        if options.package.name.is_none() {
            let name = naming.to_class_name(&info.title);
            tracing::info!("Inferred package name '{}' from document title", name);
            if options.relative_source_output_path.is_empty() {
                options.relative_source_output_path = format!("Sources/{name}");
            }
            if options.logging.subsystem.is_empty() {
                options.logging.subsystem = name.clone();
            }
            options.package.name = Some(name);
        }
        options
    }

    /// Package name, if set.
    #[must_use]
    pub fn package_name(&self) -> Option<&str> {
        self.package.name.as_deref()
    }
}

fn resolve_custom_templates_path(config_path: Option<&Path>, templates: &str) -> PathBuf {
    match config_path.and_then(Path::parent) {
        Some(dir) => dir.join(templates),
        None => PathBuf::from(templates),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::SwiftNaming;
    use serde_json::json;

    fn info(title: &str) -> Info {
        Info {
            title: title.to_string(),
            version: "1.0".to_string(),
            description: None,
        }
    }

    #[test]
    fn test_defaults() {
        let options = CodegenOptions::from_config(&Config::default()).expect("Failed to build");
        assert_eq!(options, CodegenOptions::default());
        assert_eq!(options.package_name(), Some("Api"));
        assert_eq!(options.relative_source_output_path, "Sources/Api");
        assert_eq!(options.logging.subsystem, "Api");
    }

    #[test]
    fn test_from_config() {
        let config = Config::from_value(json!({
            "package": {"name": "PetStore"},
            "hideGenerationTimestamp": true,
            "additionalRetryStatusCodes": ["502", 503],
            "logging": {"subsystem": "com.example.pets"},
            "enumMemberStyle": "preserve"
        }))
        .expect("Failed to parse");
        let options = CodegenOptions::from_config(&config).expect("Failed to build");

        assert_eq!(options.package_name(), Some("PetStore"));
        assert_eq!(options.relative_source_output_path, "Sources/PetStore");
        assert!(options.hide_generation_timestamp);
        assert_eq!(options.additional_retry_status_codes, vec!["502", "503"]);
        assert!(options.additional_token_failure_status_codes.is_empty());
        assert_eq!(options.logging.subsystem, "com.example.pets");
        assert_eq!(options.enum_member_style, EnumMemberStyle::Preserve);
    }

    #[test]
    fn test_custom_templates_relative_to_config_file() {
        let config = Config::from_value(json!({"customTemplates": "templates"}))
            .expect("Failed to parse")
            .with_config_path("/work/project/config.json");
        let options = CodegenOptions::from_config(&config).expect("Failed to build");
        assert_eq!(
            options.custom_templates_path,
            Some(PathBuf::from("/work/project/templates"))
        );
    }

    #[test]
    fn test_empty_package_name_inferred_from_title() {
        let config = Config::from_value(json!({"package": {"name": ""}})).expect("Failed to parse");
        let options = CodegenOptions::from_config(&config).expect("Failed to build");
        assert_eq!(options.package_name(), None);

        let resolved = options.with_document_defaults(&info("pet store"), &SwiftNaming);
        assert_eq!(resolved.package_name(), Some("PetStore"));
        assert_eq!(resolved.relative_source_output_path, "Sources/PetStore");
        assert_eq!(resolved.logging.subsystem, "PetStore");
        assert_eq!(options.package_name(), None);
    }

    #[test]
    fn test_explicit_package_name_kept() {
        let options = CodegenOptions::default();
        let resolved = options.with_document_defaults(&info("Something Else"), &SwiftNaming);
        assert_eq!(resolved.package_name(), Some("Api"));
    }

    #[test]
    fn test_wrong_type() {
        let config = Config::from_value(json!({"hideGenerationTimestamp": "yes"}))
            .expect("Failed to parse");
        let err = CodegenOptions::from_config(&config).unwrap_err();
        assert!(matches!(err, CodegenError::Config { ref key, .. } if key == "hideGenerationTimestamp"));
    }

    #[test]
    fn test_unknown_enum_member_style() {
        let config = Config::from_value(json!({"enumMemberStyle": "kebab"})).expect("Failed to parse");
        assert!(CodegenOptions::from_config(&config).is_err());
    }

    #[test]
    fn test_config_from_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"package": {"name": "Pets"}}"#).expect("Failed to write");
        let config = Config::from_file(&path).expect("Failed to read");
        assert_eq!(config.config_path(), Some(path.as_path()));
        assert_eq!(config.get_str("package.name").expect("Failed to get"), Some("Pets"));
    }
}
