use crate::errors::{SessionError, SessionResult};
use crate::transport::HttpMethod;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "payload-editor.config.json";

/// Payload editor configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// Title shown on the editor container
    #[serde(default = "default_title")]
    pub title: String,

    /// Where submissions go
    #[serde(default)]
    pub endpoint: EndpointConfig,

    /// Sample payload file, relative to the config directory
    #[serde(default = "default_sample_payload")]
    pub sample_payload: String,

    /// JSON Schema file, relative to the config directory
    #[serde(default = "default_schema")]
    pub schema: String,

    /// Record form edits in the undo history as well as raw edits
    #[serde(default)]
    pub record_structural_edits: bool,

    /// Reject form edits whose path has empty segments
    #[serde(default)]
    pub strict_paths: bool,

    /// Maximum history entries (0 = unlimited)
    #[serde(default)]
    pub history_limit: usize,

    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointConfig {
    pub url: String,

    #[serde(default)]
    pub method: HttpMethod,
}

fn default_title() -> String {
    "Enter Payload".to_string()
}

fn default_sample_payload() -> String {
    "payload.sample.json".to_string()
}

fn default_schema() -> String {
    "payload.schema.json".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8080/payload".to_string(),
            method: HttpMethod::Post,
        }
    }
}

impl EditorConfig {
    /// Load config from a directory
    pub fn load(cwd: &Path) -> SessionResult<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            // Return default config if none exists
            Ok(Self::default())
        }
    }

    /// Load config from an explicit file
    pub fn load_from(path: &Path) -> SessionResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: EditorConfig = serde_json::from_str(&content)
            .map_err(|e| SessionError::Config(format!("{}: {}", path.display(), e)))?;

        if config.endpoint.url.trim().is_empty() {
            return Err(SessionError::Config("endpoint.url must not be empty".to_string()));
        }

        Ok(config)
    }

    /// Absolute path to the sample payload
    pub fn sample_payload_path(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.sample_payload)
    }

    /// Absolute path to the schema
    pub fn schema_path(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.schema)
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            endpoint: EndpointConfig::default(),
            sample_payload: default_sample_payload(),
            schema: default_schema(),
            record_structural_edits: false,
            strict_paths: false,
            history_limit: 0,
            request_timeout_secs: default_timeout_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "title": "Create Customer",
            "endpoint": { "url": "https://api.example.com/customers", "method": "PUT" },
            "samplePayload": "samples/customer.json",
            "recordStructuralEdits": true,
            "historyLimit": 50
        }"#;

        let config: EditorConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.title, "Create Customer");
        assert_eq!(config.endpoint.method, HttpMethod::Put);
        assert_eq!(config.sample_payload, "samples/customer.json");
        assert_eq!(config.schema, "payload.schema.json");
        assert!(config.record_structural_edits);
        assert!(!config.strict_paths);
        assert_eq!(config.history_limit, 50);
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_default_config() {
        let config = EditorConfig::default();
        assert_eq!(config.endpoint.method, HttpMethod::Post);
        assert!(!config.record_structural_edits);
        assert_eq!(config.history_limit, 0);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = EditorConfig::load(dir.path()).unwrap();
        assert_eq!(config, EditorConfig::default());
    }

    #[test]
    fn test_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(DEFAULT_CONFIG_NAME),
            r#"{ "endpoint": { "url": "http://127.0.0.1:9/submit" }, "strictPaths": true }"#,
        )
        .unwrap();

        let config = EditorConfig::load(dir.path()).unwrap();
        assert_eq!(config.endpoint.url, "http://127.0.0.1:9/submit");
        assert!(config.strict_paths);
        assert_eq!(
            config.schema_path(dir.path()),
            dir.path().join("payload.schema.json")
        );
    }

    #[test]
    fn test_malformed_config_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DEFAULT_CONFIG_NAME), "{ not json").unwrap();

        let err = EditorConfig::load(dir.path()).unwrap_err();
        assert!(matches!(err, SessionError::Config(_)));
    }

    #[test]
    fn test_empty_endpoint_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(DEFAULT_CONFIG_NAME),
            r#"{ "endpoint": { "url": "  " } }"#,
        )
        .unwrap();

        assert!(EditorConfig::load(dir.path()).is_err());
    }
}
