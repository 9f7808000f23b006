//! Initial payload and schema supplied at editor construction

use crate::config::EditorConfig;
use crate::errors::{SessionError, SessionResult};
use serde_json::Value;
use std::path::{Path, PathBuf};

pub trait PayloadSource {
    /// Default payload the editor opens with
    fn sample_payload(&self) -> SessionResult<Value>;

    /// JSON Schema the payload is validated against
    fn schema(&self) -> SessionResult<Value>;
}

/// Payload and schema held in memory
#[derive(Debug, Clone)]
pub struct StaticPayloadSource {
    payload: Value,
    schema: Value,
}

impl StaticPayloadSource {
    pub fn new(payload: Value, schema: Value) -> Self {
        Self { payload, schema }
    }
}

impl PayloadSource for StaticPayloadSource {
    fn sample_payload(&self) -> SessionResult<Value> {
        Ok(self.payload.clone())
    }

    fn schema(&self) -> SessionResult<Value> {
        Ok(self.schema.clone())
    }
}

/// Payload and schema read from JSON files
#[derive(Debug, Clone)]
pub struct FilePayloadSource {
    payload_path: PathBuf,
    schema_path: PathBuf,
}

impl FilePayloadSource {
    pub fn new(payload_path: PathBuf, schema_path: PathBuf) -> Self {
        Self {
            payload_path,
            schema_path,
        }
    }

    /// Files named by the config, relative to `cwd`
    pub fn from_config(config: &EditorConfig, cwd: &Path) -> Self {
        Self::new(config.sample_payload_path(cwd), config.schema_path(cwd))
    }
}

fn read_json(path: &Path) -> SessionResult<Value> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| SessionError::Config(format!("{}: {}", path.display(), e)))
}

impl PayloadSource for FilePayloadSource {
    fn sample_payload(&self) -> SessionResult<Value> {
        read_json(&self.payload_path)
    }

    fn schema(&self) -> SessionResult<Value> {
        read_json(&self.schema_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_file_source_reads_config_paths() {
        let dir = tempfile::tempdir().unwrap();
        let sample = dir.path().join("payload.sample.json");
        let schema = dir.path().join("payload.schema.json");
        std::fs::write(sample, r#"{"b": 1, "a": 2}"#).unwrap();
        std::fs::write(schema, r#"{"type": "object"}"#).unwrap();

        let source = FilePayloadSource::from_config(&EditorConfig::default(), dir.path());
        let payload = source.sample_payload().unwrap();

        assert_eq!(payload, json!({"b": 1, "a": 2}));
        // File order is kept
        let keys: Vec<&String> = payload.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["b", "a"]);
        assert_eq!(source.schema().unwrap(), json!({"type": "object"}));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = FilePayloadSource::from_config(&EditorConfig::default(), dir.path());
        assert!(matches!(source.sample_payload(), Err(SessionError::Io(_))));
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("payload.sample.json"), "{").unwrap();
        let source = FilePayloadSource::from_config(&EditorConfig::default(), dir.path());
        assert!(matches!(
            source.sample_payload(),
            Err(SessionError::Config(_))
        ));
    }
}
