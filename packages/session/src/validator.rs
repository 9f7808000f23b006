//! Payload validation at submit time

use crate::errors::{SessionError, SessionResult};
use serde::Serialize;
use serde_json::Value;

/// One conformance failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// JSON Pointer to the offending value (`""` for the root)
    pub path: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn valid() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    pub fn invalid(errors: Vec<ValidationIssue>) -> Self {
        Self {
            valid: false,
            errors,
        }
    }

    /// All issues on one line: `data/a must be ..., data/b ...`
    pub fn summary(&self) -> String {
        self.errors
            .iter()
            .map(|issue| format!("data{} {}", issue.path, issue.message))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

pub trait PayloadValidator: Send + Sync {
    fn validate(&self, value: &Value) -> ValidationReport;
}

/// Validator compiled from a JSON Schema
pub struct SchemaValidator {
    validator: jsonschema::Validator,
}

impl SchemaValidator {
    pub fn compile(schema: &Value) -> SessionResult<Self> {
        let validator =
            jsonschema::validator_for(schema).map_err(|e| SessionError::Schema(e.to_string()))?;
        Ok(Self { validator })
    }
}

impl PayloadValidator for SchemaValidator {
    fn validate(&self, value: &Value) -> ValidationReport {
        if self.validator.is_valid(value) {
            return ValidationReport::valid();
        }

        let errors = self
            .validator
            .iter_errors(value)
            .map(|error| ValidationIssue {
                path: error.instance_path.to_string(),
                message: error.to_string(),
            })
            .collect();

        ValidationReport::invalid(errors)
    }
}

/// Accepts every payload
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl PayloadValidator for AcceptAll {
    fn validate(&self, _value: &Value) -> ValidationReport {
        ValidationReport::valid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn customer_schema() -> Value {
        json!({
            "type": "object",
            "required": ["name", "age"],
            "properties": {
                "name": { "type": "string" },
                "age": { "type": "integer" }
            }
        })
    }

    #[test]
    fn test_valid_payload() {
        let validator = SchemaValidator::compile(&customer_schema()).unwrap();
        let report = validator.validate(&json!({"name": "Ada", "age": 36}));
        assert!(report.valid);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_invalid_payload_lists_paths() {
        let validator = SchemaValidator::compile(&customer_schema()).unwrap();
        let report = validator.validate(&json!({"name": 7, "age": "36"}));

        assert!(!report.valid);
        let mut paths: Vec<&str> = report.errors.iter().map(|e| e.path.as_str()).collect();
        paths.sort();
        assert_eq!(paths, ["/age", "/name"]);
        assert!(report.summary().contains("data/name "));
    }

    #[test]
    fn test_missing_required_reports_root() {
        let validator = SchemaValidator::compile(&customer_schema()).unwrap();
        let report = validator.validate(&json!({"name": "Ada"}));

        assert!(!report.valid);
        assert_eq!(report.errors[0].path, "");
        assert!(report.errors[0].message.contains("age"));
    }

    #[test]
    fn test_broken_schema_is_rejected() {
        let result = SchemaValidator::compile(&json!({"type": "no-such-type"}));
        assert!(matches!(result, Err(SessionError::Schema(_))));
    }

    #[test]
    fn test_summary_format() {
        let report = ValidationReport::invalid(vec![
            ValidationIssue {
                path: "/a".to_string(),
                message: "must be string".to_string(),
            },
            ValidationIssue {
                path: "".to_string(),
                message: "must have b".to_string(),
            },
        ]);
        assert_eq!(report.summary(), "data/a must be string, data must have b");
    }
}
