//! Machine-readable output envelopes for the `--json` flag.

use serde::Serialize;

use matpack_spec::error::{ValidationError, ValidationWarning};

/// A diagnostic in JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct JsonDiagnostic {
    /// Stable code (e.g., "E004", "W001", "IO").
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// JSON path of the offending field, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl JsonDiagnostic {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
        }
    }
}

pub fn validation_error_to_json(error: &ValidationError) -> JsonDiagnostic {
    JsonDiagnostic {
        code: error.code.to_string(),
        message: error.message.clone(),
        path: error.path.clone(),
    }
}

pub fn validation_warning_to_json(warning: &ValidationWarning) -> JsonDiagnostic {
    JsonDiagnostic {
        code: warning.code.to_string(),
        message: warning.message.clone(),
        path: warning.path.clone(),
    }
}

/// Output envelope for `matpack validate`.
#[derive(Debug, Serialize)]
pub struct ValidateOutput {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_hash: Option<String>,
    pub errors: Vec<JsonDiagnostic>,
    pub warnings: Vec<JsonDiagnostic>,
}

/// One written file in `matpack pack` output.
#[derive(Debug, Serialize)]
pub struct PackedFile {
    pub name: String,
    pub path: String,
    pub width: u32,
    pub height: u32,
    pub hash: String,
}

/// Output envelope for `matpack pack`.
#[derive(Debug, Serialize)]
pub struct PackOutput {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_hash: Option<String>,
    pub outputs: Vec<PackedFile>,
    pub errors: Vec<JsonDiagnostic>,
    pub warnings: Vec<JsonDiagnostic>,
}

/// Output envelope for `matpack convert`.
#[derive(Debug, Serialize)]
pub struct ConvertOutput {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,
    pub copied: usize,
    pub skipped: usize,
    pub errors: Vec<JsonDiagnostic>,
    pub warnings: Vec<JsonDiagnostic>,
}

/// Serialize and print an envelope to stdout.
pub fn print_json<T: Serialize>(output: &T) {
    let json = serde_json::to_string_pretty(output).expect("JSON output serialization should not fail");
    println!("{}", json);
}
