//! Error types for plan validation and processing.

use thiserror::Error;

/// Error codes for plan and rules validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Plan errors (E001-E005)
    /// E001: Unsupported plan_version
    UnsupportedPlanVersion,
    /// E002: Empty plan name
    EmptyPlanName,
    /// E003: Output with an empty name
    EmptyOutputName,
    /// E004: Enabled selector references a source index out of range
    SourceIndexOutOfRange,
    /// E005: Material-bound plan input is not a usable property name
    InvalidPropertyInput,

    // Conversion rules errors (E010-E011)
    /// E010: Empty source or destination shader name
    EmptyShaderName,
    /// E011: Property mapping with an empty name
    EmptyMappingName,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::UnsupportedPlanVersion => "E001",
            ErrorCode::EmptyPlanName => "E002",
            ErrorCode::EmptyOutputName => "E003",
            ErrorCode::SourceIndexOutOfRange => "E004",
            ErrorCode::InvalidPropertyInput => "E005",
            ErrorCode::EmptyShaderName => "E010",
            ErrorCode::EmptyMappingName => "E011",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Warning codes for plan and rules validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningCode {
    /// W001: Two outputs share a name; the later write overwrites the earlier
    DuplicateOutputName,
    /// W002: Plan declares no outputs
    NoOutputs,
    /// W003: Plan declares no inputs
    NoInputs,
    /// W004: Output has all four channel selectors disabled
    AllChannelsDisabled,
    /// W010: Duplicate property name in a conversion map
    DuplicateMappingName,
}

impl WarningCode {
    /// Returns the warning code string (e.g., "W001").
    pub fn code(&self) -> &'static str {
        match self {
            WarningCode::DuplicateOutputName => "W001",
            WarningCode::NoOutputs => "W002",
            WarningCode::NoInputs => "W003",
            WarningCode::AllChannelsDisabled => "W004",
            WarningCode::DuplicateMappingName => "W010",
        }
    }
}

impl std::fmt::Display for WarningCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A validation error with code, message, and optional JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// JSON path to the problematic field (e.g., "outputs\[0\].r.source").
    pub path: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation error with a JSON path.
    pub fn with_path(code: ErrorCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

/// A validation warning with code, message, and optional JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The warning code.
    pub code: WarningCode,
    /// Human-readable warning message.
    pub message: String,
    /// JSON path to the problematic field.
    pub path: Option<String>,
}

impl ValidationWarning {
    /// Creates a new validation warning.
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation warning with a JSON path.
    pub fn with_path(
        code: WarningCode,
        message: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

/// Top-level error type for plan operations.
#[derive(Debug, Error)]
pub enum PlanError {
    /// Plan validation failed with one or more errors.
    #[error("plan validation failed with {0} error(s)")]
    ValidationFailed(usize),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of plan or rules validation.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether validation passed (no errors).
    pub ok: bool,
    /// List of validation errors.
    pub errors: Vec<ValidationError>,
    /// List of validation warnings.
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    /// Creates a successful validation result.
    pub fn success() -> Self {
        Self {
            ok: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Creates a failed validation result.
    pub fn failure(errors: Vec<ValidationError>) -> Self {
        Self {
            ok: false,
            errors,
            warnings: Vec::new(),
        }
    }

    /// Adds an error to the result.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
        self.ok = false;
    }

    /// Adds a warning to the result.
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.ok
    }

    /// Converts to a Result, returning Err if there are errors.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, Vec<ValidationError>> {
        if self.ok {
            Ok(self.warnings)
        } else {
            Err(self.errors)
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::success()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ErrorCode::UnsupportedPlanVersion.code(), "E001");
        assert_eq!(ErrorCode::SourceIndexOutOfRange.code(), "E004");
        assert_eq!(ErrorCode::EmptyShaderName.code(), "E010");
    }

    #[test]
    fn test_warning_codes() {
        assert_eq!(WarningCode::DuplicateOutputName.code(), "W001");
        assert_eq!(WarningCode::DuplicateMappingName.code(), "W010");
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::new(ErrorCode::EmptyOutputName, "output name is empty");
        assert_eq!(err.to_string(), "E003: output name is empty");

        let err_with_path = ValidationError::with_path(
            ErrorCode::SourceIndexOutOfRange,
            "source 7 out of range",
            "outputs[0].r.source",
        );
        assert_eq!(
            err_with_path.to_string(),
            "E004: source 7 out of range (at outputs[0].r.source)"
        );
    }

    #[test]
    fn test_validation_result() {
        let mut result = ValidationResult::success();
        assert!(result.is_ok());

        result.add_warning(ValidationWarning::new(WarningCode::NoOutputs, "no outputs"));
        assert!(result.is_ok());

        result.add_error(ValidationError::new(ErrorCode::EmptyPlanName, "no name"));
        assert!(!result.is_ok());
        assert_eq!(result.errors.len(), 1);
    }

    #[test]
    fn test_into_result() {
        let result = ValidationResult::success();
        assert!(result.into_result().is_ok());

        let failed = ValidationResult::failure(vec![ValidationError::new(
            ErrorCode::EmptyPlanName,
            "no name",
        )]);
        assert!(failed.into_result().is_err());
    }
}
