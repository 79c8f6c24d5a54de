// 📐 Input Validation
// Range checks shared by every calculator before any formula runs

use serde::Serialize;

/// Longest horizon any calculator will iterate over
pub const MAX_HORIZON_YEARS: u32 = 100;

// ============================================================================
// VALIDATION ERRORS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub context: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.context, self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// All problems found in one input record.
///
/// Returned inside `anyhow::Error`; hosts can `downcast_ref::<ValidationErrors>()`
/// to tell bad input apart from an internal failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationErrors(pub Vec<ValidationError>);

impl ValidationErrors {
    pub fn fields(&self) -> Vec<&str> {
        self.0.iter().map(|e| e.field.as_str()).collect()
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<String> = self.0.iter().map(|e| e.to_string()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

pub type ValidationResult = Result<(), ValidationErrors>;

// ============================================================================
// INPUT CHECKER
// ============================================================================

/// Collects field errors for one calculator input
pub struct InputChecker {
    context: String,
    errors: Vec<ValidationError>,
}

impl InputChecker {
    pub fn new(context: &str) -> Self {
        InputChecker {
            context: context.to_string(),
            errors: Vec::new(),
        }
    }

    /// Record an arbitrary failure
    pub fn fail(&mut self, field: &str, message: impl Into<String>) -> &mut Self {
        self.errors.push(ValidationError {
            field: field.to_string(),
            message: message.into(),
            context: self.context.clone(),
        });
        self
    }

    /// Money amounts: finite and not negative
    pub fn amount(&mut self, field: &str, value: f64) -> &mut Self {
        if !value.is_finite() {
            self.fail(field, "Must be a finite number");
        } else if value < 0.0 {
            self.fail(field, format!("Must not be negative, got {}", value));
        }
        self
    }

    /// Percent-per-annum rates: 0 to 100
    pub fn rate(&mut self, field: &str, value: f64) -> &mut Self {
        self.range(field, value, 0.0, 100.0)
    }

    pub fn range(&mut self, field: &str, value: f64, min: f64, max: f64) -> &mut Self {
        if !value.is_finite() {
            self.fail(field, "Must be a finite number");
        } else if value < min || value > max {
            self.fail(
                field,
                format!("Must be between {} and {}, got {}", min, max, value),
            );
        }
        self
    }

    /// Simulation length in years
    pub fn horizon(&mut self, field: &str, years: u32) -> &mut Self {
        if years > MAX_HORIZON_YEARS {
            self.fail(
                field,
                format!("Must be at most {} years, got {}", MAX_HORIZON_YEARS, years),
            );
        }
        self
    }

    pub fn finish(&mut self) -> ValidationResult {
        if self.errors.is_empty() {
            Ok(())
        } else {
            let errors = std::mem::take(&mut self.errors);
            tracing::warn!(
                context = %self.context,
                count = errors.len(),
                "rejected calculator input"
            );
            Err(ValidationErrors(errors))
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
