use thiserror::Error;

/// The main error type for Foundation operations.
///
/// This enum represents all possible errors that can occur while talking to a
/// Foundation appliance: transport failures, non-success responses, unexpected
/// response bodies and invalid caller input.
#[derive(Error, Debug)]
pub enum FoundationError {
    /// Represents errors that occur while sending a request (network failure, timeout)
    ///
    /// # Fields
    /// * `0` - A description of what went wrong during the request
    #[error("Connection error: {0}")]
    Connection(String),

    /// The appliance answered with a non-success status code
    ///
    /// # Fields
    /// * `status` - The HTTP status code
    /// * `message` - The response body, or a placeholder when it could not be read
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The appliance answered successfully but the body has an unexpected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Represents validation failures of caller-supplied input
    ///
    /// # Fields
    /// * `0` - The underlying validation error
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl FoundationError {
    /// Returns true for failures raised by the transport layer.
    ///
    /// These are propagated unchanged; the client never retries them.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            FoundationError::Connection(_)
                | FoundationError::Api { .. }
                | FoundationError::InvalidResponse(_)
        )
    }
}

/// Specialized error type for validation failures.
///
/// This enum provides detailed context about why a validation
/// failed, including field-specific errors and format violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Represents a validation failure for a specific field
    ///
    /// # Fields
    /// * `field` - The name of the field that failed validation
    /// * `message` - A detailed message about why validation failed
    #[error("Field '{field}' validation failed: {message}")]
    Field { field: String, message: String },

    /// Represents format/syntax validation failures
    ///
    /// # Fields
    /// * `0` - Description of the format violation
    #[error("Format error: {0}")]
    Format(String),

    /// Represents violations of domain constraints
    ///
    /// # Fields
    /// * `0` - Description of the constraint violation
    #[error("Domain constraint violation: {0}")]
    ConstraintViolation(String),

    /// Two options were requested together that cannot be combined
    #[error("Invalid option pairing: '{first}' cannot be combined with '{second}'")]
    InvalidOptionCombination { first: String, second: String },
}

/// Type alias for Results that may fail with a FoundationError
pub type FoundationResult<T> = Result<T, FoundationError>;
