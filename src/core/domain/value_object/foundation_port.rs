use crate::core::domain::error::ValidationError;

/// Port the Foundation service listens on.
pub const DEFAULT_FOUNDATION_PORT: u16 = 8000;

/// A validated Foundation port number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoundationPort(u16);

impl FoundationPort {
    /// Creates a new port after validating it.
    pub fn new(port: u16) -> Result<Self, ValidationError> {
        validate_port(port)?;
        Ok(Self(port))
    }

    /// Creates a new port without validation.
    #[allow(unused)]
    pub(crate) fn new_unchecked(port: u16) -> Self {
        Self(port)
    }

    /// Returns the port number.
    pub fn get(&self) -> u16 {
        self.0
    }
}

impl Default for FoundationPort {
    fn default() -> Self {
        Self(DEFAULT_FOUNDATION_PORT)
    }
}

/// Validates a port number.
pub(crate) fn validate_port(port: u16) -> Result<(), ValidationError> {
    if port == 0 {
        return Err(ValidationError::Field {
            field: "port".to_string(),
            message: "Port cannot be 0".to_string(),
        });
    }
    Ok(())
}
