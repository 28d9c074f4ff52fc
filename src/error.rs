//! Error handling for domain-proof


use thiserror::Error;

/// Main error type for domain-proof
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainProofError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Invalid domain '{domain}': {message}")]
    InvalidDomain { domain: String, message: String },

    #[error("Unsupported mode: {message}")]
    UnsupportedMode { message: String },

    #[error("Encoding error for label '{label}': {message}")]
    Encoding { label: String, message: String },

    #[error("DNS transport error for '{name}' ({record_type}): {message}")]
    DnsTransport {
        name: String,
        record_type: crate::types::RecordType,
        message: String,
    },

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainProofError {
    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create an invalid domain error
    pub fn invalid_domain(domain: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidDomain {
            domain: domain.into(),
            message: message.into(),
        }
    }

    /// Create an unsupported mode error
    pub fn unsupported_mode(message: impl Into<String>) -> Self {
        Self::UnsupportedMode {
            message: message.into(),
        }
    }

    /// Create an encoding error
    pub fn encoding(label: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Encoding {
            label: label.into(),
            message: message.into(),
        }
    }

    /// Create a DNS transport error
    pub fn dns_transport(
        name: impl Into<String>,
        record_type: crate::types::RecordType,
        message: impl Into<String>,
    ) -> Self {
        Self::DnsTransport {
            name: name.into(),
            record_type,
            message: message.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether the error comes from the resolver rather than the request
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::DnsTransport { .. })
    }

    /// Get user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidInput { message } => {
                format!("❌ Invalid input: {}\n💡 Provide a non-empty domain name", message)
            }
            Self::InvalidDomain { domain, message } => {
                format!(
                    "❌ Domain '{}' is not acceptable: {}\n\
                     💡 Check spelling, label lengths and hyphen placement",
                    domain, message
                )
            }
            Self::UnsupportedMode { message } => {
                format!(
                    "❌ Unsupported mode: {}\n💡 Construct the validator with ascii_only = false",
                    message
                )
            }
            Self::Encoding { label, message } => {
                format!("❌ Could not convert label '{}': {}", label, message)
            }
            Self::DnsTransport { name, record_type, message } => {
                format!(
                    "❌ DNS {} lookup for '{}' failed: {}\n\
                     💡 Check your resolver and network, then retry",
                    record_type, name, message
                )
            }
            Self::InvalidArgument { message } => {
                format!(
                    "❌ Invalid argument: {}\n💡 TXT record content is limited to 255 characters",
                    message
                )
            }
            Self::Config { message } => {
                format!(
                    "❌ Configuration problem: {}\n💡 Check your .env file or environment variables",
                    message
                )
            }
            Self::Internal { message } => {
                format!("❌ Internal error: {}\n💡 This is a bug, please report it", message)
            }
        }
    }
}

impl From<regex::Error> for DomainProofError {
    fn from(err: regex::Error) -> Self {
        Self::internal(format!("Failed to compile label pattern: {}", err))
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, DomainProofError>;



/// Helper macros for common error patterns
#[macro_export]
macro_rules! invalid_input {
    ($msg:expr) => {
        $crate::error::DomainProofError::invalid_input($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::DomainProofError::invalid_input(format!($fmt, $($arg)*))
    };
}

#[macro_export]
macro_rules! invalid_argument {
    ($msg:expr) => {
        $crate::error::DomainProofError::invalid_argument($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::DomainProofError::invalid_argument(format!($fmt, $($arg)*))
    };
}

#[macro_export]
macro_rules! config_error {
    ($msg:expr) => {
        $crate::error::DomainProofError::config($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::DomainProofError::config(format!($fmt, $($arg)*))
    };
}
