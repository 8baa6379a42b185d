use std::fmt;

// === FetchError ===

/// Failure of a single provider data request.
///
/// The `Display` output is the human-readable text shown in the container
/// that would otherwise have held the results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The request never completed (connection refused, timeout, DNS, ...).
    Transport(String),
    /// The backend answered with a non-success status.
    Server { status: u16, message: String },
    /// The success body could not be decoded into the expected records.
    Parse(String),
}

impl FetchError {
    /// HTTP status of a server failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Transport(msg) => write!(f, "{}", msg),
            FetchError::Server { message, .. } => write!(f, "{}", message),
            FetchError::Parse(msg) => write!(f, "Failed to parse response: {}", msg),
        }
    }
}

impl std::error::Error for FetchError {}

// === FormError ===

/// Errors raised while turning user input into a repository identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// One or more required fields were left blank; carries the prompt to show.
    MissingFields(String),
    /// The provider selector did not name a known provider.
    UnknownProvider(String),
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::MissingFields(prompt) => write!(f, "{}", prompt),
            FormError::UnknownProvider(name) => write!(f, "Unknown provider: {}", name),
        }
    }
}

impl std::error::Error for FormError {}

// === RouterError ===

/// Errors related to section navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    /// No section with the given identifier exists.
    UnknownSection(String),
    /// The router was configured without any section.
    NoSections,
}

impl fmt::Display for RouterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouterError::UnknownSection(id) => write!(f, "Unknown section: {}", id),
            RouterError::NoSections => write!(f, "No sections configured"),
        }
    }
}

impl std::error::Error for RouterError {}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    IoError(String),
    /// Failed to serialize or deserialize settings.
    SerializationError(String),
    /// The provided settings key is invalid.
    InvalidKey(String),
    /// The provided settings value is invalid.
    InvalidValue(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            SettingsError::InvalidKey(key) => write!(f, "Invalid settings key: {}", key),
            SettingsError::InvalidValue(msg) => {
                write!(f, "Invalid settings value: {}", msg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}
