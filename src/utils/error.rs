use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("{source_name} responded with HTTP status {status}")]
    UpstreamStatusError { source_name: String, status: u16 },

    #[error("Could not decode {source_name} response: {message}")]
    DecodeError {
        source_name: String,
        message: String,
    },

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl CatalogError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CatalogError::ApiError(_)
            | CatalogError::UpstreamStatusError { .. }
            | CatalogError::DecodeError { .. } => ErrorSeverity::Medium,
            CatalogError::CsvError(_)
            | CatalogError::SerializationError(_)
            | CatalogError::ZipError(_) => ErrorSeverity::High,
            CatalogError::ConfigValidationError { .. }
            | CatalogError::InvalidConfigValueError { .. }
            | CatalogError::MissingConfigError { .. } => ErrorSeverity::High,
            CatalogError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CatalogError::ApiError(_) | CatalogError::UpstreamStatusError { .. } => {
                "A catalog service could not be reached".to_string()
            }
            CatalogError::DecodeError { source_name, .. } => {
                format!("{} returned data in an unexpected format", source_name)
            }
            CatalogError::IoError(e) => format!("Could not read or write output files: {}", e),
            CatalogError::ConfigValidationError { field, .. }
            | CatalogError::InvalidConfigValueError { field, .. }
            | CatalogError::MissingConfigError { field } => {
                format!("The configuration value '{}' is not usable", field)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CatalogError::ApiError(_) | CatalogError::UpstreamStatusError { .. } => {
                "Check your network connection and the source endpoints, then try again"
            }
            CatalogError::DecodeError { .. } => {
                "Verify the endpoint points at a supported catalog API"
            }
            CatalogError::IoError(_) => "Make sure the output path exists and is writable",
            CatalogError::ConfigValidationError { .. }
            | CatalogError::InvalidConfigValueError { .. }
            | CatalogError::MissingConfigError { .. } => {
                "Fix the configuration value and run again (see --help)"
            }
            _ => "Re-run with --verbose for more details",
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
