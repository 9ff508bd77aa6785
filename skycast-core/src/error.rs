use thiserror::Error;

/// Errors produced by weather lookups.
///
/// `NoResults` comes from the geocoder, `LocationNotFound` from the
/// city lookup built on top of it. Both describe a well-formed "nothing matched"
/// outcome rather than a fault.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Input rejected locally, before any request was sent.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Transport failure: DNS, connection refused, timeout, interrupted body.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success status, or a body the provider marks as an error.
    #[error("Provider error (status {status}): {message}")]
    Provider { status: u16, message: String },

    /// Success status but the payload is missing fields or has the wrong shape.
    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    #[error("No locations matched '{query}'")]
    NoResults { query: String },

    #[error("Location '{query}' not found")]
    LocationNotFound { query: String },
}

impl WeatherError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }

    /// True for the "nothing matched" outcomes.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NoResults { .. } | Self::LocationNotFound { .. })
    }

    /// Short guidance text suitable for showing to an end user.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => {
                "The request was not valid. Check the city name or coordinates."
            }
            Self::Network(e) if e.is_timeout() => "The request timed out. Please try again.",
            Self::Network(_) => {
                "Unable to reach the weather service. Check your internet connection."
            }
            Self::Provider { status, .. } if *status >= 500 => {
                "The weather service is having issues. Please try again later."
            }
            Self::Provider { .. } => "The weather service rejected the request.",
            Self::MalformedResponse(_) => {
                "Received an unexpected response from the weather service. Please try again."
            }
            Self::NoResults { .. } | Self::LocationNotFound { .. } => {
                "City not found. Please try another search."
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, WeatherError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_kinds_are_distinguishable() {
        let no_results = WeatherError::NoResults { query: "Atlantis".into() };
        let not_found = WeatherError::LocationNotFound { query: "Atlantis".into() };
        let provider = WeatherError::Provider { status: 502, message: "bad gateway".into() };

        assert!(no_results.is_not_found());
        assert!(not_found.is_not_found());
        assert!(!provider.is_not_found());
        assert!(!WeatherError::malformed("missing hourly").is_not_found());
    }

    #[test]
    fn user_messages_differ_between_not_found_and_faults() {
        let not_found = WeatherError::LocationNotFound { query: "Atlantis".into() };
        let server = WeatherError::Provider { status: 503, message: String::new() };
        let client = WeatherError::Provider { status: 400, message: String::new() };

        assert!(not_found.user_message().contains("not found"));
        assert_ne!(not_found.user_message(), server.user_message());
        assert_ne!(server.user_message(), client.user_message());
    }

    #[test]
    fn display_includes_query() {
        let err = WeatherError::LocationNotFound { query: "Nowhere".into() };
        assert_eq!(err.to_string(), "Location 'Nowhere' not found");
    }
}
