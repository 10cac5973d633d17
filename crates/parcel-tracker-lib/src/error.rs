use thiserror::Error;

/// Convenient result alias for the parcel tracker library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a public carrier identifier is not one of the supported values.
    #[error("unknown carrier: {name}{}", format_suggestions(.suggestions))]
    UnknownCarrier {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when a lookup is attempted without an order identifier.
    #[error("order id must not be empty")]
    EmptyOrderId,

    /// Failure reported by a tracker backend. The message is surfaced verbatim.
    #[error("{message}")]
    Tracker { message: String },

    /// Raised when the tracking gateway answers with an unexpected status code.
    #[error("tracking gateway returned HTTP {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    /// Raised when the tracking gateway has not been configured.
    #[error("no tracker configured; set {hint}")]
    TrackerNotConfigured { hint: String },

    /// Wrapper for HTTP client errors.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Wrapper for JSON decoding errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Build a tracker failure from any displayable message.
    pub fn tracker(message: impl Into<String>) -> Self {
        Error::Tracker {
            message: message.into(),
        }
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracker_error_displays_message_verbatim() {
        let err = Error::tracker("connection timeout");
        assert_eq!(err.to_string(), "connection timeout");
    }

    #[test]
    fn unknown_carrier_lists_single_suggestion() {
        let err = Error::UnknownCarrier {
            name: "seven".to_string(),
            suggestions: vec!["seven_eleven".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "unknown carrier: seven. Did you mean 'seven_eleven'?"
        );
    }

    #[test]
    fn unknown_carrier_without_suggestions_is_plain() {
        let err = Error::UnknownCarrier {
            name: "dhl".to_string(),
            suggestions: vec![],
        };
        assert_eq!(err.to_string(), "unknown carrier: dhl");
    }

    #[test]
    fn upstream_status_includes_code() {
        let err = Error::UpstreamStatus {
            status: 503,
            body: "captcha failed".to_string(),
        };
        assert!(err.to_string().contains("503"));
        assert!(err.to_string().contains("captcha failed"));
    }
}
