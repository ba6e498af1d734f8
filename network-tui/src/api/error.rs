use thiserror::Error;

/// Failures at the HTTP seam
#[derive(Error, Debug)]
pub enum ApiError {
    /// No response: DNS, connect, TLS or timeout
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A success response whose body is not the promised payload
    #[error("Malformed payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// Non-success status. `message` is the server's `{error}` text when it sent one.
    #[error("HTTP {code}: {message}")]
    Status { code: u16, message: String },
}

impl ApiError {
    pub fn status(code: u16, message: impl Into<String>) -> Self {
        ApiError::Status {
            code,
            message: message.into(),
        }
    }

    pub fn code(&self) -> Option<u16> {
        match self {
            ApiError::Status { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub fn is_server_error(&self) -> bool {
        self.code().is_some_and(|code| code >= 500)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_keeps_code_apart_from_message() {
        let error = ApiError::status(400, "Post must be under 500 characters");
        assert_eq!(error.code(), Some(400));
        assert!(!error.is_server_error());
        assert_eq!(error.to_string(), "HTTP 400: Post must be under 500 characters");

        assert!(ApiError::status(503, "db down").is_server_error());
    }
}
