//! Error types for expense-client

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    /// The request never produced a response
    #[error("Request failed: {message}")]
    Transport { message: String },

    /// The service answered with a non-success status
    #[error("Server responded with {status}")]
    Server { status: u16, message: Option<String> },

    /// A success response whose body could not be decoded
    #[error("Unexpected response body: {message}")]
    Decode { message: String },
}

impl ClientError {
    /// The server's own message when there is one, otherwise `fallback`
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Server { message: Some(message), .. } if !message.is_empty() => {
                message.clone()
            }
            _ => fallback.to_string(),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            ClientError::Decode { message: error.to_string() }
        } else {
            ClientError::Transport { message: error.to_string() }
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
