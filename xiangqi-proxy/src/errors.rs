use std::{error::Error, fmt};

use hyper::http::uri::InvalidUri;
use xiangqi::suggestion::SuggestionError;

/// Error when configuring or starting the proxy.
#[derive(Debug)]
pub enum ProxyError {
    /// Route prefix does not start with `/`.
    InvalidPrefix { prefix: String },
    /// Target is not a valid URL.
    InvalidTarget { target: String, error: InvalidUri },
    /// Target is not an absolute `http` URL.
    UnsupportedTarget { target: String },
    /// Could not bind the listening socket.
    Bind(warp::Error),
}

impl fmt::Display for ProxyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProxyError::InvalidPrefix { prefix } => {
                write!(f, "route prefix must start with '/': {prefix:?}")
            }
            ProxyError::InvalidTarget { target, error } => {
                write!(f, "invalid proxy target {target:?}: {error}")
            }
            ProxyError::UnsupportedTarget { target } => {
                write!(f, "proxy target must be an absolute http url: {target:?}")
            }
            ProxyError::Bind(error) => write!(f, "failed to bind proxy: {error}"),
        }
    }
}

impl Error for ProxyError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ProxyError::InvalidTarget { error, .. } => Some(error),
            ProxyError::Bind(error) => Some(error),
            _ => None,
        }
    }
}

/// Error when forwarding a single request to the backend.
#[derive(Debug)]
pub enum ForwardError {
    /// The rewritten upstream request could not be built.
    Request(hyper::http::Error),
    /// The backend could not be reached or broke the connection.
    Backend(hyper::Error),
    /// The backend did not answer in time.
    Timeout,
}

impl fmt::Display for ForwardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForwardError::Request(error) => write!(f, "invalid upstream request: {error}"),
            ForwardError::Backend(error) => write!(f, "backend unavailable: {error}"),
            ForwardError::Timeout => f.write_str("backend timed out"),
        }
    }
}

impl Error for ForwardError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ForwardError::Request(error) => Some(error),
            ForwardError::Backend(error) => Some(error),
            ForwardError::Timeout => None,
        }
    }
}

/// Error of a [`SuggestionClient`](crate::SuggestionClient) call.
#[derive(Debug)]
pub enum ClientError {
    /// The request could not be sent or the response could not be read.
    Transport(hyper::Error),
    /// The backend answered with a non-success HTTP status.
    Status(hyper::StatusCode),
    /// The response body is not a suggestion response.
    Decode(serde_json::Error),
    /// The backend reported a failure in the response body.
    Protocol(SuggestionError),
    /// The request URL could not be built from the base URL.
    Url(InvalidUri),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Transport(error) => write!(f, "request failed: {error}"),
            ClientError::Status(status) => write!(f, "unexpected http status {status}"),
            ClientError::Decode(error) => write!(f, "invalid suggestion response: {error}"),
            ClientError::Protocol(error) => error.fmt(f),
            ClientError::Url(error) => write!(f, "invalid request url: {error}"),
        }
    }
}

impl Error for ClientError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ClientError::Transport(error) => Some(error),
            ClientError::Status(_) => None,
            ClientError::Decode(error) => Some(error),
            ClientError::Protocol(error) => Some(error),
            ClientError::Url(error) => Some(error),
        }
    }
}

impl From<hyper::Error> for ClientError {
    fn from(error: hyper::Error) -> ClientError {
        ClientError::Transport(error)
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(error: serde_json::Error) -> ClientError {
        ClientError::Decode(error)
    }
}

impl From<SuggestionError> for ClientError {
    fn from(error: SuggestionError) -> ClientError {
        ClientError::Protocol(error)
    }
}

impl From<InvalidUri> for ClientError {
    fn from(error: InvalidUri) -> ClientError {
        ClientError::Url(error)
    }
}
