use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::fmt::{self, Debug, Display};

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

impl std::error::Error for Error {}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        reqwest_error(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        serialization_error(err)
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for Error {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        websocket_error(err)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_message) = match self.code {
            1..=99 => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
            200..=299 => (StatusCode::SERVICE_UNAVAILABLE, self.message.as_str()),
            _ => (StatusCode::BAD_REQUEST, self.message.as_str()),
        };

        let body = Json(json!({
            "code": self.code,
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub fn invalid_state_error() -> Error {
    Error {
        code: 100,
        message: "invalid state".into(),
    }
}

pub fn invalid_input_error() -> Error {
    Error {
        code: 101,
        message: "invalid input".into(),
    }
}

pub fn submission_without_selection_error() -> Error {
    Error {
        code: 102,
        message: "no route selected".into(),
    }
}

pub fn channel_disconnected_error() -> Error {
    Error {
        code: 200,
        message: "channel disconnected".into(),
    }
}

pub fn reqwest_error(err: reqwest::Error) -> Error {
    tracing::debug!("reqwest error: {:?}", err);

    Error {
        code: 3,
        message: "reqwest error".into(),
    }
}

pub fn upstream_error() -> Error {
    Error {
        code: 4,
        message: "upstream error".into(),
    }
}

pub fn unexpected_error() -> Error {
    Error {
        code: 5,
        message: "unexpected error".into(),
    }
}

pub fn directory_fetch_failed_error() -> Error {
    Error {
        code: 6,
        message: "route directory fetch failed".into(),
    }
}

pub fn geolocation_unavailable_error() -> Error {
    Error {
        code: 7,
        message: "geolocation unavailable".into(),
    }
}

pub fn websocket_error<T: Debug>(err: T) -> Error {
    tracing::debug!("websocket error: {:?}", err);

    Error {
        code: 8,
        message: "websocket error".into(),
    }
}

pub fn serialization_error<T: Debug>(err: T) -> Error {
    tracing::debug!("serialization error: {:?}", err);

    Error {
        code: 9,
        message: "serialization error".into(),
    }
}

pub fn config_error(name: &str) -> Error {
    Error {
        code: 10,
        message: format!("invalid configuration value for {}", name),
    }
}
