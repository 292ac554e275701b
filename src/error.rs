use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::env;
use std::fmt::{self, Debug, Display};

#[derive(Debug)]
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

impl From<env::VarError> for Error {
    fn from(err: env::VarError) -> Self {
        env_var_error(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        transport_error(err)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_message) = match self.code {
            3 | 4 | 6 => (StatusCode::BAD_GATEWAY, self.message.as_str()),
            1..=99 => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
            104 => (StatusCode::NOT_FOUND, self.message.as_str()),
            _ => (StatusCode::BAD_REQUEST, self.message.as_str()),
        };

        let body = Json(json!({
            "code": self.code,
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub fn invalid_input_error<T: Display>(detail: T) -> Error {
    Error {
        code: 101,
        message: format!("invalid input: {}", detail),
    }
}

pub fn no_route_found_error() -> Error {
    Error {
        code: 102,
        message: "no route found".into(),
    }
}

pub fn no_bus_available_error() -> Error {
    Error {
        code: 103,
        message: "no bus available".into(),
    }
}

pub fn not_found_error<T: Display>(what: T) -> Error {
    Error {
        code: 104,
        message: format!("{} not found", what),
    }
}

pub fn env_var_error(err: env::VarError) -> Error {
    Error {
        code: 1,
        message: format!("environment variable error: {}", err),
    }
}

pub fn config_error<T: Display>(key: &str, detail: T) -> Error {
    Error {
        code: 2,
        message: format!("invalid value for {}: {}", key, detail),
    }
}

pub fn transport_error(err: reqwest::Error) -> Error {
    Error {
        code: 3,
        message: format!("routing service unreachable: {}", err),
    }
}

pub fn upstream_error<T: Display>(status: T) -> Error {
    Error {
        code: 4,
        message: format!("routing service request failed: {}", status),
    }
}

pub fn unexpected_error<T: Debug>(err: T) -> Error {
    Error {
        code: 5,
        message: format!("unexpected error: {:?}", err),
    }
}

pub fn decode_error<T: Display>(detail: T) -> Error {
    Error {
        code: 6,
        message: format!("decode error: {}", detail),
    }
}

#[test]
fn caller_errors_keep_their_message() {
    let err = invalid_input_error("\"abc,def\"");

    assert_eq!(err.code, 101);
    assert_eq!(err.message, "invalid input: \"abc,def\"");
}

#[test]
fn upstream_error_names_the_status() {
    let err = upstream_error(StatusCode::SERVICE_UNAVAILABLE);

    assert_eq!(err.code, 4);
    assert!(err.message.contains("503"));
}

#[test]
fn internal_errors_render_as_server_errors() {
    let response = env_var_error(env::VarError::NotPresent).into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let response = decode_error("bad polyline").into_response();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let response = not_found_error("bus S9").into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = no_bus_available_error().into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
