//! Error type shared by every Ringo crate

use axum::{Json, http::StatusCode, response::IntoResponse};

pub type RgResult<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
	NotFound,
	PermissionDenied,
	DbError,
	Parse,
	/// Form or field input failed a declared rule
	ValidationError(String),
	/// Misconfigured registry, unresolved handler or invalid setting
	ConfigError(String),
	Internal(String),

	// externals
	Io(std::io::Error),
}

impl Error {
	fn status(&self) -> StatusCode {
		match self {
			Error::NotFound => StatusCode::NOT_FOUND,
			Error::PermissionDenied => StatusCode::FORBIDDEN,
			Error::Parse | Error::ValidationError(_) => StatusCode::BAD_REQUEST,
			Error::DbError | Error::ConfigError(_) | Error::Internal(_) | Error::Io(_) => {
				StatusCode::INTERNAL_SERVER_ERROR
			}
		}
	}

	fn code(&self) -> &'static str {
		match self {
			Error::NotFound => "E-NOTFOUND",
			Error::PermissionDenied => "E-PERM",
			Error::DbError => "E-DB",
			Error::Parse => "E-PARSE",
			Error::ValidationError(_) => "E-VALIDATION",
			Error::ConfigError(_) => "E-CONFIG",
			Error::Internal(_) => "E-INTERNAL",
			Error::Io(_) => "E-IO",
		}
	}
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		tracing::warn!("JSON: {}", err);
		Self::Parse
	}
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Error::NotFound => write!(f, "not found"),
			Error::PermissionDenied => write!(f, "permission denied"),
			Error::DbError => write!(f, "database error"),
			Error::Parse => write!(f, "malformed input"),
			Error::ValidationError(msg) => write!(f, "validation failed: {}", msg),
			Error::ConfigError(msg) => write!(f, "configuration error: {}", msg),
			Error::Internal(msg) => write!(f, "internal error: {}", msg),
			Error::Io(err) => write!(f, "I/O error: {}", err),
		}
	}
}

impl std::error::Error for Error {}

#[derive(serde::Serialize)]
struct ErrorBody {
	code: &'static str,
	message: String,
}

#[derive(serde::Serialize)]
struct ErrorResponse {
	error: ErrorBody,
}

impl IntoResponse for Error {
	fn into_response(self) -> axum::response::Response {
		let status = self.status();
		if status == StatusCode::INTERNAL_SERVER_ERROR {
			tracing::error!("Request failed: {}", self);
		}
		let body = ErrorResponse { error: ErrorBody { code: self.code(), message: self.to_string() } };
		(status, Json(body)).into_response()
	}
}


// vim: ts=4
