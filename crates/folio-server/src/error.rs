// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Server error types and HTTP response conversions.

use axum::{
	extract::rejection::PathRejection,
	http::StatusCode,
	response::{Html, IntoResponse, Response},
};
use folio_server_db::DbError;

use crate::pages;

/// Errors a handler can return. Each renders as an HTML error page.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
	/// Database operation failed.
	#[error("Database error: {0}")]
	Db(#[from] DbError),

	#[error("Not found: {0}")]
	NotFound(String),

	#[error("Invalid request: {0}")]
	BadRequest(String),

	/// Upstream recommendation service failed.
	#[error("Upstream error: {0}")]
	UpstreamError(String),

	#[error("Internal error: {0}")]
	Internal(String),
}

impl ServerError {
	pub fn status(&self) -> StatusCode {
		match self {
			ServerError::Db(DbError::NotFound(_)) | ServerError::NotFound(_) => StatusCode::NOT_FOUND,
			ServerError::Db(DbError::Conflict(_)) => StatusCode::CONFLICT,
			ServerError::Db(_) | ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
			ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
			ServerError::UpstreamError(_) => StatusCode::BAD_GATEWAY,
		}
	}

	/// Text shown to the user. Database internals stay in the log.
	fn public_message(&self) -> String {
		match self {
			ServerError::Db(DbError::NotFound(msg) | DbError::Conflict(msg)) => msg.clone(),
			ServerError::Db(_) => "A database error occurred.".to_string(),
			ServerError::Internal(_) => "An internal error occurred.".to_string(),
			ServerError::NotFound(msg) | ServerError::BadRequest(msg) | ServerError::UpstreamError(msg) => {
				msg.clone()
			}
		}
	}
}

/// A path segment that is not a row id names no page, as with an unknown id.
impl From<PathRejection> for ServerError {
	fn from(rejection: PathRejection) -> Self {
		tracing::debug!(error = %rejection.body_text(), "path rejected");
		ServerError::NotFound("Page not found.".to_string())
	}
}

impl IntoResponse for ServerError {
	fn into_response(self) -> Response {
		let status = self.status();
		match &self {
			ServerError::Db(e) if status.is_server_error() => {
				tracing::error!(error = %e, "database error");
			}
			ServerError::Internal(msg) => {
				tracing::error!(error = %msg, "internal error");
			}
			ServerError::UpstreamError(msg) => {
				tracing::warn!(error = %msg, "upstream error");
			}
			_ => {}
		}

		(
			status,
			Html(pages::error_page(status, &self.public_message())),
		)
			.into_response()
	}
}
