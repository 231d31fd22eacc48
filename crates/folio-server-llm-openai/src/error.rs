// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use folio_common_http::{is_retryable_status, RetryableError};
use reqwest::StatusCode;
use thiserror::Error;

/// Errors from the chat completions endpoint.
#[derive(Clone, Error, Debug, PartialEq, Eq)]
pub enum LlmError {
	#[error("HTTP error: {0}")]
	Http(String),

	#[error("Connection failed: {0}")]
	Connect(String),

	#[error("API error ({status}): {message}")]
	Api { status: u16, message: String },

	#[error("Request timed out")]
	Timeout,

	#[error("Rate limited: {0}")]
	RateLimited(String),

	#[error("Invalid response: {0}")]
	InvalidResponse(String),
}

impl LlmError {
	pub(crate) fn from_status(status: u16, message: String) -> Self {
		if status == 429 {
			LlmError::RateLimited(message)
		} else {
			LlmError::Api { status, message }
		}
	}

	pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
		if err.is_timeout() {
			LlmError::Timeout
		} else if err.is_connect() {
			LlmError::Connect(err.to_string())
		} else {
			LlmError::Http(err.to_string())
		}
	}
}

impl RetryableError for LlmError {
	fn is_retryable(&self) -> bool {
		match self {
			LlmError::Timeout | LlmError::Connect(_) | LlmError::RateLimited(_) => true,
			LlmError::Api { status, .. } => {
				StatusCode::from_u16(*status).is_ok_and(is_retryable_status)
			}
			LlmError::Http(_) | LlmError::InvalidResponse(_) => false,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn classification() {
		assert!(LlmError::from_status(429, "slow down".into()).is_retryable());
		assert!(LlmError::from_status(503, "overloaded".into()).is_retryable());
		assert!(!LlmError::from_status(401, "bad key".into()).is_retryable());
		assert!(!LlmError::InvalidResponse("no choices".into()).is_retryable());
		assert!(LlmError::Timeout.is_retryable());
	}

	#[test]
	fn api_errors_follow_shared_status_list() {
		for status in [408, 500, 502, 503, 504] {
			let err = LlmError::Api {
				status,
				message: String::new(),
			};
			assert!(err.is_retryable(), "{status} should be retried");
		}
		for status in [400, 401, 403, 404, 422] {
			let err = LlmError::Api {
				status,
				message: String::new(),
			};
			assert!(!err.is_retryable(), "{status} should not be retried");
		}
		let bogus = LlmError::Api {
			status: 1000,
			message: String::new(),
		};
		assert!(!bogus.is_retryable());
	}
}
