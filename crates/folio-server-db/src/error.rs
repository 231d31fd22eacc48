// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

#[derive(Debug, thiserror::Error)]
pub enum DbError {
	#[error("Database error: {0}")]
	Sqlx(#[from] sqlx::Error),

	#[error("Not found: {0}")]
	NotFound(String),

	#[error("Conflict: {0}")]
	Conflict(String),

	#[error("Internal: {0}")]
	Internal(String),
}

pub type Result<T> = std::result::Result<T, DbError>;

impl DbError {
	/// Classify a failed INSERT: unique violations become `Conflict`, foreign
	/// key violations become `NotFound`, anything else stays `Sqlx`.
	pub(crate) fn from_insert(
		err: sqlx::Error,
		conflict: impl FnOnce() -> String,
		missing: impl FnOnce() -> String,
	) -> Self {
		if let sqlx::Error::Database(db_err) = &err {
			if db_err.is_unique_violation() {
				return DbError::Conflict(conflict());
			}
			if db_err.is_foreign_key_violation() {
				return DbError::NotFound(missing());
			}
		}
		DbError::Sqlx(err)
	}
}
