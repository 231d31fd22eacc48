// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Author repository.

use async_trait::async_trait;
use sqlx::sqlite::SqlitePool;

use crate::error::DbError;
use crate::types::{Author, AuthorId, AuthorSummary, NewAuthor};

#[derive(Clone)]
pub struct AuthorRepository {
	pool: SqlitePool,
}

impl AuthorRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	#[tracing::instrument(skip(self, author), fields(name = %author.name))]
	pub async fn create_author(&self, author: &NewAuthor) -> Result<AuthorId, DbError> {
		let result = sqlx::query(
			r#"
			INSERT INTO authors (name, birth_date, date_of_death)
			VALUES (?1, ?2, ?3)
			"#,
		)
		.bind(&author.name)
		.bind(&author.birth_date)
		.bind(&author.date_of_death)
		.execute(&self.pool)
		.await
		.map_err(|e| {
			DbError::from_insert(
				e,
				|| format!("Author '{}' already exists.", author.name),
				|| "author".to_string(),
			)
		})?;

		let id = AuthorId(result.last_insert_rowid());
		tracing::info!(author_id = %id, "author created");
		Ok(id)
	}

	#[tracing::instrument(skip(self))]
	pub async fn get_author(&self, id: AuthorId) -> Result<Option<Author>, DbError> {
		let author = sqlx::query_as(
			"SELECT id, name, birth_date, date_of_death FROM authors WHERE id = ?1",
		)
		.bind(id)
		.fetch_optional(&self.pool)
		.await?;
		Ok(author)
	}

	#[tracing::instrument(skip(self))]
	pub async fn get_author_by_name(&self, name: &str) -> Result<Option<Author>, DbError> {
		let author = sqlx::query_as(
			"SELECT id, name, birth_date, date_of_death FROM authors WHERE name = ?1",
		)
		.bind(name)
		.fetch_optional(&self.pool)
		.await?;
		Ok(author)
	}

	#[tracing::instrument(skip(self))]
	pub async fn list_authors(&self) -> Result<Vec<Author>, DbError> {
		let authors = sqlx::query_as(
			"SELECT id, name, birth_date, date_of_death FROM authors ORDER BY name COLLATE NOCASE, id",
		)
		.fetch_all(&self.pool)
		.await?;
		Ok(authors)
	}

	#[tracing::instrument(skip(self))]
	pub async fn list_authors_with_counts(&self) -> Result<Vec<AuthorSummary>, DbError> {
		let authors = sqlx::query_as(
			r#"
			SELECT a.id, a.name, a.birth_date, a.date_of_death, COUNT(b.id) AS book_count
			FROM authors a
			LEFT JOIN books b ON b.author_id = a.id
			GROUP BY a.id
			ORDER BY a.name COLLATE NOCASE, a.id
			"#,
		)
		.fetch_all(&self.pool)
		.await?;
		Ok(authors)
	}

	/// Delete an author. Their books are removed by `ON DELETE CASCADE`.
	#[tracing::instrument(skip(self))]
	pub async fn delete_author(&self, id: AuthorId) -> Result<bool, DbError> {
		let result = sqlx::query("DELETE FROM authors WHERE id = ?1")
			.bind(id)
			.execute(&self.pool)
			.await?;

		let deleted = result.rows_affected() > 0;
		if deleted {
			tracing::info!(author_id = %id, "author and their books deleted");
		}
		Ok(deleted)
	}
}

#[async_trait]
pub trait AuthorStore: Send + Sync {
	async fn create_author(&self, author: &NewAuthor) -> Result<AuthorId, DbError>;
	async fn get_author(&self, id: AuthorId) -> Result<Option<Author>, DbError>;
	async fn get_author_by_name(&self, name: &str) -> Result<Option<Author>, DbError>;
	async fn list_authors(&self) -> Result<Vec<Author>, DbError>;
	async fn list_authors_with_counts(&self) -> Result<Vec<AuthorSummary>, DbError>;
	async fn delete_author(&self, id: AuthorId) -> Result<bool, DbError>;
}

#[async_trait]
impl AuthorStore for AuthorRepository {
	async fn create_author(&self, author: &NewAuthor) -> Result<AuthorId, DbError> {
		self.create_author(author).await
	}

	async fn get_author(&self, id: AuthorId) -> Result<Option<Author>, DbError> {
		self.get_author(id).await
	}

	async fn get_author_by_name(&self, name: &str) -> Result<Option<Author>, DbError> {
		self.get_author_by_name(name).await
	}

	async fn list_authors(&self) -> Result<Vec<Author>, DbError> {
		self.list_authors().await
	}

	async fn list_authors_with_counts(&self) -> Result<Vec<AuthorSummary>, DbError> {
		self.list_authors_with_counts().await
	}

	async fn delete_author(&self, id: AuthorId) -> Result<bool, DbError> {
		self.delete_author(id).await
	}
}
