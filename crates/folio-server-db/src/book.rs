// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Book repository: listing with search and sort, and the orphan-author
//! cleanup on delete.

use async_trait::async_trait;
use sqlx::sqlite::SqlitePool;

use crate::error::DbError;
use crate::types::{Book, BookDeletion, BookId, BookQuery, BookWithAuthor, NewBook};

const BOOK_WITH_AUTHOR_COLUMNS: &str = r#"
	b.id, b.isbn, b.title, b.publication_year, b.rating, b.author_id,
	a.name AS author_name,
	a.birth_date AS author_birth_date,
	a.date_of_death AS author_date_of_death
"#;

#[derive(Clone)]
pub struct BookRepository {
	pool: SqlitePool,
}

impl BookRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	#[tracing::instrument(skip(self, book), fields(isbn = %book.isbn, author_id = %book.author_id))]
	pub async fn create_book(&self, book: &NewBook) -> Result<BookId, DbError> {
		let result = sqlx::query(
			r#"
			INSERT INTO books (isbn, title, publication_year, rating, author_id)
			VALUES (?1, ?2, ?3, ?4, ?5)
			"#,
		)
		.bind(&book.isbn)
		.bind(&book.title)
		.bind(book.publication_year)
		.bind(book.rating)
		.bind(book.author_id)
		.execute(&self.pool)
		.await
		.map_err(|e| {
			DbError::from_insert(
				e,
				|| format!("A book with ISBN {} already exists.", book.isbn),
				|| format!("Author {} does not exist.", book.author_id),
			)
		})?;

		let id = BookId(result.last_insert_rowid());
		tracing::info!(book_id = %id, "book created");
		Ok(id)
	}

	#[tracing::instrument(skip(self))]
	pub async fn get_book(&self, id: BookId) -> Result<Option<BookWithAuthor>, DbError> {
		let sql = format!(
			"SELECT {BOOK_WITH_AUTHOR_COLUMNS} FROM books b JOIN authors a ON a.id = b.author_id WHERE b.id = ?1"
		);
		let book = sqlx::query_as(&sql)
			.bind(id)
			.fetch_optional(&self.pool)
			.await?;
		Ok(book)
	}

	#[tracing::instrument(skip(self))]
	pub async fn get_book_by_isbn(&self, isbn: &str) -> Result<Option<Book>, DbError> {
		let book = sqlx::query_as(
			"SELECT id, isbn, title, publication_year, rating, author_id FROM books WHERE isbn = ?1",
		)
		.bind(isbn)
		.fetch_optional(&self.pool)
		.await?;
		Ok(book)
	}

	/// List books joined with their authors.
	///
	/// The title filter is a case-insensitive substring match; SQLite's `LIKE`
	/// folds ASCII letters only.
	#[tracing::instrument(skip(self), fields(search = ?query.search, sort = ?query.sort))]
	pub async fn list_books(&self, query: &BookQuery) -> Result<Vec<BookWithAuthor>, DbError> {
		let sql = format!(
			r#"
			SELECT {BOOK_WITH_AUTHOR_COLUMNS}
			FROM books b
			JOIN authors a ON a.id = b.author_id
			WHERE ?1 IS NULL OR b.title LIKE '%' || ?1 || '%' ESCAPE '\'
			ORDER BY {}
			"#,
			query.sort.order_by()
		);

		let books: Vec<BookWithAuthor> = sqlx::query_as(&sql)
			.bind(query.search_term())
			.fetch_all(&self.pool)
			.await?;

		tracing::debug!(count = books.len(), "books listed");
		Ok(books)
	}

	/// Delete a book and, in the same transaction, its author if the author
	/// has no books left. Returns `None` when the book does not exist.
	#[tracing::instrument(skip(self))]
	pub async fn delete_book(&self, id: BookId) -> Result<Option<BookDeletion>, DbError> {
		let mut tx = self.pool.begin().await?;

		let book: Option<Book> = sqlx::query_as(
			"SELECT id, isbn, title, publication_year, rating, author_id FROM books WHERE id = ?1",
		)
		.bind(id)
		.fetch_optional(&mut *tx)
		.await?;

		let Some(book) = book else {
			return Ok(None);
		};

		sqlx::query("DELETE FROM books WHERE id = ?1")
			.bind(id)
			.execute(&mut *tx)
			.await?;

		let author_removed = sqlx::query(
			r#"
			DELETE FROM authors
			WHERE id = ?1 AND NOT EXISTS (SELECT 1 FROM books WHERE author_id = ?1)
			"#,
		)
		.bind(book.author_id)
		.execute(&mut *tx)
		.await?
		.rows_affected()
			> 0;

		tx.commit().await?;

		tracing::info!(
			book_id = %id,
			author_id = %book.author_id,
			author_removed,
			"book deleted"
		);
		Ok(Some(BookDeletion {
			book,
			author_removed,
		}))
	}

	#[tracing::instrument(skip(self))]
	pub async fn count_books(&self) -> Result<i64, DbError> {
		let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM books")
			.fetch_one(&self.pool)
			.await?;
		Ok(count)
	}
}

#[async_trait]
pub trait BookStore: Send + Sync {
	async fn create_book(&self, book: &NewBook) -> Result<BookId, DbError>;
	async fn get_book(&self, id: BookId) -> Result<Option<BookWithAuthor>, DbError>;
	async fn get_book_by_isbn(&self, isbn: &str) -> Result<Option<Book>, DbError>;
	async fn list_books(&self, query: &BookQuery) -> Result<Vec<BookWithAuthor>, DbError>;
	async fn delete_book(&self, id: BookId) -> Result<Option<BookDeletion>, DbError>;
	async fn count_books(&self) -> Result<i64, DbError>;
}

#[async_trait]
impl BookStore for BookRepository {
	async fn create_book(&self, book: &NewBook) -> Result<BookId, DbError> {
		self.create_book(book).await
	}

	async fn get_book(&self, id: BookId) -> Result<Option<BookWithAuthor>, DbError> {
		self.get_book(id).await
	}

	async fn get_book_by_isbn(&self, isbn: &str) -> Result<Option<Book>, DbError> {
		self.get_book_by_isbn(isbn).await
	}

	async fn list_books(&self, query: &BookQuery) -> Result<Vec<BookWithAuthor>, DbError> {
		self.list_books(query).await
	}

	async fn delete_book(&self, id: BookId) -> Result<Option<BookDeletion>, DbError> {
		self.delete_book(id).await
	}

	async fn count_books(&self) -> Result<i64, DbError> {
		self.count_books().await
	}
}
