// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Database layer for the Folio library server.
//!
//! Two tables: `authors` and `books`. Every book references exactly one author
//! and is removed with that author (`ON DELETE CASCADE`). Deleting a book goes
//! the other way too: an author left without books is removed in the same
//! transaction.
//!
//! # Repository pattern
//!
//! Each table has a `*Repository` struct owning a [`SqlitePool`] and a matching
//! `*Store` trait. Handlers hold `Arc<dyn *Store>` so tests can substitute
//! their own implementations.
//!
//! ```ignore
//! let pool = create_pool("sqlite:./data/library.sqlite").await?;
//! run_migrations(&pool).await?;
//!
//! let authors = AuthorRepository::new(pool.clone());
//! let books = BookRepository::new(pool);
//! ```
//!
//! [`SqlitePool`]: sqlx::sqlite::SqlitePool

pub mod author;
pub mod book;
pub mod error;
pub mod pool;
pub mod testing;
pub mod types;

pub use author::{AuthorRepository, AuthorStore};
pub use book::{BookRepository, BookStore};
pub use error::{DbError, Result};
pub use pool::{create_pool, ping, run_migrations};
pub use types::{
	escape_like, Author, AuthorId, AuthorSummary, Book, BookDeletion, BookId, BookQuery, BookSort,
	BookWithAuthor, NewAuthor, NewBook,
};
