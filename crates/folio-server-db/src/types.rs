// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Row and input types for authors and books.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

macro_rules! row_id {
	($name:ident) => {
		#[derive(
			Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type,
		)]
		#[serde(transparent)]
		#[sqlx(transparent)]
		pub struct $name(pub i64);

		impl std::fmt::Display for $name {
			fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
				write!(f, "{}", self.0)
			}
		}

		impl From<i64> for $name {
			fn from(id: i64) -> Self {
				Self(id)
			}
		}
	};
}

row_id!(AuthorId);
row_id!(BookId);

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Author {
	pub id: AuthorId,
	pub name: String,
	/// `YYYY-MM-DD`
	pub birth_date: Option<String>,
	/// `YYYY-MM-DD`
	pub date_of_death: Option<String>,
}

/// An author together with how many books reference them.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct AuthorSummary {
	pub id: AuthorId,
	pub name: String,
	pub birth_date: Option<String>,
	pub date_of_death: Option<String>,
	pub book_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Book {
	pub id: BookId,
	pub isbn: String,
	pub title: String,
	pub publication_year: Option<i64>,
	/// 1..=10
	pub rating: Option<i64>,
	pub author_id: AuthorId,
}

/// A book row joined with its author.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct BookWithAuthor {
	pub id: BookId,
	pub isbn: String,
	pub title: String,
	pub publication_year: Option<i64>,
	pub rating: Option<i64>,
	pub author_id: AuthorId,
	pub author_name: String,
	pub author_birth_date: Option<String>,
	pub author_date_of_death: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuthor {
	pub name: String,
	pub birth_date: Option<String>,
	pub date_of_death: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
	pub isbn: String,
	pub title: String,
	pub publication_year: Option<i64>,
	pub rating: Option<i64>,
	pub author_id: AuthorId,
}

/// Ordering for the book list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookSort {
	/// Insertion order.
	#[default]
	Id,
	Title,
	Author,
}

impl BookSort {
	/// Parse the `sort` query parameter. Unknown values fall back to insertion
	/// order rather than failing the page.
	pub fn from_param(param: Option<&str>) -> Self {
		match param.map(str::trim) {
			Some(s) if s.eq_ignore_ascii_case("title") => BookSort::Title,
			Some(s) if s.eq_ignore_ascii_case("author") => BookSort::Author,
			_ => BookSort::Id,
		}
	}

	pub fn as_param(&self) -> Option<&'static str> {
		match self {
			BookSort::Id => None,
			BookSort::Title => Some("title"),
			BookSort::Author => Some("author"),
		}
	}

	pub(crate) fn order_by(&self) -> &'static str {
		match self {
			BookSort::Id => "b.id",
			BookSort::Title => "b.title COLLATE NOCASE, b.id",
			BookSort::Author => "a.name COLLATE NOCASE, b.title COLLATE NOCASE, b.id",
		}
	}
}

/// Filter and ordering for [`crate::BookStore::list_books`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookQuery {
	/// Case-insensitive substring of the title. Blank means no filter.
	pub search: Option<String>,
	pub sort: BookSort,
}

impl BookQuery {
	pub(crate) fn search_term(&self) -> Option<String> {
		self.search
			.as_deref()
			.map(str::trim)
			.filter(|s| !s.is_empty())
			.map(escape_like)
	}
}

/// Outcome of deleting a book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDeletion {
	pub book: Book,
	/// The author had no other books and was removed as well.
	pub author_removed: bool,
}

/// Escape `%`, `_` and the escape character itself for `LIKE ... ESCAPE '\'`.
pub fn escape_like(input: &str) -> String {
	let mut out = String::with_capacity(input.len());
	for c in input.chars() {
		if matches!(c, '\\' | '%' | '_') {
			out.push('\\');
		}
		out.push(c);
	}
	out
}
