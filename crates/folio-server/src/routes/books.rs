// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Book pages: add, detail, delete.

use axum::{
	extract::{rejection::PathRejection, Path, State},
	http::StatusCode,
	response::{Html, IntoResponse, Redirect, Response},
	Form,
};
use folio_server_db::{BookId, DbError};

use crate::{api::AppState, error::ServerError, pages, validation::BookForm};

use super::redirect_home;

pub const BOOK_ADDED: &str = "Book added successfully!";
pub const BOOK_DELETED: &str = "Book deleted successfully!";

fn duplicate_message(isbn: &str) -> String {
	format!("A book with ISBN {isbn} already exists.")
}

/// GET /add_book
pub async fn add_book_form(State(state): State<AppState>) -> Result<Html<String>, ServerError> {
	let authors = state.authors.list_authors().await?;
	Ok(Html(pages::add_book_page(&authors, &BookForm::default(), None)))
}

/// POST /add_book
#[tracing::instrument(skip(state, form), fields(isbn = %form.isbn.trim()))]
pub async fn add_book(
	State(state): State<AppState>,
	Form(form): Form<BookForm>,
) -> Result<Response, ServerError> {
	let authors = state.authors.list_authors().await?;
	let rerender = |status: StatusCode, message: &str| {
		(status, Html(pages::add_book_page(&authors, &form, Some(message)))).into_response()
	};

	let book = match form.validate() {
		Ok(book) => book,
		Err(e) => {
			tracing::debug!(error = %e, "book form rejected");
			return Ok(rerender(StatusCode::BAD_REQUEST, &e.to_string()));
		}
	};

	if state.books.get_book_by_isbn(&book.isbn).await?.is_some() {
		return Ok(rerender(StatusCode::CONFLICT, &duplicate_message(&book.isbn)));
	}

	match state.books.create_book(&book).await {
		Ok(id) => {
			tracing::info!(book_id = %id, "book added");
			Ok(Html(pages::add_book_page(&authors, &BookForm::default(), Some(BOOK_ADDED))).into_response())
		}
		Err(DbError::Conflict(message)) => Ok(rerender(StatusCode::CONFLICT, &message)),
		Err(DbError::NotFound(message)) => Ok(rerender(StatusCode::BAD_REQUEST, &message)),
		Err(e) => Err(e.into()),
	}
}

/// GET /book/{id}
pub async fn book_detail(
	State(state): State<AppState>,
	path: Result<Path<BookId>, PathRejection>,
) -> Result<Html<String>, ServerError> {
	let Path(id) = path?;
	let book = state
		.books
		.get_book(id)
		.await?
		.ok_or_else(|| ServerError::NotFound(format!("Book {id} not found.")))?;
	Ok(Html(pages::book_detail_page(&book)))
}

/// POST /book/{id}/delete - remove the book, and its author if now bookless.
#[tracing::instrument(skip(state))]
pub async fn delete_book(
	State(state): State<AppState>,
	path: Result<Path<BookId>, PathRejection>,
) -> Result<Redirect, ServerError> {
	let Path(id) = path?;
	let deletion = state
		.books
		.delete_book(id)
		.await?
		.ok_or_else(|| ServerError::NotFound(format!("Book {id} not found.")))?;

	if deletion.author_removed {
		tracing::info!(author_id = %deletion.book.author_id, "removed author with no remaining books");
	}
	Ok(redirect_home(BOOK_DELETED))
}
