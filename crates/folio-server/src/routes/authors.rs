// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Author pages: add, list, delete.

use axum::{
	extract::{rejection::PathRejection, Path, Query, State},
	http::StatusCode,
	response::{Html, IntoResponse, Redirect, Response},
	Form,
};
use folio_server_db::{AuthorId, DbError};
use serde::Deserialize;

use crate::{api::AppState, error::ServerError, pages, validation::AuthorForm};

use super::redirect_home;

pub const AUTHOR_ADDED: &str = "Author added successfully!";
pub const AUTHOR_DELETED: &str = "Author and all their books deleted successfully!";

fn duplicate_message(name: &str) -> String {
	format!("Author '{name}' already exists.")
}

/// GET /add_author
pub async fn add_author_form() -> Html<String> {
	Html(pages::add_author_page(&AuthorForm::default(), None))
}

/// POST /add_author
#[tracing::instrument(skip(state, form), fields(name = %form.name.trim()))]
pub async fn add_author(
	State(state): State<AppState>,
	Form(form): Form<AuthorForm>,
) -> Result<Response, ServerError> {
	let rerender = |status: StatusCode, message: &str| {
		(status, Html(pages::add_author_page(&form, Some(message)))).into_response()
	};

	let author = match form.validate() {
		Ok(author) => author,
		Err(e) => {
			tracing::debug!(error = %e, "author form rejected");
			return Ok(rerender(StatusCode::BAD_REQUEST, &e.to_string()));
		}
	};

	if state.authors.get_author_by_name(&author.name).await?.is_some() {
		return Ok(rerender(StatusCode::CONFLICT, &duplicate_message(&author.name)));
	}

	match state.authors.create_author(&author).await {
		Ok(id) => {
			tracing::info!(author_id = %id, "author added");
			Ok(Html(pages::add_author_page(&AuthorForm::default(), Some(AUTHOR_ADDED))).into_response())
		}
		// Lost a race with a concurrent insert of the same name.
		Err(DbError::Conflict(message)) => Ok(rerender(StatusCode::CONFLICT, &message)),
		Err(e) => Err(e.into()),
	}
}

#[derive(Debug, Default, Deserialize)]
pub struct AuthorsQuery {
	pub message: Option<String>,
}

/// GET /authors - every author with their book count.
pub async fn list_authors(
	State(state): State<AppState>,
	Query(query): Query<AuthorsQuery>,
) -> Result<Html<String>, ServerError> {
	let authors = state.authors.list_authors_with_counts().await?;
	Ok(Html(pages::authors_page(&authors, query.message.as_deref())))
}

/// POST /author/{id}/delete - remove the author and, by cascade, their books.
#[tracing::instrument(skip(state))]
pub async fn delete_author(
	State(state): State<AppState>,
	path: Result<Path<AuthorId>, PathRejection>,
) -> Result<Redirect, ServerError> {
	let Path(id) = path?;
	if !state.authors.delete_author(id).await? {
		return Err(ServerError::NotFound(format!("Author {id} not found.")));
	}
	Ok(redirect_home(AUTHOR_DELETED))
}
