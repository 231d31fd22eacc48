// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Library home page: list, search and sort books.

use axum::{
	extract::{Query, State},
	response::Html,
};
use folio_server_db::{BookQuery, BookSort};
use serde::Deserialize;

use crate::{
	api::AppState,
	error::ServerError,
	pages::{self, HomeView},
};

#[derive(Debug, Default, Deserialize)]
pub struct HomeQuery {
	pub search: Option<String>,
	pub sort: Option<String>,
	pub message: Option<String>,
}

/// GET / - list books, optionally filtered by title and sorted.
#[tracing::instrument(skip(state))]
pub async fn home(
	State(state): State<AppState>,
	Query(query): Query<HomeQuery>,
) -> Result<Html<String>, ServerError> {
	let sort = BookSort::from_param(query.sort.as_deref());
	let search = query
		.search
		.as_deref()
		.map(str::trim)
		.filter(|s| !s.is_empty());

	let books = state
		.books
		.list_books(&BookQuery {
			search: search.map(str::to_string),
			sort,
		})
		.await?;

	let message = match search {
		Some(search) if books.is_empty() => Some(format!("No books found matching '{search}'.")),
		_ => query.message,
	};

	Ok(Html(pages::home_page(&HomeView {
		books: &books,
		search,
		sort,
		message: message.as_deref(),
	})))
}
