// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! HTTP route handlers.

pub mod authors;
pub mod books;
pub mod health;
pub mod home;
pub mod suggest;

use axum::response::Redirect;
use folio_server_db::BookSort;

use crate::error::ServerError;
use crate::pages;

/// 303 back to the library with a flash message in the query string.
pub(crate) fn redirect_home(message: &str) -> Redirect {
	Redirect::to(&pages::home_href(None, BookSort::Id, Some(message)))
}

pub async fn not_found() -> ServerError {
	ServerError::NotFound("Page not found.".to_string())
}
