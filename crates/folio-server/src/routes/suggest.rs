// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! AI book suggestion page.

use axum::{
	extract::State,
	http::StatusCode,
	response::{Html, IntoResponse, Response},
};
use folio_server_db::{BookQuery, BookSort};
use folio_server_llm_openai::LlmError;

use crate::{
	api::AppState,
	error::ServerError,
	pages::{self, SuggestView},
};

/// What the reader sees when the upstream call fails. The upstream message
/// itself only goes to the log.
fn failure_reason(err: &LlmError) -> &'static str {
	match err {
		LlmError::Timeout => "The suggestion service took too long to answer.",
		LlmError::RateLimited(_) => "The suggestion service is busy.",
		LlmError::InvalidResponse(_) => "The suggestion service sent an unreadable answer.",
		LlmError::Connect(_) | LlmError::Http(_) => "The suggestion service could not be reached.",
		LlmError::Api { .. } => "The suggestion service returned an error.",
	}
}

/// GET /suggest
#[tracing::instrument(skip(state))]
pub async fn suggest(State(state): State<AppState>) -> Result<Response, ServerError> {
	let Some(recommender) = state.recommender.clone() else {
		return Ok(Html(pages::suggest_page(&SuggestView::NotConfigured)).into_response());
	};

	let books = state
		.books
		.list_books(&BookQuery {
			search: None,
			sort: BookSort::Title,
		})
		.await?;

	if books.is_empty() {
		return Ok(Html(pages::suggest_page(&SuggestView::EmptyLibrary)).into_response());
	}

	match recommender.recommend(&books).await {
		Ok(suggestion) => Ok(Html(pages::suggest_page(&SuggestView::Ready(&suggestion))).into_response()),
		Err(e) => {
			tracing::warn!(error = %e, "suggestion request failed");
			Ok((
				StatusCode::BAD_GATEWAY,
				Html(pages::suggest_page(&SuggestView::Failed(failure_reason(&e)))),
			)
				.into_response())
		}
	}
}
