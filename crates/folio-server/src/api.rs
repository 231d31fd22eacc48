// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Application state and router construction.

use std::sync::Arc;
use std::time::Duration;

use axum::{
	routing::{get, post},
	Router,
};
use folio_server_config::ServerConfig;
use folio_server_db::{AuthorRepository, AuthorStore, BookRepository, BookStore};
use folio_server_llm_openai::{OpenAIClient, OpenAIConfig};
use sqlx::SqlitePool;

use crate::routes;
use crate::suggest::{OpenAiRecommender, Recommender};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
	pub pool: SqlitePool,
	pub authors: Arc<dyn AuthorStore>,
	pub books: Arc<dyn BookStore>,
	/// `None` when no API key is configured or the feature is disabled.
	pub recommender: Option<Arc<dyn Recommender>>,
}

impl AppState {
	/// State over the SQLite repositories, without a recommender.
	pub fn new(pool: SqlitePool) -> Self {
		Self {
			authors: Arc::new(AuthorRepository::new(pool.clone())),
			books: Arc::new(BookRepository::new(pool.clone())),
			pool,
			recommender: None,
		}
	}

	pub fn with_recommender(mut self, recommender: Arc<dyn Recommender>) -> Self {
		self.recommender = Some(recommender);
		self
	}
}

/// Build state from configuration. A recommender that cannot be constructed
/// is logged and left out; the rest of the site keeps working.
pub fn create_app_state(pool: SqlitePool, config: &ServerConfig) -> AppState {
	let state = AppState::new(pool);

	let Some(openai) = &config.llm.openai else {
		tracing::info!("AI suggestions disabled: no OpenAI API key configured");
		return state;
	};

	let client_config = OpenAIConfig::new(openai.api_key.clone())
		.with_base_url(&openai.base_url)
		.with_model(&openai.model)
		.with_timeout(Duration::from_secs(config.llm.timeout_secs));

	match OpenAIClient::new(client_config) {
		Ok(client) => {
			tracing::info!(model = %openai.model, base_url = %openai.base_url, "AI suggestions enabled");
			state.with_recommender(Arc::new(OpenAiRecommender::new(client)))
		}
		Err(e) => {
			tracing::warn!(error = %e, "Failed to create OpenAI client, AI suggestions disabled");
			state
		}
	}
}

/// All routes. Tracing and CORS layers are added by the binary.
pub fn create_router(state: AppState) -> Router {
	Router::new()
		.route("/", get(routes::home::home))
		.route(
			"/add_author",
			get(routes::authors::add_author_form).post(routes::authors::add_author),
		)
		.route(
			"/add_book",
			get(routes::books::add_book_form).post(routes::books::add_book),
		)
		.route("/book/{id}", get(routes::books::book_detail))
		.route("/book/{id}/delete", post(routes::books::delete_book))
		.route("/authors", get(routes::authors::list_authors))
		.route("/author/{id}/delete", post(routes::authors::delete_author))
		.route("/suggest", get(routes::suggest::suggest))
		.route("/health", get(routes::health::health_check))
		.fallback(routes::not_found)
		.with_state(state)
}
