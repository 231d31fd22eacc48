// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Shared helpers for router integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
	body::Body,
	http::{header, HeaderMap, Request, StatusCode},
	Router,
};
use folio_server::{create_router, AppState, Recommender, Suggestion};
use folio_server_db::BookWithAuthor;
use folio_server_llm_openai::LlmError;
use std::sync::Mutex;
use tempfile::TempDir;
use tower::ServiceExt;

pub struct TestApp {
	pub router: Router,
	pub state: AppState,
	_dir: TempDir,
}

pub struct TestResponse {
	pub status: StatusCode,
	pub headers: HeaderMap,
	pub body: String,
}

impl TestResponse {
	pub fn location(&self) -> Option<&str> {
		self.headers
			.get(header::LOCATION)
			.and_then(|v| v.to_str().ok())
	}
}

/// Router over a fresh file database in a temp dir.
pub async fn setup_test_app(recommender: Option<Arc<dyn Recommender>>) -> TestApp {
	let dir = tempfile::tempdir().unwrap();
	let db_path = dir.path().join("library.sqlite");
	let db_url = format!("sqlite:{}?mode=rwc", db_path.display());
	let pool = folio_server_db::create_pool(&db_url).await.unwrap();
	folio_server_db::run_migrations(&pool).await.unwrap();

	let mut state = AppState::new(pool);
	if let Some(recommender) = recommender {
		state = state.with_recommender(recommender);
	}

	TestApp {
		router: create_router(state.clone()),
		state,
		_dir: dir,
	}
}

impl TestApp {
	/// Swap the router while keeping the database (and its temp dir) alive.
	pub fn from_router(router: Router, app: TestApp) -> TestApp {
		TestApp { router, ..app }
	}

	pub async fn get(&self, uri: &str) -> TestResponse {
		self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
			.await
	}

	pub async fn post_form(&self, uri: &str, form: &[(&str, &str)]) -> TestResponse {
		let body = url::form_urlencoded::Serializer::new(String::new())
			.extend_pairs(form)
			.finish();
		self.send(
			Request::builder()
				.method("POST")
				.uri(uri)
				.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
				.body(Body::from(body))
				.unwrap(),
		)
		.await
	}

	async fn send(&self, request: Request<Body>) -> TestResponse {
		let response = self.router.clone().oneshot(request).await.unwrap();
		let status = response.status();
		let headers = response.headers().clone();
		let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
			.await
			.unwrap();
		TestResponse {
			status,
			headers,
			body: String::from_utf8(bytes.to_vec()).unwrap(),
		}
	}

	pub async fn add_author(&self, name: &str) -> TestResponse {
		self.post_form(
			"/add_author",
			&[("name", name), ("birthdate", ""), ("date_of_death", "")],
		)
		.await
	}

	pub async fn author_id(&self, name: &str) -> i64 {
		self.state
			.authors
			.get_author_by_name(name)
			.await
			.unwrap()
			.unwrap_or_else(|| panic!("author {name} missing"))
			.id
			.0
	}

	pub async fn add_book(&self, title: &str, isbn: &str, author: &str, rating: &str) -> TestResponse {
		let author_id = self.author_id(author).await.to_string();
		self.post_form(
			"/add_book",
			&[
				("title", title),
				("isbn", isbn),
				("publication_year", "1965"),
				("rating", rating),
				("author_id", &author_id),
			],
		)
		.await
	}

	pub async fn book_id(&self, isbn: &str) -> i64 {
		self.state
			.books
			.get_book_by_isbn(isbn)
			.await
			.unwrap()
			.unwrap_or_else(|| panic!("book {isbn} missing"))
			.id
			.0
	}
}

/// Recommender returning a fixed outcome and remembering what it was asked.
pub struct StubRecommender {
	outcome: Result<Suggestion, LlmError>,
	pub calls: Mutex<Vec<Vec<String>>>,
}

impl StubRecommender {
	pub fn ok(suggestion: Suggestion) -> Arc<Self> {
		Arc::new(Self {
			outcome: Ok(suggestion),
			calls: Mutex::new(Vec::new()),
		})
	}

	pub fn failing(err: LlmError) -> Arc<Self> {
		Arc::new(Self {
			outcome: Err(err),
			calls: Mutex::new(Vec::new()),
		})
	}

	pub fn call_count(&self) -> usize {
		self.calls.lock().unwrap().len()
	}
}

#[async_trait]
impl Recommender for StubRecommender {
	async fn recommend(&self, books: &[BookWithAuthor]) -> Result<Suggestion, LlmError> {
		self.calls
			.lock()
			.unwrap()
			.push(books.iter().map(|b| b.title.clone()).collect());
		self.outcome.clone()
	}
}
