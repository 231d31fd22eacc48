// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Health HTTP handler.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use tokio::time::Instant;

use crate::api::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
	Healthy,
	Unhealthy,
}

#[derive(Debug, Serialize)]
pub struct DatabaseHealth {
	pub status: HealthStatus,
	pub latency_ms: u64,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub book_count: Option<i64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LlmHealth {
	pub configured: bool,
}

#[derive(Debug, Serialize)]
pub struct HealthComponents {
	pub database: DatabaseHealth,
	pub llm: LlmHealth,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
	pub status: HealthStatus,
	pub timestamp: String,
	pub duration_ms: u64,
	pub version: &'static str,
	pub components: HealthComponents,
}

async fn check_database(state: &AppState) -> DatabaseHealth {
	let start = Instant::now();
	let result = match folio_server_db::ping(&state.pool).await {
		Ok(()) => state.books.count_books().await,
		Err(e) => Err(e),
	};
	let latency_ms = start.elapsed().as_millis() as u64;

	match result {
		Ok(count) => DatabaseHealth {
			status: HealthStatus::Healthy,
			latency_ms,
			book_count: Some(count),
			error: None,
		},
		Err(e) => {
			tracing::error!(error = %e, "database health check failed");
			DatabaseHealth {
				status: HealthStatus::Unhealthy,
				latency_ms,
				book_count: None,
				error: Some(e.to_string()),
			}
		}
	}
}

/// GET /health - database reachability and whether suggestions are configured.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
	let overall_start = Instant::now();

	let database = check_database(&state).await;
	let llm = LlmHealth {
		configured: state.recommender.is_some(),
	};

	let status = database.status;
	let response = HealthResponse {
		status,
		timestamp: chrono::Utc::now().to_rfc3339(),
		duration_ms: overall_start.elapsed().as_millis() as u64,
		version: env!("CARGO_PKG_VERSION"),
		components: HealthComponents { database, llm },
	};

	let http_status = match status {
		HealthStatus::Healthy => StatusCode::OK,
		HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
	};

	(http_status, Json(response))
}
