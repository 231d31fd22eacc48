// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Folio digital library server.
//!
//! Server-rendered pages for managing authors and books in a SQLite database,
//! plus an optional book suggestion drawn from a hosted language model.

pub mod api;
pub mod error;
pub mod pages;
pub mod routes;
pub mod suggest;
pub mod validation;

pub use api::{create_app_state, create_router, AppState};
pub use error::ServerError;
pub use folio_server_config::ServerConfig;
pub use suggest::{build_prompt, parse_suggestion, OpenAiRecommender, Recommender, Suggestion};
