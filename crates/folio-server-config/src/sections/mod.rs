// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sections for folio-server.

pub mod database;
pub mod http;
pub mod llm;
pub mod logging;

pub use database::{DatabaseConfig, DatabaseConfigLayer};
pub use http::{HttpConfig, HttpConfigLayer};
pub use llm::{LlmConfig, LlmConfigLayer, OpenAiConfig};
pub use logging::{LoggingConfig, LoggingConfigLayer};
