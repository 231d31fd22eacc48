// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! OpenAI-compatible chat completions client used for book suggestions.

mod client;
mod error;
mod types;

pub use client::OpenAIClient;
pub use error::LlmError;
pub use types::*;
