// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! OpenAI chat completions wire types.

use std::time::Duration;

use folio_common_secret::SecretString;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Configuration for the OpenAI client.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
	pub api_key: SecretString,
	pub base_url: String,
	pub model: String,
	pub timeout: Duration,
	pub max_tokens: Option<u32>,
	pub temperature: Option<f32>,
}

impl OpenAIConfig {
	pub fn new(api_key: SecretString) -> Self {
		Self {
			api_key,
			base_url: DEFAULT_BASE_URL.to_string(),
			model: DEFAULT_MODEL.to_string(),
			timeout: Duration::from_secs(30),
			max_tokens: Some(400),
			temperature: Some(0.7),
		}
	}

	pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
		self.base_url = base_url.into();
		self
	}

	pub fn with_model(mut self, model: impl Into<String>) -> Self {
		self.model = model.into();
		self
	}

	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}
}

#[derive(Debug, Clone, Serialize)]
pub struct OpenAIRequest {
	pub model: String,
	pub messages: Vec<OpenAIMessage>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub max_tokens: Option<u32>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub temperature: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenAIMessage {
	pub role: String,
	#[serde(default)]
	pub content: Option<String>,
}

impl OpenAIMessage {
	pub fn system(content: impl Into<String>) -> Self {
		Self {
			role: "system".to_string(),
			content: Some(content.into()),
		}
	}

	pub fn user(content: impl Into<String>) -> Self {
		Self {
			role: "user".to_string(),
			content: Some(content.into()),
		}
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAIResponse {
	#[serde(default)]
	pub id: Option<String>,
	#[serde(default)]
	pub model: Option<String>,
	pub choices: Vec<OpenAIChoice>,
	#[serde(default)]
	pub usage: Option<OpenAIUsage>,
}

impl OpenAIResponse {
	/// Content of the first choice, if it has any non-blank text.
	pub fn first_content(&self) -> Option<&str> {
		self.choices
			.first()
			.and_then(|c| c.message.content.as_deref())
			.filter(|s| !s.trim().is_empty())
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAIChoice {
	pub message: OpenAIMessage,
	#[serde(default)]
	pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAIUsage {
	pub prompt_tokens: u32,
	pub completion_tokens: u32,
}

/// Error body returned by the API on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenAIError {
	pub error: OpenAIErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAIErrorDetail {
	pub message: String,
	#[serde(rename = "type", default)]
	pub error_type: Option<String>,
	#[serde(default)]
	pub code: Option<String>,
}
