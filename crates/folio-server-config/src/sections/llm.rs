// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Book recommendation (LLM) configuration section.

use folio_common_secret::SecretString;
use serde::Deserialize;

const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// LLM configuration layer (for merging).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LlmConfigLayer {
	#[serde(default)]
	pub enabled: Option<bool>,
	#[serde(default)]
	pub openai_api_key: Option<SecretString>,
	#[serde(default)]
	pub openai_model: Option<String>,
	#[serde(default)]
	pub openai_base_url: Option<String>,
	#[serde(default)]
	pub timeout_secs: Option<u64>,
}

impl LlmConfigLayer {
	/// Values from `other` take precedence when present.
	pub fn merge(&mut self, other: LlmConfigLayer) {
		if other.enabled.is_some() {
			self.enabled = other.enabled;
		}
		if other.openai_api_key.is_some() {
			self.openai_api_key = other.openai_api_key;
		}
		if other.openai_model.is_some() {
			self.openai_model = other.openai_model;
		}
		if other.openai_base_url.is_some() {
			self.openai_base_url = other.openai_base_url;
		}
		if other.timeout_secs.is_some() {
			self.timeout_secs = other.timeout_secs;
		}
	}

	/// Resolve into runtime config. The OpenAI section only exists when the
	/// feature is enabled and an API key was supplied.
	pub fn finalize(self) -> LlmConfig {
		let enabled = self.enabled.unwrap_or(true);
		let openai = match (enabled, self.openai_api_key) {
			(true, Some(api_key)) => Some(OpenAiConfig {
				api_key,
				model: self
					.openai_model
					.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
				base_url: self
					.openai_base_url
					.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
			}),
			_ => None,
		};

		LlmConfig {
			openai,
			timeout_secs: self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
		}
	}
}

/// OpenAI-compatible provider configuration (runtime).
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
	pub api_key: SecretString,
	pub model: String,
	pub base_url: String,
}

/// LLM configuration (runtime).
#[derive(Debug, Clone)]
pub struct LlmConfig {
	pub openai: Option<OpenAiConfig>,
	pub timeout_secs: u64,
}

impl Default for LlmConfig {
	fn default() -> Self {
		LlmConfigLayer::default().finalize()
	}
}

impl LlmConfig {
	pub fn is_configured(&self) -> bool {
		self.openai.is_some()
	}
}
