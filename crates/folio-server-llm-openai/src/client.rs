// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! OpenAI client implementation.

use folio_common_http::{retry, RetryConfig};
use reqwest::Client;
use tracing::{debug, error, info, instrument, trace};

use crate::error::LlmError;
use crate::types::{OpenAIConfig, OpenAIError, OpenAIMessage, OpenAIRequest, OpenAIResponse};

/// Client for an OpenAI-compatible chat completions endpoint.
#[derive(Debug, Clone)]
pub struct OpenAIClient {
	config: OpenAIConfig,
	http_client: Client,
	retry_config: RetryConfig,
}

impl OpenAIClient {
	pub fn new(config: OpenAIConfig) -> Result<Self, LlmError> {
		let http_client = folio_common_http::new_client_with_timeout(config.timeout)
			.map_err(|e| LlmError::Http(format!("Failed to create HTTP client: {e}")))?;

		Ok(Self {
			config,
			http_client,
			retry_config: RetryConfig::default(),
		})
	}

	pub fn with_retry_config(mut self, retry_config: RetryConfig) -> Self {
		self.retry_config = retry_config;
		self
	}

	pub fn model(&self) -> &str {
		&self.config.model
	}

	fn completions_url(&self) -> String {
		format!(
			"{}/chat/completions",
			self.config.base_url.trim_end_matches('/')
		)
	}

	#[instrument(skip(self, request), fields(model = %request.model))]
	async fn send_request(&self, request: &OpenAIRequest) -> Result<OpenAIResponse, LlmError> {
		let url = self.completions_url();
		debug!(url = %url, "Sending request to OpenAI API");
		trace!(request = ?request, "Request payload");

		let response = self
			.http_client
			.post(&url)
			.bearer_auth(self.config.api_key.expose())
			.json(request)
			.send()
			.await
			.map_err(|e| {
				error!(error = %e, "HTTP request failed");
				LlmError::from_reqwest(e)
			})?;

		let status = response.status();
		debug!(status = %status, "Received response");

		let body = response.text().await.map_err(LlmError::from_reqwest)?;

		if !status.is_success() {
			let message = match serde_json::from_str::<OpenAIError>(&body) {
				Ok(api_error) => {
					error!(
						status = %status,
						error_type = ?api_error.error.error_type,
						code = ?api_error.error.code,
						body = %api_error.error.message,
						"API error response"
					);
					api_error.error.message
				}
				Err(_) => {
					error!(status = %status, body = %body, "API error response");
					body
				}
			};
			return Err(LlmError::from_status(status.as_u16(), message));
		}

		serde_json::from_str(&body).map_err(|e| {
			error!(error = %e, "Failed to parse response");
			LlmError::InvalidResponse(format!("Failed to parse response: {e}"))
		})
	}

	/// Send one system and one user message and return the assistant's text.
	#[instrument(skip(self, system, user), fields(model = %self.config.model))]
	pub async fn complete(&self, system: &str, user: &str) -> Result<String, LlmError> {
		info!("Starting completion request");

		let request = OpenAIRequest {
			model: self.config.model.clone(),
			messages: vec![OpenAIMessage::system(system), OpenAIMessage::user(user)],
			max_tokens: self.config.max_tokens,
			temperature: self.config.temperature,
		};

		let request = &request;
		let response = retry(&self.retry_config, move || self.send_request(request)).await?;

		if let Some(usage) = &response.usage {
			debug!(
				prompt_tokens = usage.prompt_tokens,
				completion_tokens = usage.completion_tokens,
				"Token usage"
			);
		}

		let content = response
			.first_content()
			.ok_or_else(|| LlmError::InvalidResponse("response has no content".to_string()))?
			.to_string();

		info!(
			response_id = ?response.id,
			response_model = ?response.model,
			finish_reason = ?response.choices.first().and_then(|c| c.finish_reason.as_deref()),
			chars = content.len(),
			"Completion request finished"
		);
		Ok(content)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use folio_common_secret::SecretString;

	fn config() -> OpenAIConfig {
		OpenAIConfig::new(SecretString::new("test-key".to_string()))
	}

	#[test]
	fn completions_url_joins_base() {
		let client = OpenAIClient::new(config().with_base_url("http://localhost:9999/v1/")).unwrap();
		assert_eq!(
			client.completions_url(),
			"http://localhost:9999/v1/chat/completions"
		);
	}

	#[test]
	fn default_model() {
		let client = OpenAIClient::new(config()).unwrap();
		assert_eq!(client.model(), "gpt-4o-mini");
	}
}
