// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration for the Folio server.
//!
//! Values are layered from built-in defaults, a TOML file and `FOLIO_SERVER_*`
//! environment variables, in increasing order of precedence.
//!
//! ```ignore
//! let config = folio_server_config::load_config()?;
//! println!("listening on {}", config.socket_addr());
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::ServerConfigLayer;
pub use sections::*;
pub use sources::{ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};

use std::path::PathBuf;

use tracing::{debug, info};

/// Fully resolved server configuration.
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
	pub http: HttpConfig,
	pub database: DatabaseConfig,
	pub logging: LoggingConfig,
	pub llm: LlmConfig,
}

impl ServerConfig {
	/// Socket address string for binding.
	pub fn socket_addr(&self) -> String {
		format!("{}:{}", self.http.host, self.http.port)
	}
}

/// Load configuration using the system config file (`/etc/folio/server.toml`).
pub fn load_config() -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::system()),
		Box::new(EnvSource),
	])
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(config_path: impl Into<PathBuf>) -> Result<ServerConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource),
	])
}

fn load_from_sources(mut sources: Vec<Box<dyn ConfigSource>>) -> Result<ServerConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = ServerConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		merged.merge(source.load()?);
	}

	finalize(merged)
}

/// Finalize a merged layer into resolved config.
pub fn finalize(layer: ServerConfigLayer) -> Result<ServerConfig, ConfigError> {
	let config = ServerConfig {
		http: layer.http.unwrap_or_default().finalize(),
		database: layer.database.unwrap_or_default().finalize(),
		logging: layer.logging.unwrap_or_default().finalize(),
		llm: layer.llm.unwrap_or_default().finalize(),
	};

	validate_config(&config)?;

	info!(
		host = %config.http.host,
		port = config.http.port,
		database = %config.database.url,
		llm_configured = config.llm.is_configured(),
		"Server configuration loaded"
	);

	Ok(config)
}

/// Cross-field rules.
fn validate_config(config: &ServerConfig) -> Result<(), ConfigError> {
	if !config.database.url.starts_with("sqlite:") {
		return Err(ConfigError::Validation(format!(
			"database url must be a sqlite: url, got '{}'",
			config.database.url
		)));
	}

	if config.http.port == 0 {
		return Err(ConfigError::InvalidValue {
			key: "http.port".to_string(),
			message: "port must be non-zero".to_string(),
		});
	}

	if config.llm.timeout_secs == 0 {
		return Err(ConfigError::InvalidValue {
			key: "llm.timeout_secs".to_string(),
			message: "timeout must be at least one second".to_string(),
		});
	}

	Ok(())
}
