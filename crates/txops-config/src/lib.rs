use std::env;
use std::path::Path;
use thiserror::Error;

mod types;

pub use types::{Config, ConfirmationConfig, EvmConfig, GasConfig, SolanaConfig};

#[derive(Error, Debug)]
pub enum ConfigError {
	#[error("File not found: {0}")]
	FileNotFound(String),

	#[error("Parse error: {0}")]
	ParseError(String),

	#[error("Validation error: {0}")]
	ValidationError(String),

	#[error("Environment variable not found: {0}")]
	EnvVarNotFound(String),

	#[error("IO error: {0}")]
	IoError(#[from] std::io::Error),
}

/// Configuration loader with environment variable substitution.
///
/// Loads a TOML file, replaces `${VAR_NAME}` placeholders with values from
/// the process environment (so secrets never live in the file), applies
/// `TXOPS_`-prefixed overrides, and validates the result.
#[derive(Default)]
pub struct ConfigLoader {
	file_path: Option<String>,
	env_prefix: String,
}

impl ConfigLoader {
	pub fn new() -> Self {
		Self {
			file_path: None,
			env_prefix: "TXOPS_".to_string(),
		}
	}

	pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
		self.file_path = Some(path.as_ref().to_string_lossy().to_string());
		self
	}

	pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.env_prefix = prefix.into();
		self
	}

	pub async fn load(&self) -> Result<Config, ConfigError> {
		let mut config = if let Some(file_path) = &self.file_path {
			self.load_from_file(file_path).await?
		} else {
			return Err(ConfigError::FileNotFound(
				"No configuration file specified".to_string(),
			));
		};

		self.apply_env_overrides(&mut config)?;
		self.validate_config(&config)?;

		Ok(config)
	}

	async fn load_from_file(&self, file_path: &str) -> Result<Config, ConfigError> {
		let content = tokio::fs::read_to_string(file_path).await?;

		let substituted_content = self.substitute_env_vars(&content)?;

		let config: Config = toml::from_str(&substituted_content)
			.map_err(|e| ConfigError::ParseError(e.to_string()))?;

		Ok(config)
	}

	fn substitute_env_vars(&self, content: &str) -> Result<String, ConfigError> {
		let mut result = content.to_string();

		// Find and replace ${VAR_NAME} patterns
		let re = regex::Regex::new(r"\$\{([^}]+)\}").unwrap();

		for cap in re.captures_iter(content) {
			let full_match = &cap[0];
			let var_name = &cap[1];

			let env_value = env::var(var_name)
				.map_err(|_| ConfigError::EnvVarNotFound(var_name.to_string()))?;

			result = result.replace(full_match, &env_value);
		}

		Ok(result)
	}

	fn apply_env_overrides(&self, config: &mut Config) -> Result<(), ConfigError> {
		if let Ok(rpc_url) = env::var(format!("{}EVM_RPC_URL", self.env_prefix)) {
			config.evm.rpc_url = rpc_url;
		}

		if let Ok(rpc_url) = env::var(format!("{}SOLANA_RPC_URL", self.env_prefix)) {
			config.solana.rpc_url = rpc_url;
		}

		if let Ok(timeout) = env::var(format!("{}CONFIRMATION_TIMEOUT_SECS", self.env_prefix)) {
			config.confirmation.timeout_secs = timeout.parse().map_err(|e| {
				ConfigError::ValidationError(format!("Invalid confirmation timeout: {}", e))
			})?;
		}

		Ok(())
	}

	fn validate_config(&self, config: &Config) -> Result<(), ConfigError> {
		if !config.evm.rpc_url.starts_with("http://") && !config.evm.rpc_url.starts_with("https://")
		{
			return Err(ConfigError::ValidationError(
				"EVM RPC URL must start with http:// or https://".to_string(),
			));
		}

		if config.evm.chain_id == 0 {
			return Err(ConfigError::ValidationError(
				"Chain ID must be non-zero".to_string(),
			));
		}

		let key = config
			.evm
			.private_key
			.strip_prefix("0x")
			.unwrap_or(&config.evm.private_key);
		if key.len() != 64 || hex::decode(key).is_err() {
			return Err(ConfigError::ValidationError(
				"Private key must be 64 hex characters (32 bytes)".to_string(),
			));
		}

		if config.confirmation.poll_interval_secs == 0 {
			return Err(ConfigError::ValidationError(
				"Poll interval must be at least one second".to_string(),
			));
		}

		if config.confirmation.timeout_secs < config.confirmation.poll_interval_secs {
			return Err(ConfigError::ValidationError(
				"Confirmation timeout must not be shorter than the poll interval".to_string(),
			));
		}

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	const DEV_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

	fn write_config(content: &str) -> tempfile::NamedTempFile {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		file.write_all(content.as_bytes()).unwrap();
		file
	}

	#[tokio::test]
	async fn test_load_with_defaults() {
		let file = write_config(&format!(
			r#"
[evm]
rpc_url = "https://sepolia.example.org"
chain_id = 11155111
private_key = "{DEV_KEY}"
"#
		));

		let config = ConfigLoader::new()
			.with_file(file.path())
			.load()
			.await
			.unwrap();

		assert_eq!(config.evm.chain_id, 11155111);
		assert_eq!(config.gas.native_buffer_percent, 10);
		assert_eq!(config.gas.token_buffer_percent, 20);
		assert_eq!(config.gas.native_fallback_limit, 21_000);
		assert_eq!(config.gas.token_fallback_limit, 100_000);
		assert_eq!(config.confirmation.timeout_secs, 180);
		assert_eq!(config.confirmation.poll_interval_secs, 5);
		assert_eq!(config.solana.rpc_url, "https://api.devnet.solana.com");
	}

	#[tokio::test]
	async fn test_env_var_substitution() {
		env::set_var("TXOPS_TEST_SUBST_KEY", DEV_KEY);
		let file = write_config(
			r#"
[evm]
rpc_url = "https://sepolia.example.org"
chain_id = 11155111
private_key = "${TXOPS_TEST_SUBST_KEY}"
"#,
		);

		let config = ConfigLoader::new()
			.with_file(file.path())
			.load()
			.await
			.unwrap();

		assert_eq!(config.evm.private_key, DEV_KEY);
	}

	#[tokio::test]
	async fn test_missing_env_var_is_an_error() {
		let file = write_config(
			r#"
[evm]
rpc_url = "https://sepolia.example.org"
chain_id = 11155111
private_key = "${TXOPS_TEST_DEFINITELY_UNSET}"
"#,
		);

		let err = ConfigLoader::new()
			.with_file(file.path())
			.load()
			.await
			.unwrap_err();
		assert!(matches!(err, ConfigError::EnvVarNotFound(_)));
	}

	#[tokio::test]
	async fn test_validation_rejects_bad_key_and_zero_interval() {
		let file = write_config(
			r#"
[evm]
rpc_url = "https://sepolia.example.org"
chain_id = 11155111
private_key = "deadbeef"
"#,
		);
		let err = ConfigLoader::new()
			.with_file(file.path())
			.load()
			.await
			.unwrap_err();
		assert!(matches!(err, ConfigError::ValidationError(_)));

		let file = write_config(&format!(
			r#"
[evm]
rpc_url = "https://sepolia.example.org"
chain_id = 11155111
private_key = "{DEV_KEY}"

[confirmation]
poll_interval_secs = 0
"#
		));
		let err = ConfigLoader::new()
			.with_file(file.path())
			.load()
			.await
			.unwrap_err();
		assert!(matches!(err, ConfigError::ValidationError(_)));
	}

	#[tokio::test]
	async fn test_rejects_non_http_rpc_url() {
		let file = write_config(&format!(
			r#"
[evm]
rpc_url = "ws://sepolia.example.org"
chain_id = 11155111
private_key = "{DEV_KEY}"
"#
		));
		let err = ConfigLoader::new()
			.with_file(file.path())
			.load()
			.await
			.unwrap_err();
		assert!(matches!(err, ConfigError::ValidationError(_)));
	}
}
