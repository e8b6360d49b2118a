use crate::error::{Error, Result};
use std::fmt;
use std::path::PathBuf;

pub const TOKEN_VAR: &str = "HF_TOKEN";
pub const ENDPOINT_VAR: &str = "HF_ENDPOINT";
pub const CACHE_DIR_VAR: &str = "HUBGEN_CACHE_DIR";
pub const DEFAULT_ENDPOINT: &str = "https://huggingface.co";

/// Hub access token. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
	/// An empty value counts as no token at all.
	pub fn new(value: impl Into<String>) -> Option<Self> {
		let value = value.into();
		if value.is_empty() {
			None
		} else {
			Some(Self(value))
		}
	}

	pub fn expose(&self) -> &str {
		&self.0
	}
}

impl fmt::Debug for AccessToken {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("AccessToken(***)")
	}
}

#[derive(Debug, Clone)]
pub struct Config {
	pub hf_token: Option<AccessToken>,
	pub endpoint: String,
	pub cache_dir: Option<PathBuf>,
}

impl Config {
	pub fn from_env() -> Result<Self> {
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	pub fn from_lookup<F>(lookup: F) -> Result<Self>
	where
		F: Fn(&str) -> Option<String>,
	{
		let hf_token = lookup(TOKEN_VAR).and_then(AccessToken::new);

		let endpoint = lookup(ENDPOINT_VAR)
			.filter(|value| !value.is_empty())
			.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
		if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
			return Err(Error::ConfigError(format!(
				"{} must be an http(s) URL, got '{}'",
				ENDPOINT_VAR, endpoint
			)));
		}
		let endpoint = endpoint.trim_end_matches('/').to_string();

		let cache_dir = match lookup(CACHE_DIR_VAR).filter(|value| !value.is_empty()) {
			Some(dir) => {
				let dir = PathBuf::from(dir);
				std::fs::create_dir_all(&dir)?;
				Some(dir)
			}
			None => None,
		};

		Ok(Self {
			hf_token,
			endpoint,
			cache_dir,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;

	fn config_with(vars: &[(&str, &str)]) -> Result<Config> {
		let vars: HashMap<String, String> = vars
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect();
		Config::from_lookup(|key| vars.get(key).cloned())
	}

	#[test]
	fn missing_token_is_none() {
		let config = config_with(&[]).unwrap();
		assert!(config.hf_token.is_none());
		assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
		assert!(config.cache_dir.is_none());
	}

	#[test]
	fn empty_token_is_treated_as_missing() {
		let config = config_with(&[(TOKEN_VAR, "")]).unwrap();
		assert!(config.hf_token.is_none());
	}

	#[test]
	fn token_is_kept_verbatim() {
		let config = config_with(&[(TOKEN_VAR, "hf_abc123")]).unwrap();
		assert_eq!(config.hf_token.unwrap().expose(), "hf_abc123");
	}

	#[test]
	fn token_debug_is_redacted() {
		let token = AccessToken::new("hf_secret").unwrap();
		let rendered = format!("{:?}", token);
		assert!(!rendered.contains("hf_secret"));
	}

	#[test]
	fn endpoint_trailing_slash_is_trimmed() {
		let config = config_with(&[(ENDPOINT_VAR, "https://hub.example.org/")]).unwrap();
		assert_eq!(config.endpoint, "https://hub.example.org");
	}

	#[test]
	fn non_http_endpoint_is_rejected() {
		let err = config_with(&[(ENDPOINT_VAR, "hub.example.org")]).unwrap_err();
		assert!(matches!(err, Error::ConfigError(_)));
	}

	#[test]
	fn cache_dir_is_created() {
		let tmp = tempfile::tempdir().unwrap();
		let dir = tmp.path().join("hub-cache");
		let config = config_with(&[(CACHE_DIR_VAR, dir.to_str().unwrap())]).unwrap();
		assert_eq!(config.cache_dir.as_deref(), Some(dir.as_path()));
		assert!(dir.is_dir());
	}
}
