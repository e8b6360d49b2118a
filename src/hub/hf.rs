use crate::config::{AccessToken, Config};
use crate::error::{Error, Result};
use crate::generator::{GenerationOptions, HfTokenizer, T5Generator};
use crate::hub::{Registry, RegistryClient};
use crate::model::downloader;
use candle_core::Device;
use hf_hub::api::sync::{Api, ApiBuilder, ApiError};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Deserialize)]
struct WhoAmI {
	name: String,
}

/// Hugging Face Hub client.
pub struct HfClient {
	endpoint: String,
	cache_dir: Option<PathBuf>,
	device: Device,
	options: GenerationOptions,
}

impl HfClient {
	pub fn new(config: &Config, device: Device, options: GenerationOptions) -> Self {
		Self {
			endpoint: config.endpoint.clone(),
			cache_dir: config.cache_dir.clone(),
			device,
			options,
		}
	}

	fn whoami_url(&self) -> String {
		format!("{}/api/whoami-v2", self.endpoint)
	}

	fn build_api(&self, token: Option<&AccessToken>) -> std::result::Result<Api, ApiError> {
		let mut builder = ApiBuilder::new()
			.with_endpoint(self.endpoint.clone())
			.with_progress(true);

		if let Some(dir) = &self.cache_dir {
			builder = builder.with_cache_dir(dir.clone());
		}
		// Leaving the token unset keeps whatever `huggingface-cli login` cached.
		if let Some(token) = token {
			builder = builder.with_token(Some(token.expose().to_string()));
		}

		builder.build()
	}

	fn whoami(&self, token: &AccessToken) -> Result<String> {
		let url = self.whoami_url();
		let response = reqwest::blocking::Client::new()
			.get(&url)
			.bearer_auth(token.expose())
			.send()
			.map_err(|e| Error::LoginFailed(format!("Could not reach {}: {}", url, e)))?;

		let status = response.status();
		if !status.is_success() {
			return Err(Error::LoginFailed(format!(
				"Token rejected by {}: HTTP {}",
				self.endpoint, status
			)));
		}

		let identity: WhoAmI = response
			.json()
			.map_err(|e| Error::LoginFailed(format!("Unexpected whoami response: {}", e)))?;

		Ok(identity.name)
	}

	fn session(&self, api: Api) -> HfSession {
		HfSession {
			api,
			device: self.device.clone(),
			options: self.options.clone(),
		}
	}
}

impl RegistryClient for HfClient {
	type Session = HfSession;

	fn anonymous(&self) -> Result<HfSession> {
		let api = self
			.build_api(None)
			.map_err(|e| Error::DownloadFailed(format!("Could not initialise hub client: {}", e)))?;
		Ok(self.session(api))
	}

	fn establish_session(&self, token: &AccessToken) -> Result<HfSession> {
		let user = self.whoami(token)?;
		tracing::info!("Authenticated to {} as {}", self.endpoint, user);

		let api = self
			.build_api(Some(token))
			.map_err(|e| Error::LoginFailed(format!("Could not initialise hub client: {}", e)))?;
		Ok(self.session(api))
	}
}

/// An open hub session. Every fetch uses the credentials it was built with.
pub struct HfSession {
	api: Api,
	device: Device,
	options: GenerationOptions,
}

impl Registry for HfSession {
	type Tokenizer = HfTokenizer;
	type Model = T5Generator;

	fn fetch_tokenizer(&self, model_id: &str) -> Result<HfTokenizer> {
		let repo = self.api.model(model_id.to_string());
		let path = downloader::fetch_tokenizer_file(&repo)?;
		HfTokenizer::from_file(&path)
	}

	fn fetch_model(&self, model_id: &str) -> Result<T5Generator> {
		let repo = self.api.model(model_id.to_string());
		let files = downloader::fetch_model_files(&repo)?;
		T5Generator::load(&files, self.device.clone(), self.options.clone())
	}
}
