use thiserror::Error;

/// Substrings that mark a registry failure as an authorization problem.
const AUTHORIZATION_MARKERS: [&str; 2] = ["gated repo", "401"];

#[derive(Debug, Error)]
pub enum Error {
	#[error("Login failed: {0}")]
	LoginFailed(String),

	#[error("Download failed: {0}")]
	DownloadFailed(String),

	#[error("Failed to load model: {0}")]
	ModelLoadFailed(String),

	#[error("Invalid input: {0}")]
	InvalidInput(String),

	#[error("Configuration error: {0}")]
	ConfigError(String),

	#[error("Generation error: {0}")]
	GenerationError(String),

	#[error("IO error: {0}")]
	IoError(#[from] std::io::Error),
}

/// How a failed tokenizer or model fetch is reported to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetrievalFailure {
	/// The registry refused a gated or private artifact.
	AuthenticationRequired,
	Unclassified,
}

impl RetrievalFailure {
	// Matches on the rendered message: hf-hub surfaces HTTP statuses only as text.
	pub fn classify(err: &Error) -> Self {
		let message = err.to_string();
		if AUTHORIZATION_MARKERS
			.iter()
			.any(|marker| message.contains(marker))
		{
			RetrievalFailure::AuthenticationRequired
		} else {
			RetrievalFailure::Unclassified
		}
	}
}

pub type Result<T> = std::result::Result<T, Error>;
