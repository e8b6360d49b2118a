pub mod hf;
#[cfg(test)]
pub mod mock;
#[cfg(test)]
mod stub;

pub use hf::HfClient;

use crate::config::AccessToken;
use crate::error::Result;
use crate::generator::{Seq2SeqModel, TextTokenizer};

/// Opens sessions against a model registry.
pub trait RegistryClient {
	type Session: Registry;

	/// Session without an explicit token. Credentials cached by an earlier
	/// CLI login may still apply.
	fn anonymous(&self) -> Result<Self::Session>;

	/// Session authenticated with `token`. Fails with `Error::LoginFailed`.
	fn establish_session(&self, token: &AccessToken) -> Result<Self::Session>;
}

/// Artifact access through an open session.
pub trait Registry {
	type Tokenizer: TextTokenizer;
	type Model: Seq2SeqModel;

	fn fetch_tokenizer(&self, model_id: &str) -> Result<Self::Tokenizer>;
	fn fetch_model(&self, model_id: &str) -> Result<Self::Model>;
}
