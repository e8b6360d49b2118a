use crate::config::AccessToken;
use crate::error::{Error, Result};
use crate::generator::{Seq2SeqModel, TextTokenizer};
use crate::hub::{Registry, RegistryClient};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
	Anonymous,
	EstablishSession(String),
	FetchTokenizer(String),
	FetchModel(String),
}

type CallLog = Rc<RefCell<Vec<Call>>>;

/// Registry double that records every call and fails on demand.
#[derive(Default)]
pub struct MockClient {
	log: CallLog,
	login_error: Option<String>,
	tokenizer_error: Option<String>,
	model_error: Option<String>,
}

impl MockClient {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn failing_login(mut self, message: &str) -> Self {
		self.login_error = Some(message.to_string());
		self
	}

	pub fn failing_tokenizer(mut self, message: &str) -> Self {
		self.tokenizer_error = Some(message.to_string());
		self
	}

	pub fn failing_model(mut self, message: &str) -> Self {
		self.model_error = Some(message.to_string());
		self
	}

	pub fn calls(&self) -> Vec<Call> {
		self.log.borrow().clone()
	}

	fn session(&self) -> MockSession {
		MockSession {
			log: Rc::clone(&self.log),
			tokenizer_error: self.tokenizer_error.clone(),
			model_error: self.model_error.clone(),
		}
	}
}

impl RegistryClient for MockClient {
	type Session = MockSession;

	fn anonymous(&self) -> Result<MockSession> {
		self.log.borrow_mut().push(Call::Anonymous);
		Ok(self.session())
	}

	fn establish_session(&self, token: &AccessToken) -> Result<MockSession> {
		self.log
			.borrow_mut()
			.push(Call::EstablishSession(token.expose().to_string()));
		match &self.login_error {
			Some(message) => Err(Error::LoginFailed(message.clone())),
			None => Ok(self.session()),
		}
	}
}

pub struct MockSession {
	log: CallLog,
	tokenizer_error: Option<String>,
	model_error: Option<String>,
}

impl Registry for MockSession {
	type Tokenizer = MockTokenizer;
	type Model = MockModel;

	fn fetch_tokenizer(&self, model_id: &str) -> Result<MockTokenizer> {
		self.log
			.borrow_mut()
			.push(Call::FetchTokenizer(model_id.to_string()));
		match &self.tokenizer_error {
			Some(message) => Err(Error::DownloadFailed(message.clone())),
			None => Ok(MockTokenizer),
		}
	}

	fn fetch_model(&self, model_id: &str) -> Result<MockModel> {
		self.log
			.borrow_mut()
			.push(Call::FetchModel(model_id.to_string()));
		match &self.model_error {
			Some(message) => Err(Error::DownloadFailed(message.clone())),
			None => Ok(MockModel::default()),
		}
	}
}

/// Numbers words from 1; decodes the ids 7, 8 and 9 only.
pub struct MockTokenizer;

impl TextTokenizer for MockTokenizer {
	fn encode(&self, text: &str) -> Result<Vec<u32>> {
		Ok((1..=text.split_whitespace().count() as u32).collect())
	}

	fn decode(&self, ids: &[u32]) -> Result<String> {
		let words = ids
			.iter()
			.map(|id| match id {
				7 => Ok("Bonjour"),
				8 => Ok("le"),
				9 => Ok("monde"),
				other => Err(Error::GenerationError(format!("unknown id {}", other))),
			})
			.collect::<Result<Vec<_>>>()?;
		Ok(words.join(" "))
	}
}

/// Always answers with ids 7, 8, 9 and remembers the last input.
#[derive(Default)]
pub struct MockModel {
	pub last_input: Vec<u32>,
}

impl Seq2SeqModel for MockModel {
	fn generate(&mut self, input_ids: &[u32]) -> Result<Vec<u32>> {
		self.last_input = input_ids.to_vec();
		Ok(vec![7, 8, 9])
	}
}
