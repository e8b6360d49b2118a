use crate::error::{Error, Result};
use crate::generator::GenerationOptions;
use clap::Parser;

pub const DEFAULT_MODEL_ID: &str = "MMohammad/new-finetune-flant5-base-model";
pub const DEFAULT_INPUT: &str = "Your input text here";

#[derive(Parser)]
#[command(name = "hubgen")]
#[command(version, long_about = None)]
#[command(about = "Fetch a seq2seq model from the Hugging Face Hub and run one generation")]
pub struct Cli {
	/// HuggingFace model repository ID
	#[arg(long, default_value = DEFAULT_MODEL_ID)]
	pub model: String,

	/// Text to run through the model
	#[arg(long, default_value = DEFAULT_INPUT)]
	pub text: String,

	/// Device to run on (e.g., "cpu" or "cuda:0")
	#[arg(long, default_value = "cpu")]
	pub device: String,

	/// Maximum number of tokens to generate
	#[arg(long, default_value_t = 20)]
	pub max_new_tokens: usize,

	/// Sampling temperature; greedy decoding when omitted
	#[arg(long)]
	pub temperature: Option<f64>,

	/// Nucleus sampling probability cutoff (requires --temperature)
	#[arg(long)]
	pub top_p: Option<f64>,

	/// Seed for sampling
	#[arg(long, default_value_t = 299792458)]
	pub seed: u64,
}

impl Cli {
	pub fn generation_options(&self) -> Result<GenerationOptions> {
		if self.max_new_tokens == 0 {
			return Err(Error::InvalidInput(
				"--max-new-tokens must be at least 1".to_string(),
			));
		}
		if let Some(temperature) = self.temperature {
			if !(temperature.is_finite() && temperature >= 0.0) {
				return Err(Error::InvalidInput(format!(
					"--temperature must be a non-negative number, got {}",
					temperature
				)));
			}
		}
		if let Some(top_p) = self.top_p {
			if self.temperature.is_none() {
				return Err(Error::InvalidInput(
					"--top-p only applies when sampling; set --temperature as well".to_string(),
				));
			}
			if !(top_p > 0.0 && top_p <= 1.0) {
				return Err(Error::InvalidInput(format!(
					"--top-p must be in (0, 1], got {}",
					top_p
				)));
			}
		}

		Ok(GenerationOptions {
			max_new_tokens: self.max_new_tokens,
			temperature: self.temperature,
			top_p: self.top_p,
			seed: self.seed,
		})
	}
}
