pub mod t5;
pub mod tokenizer;

pub use t5::T5Generator;
pub use tokenizer::HfTokenizer;

use crate::error::{Error, Result};
use std::io::Write;

/// Text <-> token id conversion.
pub trait TextTokenizer {
    /// Encodes `text`, adding the model's special tokens.
    fn encode(&self, text: &str) -> Result<Vec<u32>>;

    /// Decodes `ids`, dropping special tokens.
    fn decode(&self, ids: &[u32]) -> Result<String>;
}

/// An encoder-decoder model that maps input ids to output ids.
pub trait Seq2SeqModel {
    fn generate(&mut self, input_ids: &[u32]) -> Result<Vec<u32>>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOptions {
    pub max_new_tokens: usize,
    /// `None` decodes greedily.
    pub temperature: Option<f64>,
    pub top_p: Option<f64>,
    pub seed: u64,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            max_new_tokens: 20,
            temperature: None,
            top_p: None,
            seed: 299792458,
        }
    }
}

/// Runs `text` through the model and writes `Output: <decoded>` to `out`.
pub fn generate_output<T, M, W>(
    tokenizer: &T,
    model: &mut M,
    text: &str,
    out: &mut W,
) -> Result<String>
where
    T: TextTokenizer,
    M: Seq2SeqModel,
    W: Write,
{
    if text.trim().is_empty() {
        return Err(Error::InvalidInput("Empty input text".to_string()));
    }

    let input_ids = tokenizer.encode(text)?;
    tracing::debug!("Encoded input into {} tokens", input_ids.len());

    let output_ids = model.generate(&input_ids)?;
    tracing::debug!("Generated {} tokens", output_ids.len());

    let decoded = tokenizer.decode(&output_ids)?;
    writeln!(out, "Output: {}", decoded)?;

    Ok(decoded)
}
