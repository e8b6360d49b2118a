use crate::error::{Error, Result};
use crate::generator::TextTokenizer;
use std::path::Path;

pub struct HfTokenizer {
    inner: tokenizers::Tokenizer,
}

impl HfTokenizer {
    pub fn from_file(path: &Path) -> Result<Self> {
        let inner = tokenizers::Tokenizer::from_file(path)
            .map_err(|e| Error::ModelLoadFailed(format!("Failed to load tokenizer: {}", e)))?;

        tracing::info!("Tokenizer loaded from {:?}", path);
        Ok(Self { inner })
    }
}

impl TextTokenizer for HfTokenizer {
    fn encode(&self, text: &str) -> Result<Vec<u32>> {
        let encoding = self
            .inner
            .encode(text, true)
            .map_err(|e| Error::GenerationError(format!("Tokenization failed: {}", e)))?;

        Ok(encoding.get_ids().to_vec())
    }

    fn decode(&self, ids: &[u32]) -> Result<String> {
        self.inner
            .decode(ids, true)
            .map_err(|e| Error::GenerationError(format!("Detokenization failed: {}", e)))
    }
}
