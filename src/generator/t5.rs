use crate::error::{Error, Result};
use crate::generator::{GenerationOptions, Seq2SeqModel};
use crate::model::ModelFiles;
use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::generation::LogitsProcessor;
use candle_transformers::models::t5;

pub struct T5Generator {
    model: t5::T5ForConditionalGeneration,
    config: t5::Config,
    device: Device,
    options: GenerationOptions,
}

impl T5Generator {
    pub fn load(files: &ModelFiles, device: Device, options: GenerationOptions) -> Result<Self> {
        tracing::info!("Loading model from: {:?}", files.weights);

        let config_content = std::fs::read_to_string(&files.config)
            .map_err(|e| Error::ModelLoadFailed(format!("Failed to read config: {}", e)))?;

        let config: t5::Config = serde_json::from_str(&config_content)
            .map_err(|e| Error::ModelLoadFailed(format!("Failed to parse config: {}", e)))?;

        // SAFETY: the weights file lives in the hub cache and is not modified while mapped.
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[files.weights.clone()], DType::F32, &device)
                .map_err(|e| Error::ModelLoadFailed(format!("Failed to load safetensors: {}", e)))?
        };

        let model = t5::T5ForConditionalGeneration::load(vb, &config)
            .map_err(|e| Error::ModelLoadFailed(format!("Failed to build T5 model: {}", e)))?;

        tracing::info!("Model loaded successfully");
        tracing::info!("  Hidden size: {}", config.d_model);
        tracing::info!("  Layers: {}", config.num_layers);
        tracing::info!("  Vocabulary: {}", config.vocab_size);

        Ok(Self {
            model,
            config,
            device,
            options,
        })
    }

    fn decoder_start_token(&self) -> u32 {
        self.config
            .decoder_start_token_id
            .unwrap_or(self.config.pad_token_id) as u32
    }

    fn decode_loop(&mut self, input_ids: &[u32]) -> candle_core::Result<Vec<u32>> {
        let input = Tensor::new(input_ids, &self.device)?.unsqueeze(0)?;
        let encoder_output = self.model.encode(&input)?;

        let mut logits_processor = LogitsProcessor::new(
            self.options.seed,
            self.options.temperature,
            self.options.top_p,
        );

        let mut output_ids = vec![self.decoder_start_token()];
        for index in 0..self.options.max_new_tokens {
            let decoder_ids = if index == 0 || !self.config.use_cache {
                Tensor::new(output_ids.as_slice(), &self.device)?.unsqueeze(0)?
            } else {
                let last = output_ids[output_ids.len() - 1];
                Tensor::new(&[last], &self.device)?.unsqueeze(0)?
            };

            let logits = self
                .model
                .decode(&decoder_ids, &encoder_output)?
                .squeeze(0)?;
            let next = logits_processor.sample(&logits)?;
            if next as usize == self.config.eos_token_id {
                break;
            }
            output_ids.push(next);
        }

        output_ids.remove(0);
        Ok(output_ids)
    }
}

impl Seq2SeqModel for T5Generator {
    fn generate(&mut self, input_ids: &[u32]) -> Result<Vec<u32>> {
        if input_ids.is_empty() {
            return Err(Error::InvalidInput("No input tokens".to_string()));
        }

        let result = self.decode_loop(input_ids);
        self.model.clear_kv_cache();

        result.map_err(|e| Error::GenerationError(e.to_string()))
    }
}
