use crate::error::{Error, Result};
use candle_core::pickle;
use hf_hub::api::sync::{ApiError, ApiRepo};
use std::path::{Path, PathBuf};

const TOKENIZER_FILE: &str = "tokenizer.json";
const CONFIG_FILE: &str = "config.json";
const SAFETENSORS_FILE: &str = "model.safetensors";
const PYTORCH_FILE: &str = "pytorch_model.bin";

const ERROR_CODE_HEADER: &str = "X-Error-Code";
const GATED_REPO_CODE: &str = "GatedRepo";

/// Local paths of the files needed to build a model.
#[derive(Debug, Clone)]
pub struct ModelFiles {
    pub config: PathBuf,
    pub weights: PathBuf,
}

pub fn fetch_tokenizer_file(repo: &ApiRepo) -> Result<PathBuf> {
    tracing::info!("Fetching {}", TOKENIZER_FILE);

    repo.get(TOKENIZER_FILE).map_err(|e| {
        Error::DownloadFailed(format!("Could not fetch tokenizer: {}", describe(&e)))
    })
}

pub fn fetch_model_files(repo: &ApiRepo) -> Result<ModelFiles> {
    tracing::info!("Fetching model files...");

    let config = repo.get(CONFIG_FILE).map_err(|e| {
        Error::DownloadFailed(format!("Could not fetch config: {}", describe(&e)))
    })?;

    let weights = match repo.get(SAFETENSORS_FILE) {
        Ok(path) => path,
        Err(safetensors_err) => {
            tracing::debug!(
                "{} unavailable ({}), trying {}",
                SAFETENSORS_FILE,
                safetensors_err,
                PYTORCH_FILE
            );

            let pytorch_file = repo.get(PYTORCH_FILE).map_err(|e| {
                Error::DownloadFailed(format!(
                    "Could not find model file: {}: {}; {}: {}",
                    SAFETENSORS_FILE,
                    describe(&safetensors_err),
                    PYTORCH_FILE,
                    describe(&e)
                ))
            })?;

            let model_dir = pytorch_file
                .parent()
                .ok_or_else(|| Error::DownloadFailed("Invalid model path".to_string()))?;
            ensure_safetensors(model_dir)?
        }
    };

    Ok(ModelFiles { config, weights })
}

/// Renders a hub error, naming gated repos the Hub flags with `X-Error-Code: GatedRepo`.
fn describe(err: &ApiError) -> String {
    if let ApiError::RequestError(request_err) = err {
        let request_err: &ureq::Error = request_err;
        if let ureq::Error::Status(_, response) = request_err {
            if response.header(ERROR_CODE_HEADER) == Some(GATED_REPO_CODE) {
                return format!("{} (gated repo)", err);
            }
        }
    }
    err.to_string()
}

/// Returns the safetensors weights in `model_dir`, converting `pytorch_model.bin`
/// when that is all there is.
pub fn ensure_safetensors(model_dir: &Path) -> Result<PathBuf> {
    let pytorch_file = model_dir.join(PYTORCH_FILE);
    let safetensors_file = model_dir.join(SAFETENSORS_FILE);

    if safetensors_file.exists() {
        return Ok(safetensors_file);
    }

    if !pytorch_file.exists() {
        return Err(Error::ModelLoadFailed(format!(
            "No {} or {} in {:?}",
            SAFETENSORS_FILE, PYTORCH_FILE, model_dir
        )));
    }

    tracing::info!("Converting {} to {}...", PYTORCH_FILE, SAFETENSORS_FILE);

    let tensors_vec = pickle::read_all(&pytorch_file)
        .map_err(|e| Error::ModelLoadFailed(format!("Failed to read PyTorch file: {}", e)))?;

    tracing::info!("Loading {} tensors from PyTorch model", tensors_vec.len());

    let tensors: std::collections::HashMap<_, _> = tensors_vec.into_iter().collect();

    // Written next to the cached snapshot so later runs resolve it without a download.
    candle_core::safetensors::save(&tensors, &safetensors_file)
        .map_err(|e| Error::ModelLoadFailed(format!("Failed to save SafeTensors: {}", e)))?;

    tracing::info!("Converted to SafeTensors format");

    Ok(safetensors_file)
}
