mod cli;
mod config;
mod error;
mod generator;
mod hub;
mod model;

use candle_core::Device;
use clap::Parser;
use cli::Cli;
use config::Config;
use error::Result;
use hub::{HfClient, RegistryClient};
use model::Loaded;
use std::io::Write;

fn parse_device(device_str: &str) -> Result<Device> {
    match device_str {
        "cpu" => Ok(Device::Cpu),
        s if s.starts_with("cuda") => {
            let parts: Vec<&str> = s.split(':').collect();
            let ordinal = if parts.len() > 1 {
                parts[1].parse::<usize>().map_err(|_| {
                    error::Error::InvalidInput(format!("Invalid CUDA device: {}", s))
                })?
            } else {
                0
            };
            Device::new_cuda(ordinal).map_err(|e| {
                error::Error::ConfigError(format!("Failed to initialize CUDA device: {}", e))
            })
        }
        _ => Err(error::Error::InvalidInput(format!(
            "Unknown device: {}",
            device_str
        ))),
    }
}

/// Loads `model_id` through `client` and prints the generation for `text`.
fn run<C, W>(
    client: &C,
    config: &Config,
    model_id: &str,
    text: &str,
    out: &mut W,
) -> Result<String>
where
    C: RegistryClient,
    W: Write,
{
    let Loaded {
        tokenizer,
        mut model,
    } = model::load(client, config.hf_token.as_ref(), model_id, out)?;

    generator::generate_output(&tokenizer, &mut model, text, out)
}

fn main() -> Result<()> {
    // Real environment variables take precedence over .env entries.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let options = cli.generation_options()?;
    let device = parse_device(&cli.device)?;

    tracing::info!("Using device {:?}", device);

    let client = HfClient::new(&config, device, options);
    let mut stdout = std::io::stdout().lock();

    run(&client, &config, &cli.model, &cli.text, &mut stdout)?;

    Ok(())
}
