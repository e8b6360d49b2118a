use crate::config::AccessToken;
use crate::error::{Result, RetrievalFailure};
use crate::hub::{Registry, RegistryClient};
use std::io::Write;

pub const MISSING_TOKEN_WARNING: &str =
    "Warning: HF_TOKEN not found in environment variables. Assuming you are logged in via the Hugging Face CLI.";

pub const AUTHENTICATION_ERROR: &str = "❌ AUTHENTICATION ERROR: This is a private/gated model.";

pub const AUTHENTICATION_REMEDIATION: &str =
    "Set HF_TOKEN in your environment or .env file, or run 'huggingface-cli login' in your terminal.";

/// A tokenizer and model fetched for the same identifier.
pub struct Loaded<T, M> {
    pub tokenizer: T,
    pub model: M,
}

pub type LoadedFrom<S> = Loaded<<S as Registry>::Tokenizer, <S as Registry>::Model>;

/// Opens a registry session, authenticated when a token is available.
pub fn open_session<C, W>(
    client: &C,
    token: Option<&AccessToken>,
    out: &mut W,
) -> Result<C::Session>
where
    C: RegistryClient,
    W: Write,
{
    match token {
        Some(token) => {
            tracing::info!("Establishing authenticated session");
            client.establish_session(token)
        }
        None => {
            writeln!(out, "{}", MISSING_TOKEN_WARNING)?;
            client.anonymous()
        }
    }
}

/// Fetches tokenizer and model. Authorization failures get a remediation
/// message on `out`; every failure is returned untouched.
pub fn acquire<S, W>(session: &S, model_id: &str, out: &mut W) -> Result<LoadedFrom<S>>
where
    S: Registry,
    W: Write,
{
    writeln!(out, "Loading model: {}...", model_id)?;

    let fetched = session
        .fetch_tokenizer(model_id)
        .and_then(|tokenizer| Ok((tokenizer, session.fetch_model(model_id)?)));

    match fetched {
        Ok((tokenizer, model)) => {
            writeln!(out, "Model loaded successfully!")?;
            Ok(Loaded { tokenizer, model })
        }
        Err(err) => {
            if RetrievalFailure::classify(&err) == RetrievalFailure::AuthenticationRequired {
                if let Err(write_err) = write_remediation(out) {
                    tracing::warn!("Could not print authentication hint: {}", write_err);
                }
            }
            Err(err)
        }
    }
}

pub fn load<C, W>(
    client: &C,
    token: Option<&AccessToken>,
    model_id: &str,
    out: &mut W,
) -> Result<LoadedFrom<C::Session>>
where
    C: RegistryClient,
    W: Write,
{
    let session = open_session(client, token, out)?;
    acquire(&session, model_id, out)
}

fn write_remediation<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", AUTHENTICATION_ERROR)?;
    writeln!(out, "{}", AUTHENTICATION_REMEDIATION)?;
    writeln!(out)?;
    Ok(())
}
