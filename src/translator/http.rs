use std::time::Duration;

use anyhow::{Context, Result, bail};
use reqwest::blocking::Client;

use super::{TranslationRequest, TranslationResponse, Translator};

const TRANSLATE_ENDPOINT: &str = "translate";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Translation engine reached over HTTP.
///
/// Sends `POST {api_url}/translate` with the request as JSON and a bearer API
/// key. The optional model name travels in the `X-Lingo-Model` header.
pub struct HttpTranslator {
    client: Client,
    endpoint: String,
    api_key: String,
    model: Option<String>,
}

impl HttpTranslator {
    pub fn new(api_url: &str, api_key: String, model: Option<String>) -> Result<Self> {
        if api_key.trim().is_empty() {
            bail!(
                "No API key provided.\n\
                 Hint: pass --api-key or set the LINGO_API_KEY environment variable."
            );
        }

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            endpoint: endpoint_url(api_url),
            api_key,
            model,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Translator for HttpTranslator {
    fn translate(&self, request: &TranslationRequest) -> Result<TranslationResponse> {
        let mut builder = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(request);
        if let Some(model) = &self.model {
            builder = builder.header("X-Lingo-Model", model);
        }

        let response = builder
            .send()
            .with_context(|| format!("Failed to send request to {}", self.endpoint))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().unwrap_or_default();
            bail!("Translation API error ({}): {}", status, body);
        }

        response
            .json()
            .context("Failed to parse translation API response")
    }
}

fn endpoint_url(api_url: &str) -> String {
    format!("{}/{}", api_url.trim_end_matches('/'), TRANSLATE_ENDPOINT)
}
