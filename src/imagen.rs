//! HTTP backend for the image-generation collaborator.
//!
//! Talks to a predict-style REST API: one JSON request per prompt, one
//! base64-encoded image back. The call is single-shot by contract; every
//! provider-side failure collapses into `Error::GenerationError`.

use std::time::Duration;

use base64::Engine as _;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};
use crate::{GeneratorConfig, ImageGenerator};

#[derive(Serialize)]
struct PredictRequest<'a> {
    instances: Vec<Instance<'a>>,
    parameters: Parameters,
}

#[derive(Serialize)]
struct Instance<'a> {
    prompt: &'a str,
}

#[derive(Serialize)]
struct Parameters {
    #[serde(rename = "sampleCount")]
    sample_count: u32,
}

#[derive(Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Deserialize)]
struct Prediction {
    #[serde(rename = "bytesBase64Encoded")]
    bytes_base64_encoded: Option<String>,
}

/// Blocking client for a predict-style image API
pub struct ImagenClient {
    client: Client,
    predict_url: Url,
    config: GeneratorConfig,
}

impl ImagenClient {
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(Error::ConfigError("API key must not be empty".into()));
        }

        let base = Url::parse(&config.endpoint)
            .map_err(|e| Error::ConfigError(format!("Invalid endpoint: {}", e)))?;
        let predict_url = base
            .join(&format!("/v1beta/models/{}:predict", config.model))
            .map_err(|e| Error::ConfigError(format!("Invalid model path: {}", e)))?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| {
                Error::InitializationError(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self { client, predict_url, config })
    }
}

impl ImageGenerator for ImagenClient {
    fn generate(&self, prompt: &str) -> Result<String> {
        let body = serde_json::to_string(&PredictRequest {
            instances: vec![Instance { prompt }],
            parameters: Parameters { sample_count: 1 },
        })
        .map_err(|e| Error::GenerationError(format!("request encoding failed: {}", e)))?;

        log::debug!("predict request to {}", self.predict_url);
        let resp = self
            .client
            .post(self.predict_url.clone())
            .header("User-Agent", self.config.user_agent.clone())
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", self.config.api_key.clone())
            .body(body)
            .send()
            .map_err(|e| Error::GenerationError(format!("request failed: {}", e)))?;

        let status = resp.status();
        let text = resp
            .text()
            .map_err(|e| Error::GenerationError(format!("failed to read response: {}", e)))?;

        if !status.is_success() {
            let detail = text.trim();
            return Err(Error::GenerationError(if detail.is_empty() {
                format!("provider returned HTTP {}", status)
            } else {
                format!("provider returned HTTP {}: {}", status, detail)
            }));
        }

        let parsed: PredictResponse = serde_json::from_str(&text)
            .map_err(|e| Error::GenerationError(format!("malformed response: {}", e)))?;

        let payload = parsed
            .predictions
            .into_iter()
            .next()
            .and_then(|p| p.bytes_base64_encoded)
            .ok_or_else(|| Error::GenerationError("response carried no image".into()))?;

        // Validate the payload before handing it to the presentation layer.
        base64::engine::general_purpose::STANDARD
            .decode(payload.as_bytes())
            .map_err(|e| Error::GenerationError(format!("invalid image payload: {}", e)))?;

        Ok(format!("data:image/png;base64,{}", payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(endpoint: &str) -> GeneratorConfig {
        GeneratorConfig {
            api_key: "test-key".to_string(),
            endpoint: endpoint.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn rejects_an_empty_api_key() {
        let cfg = GeneratorConfig::default();
        match ImagenClient::new(cfg) {
            Err(Error::ConfigError(_)) => {}
            other => panic!("expected ConfigError, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn builds_the_predict_url_from_endpoint_and_model() {
        let client = ImagenClient::new(config("https://example.test")).expect("client");
        assert_eq!(
            client.predict_url.as_str(),
            "https://example.test/v1beta/models/imagen-3.0-generate-002:predict"
        );
    }

    #[test]
    fn rejects_an_unparsable_endpoint() {
        match ImagenClient::new(config("not a url")) {
            Err(Error::ConfigError(_)) => {}
            other => panic!("expected ConfigError, got {:?}", other.map(|_| ())),
        }
    }
}
