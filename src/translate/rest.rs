use super::Translator;
use crate::config::TranslatorConfig;
use crate::error::{RelayError, Result};
use serde::Deserialize;
use uuid::Uuid;

/// Client for the Azure Translator v3 REST API.
pub struct AzureTranslator {
    client: reqwest::Client,
    endpoint: String,
    key: String,
    region: String,
}

#[derive(Deserialize)]
struct TranslateResult {
    translations: Vec<Translation>,
}

#[derive(Deserialize)]
struct Translation {
    text: String,
}

impl AzureTranslator {
    pub fn new(cfg: &TranslatorConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: cfg.endpoint.trim_end_matches('/').to_string(),
            key: cfg.key.clone(),
            region: cfg.region.clone(),
        }
    }
}

#[async_trait::async_trait]
impl Translator for AzureTranslator {
    async fn translate(&self, texts: &[String], from: &str, to: &str) -> Result<Vec<String>> {
        let url = format!(
            "{}/translate?api-version=3.0&from={}&to={}",
            self.endpoint, from, to
        );

        let body: Vec<serde_json::Value> = texts
            .iter()
            .map(|t| serde_json::json!({ "Text": t }))
            .collect();

        let response = self
            .client
            .post(&url)
            .header("Ocp-Apim-Subscription-Key", &self.key)
            .header("Ocp-Apim-Subscription-Region", &self.region)
            .header("X-ClientTraceId", Uuid::new_v4().to_string())
            .json(&body)
            .send()
            .await
            .map_err(|e| RelayError::Translation(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RelayError::Translation(format!(
                "translator returned {status}"
            )));
        }

        let results: Vec<TranslateResult> = response
            .json()
            .await
            .map_err(|e| RelayError::Translation(format!("malformed response: {e}")))?;

        if results.len() != texts.len() {
            return Err(RelayError::Translation(format!(
                "expected {} translations, got {}",
                texts.len(),
                results.len()
            )));
        }

        results
            .into_iter()
            .map(|result| {
                result
                    .translations
                    .into_iter()
                    .next()
                    .map(|t| t.text)
                    .ok_or_else(|| RelayError::Translation("empty translation list".to_string()))
            })
            .collect()
    }
}
