// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// HTTP Image Synthesizer Adapter
//
// Anti-Corruption Layer for OpenAI-compatible image generation APIs
// (SiliconFlow / Kolors by default). Renders a product photograph of a
// virtual garment, downloads the result and stores it under the asset
// directory.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::engine_config::SynthesisConfig;
use crate::domain::garment::ColorPattern;
use crate::domain::synthesis::{AssetRef, AttributeSet, ImageSynthesizer, SynthesisError};

const NEGATIVE_PROMPT: &str = "human, person, face, hand, body, ugly, deformed, noisy, blurry, \
low contrast, text, watermark, messy background, mannequin";

pub struct HttpImageSynthesizer {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
    image_size: String,
    inference_steps: u32,
    guidance_scale: f32,
    asset_dir: PathBuf,
}

#[derive(Serialize)]
struct GenerationRequest<'a> {
    model: &'a str,
    prompt: String,
    negative_prompt: &'a str,
    image_size: &'a str,
    batch_size: u32,
    num_inference_steps: u32,
    guidance_scale: f32,
}

#[derive(Deserialize)]
struct GenerationResponse {
    #[serde(default)]
    data: Vec<GeneratedImage>,
}

#[derive(Deserialize)]
struct GeneratedImage {
    url: Option<String>,
}

impl HttpImageSynthesizer {
    pub fn from_config(config: &SynthesisConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: config.endpoint.clone(),
            api_key: config.resolved_api_key(),
            model: config.model.clone(),
            image_size: config.image_size.clone(),
            inference_steps: config.inference_steps,
            guidance_scale: config.guidance_scale,
            asset_dir: config.asset_dir.clone(),
        }
    }

    async fn request_image(&self, prompt: String) -> Result<String, SynthesisError> {
        let request = GenerationRequest {
            model: &self.model,
            prompt,
            negative_prompt: NEGATIVE_PROMPT,
            image_size: &self.image_size,
            batch_size: 1,
            num_inference_steps: self.inference_steps,
            guidance_scale: self.guidance_scale,
        };

        let url = format!("{}/images/generations", self.endpoint.trim_end_matches('/'));
        let mut builder = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.header("Authorization", format!("Bearer {}", key));
        }

        let response = builder
            .send()
            .await
            .map_err(|e| SynthesisError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(SynthesisError::Provider(format!("HTTP {}: {}", status, error_text)));
        }

        let body: GenerationResponse = response
            .json()
            .await
            .map_err(|e| SynthesisError::Provider(format!("Failed to parse response: {}", e)))?;

        body.data
            .into_iter()
            .next()
            .and_then(|image| image.url)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| SynthesisError::Provider("Provider returned no image URL".into()))
    }

    async fn download(&self, image_url: &str) -> Result<AssetRef, SynthesisError> {
        let response = self
            .client
            .get(image_url)
            .send()
            .await
            .map_err(|e| SynthesisError::Download(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SynthesisError::Download(format!("HTTP {}", response.status())));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SynthesisError::Download(e.to_string()))?;

        tokio::fs::create_dir_all(&self.asset_dir)
            .await
            .map_err(|e| SynthesisError::Download(format!("Failed to create asset dir: {}", e)))?;

        let path = self.asset_dir.join(format!("auto_{}.jpg", Uuid::new_v4().simple()));
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|e| SynthesisError::Download(format!("Failed to write asset: {}", e)))?;

        debug!(path = %path.display(), bytes = bytes.len(), "Stored synthesized asset");
        Ok(AssetRef(path.to_string_lossy().replace('\\', "/")))
    }
}

#[async_trait]
impl ImageSynthesizer for HttpImageSynthesizer {
    async fn generate(&self, attributes: &AttributeSet) -> Result<AssetRef, SynthesisError> {
        let prompt = product_prompt(attributes);
        info!(model = %self.model, subcategory = %attributes.subcategory, "Requesting product image");
        let image_url = self.request_image(prompt).await?;
        self.download(&image_url).await
    }
}

/// Product-photography prompt for a single garment.
pub fn product_prompt(attributes: &AttributeSet) -> String {
    let mut desc = format!("{} {}", attributes.main_color, attributes.subcategory);
    if let Some(material) = attributes.materials.first().filter(|m| !m.is_empty()) {
        desc.push_str(&format!(", made of {}", material));
    }
    if let Some(pattern) = pattern_name(attributes.color_pattern) {
        desc.push_str(&format!(", with {} pattern", pattern));
    }
    let style = attributes.styles.first().map(String::as_str).unwrap_or_default();

    format!(
        "Professional product photography of a {}, {} style. \
Studio lighting, clean solid background, high resolution, 8k, detailed texture, \
centered composition, fashion magazine style.",
        desc, style
    )
}

fn pattern_name(pattern: ColorPattern) -> Option<&'static str> {
    match pattern {
        ColorPattern::Solid => None,
        ColorPattern::Striped => Some("striped"),
        ColorPattern::Plaid => Some("plaid"),
        ColorPattern::Printed => Some("printed"),
        ColorPattern::Mixed => Some("color-block"),
    }
}
