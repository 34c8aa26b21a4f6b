// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Synthesis Fallback
//!
//! Fills a category that retrieval could not serve. Attributes come from the
//! declarative rule table in `crate::domain::synthesis`; rendering is
//! delegated to the injected [`ImageSynthesizer`] under a bounded timeout.
//!
//! Rendering never fails the request: on error or timeout the placeholder
//! asset is used and a warning is logged. Persisting the virtual garment is
//! the only write of a recommendation call, and a failure there does
//! propagate.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::domain::garment::{Category, Fit, Garment, GenderTag, WarmthLevel};
use crate::domain::profile::{CommuteMethod, OwnerId};
use crate::domain::repository::{GarmentStore, RepositoryError};
use crate::domain::synthesis::{
    derive_attributes, ImageSynthesizer, SynthesisError, SynthesisKey, PLACEHOLDER_ASSET,
};

pub const DEFAULT_SYNTHESIS_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything needed to manufacture one virtual garment.
#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    pub owner: OwnerId,
    pub category: Category,
    pub style: String,
    pub warmth: WarmthLevel,
    pub commute: CommuteMethod,
    pub gender: GenderTag,
    pub fit: Fit,
}

pub struct SynthesisFallback {
    synthesizer: Arc<dyn ImageSynthesizer>,
    store: Arc<dyn GarmentStore>,
    timeout: Duration,
    placeholder: String,
}

impl SynthesisFallback {
    pub fn new(synthesizer: Arc<dyn ImageSynthesizer>, store: Arc<dyn GarmentStore>) -> Self {
        Self {
            synthesizer,
            store,
            timeout: DEFAULT_SYNTHESIS_TIMEOUT,
            placeholder: PLACEHOLDER_ASSET.to_string(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Derive, render and persist a virtual garment for the request.
    pub async fn synthesize(&self, request: SynthesisRequest) -> Result<Garment, RepositoryError> {
        let key = SynthesisKey {
            category: request.category,
            style: request.style,
            warmth: request.warmth,
            commute: request.commute,
            gender: request.gender,
            fit: request.fit,
        };
        let attributes = derive_attributes(&key);

        info!(
            owner = %request.owner,
            category = %attributes.category,
            subcategory = %attributes.subcategory,
            warmth = attributes.warmth_level.value(),
            "Synthesizing virtual garment"
        );

        let rendered = match tokio::time::timeout(self.timeout, self.synthesizer.generate(&attributes)).await {
            Ok(result) => result,
            Err(_) => Err(SynthesisError::Timeout(self.timeout.as_secs())),
        };

        let asset = match rendered {
            Ok(asset) => asset.0,
            Err(e) => {
                warn!(
                    owner = %request.owner,
                    category = %attributes.category,
                    error = %e,
                    "Image synthesis failed, using placeholder asset"
                );
                self.placeholder.clone()
            }
        };

        let garment = attributes.into_garment(request.owner, asset);
        self.store.insert(garment).await
    }
}
