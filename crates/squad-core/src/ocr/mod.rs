//! OCR collaborator boundary.
//!
//! The recognition engine is a black box that turns image bytes into
//! `(text, confidence)` detections. Implement [`OcrEngine`] to plug in a
//! real engine; [`JsonDetectionsEngine`] reads pre-computed detection dumps
//! and [`fakes`] provides test doubles.

pub mod fakes;
mod json;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::{OcrError, RawDetection};

pub use json::JsonDetectionsEngine;

/// Optical character recognition engine.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Detect text regions in `image`. Fails on undecodable input.
    async fn recognize(&self, image: &[u8]) -> Result<Vec<RawDetection>, OcrError>;
}

#[async_trait]
impl<E: OcrEngine + ?Sized> OcrEngine for Arc<E> {
    async fn recognize(&self, image: &[u8]) -> Result<Vec<RawDetection>, OcrError> {
        (**self).recognize(image).await
    }
}

/// Engine wrapper that drops low-confidence detections and trims text.
///
/// This is the engine-side threshold: by the time detections reach the
/// candidate filter, only confident regions remain.
#[derive(Debug, Clone)]
pub struct ConfidenceFloor<E> {
    inner: E,
    min_confidence: f32,
}

impl<E> ConfidenceFloor<E> {
    pub fn new(inner: E, min_confidence: f32) -> Self {
        Self {
            inner,
            min_confidence,
        }
    }
}

#[async_trait]
impl<E: OcrEngine> OcrEngine for ConfidenceFloor<E> {
    async fn recognize(&self, image: &[u8]) -> Result<Vec<RawDetection>, OcrError> {
        let detections = self.inner.recognize(image).await?;
        let total = detections.len();
        let kept: Vec<RawDetection> = detections
            .into_iter()
            .filter(|d| d.confidence >= self.min_confidence)
            .map(|d| RawDetection::new(d.text.trim(), d.confidence))
            .collect();
        debug!(
            total,
            kept = kept.len(),
            min_confidence = self.min_confidence,
            "applied confidence floor"
        );
        Ok(kept)
    }
}
