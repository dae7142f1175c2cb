//! OCR test doubles.

use async_trait::async_trait;

use super::OcrEngine;
use crate::domain::{OcrError, RawDetection};

/// Returns the same detections for every image.
#[derive(Debug, Clone, Default)]
pub struct ScriptedOcrEngine {
    detections: Vec<RawDetection>,
}

impl ScriptedOcrEngine {
    pub fn new(detections: Vec<RawDetection>) -> Self {
        Self { detections }
    }

    /// Build from `(text, confidence)` pairs.
    pub fn from_pairs(pairs: &[(&str, f32)]) -> Self {
        Self::new(
            pairs
                .iter()
                .map(|(text, conf)| RawDetection::new(*text, *conf))
                .collect(),
        )
    }
}

#[async_trait]
impl OcrEngine for ScriptedOcrEngine {
    async fn recognize(&self, _image: &[u8]) -> Result<Vec<RawDetection>, OcrError> {
        Ok(self.detections.clone())
    }
}

/// Fails every image as undecodable.
#[derive(Debug, Clone)]
pub struct BrokenOcrEngine {
    reason: String,
}

impl BrokenOcrEngine {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl OcrEngine for BrokenOcrEngine {
    async fn recognize(&self, _image: &[u8]) -> Result<Vec<RawDetection>, OcrError> {
        Err(OcrError::Undecodable(self.reason.clone()))
    }
}
