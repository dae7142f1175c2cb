//! Detection dump decoder.

use async_trait::async_trait;

use super::OcrEngine;
use crate::domain::{OcrError, RawDetection};

/// Engine that treats the image payload as a JSON array of detections
/// (`[{"text": "...", "confidence": 0.9}, ...]`) produced by an external
/// recognition step.
#[derive(Debug, Clone, Default)]
pub struct JsonDetectionsEngine;

impl JsonDetectionsEngine {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl OcrEngine for JsonDetectionsEngine {
    async fn recognize(&self, image: &[u8]) -> Result<Vec<RawDetection>, OcrError> {
        if image.is_empty() {
            return Err(OcrError::EmptyImage);
        }
        let detections: Vec<RawDetection> =
            serde_json::from_slice(image).map_err(|e| OcrError::Undecodable(e.to_string()))?;

        if let Some(bad) = detections
            .iter()
            .find(|d| !(0.0..=1.0).contains(&d.confidence))
        {
            return Err(OcrError::Undecodable(format!(
                "confidence {} for {:?} is outside 0.0..=1.0",
                bad.confidence, bad.text
            )));
        }
        Ok(detections)
    }
}
