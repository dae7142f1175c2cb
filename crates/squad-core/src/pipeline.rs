//! Pipeline orchestrator.
//!
//! Sequences one reconstruction run:
//!
//! ```text
//! recognize -> filter -> match (concurrent, order-preserving)
//!           -> partition -> validate -> infer formation -> OcrResult
//! ```
//!
//! The OCR engine and the player directory are injected, never held as
//! process-wide state. The directory is asked for a fresh snapshot on every
//! run and nothing is cached between runs.
//!
//! Failure policy:
//! - OCR failure or an empty detection list is the only input failure; it
//!   becomes `success = false` with a descriptive validation error.
//! - A directory failure degrades to an empty snapshot, so every candidate
//!   ends up unmatched.
//! - Cancellation fails the whole run with
//!   [`PipelineError::Cancelled`](crate::domain::PipelineError::Cancelled).

use std::sync::Arc;
use std::time::Instant;

use squad_directory::{DirectorySnapshot, PlayerDirectory};
use tokio::sync::watch;
use tracing::{instrument, Instrument};

use crate::config::{PipelineConfig, SquadRules};
use crate::domain::{
    MatchMethod, MatchResult, OcrError, OcrResult, PipelineResult, RawDetection,
    Roster,
};
use crate::filter::filter_candidates;
use crate::formation::infer_formation;
use crate::matcher::NameMatcher;
use crate::obs;
use crate::ocr::OcrEngine;
use crate::parallel::{match_candidates_parallel, until_cancelled};
use crate::validator::validate_roster;

/// Squad reconstruction pipeline with injected collaborators.
#[derive(Clone)]
pub struct Pipeline {
    ocr: Arc<dyn OcrEngine>,
    directory: Arc<dyn PlayerDirectory>,
    config: PipelineConfig,
    rules: SquadRules,
}

impl Pipeline {
    pub fn new(
        ocr: Arc<dyn OcrEngine>,
        directory: Arc<dyn PlayerDirectory>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            ocr,
            directory,
            config,
            rules: SquadRules::standard(),
        }
    }

    /// Override the squad composition rules.
    pub fn with_rules(mut self, rules: SquadRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn rules(&self) -> &SquadRules {
        &self.rules
    }

    /// Process a screenshot. Never fails: every outcome is an `OcrResult`.
    pub async fn process(&self, image: &[u8]) -> OcrResult {
        let (_keep_alive, cancel) = watch::channel(false);
        self.process_with_cancel(image, cancel)
            .await
            .unwrap_or_else(OcrResult::input_failure)
    }

    /// Process a screenshot, aborting when `cancel` becomes `true`.
    ///
    /// Returns `Err(PipelineError::Cancelled)` instead of a partial result.
    #[instrument(skip_all, fields(image_bytes = image.len()))]
    pub async fn process_with_cancel(
        &self,
        image: &[u8],
        mut cancel: watch::Receiver<bool>,
    ) -> PipelineResult<OcrResult> {
        let run_id = uuid::Uuid::new_v4().to_string();
        let span = obs::run_span(&run_id);

        async {
            let recognized = until_cancelled(&mut cancel, self.ocr.recognize(image)).await?;
            match recognized {
                Ok(detections) => self.reconstruct(&run_id, detections, &mut cancel).await,
                Err(e) => {
                    obs::emit_input_failed(&run_id, &e);
                    Ok(OcrResult::input_failure(e))
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Run the post-OCR stages on detections the caller already holds.
    pub async fn process_detections(&self, detections: Vec<RawDetection>) -> OcrResult {
        let (_keep_alive, cancel) = watch::channel(false);
        self.process_detections_with_cancel(detections, cancel)
            .await
            .unwrap_or_else(OcrResult::input_failure)
    }

    pub async fn process_detections_with_cancel(
        &self,
        detections: Vec<RawDetection>,
        mut cancel: watch::Receiver<bool>,
    ) -> PipelineResult<OcrResult> {
        let run_id = uuid::Uuid::new_v4().to_string();
        let span = obs::run_span(&run_id);
        self.reconstruct(&run_id, detections, &mut cancel)
            .instrument(span)
            .await
    }

    async fn reconstruct(
        &self,
        run_id: &str,
        detections: Vec<RawDetection>,
        cancel: &mut watch::Receiver<bool>,
    ) -> PipelineResult<OcrResult> {
        let started = Instant::now();

        if detections.is_empty() {
            obs::emit_input_failed(run_id, &OcrError::NoDetections);
            return Ok(OcrResult::input_failure(OcrError::NoDetections));
        }
        obs::emit_pipeline_started(run_id, detections.len());

        let candidates = filter_candidates(&detections);
        obs::emit_candidates_filtered(run_id, detections.len(), candidates.len());

        let results = if candidates.is_empty() {
            Vec::new()
        } else {
            let snapshot = self.snapshot(run_id, cancel).await?;
            match_candidates_parallel(
                &candidates,
                snapshot,
                NameMatcher::new(self.config.fuzzy_threshold),
                self.config.max_concurrent,
                cancel,
            )
            .await?
        };
        results.iter().for_each(log_match);

        let roster = Roster::partition(results);
        let report = validate_roster(&roster.matched, &self.rules);
        let formation = infer_formation(&roster.matched);

        obs::emit_pipeline_finished(
            run_id,
            roster.matched.len(),
            roster.unmatched.len(),
            report.is_valid,
            started.elapsed().as_millis() as u64,
        );

        Ok(OcrResult::assemble(&candidates, roster, report, formation))
    }

    async fn snapshot(
        &self,
        run_id: &str,
        cancel: &mut watch::Receiver<bool>,
    ) -> PipelineResult<Arc<DirectorySnapshot>> {
        let snapshot = match until_cancelled(cancel, self.directory.snapshot()).await? {
            Ok(snapshot) => snapshot,
            Err(e) => {
                obs::emit_directory_degraded(run_id, &e);
                DirectorySnapshot::empty()
            }
        };
        Ok(Arc::new(snapshot))
    }
}

fn log_match(result: &MatchResult) {
    match (&result.player, result.method) {
        (Some(player), method) => obs::emit_candidate_matched(
            &result.candidate.text,
            &player.web_name,
            method_name(method),
            result.score,
        ),
        (None, _) => obs::emit_candidate_unmatched(&result.candidate.text, result.score),
    }
}

fn method_name(method: MatchMethod) -> &'static str {
    match method {
        MatchMethod::Exact => "exact",
        MatchMethod::Fuzzy => "fuzzy",
        MatchMethod::None => "none",
    }
}
