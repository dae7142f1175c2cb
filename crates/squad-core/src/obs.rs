//! Structured observability hooks for reconstruction runs.
//!
//! This module provides:
//! - A run-scoped tracing span via `run_span`
//! - Emission functions for pipeline lifecycle events
//!
//! Every event carries a stable `event = "..."` field so log pipelines can
//! key on it regardless of message wording.

use tracing::{debug, info, warn};

/// Span tagged with the run id, for instrumenting a run's future.
///
/// # Example
///
/// ```ignore
/// async { /* ... */ }.instrument(run_span("0f9c...")).await;
/// // all tracing calls inside now carry run_id = "0f9c..."
/// ```
pub fn run_span(run_id: &str) -> tracing::Span {
    tracing::info_span!("squadscan.run", run_id = %run_id)
}

pub fn emit_pipeline_started(run_id: &str, detections: usize) {
    info!(event = "pipeline.started", run_id = %run_id, detections = detections);
}

pub fn emit_candidates_filtered(run_id: &str, detections: usize, candidates: usize) {
    info!(
        event = "pipeline.candidates_filtered",
        run_id = %run_id,
        detections = detections,
        candidates = candidates,
    );
}

pub fn emit_candidate_matched(candidate: &str, web_name: &str, method: &str, score: f64) {
    debug!(
        event = "pipeline.candidate_matched",
        candidate = %candidate,
        web_name = %web_name,
        method = %method,
        score = score,
    );
}

pub fn emit_candidate_unmatched(candidate: &str, best_score: f64) {
    warn!(
        event = "pipeline.candidate_unmatched",
        candidate = %candidate,
        best_score = best_score,
    );
}

/// Emit event: run completed with match and validity summary.
pub fn emit_pipeline_finished(
    run_id: &str,
    matched: usize,
    unmatched: usize,
    is_valid_team: bool,
    duration_ms: u64,
) {
    info!(
        event = "pipeline.finished",
        run_id = %run_id,
        matched = matched,
        unmatched = unmatched,
        is_valid_team = is_valid_team,
        duration_ms = duration_ms,
    );
}

/// Emit event: input could not be read; the run returns a failed result.
pub fn emit_input_failed(run_id: &str, error: &dyn std::fmt::Display) {
    warn!(event = "pipeline.input_failed", run_id = %run_id, error = %error);
}

/// Emit event: directory lookup failed; the run continues with no players.
pub fn emit_directory_degraded(run_id: &str, error: &dyn std::fmt::Display) {
    warn!(event = "directory.degraded", run_id = %run_id, error = %error);
}
