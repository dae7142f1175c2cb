//! Concurrent candidate matching.
//!
//! Each candidate is matched in its own Tokio task against a shared,
//! read-only snapshot. A semaphore bounds how many run at once, and every
//! task is tagged with its input index so results are reassembled in
//! candidate order regardless of completion order.
//!
//! Cancellation is cooperative: when the watch signal flips to `true`,
//! outstanding tasks are aborted and the whole batch fails with
//! [`PipelineError::Cancelled`]. A partial batch is never returned.

use std::future::Future;
use std::sync::Arc;

use squad_directory::DirectorySnapshot;
use tokio::sync::{watch, Semaphore};
use tokio::task::JoinSet;
use tracing::debug;

use crate::domain::{CandidateName, MatchResult, PipelineError, PipelineResult};
use crate::matcher::NameMatcher;

/// Match every candidate concurrently, returning results in input order.
pub async fn match_candidates_parallel(
    candidates: &[CandidateName],
    snapshot: Arc<DirectorySnapshot>,
    matcher: NameMatcher,
    max_concurrent: usize,
    cancel: &mut watch::Receiver<bool>,
) -> PipelineResult<Vec<MatchResult>> {
    if *cancel.borrow() {
        return Err(PipelineError::Cancelled);
    }

    // Semaphore enforces max_concurrent
    let sem = Arc::new(Semaphore::new(max_concurrent.max(1)));
    let mut join_set = JoinSet::new();

    for (idx, candidate) in candidates.iter().cloned().enumerate() {
        let snapshot = Arc::clone(&snapshot);
        let sem = Arc::clone(&sem);
        join_set.spawn(async move {
            let _permit = sem.acquire_owned().await.ok();
            (idx, matcher.match_candidate(candidate, &snapshot))
        });
    }

    let mut slots = ResultSlots::new(candidates.len());
    loop {
        let joined = tokio::select! {
            biased;
            _ = cancelled(cancel) => {
                join_set.abort_all();
                debug!(pending = join_set.len(), "match batch cancelled");
                return Err(PipelineError::Cancelled);
            }
            next = join_set.join_next() => next,
        };
        let Some(joined) = joined else { break };
        let (idx, result) =
            joined.map_err(|e| PipelineError::TaskFailed(format!("match task join error: {e}")))?;
        slots.fill(idx, result);
    }

    slots.into_ordered()
}

/// Index-addressed buffer that puts results back in candidate order,
/// whatever order the tasks finish in.
struct ResultSlots {
    slots: Vec<Option<MatchResult>>,
}

impl ResultSlots {
    fn new(len: usize) -> Self {
        Self {
            slots: vec![None; len],
        }
    }

    fn fill(&mut self, idx: usize, result: MatchResult) {
        self.slots[idx] = Some(result);
    }

    /// Fails if any candidate never reported.
    fn into_ordered(self) -> PipelineResult<Vec<MatchResult>> {
        self.slots
            .into_iter()
            .enumerate()
            .map(|(idx, slot)| {
                slot.ok_or_else(|| {
                    PipelineError::TaskFailed(format!("missing match result for candidate {idx}"))
                })
            })
            .collect()
    }
}

/// Run `fut` unless the cancel signal fires first.
pub async fn until_cancelled<F: Future>(
    cancel: &mut watch::Receiver<bool>,
    fut: F,
) -> PipelineResult<F::Output> {
    if *cancel.borrow() {
        return Err(PipelineError::Cancelled);
    }
    tokio::select! {
        biased;
        _ = cancelled(cancel) => Err(PipelineError::Cancelled),
        out = fut => Ok(out),
    }
}

/// Resolves once the signal is `true`. A dropped sender can no longer
/// cancel, so this then never resolves.
async fn cancelled(cancel: &mut watch::Receiver<bool>) {
    loop {
        if *cancel.borrow_and_update() {
            return;
        }
        if cancel.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MatchMethod;
    use squad_directory::{PlayerRecord, Position};

    fn snapshot() -> Arc<DirectorySnapshot> {
        Arc::new(DirectorySnapshot::new(
            (1..=20)
                .map(|id| {
                    let name = format!("Player{id:02}");
                    PlayerRecord::new(id, name.clone(), "", name, id, Position::Defender)
                })
                .collect(),
        ))
    }

    fn candidates() -> Vec<CandidateName> {
        (1..=20)
            .rev()
            .map(|id| CandidateName {
                text: format!("Player{id:02}"),
                confidence: id as f32 / 100.0,
            })
            .collect()
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_results_follow_input_order() {
        let (_tx, mut rx) = watch::channel(false);
        let input = candidates();

        let results =
            match_candidates_parallel(&input, snapshot(), NameMatcher::default(), 4, &mut rx)
                .await
                .unwrap();

        assert_eq!(results.len(), 20);
        for (candidate, result) in input.iter().zip(&results) {
            assert_eq!(&result.candidate, candidate);
            assert_eq!(result.method, MatchMethod::Exact);
            assert_eq!(result.player.as_ref().unwrap().web_name, candidate.text);
        }
    }

    #[test]
    fn test_slots_reorder_reversed_completions() {
        let input = candidates();
        let snap = snapshot();
        let matcher = NameMatcher::default();

        let mut slots = ResultSlots::new(input.len());
        for (idx, candidate) in input.iter().cloned().enumerate().rev() {
            slots.fill(idx, matcher.match_candidate(candidate, &snap));
        }

        let ordered = slots.into_ordered().unwrap();
        let texts: Vec<&str> = ordered.iter().map(|r| r.candidate.text.as_str()).collect();
        let expected: Vec<&str> = input.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, expected);
    }

    #[test]
    fn test_slots_reorder_interleaved_completions() {
        let input = candidates();
        let snap = snapshot();
        let matcher = NameMatcher::default();

        // odd indices finish first, then even ones from the back
        let mut finish_order: Vec<usize> = (0..input.len()).filter(|i| i % 2 == 1).collect();
        finish_order.extend((0..input.len()).filter(|i| i % 2 == 0).rev());

        let mut slots = ResultSlots::new(input.len());
        for idx in finish_order {
            slots.fill(idx, matcher.match_candidate(input[idx].clone(), &snap));
        }

        let ordered = slots.into_ordered().unwrap();
        for (candidate, result) in input.iter().zip(&ordered) {
            assert_eq!(&result.candidate, candidate);
        }
    }

    #[test]
    fn test_slots_with_missing_result_fail() {
        let input = candidates();
        let snap = snapshot();
        let mut slots = ResultSlots::new(2);
        slots.fill(1, NameMatcher::default().match_candidate(input[1].clone(), &snap));

        let err = slots.into_ordered().unwrap_err();
        assert!(matches!(err, PipelineError::TaskFailed(ref msg) if msg.contains("candidate 0")));
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let (_tx, mut rx) = watch::channel(false);
        let results =
            match_candidates_parallel(&[], snapshot(), NameMatcher::default(), 2, &mut rx)
                .await
                .unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_already_cancelled_batch_fails() {
        let (tx, mut rx) = watch::channel(false);
        tx.send(true).unwrap();
        let err = match_candidates_parallel(
            &candidates(),
            snapshot(),
            NameMatcher::default(),
            2,
            &mut rx,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, PipelineError::Cancelled));
    }

    #[tokio::test]
    async fn test_until_cancelled_with_dropped_sender_completes() {
        let (tx, mut rx) = watch::channel(false);
        drop(tx);
        let out = until_cancelled(&mut rx, async { 7 }).await.unwrap();
        assert_eq!(out, 7);
    }

    #[tokio::test]
    async fn test_until_cancelled_interrupts_pending_future() {
        let (tx, mut rx) = watch::channel(false);
        tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            let _ = tx.send(true);
        });
        let err = until_cancelled(&mut rx, std::future::pending::<()>())
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::Cancelled));
    }
}
