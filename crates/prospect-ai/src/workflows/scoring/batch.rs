use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use chrono::{DateTime, Utc};

use super::signals::{IntentSignalBundle, ScoreResult};
use super::IntentScoringEngine;

/// Score a batch of independent bundles in parallel, preserving input order.
///
/// Records never share state, so the batch is an embarrassingly parallel map:
/// a worker pool bounded by host parallelism pulls indices off an atomic
/// cursor. Bounding the pool keeps a large batch from overwhelming whatever
/// sits downstream of the callers.
pub fn score_all(
    engine: &IntentScoringEngine,
    bundles: &[IntentSignalBundle],
    scored_at: DateTime<Utc>,
) -> Vec<ScoreResult> {
    if bundles.is_empty() {
        return Vec::new();
    }

    let workers = thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
        .min(bundles.len());

    let cursor = AtomicUsize::new(0);
    let mut indexed: Vec<(usize, ScoreResult)> = thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|_| {
                scope.spawn(|| {
                    let mut local = Vec::new();
                    loop {
                        let index = cursor.fetch_add(1, Ordering::Relaxed);
                        if index >= bundles.len() {
                            break;
                        }
                        local.push((index, engine.score(&bundles[index], scored_at)));
                    }
                    local
                })
            })
            .collect();

        handles
            .into_iter()
            .flat_map(|handle| handle.join().expect("scoring worker panicked"))
            .collect()
    });

    indexed.sort_unstable_by_key(|(index, _)| *index);
    indexed.into_iter().map(|(_, result)| result).collect()
}
