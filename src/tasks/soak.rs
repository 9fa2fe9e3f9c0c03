//! Soak Workload Task
//!
//! Drives a seeded mix of get/set/remove calls against a shared cache from
//! many tokio tasks at once, then checks the cache is still consistent.

use std::sync::Arc;

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::LruCache;
use crate::config::Config;

/// Operations between cooperative yields, so an aborted runtime can stop workers
const YIELD_EVERY: u64 = 256;

/// Per-worker operation counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WorkerReport {
    pub worker_id: usize,
    pub gets: u64,
    /// Gets that found their key
    pub hits: u64,
    pub sets: u64,
    pub removes: u64,
    /// Removes that found their key
    pub removed: u64,
}

impl WorkerReport {
    /// Total operations issued by this worker.
    pub fn total_ops(&self) -> u64 {
        self.gets + self.sets + self.removes
    }
}

/// Outcome of a full soak run.
#[derive(Debug, Clone, Serialize)]
pub struct SoakReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub capacity: usize,
    pub total_ops: u64,
    /// Hits over gets across all workers, 0.0 when no gets ran
    pub hit_rate: f64,
    /// Entry count once every worker finished
    pub final_len: usize,
    /// Result of the post-run index/list consistency check
    pub consistent: bool,
    pub workers: Vec<WorkerReport>,
}

/// Spawns one soak worker against the shared cache.
///
/// Each worker draws keys `key-0 .. key-{key_space}` from a generator
/// seeded with `config.seed + worker_id`, so a given worker always issues
/// the same operation sequence. The mix is 50% get, 40% set, 10% remove.
///
/// # Returns
/// A JoinHandle resolving to the worker's operation counts.
pub fn spawn_soak_worker(
    cache: Arc<LruCache>,
    worker_id: usize,
    config: &Config,
) -> JoinHandle<WorkerReport> {
    let ops = config.ops_per_worker;
    let key_space = config.key_space.max(1);
    let seed = config.seed.wrapping_add(worker_id as u64);

    tokio::spawn(async move {
        let mut rng = fastrand::Rng::with_seed(seed);
        let mut report = WorkerReport {
            worker_id,
            ..WorkerReport::default()
        };

        for op in 1..=ops {
            let key = format!("key-{}", rng.u64(0..key_space));

            match rng.u8(0..10) {
                0..=4 => {
                    report.gets += 1;
                    if cache.get(&key).is_ok() {
                        report.hits += 1;
                    }
                }
                5..=8 => {
                    report.sets += 1;
                    cache.set(&key, rng.u64(..).to_le_bytes());
                }
                _ => {
                    report.removes += 1;
                    if cache.remove(&key).is_ok() {
                        report.removed += 1;
                    }
                }
            }

            if op % YIELD_EVERY == 0 {
                tokio::task::yield_now().await;
            }
        }

        debug!(worker_id, ops, hits = report.hits, "Soak worker finished");
        report
    })
}

/// Runs `config.workers` soak workers to completion and reports the result.
pub async fn run_soak(cache: Arc<LruCache>, config: &Config) -> anyhow::Result<SoakReport> {
    let started_at = Utc::now();
    info!(
        "Starting soak run: workers={}, ops_per_worker={}, key_space={}",
        config.workers, config.ops_per_worker, config.key_space
    );

    let handles: Vec<_> = (0..config.workers)
        .map(|worker_id| spawn_soak_worker(cache.clone(), worker_id, config))
        .collect();

    let mut workers = Vec::with_capacity(handles.len());
    for handle in handles {
        workers.push(handle.await.context("Soak worker panicked")?);
    }

    let total_ops = workers.iter().map(WorkerReport::total_ops).sum();
    let gets: u64 = workers.iter().map(|w| w.gets).sum();
    let hits: u64 = workers.iter().map(|w| w.hits).sum();
    let hit_rate = if gets == 0 {
        0.0
    } else {
        hits as f64 / gets as f64
    };

    let report = SoakReport {
        started_at,
        finished_at: Utc::now(),
        capacity: cache.capacity(),
        total_ops,
        hit_rate,
        final_len: cache.len(),
        consistent: cache.is_consistent(),
        workers,
    };

    info!(
        "Soak run finished: total_ops={}, final_len={}, consistent={}",
        report.total_ops, report.final_len, report.consistent
    );
    Ok(report)
}
