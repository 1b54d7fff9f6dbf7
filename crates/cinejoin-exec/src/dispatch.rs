//! Scoped worker pool shared by the engines.
//!
//! Every call spawns at most `budget` workers inside `std::thread::scope` and
//! joins all of them before returning, so no thread outlives the join and no
//! pool configuration persists between calls. A budget of one runs inline.
//! A panicking worker, inline or spawned, surfaces as
//! [`JoinError::WorkerPanicked`]; a thread the OS refuses to start surfaces as
//! [`JoinError::WorkerSpawnFailed`].

use std::io;
use std::ops::Range;
use std::panic::{self, AssertUnwindSafe};
use std::thread::{self, ScopedJoinHandle};

use cinejoin_error::{JoinError, Result};
use cinejoin_types::ThreadBudget;
use crossbeam_deque::{Injector, Steal};

use crate::config::ProbeSchedule;

/// Row range `[len*w/n, len*(w+1)/n)` owned by worker `w` of `n`.
#[must_use]
pub fn worker_range(len: usize, worker: usize, workers: usize) -> Range<usize> {
    let split = |w: usize| (len as u128 * w as u128 / workers.max(1) as u128) as usize;
    split(worker)..split(worker + 1)
}

/// Run `work` over `[0, len)` with one accumulator per worker.
///
/// `Contiguous` hands every worker one [`worker_range`]. The block schedules
/// cut the range into `block_rows`-sized blocks and either deal them
/// round-robin or let workers pull them from a shared queue. Accumulators are
/// returned in worker-index order.
pub fn scatter<A, I, F>(
    budget: ThreadBudget,
    len: usize,
    block_rows: usize,
    schedule: ProbeSchedule,
    init: I,
    work: F,
) -> Result<Vec<A>>
where
    A: Send,
    I: Fn() -> A + Sync,
    F: Fn(&mut A, Range<usize>) + Sync,
{
    let block_rows = block_rows.max(1);
    let blocks = len.div_ceil(block_rows);
    let block = |b: usize| (b * block_rows)..((b + 1) * block_rows).min(len);

    match schedule {
        ProbeSchedule::Contiguous => {
            let workers = budget.workers_for(len);
            run_workers(workers, |worker| {
                let mut acc = init();
                work(&mut acc, worker_range(len, worker, workers));
                acc
            })
        }
        ProbeSchedule::RoundRobinBlocks => {
            let workers = budget.workers_for(blocks);
            run_workers(workers, |worker| {
                let mut acc = init();
                for b in (worker..blocks).step_by(workers) {
                    work(&mut acc, block(b));
                }
                acc
            })
        }
        ProbeSchedule::DynamicBlocks => {
            let queue = Injector::new();
            for b in 0..blocks {
                queue.push(b);
            }
            run_workers(budget.workers_for(blocks), |_| {
                let mut acc = init();
                loop {
                    match queue.steal() {
                        Steal::Success(b) => work(&mut acc, block(b)),
                        Steal::Retry => {}
                        Steal::Empty => break,
                    }
                }
                acc
            })
        }
    }
}

fn run_workers<A, F>(workers: usize, body: F) -> Result<Vec<A>>
where
    A: Send,
    F: Fn(usize) -> A + Sync,
{
    if workers <= 1 {
        return panic::catch_unwind(AssertUnwindSafe(|| body(0)))
            .map(|acc| vec![acc])
            .map_err(|_| worker_panicked(0));
    }
    thread::scope(|scope| {
        let body = &body;
        let mut handles = Vec::with_capacity(workers);
        for worker in 0..workers {
            let spawned = thread::Builder::new()
                .name(format!("cinejoin-worker-{worker}"))
                .spawn_scoped(scope, move || body(worker));
            match spawned {
                Ok(handle) => handles.push(handle),
                Err(err) => {
                    // Workers already running still drain the input before the scope closes.
                    let _ = join_all(handles);
                    return Err(spawn_failed(worker, &err));
                }
            }
        }
        join_all(handles)
    })
}

fn worker_panicked(worker: usize) -> JoinError {
    tracing::error!(worker, "join worker panicked");
    JoinError::WorkerPanicked { worker }
}

fn spawn_failed(worker: usize, err: &io::Error) -> JoinError {
    tracing::error!(worker, error = %err, "failed to spawn join worker");
    JoinError::WorkerSpawnFailed {
        worker,
        reason: err.to_string(),
    }
}

/// Join every handle, even after a failure, so the scope never re-panics.
fn join_all<A>(handles: Vec<ScopedJoinHandle<'_, A>>) -> Result<Vec<A>> {
    let mut results = Vec::with_capacity(handles.len());
    let mut first_panic = None;
    for (worker, handle) in handles.into_iter().enumerate() {
        match handle.join() {
            Ok(acc) => results.push(acc),
            Err(_) => {
                first_panic.get_or_insert(worker);
            }
        }
    }
    match first_panic {
        Some(worker) => Err(worker_panicked(worker)),
        None => Ok(results),
    }
}
