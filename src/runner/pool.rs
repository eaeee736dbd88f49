//! Bounded worker pool with deterministic result ordering.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use crate::error::Result;

/// Run `f` over `jobs` on up to `workers` threads, returning results in the
/// original job order regardless of completion order.
///
/// Fail-fast: once any job fails, queued jobs are abandoned (their slots
/// stay `None`) while in-flight jobs run to completion. A `None` slot
/// therefore implies some other slot holds an `Err`.
pub fn run_ordered<J, T>(
    jobs: Vec<J>,
    workers: usize,
    f: impl Fn(&J) -> Result<T> + Sync,
) -> Vec<Option<Result<T>>>
where
    J: Send,
    T: Send,
{
    let total = jobs.len();
    if total == 0 {
        return Vec::new();
    }

    let queue: Mutex<VecDeque<(usize, J)>> = Mutex::new(jobs.into_iter().enumerate().collect());
    let results: Mutex<Vec<Option<Result<T>>>> = Mutex::new((0..total).map(|_| None).collect());
    let stop = AtomicBool::new(false);
    let workers = workers.clamp(1, total);

    thread::scope(|scope| {
        for _ in 0..workers {
            scope.spawn(|| {
                loop {
                    if stop.load(Ordering::SeqCst) {
                        break;
                    }
                    let next = lock_ignore_poison(&queue).pop_front();
                    let Some((index, job)) = next else { break };

                    let outcome = f(&job);
                    let failed = outcome.is_err();
                    lock_ignore_poison(&results)[index] = Some(outcome);
                    if failed {
                        stop.store(true, Ordering::SeqCst);
                    }
                }
            });
        }
    });

    results
        .into_inner()
        .unwrap_or_else(|poison| poison.into_inner())
}

/// The guarded data (a queue of plain jobs, a result vector) stays
/// consistent even if a panicking worker poisons the lock.
fn lock_ignore_poison<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poison| poison.into_inner())
}
