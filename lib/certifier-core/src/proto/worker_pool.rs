//! Fixed-size rayon pool for blocking, CPU-bound jobs.

use std::num::NonZeroUsize;
use std::sync::mpsc;
use std::thread;

use rayon::{ThreadPoolBuildError, ThreadPoolBuilder};

/// Worker count used when none is configured
pub fn default_workers() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Runs `work` over every job on a dedicated pool of `min(workers, jobs)` threads.
///
/// Every job pushes its output into a result channel, so results come back in completion
/// order and jobs should carry their own identity. Blocks until all jobs are done.
pub fn run<Job, Output, Work>(
    jobs: Vec<Job>,
    workers: usize,
    work: Work,
) -> Result<Vec<Output>, ThreadPoolBuildError>
where
    Job: Send,
    Output: Send,
    Work: Fn(Job) -> Output + Sync,
{
    if jobs.is_empty() {
        return Ok(vec![]);
    }

    let pool = ThreadPoolBuilder::new()
        .num_threads(workers.clamp(1, jobs.len()))
        .thread_name(|index| format!("certifier-worker-{index}"))
        .build()?;
    let (result_tx, result_rx) = mpsc::channel();

    pool.scope(|scope| {
        for job in jobs {
            let result_tx = result_tx.clone();
            let work = &work;

            scope.spawn(move |_| {
                // the receiver outlives the scope
                result_tx.send(work(job)).ok();
            });
        }
    });

    drop(result_tx);
    Ok(result_rx.into_iter().collect())
}
