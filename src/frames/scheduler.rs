use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;

use crate::config::FrameErrorPolicy;
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{RideError, RideResult};
use crate::frames::assembler::{DistanceAccumulator, FrameAssembler, FrameReport};

/// Round-robin plan: worker `t` gets frames `t, t + workers, t + 2*workers, ...`, ascending.
///
/// Every frame in `0..frames` lands in exactly one worker's list. Workers beyond `frames` get an
/// empty list.
pub fn partition(frames: usize, workers: usize) -> Vec<Vec<FrameIndex>> {
    (0..workers)
        .map(|t| (t..frames).step_by(workers).map(FrameIndex).collect())
        .collect()
}

/// A frame that failed to render.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameFailure {
    pub index: FrameIndex,
    pub worker: usize,
    pub message: String,
}

/// Outcome of one worker's sequential pass over its frames.
#[derive(Debug)]
pub struct WorkerReport {
    pub worker: usize,
    pub rendered: Vec<FrameReport>,
    pub failures: Vec<FrameFailure>,
    /// Distance counted by this worker's accumulator when it stopped.
    pub distance_m: f64,
    pub anomalies: usize,
    /// Frames the worker never attempted because it or the run was aborted.
    pub abandoned: usize,
    fatal: Option<(FrameIndex, RideError)>,
}

/// Merged outcome of a render run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunReport {
    /// Successfully rendered frames, ascending by index.
    pub frames: Vec<FrameReport>,
    /// Failed frames, ascending by index.
    pub failures: Vec<FrameFailure>,
    /// Frames never attempted.
    pub abandoned: usize,
    /// Steps skipped as recording gaps, summed over workers.
    pub anomalies: usize,
}

impl RunReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && self.abandoned == 0
    }

    /// Distance shown on the last rendered frame.
    pub fn final_distance_m(&self) -> Option<f64> {
        self.frames.last().map(|f| f.distance_m)
    }
}

/// Fans frames out over a fixed pool of workers and joins them before returning.
#[derive(Clone, Copy, Debug)]
pub struct FrameScheduler {
    workers: usize,
    policy: FrameErrorPolicy,
}

impl FrameScheduler {
    pub fn new(workers: usize, policy: FrameErrorPolicy) -> RideResult<Self> {
        if workers == 0 {
            return Err(RideError::validation("scheduler needs at least one worker"));
        }
        Ok(Self { workers, policy })
    }

    /// Renders frames `0..frames` and blocks until every worker has finished.
    ///
    /// Under [`FrameErrorPolicy::AbortRun`] the first failure (lowest frame index among those
    /// observed) is returned as the error; other policies record failures in the report.
    #[tracing::instrument(skip(self, assembler), fields(workers = self.workers))]
    pub fn run(&self, assembler: &FrameAssembler<'_>, frames: usize) -> RideResult<RunReport> {
        let plan = partition(frames, self.workers);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .thread_name(|i| format!("ridereel-worker-{i}"))
            .build()
            .map_err(|e| {
                RideError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}"))
            })?;
        let stop = AtomicBool::new(false);

        let workers = pool.install(|| {
            plan.par_iter()
                .enumerate()
                .with_max_len(1)
                .map(|(worker, indices)| self.run_worker(worker, indices, assembler, &stop))
                .collect::<Vec<_>>()
        });

        self.merge(workers)
    }

    fn run_worker(
        &self,
        worker: usize,
        indices: &[FrameIndex],
        assembler: &FrameAssembler<'_>,
        stop: &AtomicBool,
    ) -> WorkerReport {
        let mut acc = DistanceAccumulator::new();
        let mut report = WorkerReport {
            worker,
            rendered: Vec::with_capacity(indices.len()),
            failures: Vec::new(),
            distance_m: 0.0,
            anomalies: 0,
            abandoned: 0,
            fatal: None,
        };

        for (pos, &index) in indices.iter().enumerate() {
            if stop.load(Ordering::Acquire) {
                report.abandoned = indices.len() - pos;
                break;
            }

            let (next, result) = assembler.assemble(index, acc);
            acc = next;
            match result {
                Ok(frame) => {
                    tracing::info!(worker, "frame {} done", index.0);
                    report.rendered.push(frame);
                }
                Err(e) => {
                    tracing::error!(worker, frame = index.0, error = %e, "frame failed");
                    report.failures.push(FrameFailure {
                        index,
                        worker,
                        message: e.to_string(),
                    });
                    match self.policy {
                        FrameErrorPolicy::SkipFrame => {}
                        FrameErrorPolicy::AbortWorker => {
                            report.abandoned = indices.len() - pos - 1;
                            break;
                        }
                        FrameErrorPolicy::AbortRun => {
                            stop.store(true, Ordering::Release);
                            report.abandoned = indices.len() - pos - 1;
                            report.fatal = Some((index, e));
                            break;
                        }
                    }
                }
            }
        }

        report.distance_m = acc.total_m();
        report.anomalies = acc.anomalies();
        tracing::debug!(
            worker,
            rendered = report.rendered.len(),
            failed = report.failures.len(),
            distance_m = report.distance_m,
            "worker finished"
        );
        report
    }

    fn merge(&self, workers: Vec<WorkerReport>) -> RideResult<RunReport> {
        let mut run = RunReport::default();
        let mut fatal: Option<(FrameIndex, RideError)> = None;

        for w in workers {
            run.frames.extend(w.rendered);
            run.failures.extend(w.failures);
            run.abandoned += w.abandoned;
            run.anomalies += w.anomalies;
            if let Some((index, e)) = w.fatal
                && fatal.as_ref().is_none_or(|(first, _)| index < *first)
            {
                fatal = Some((index, e));
            }
        }

        if let Some((index, e)) = fatal {
            tracing::error!(frame = index.0, "run aborted");
            return Err(e);
        }

        run.frames.sort_by_key(|f| f.index);
        run.failures.sort_by_key(|f| f.index);
        tracing::info!(
            rendered = run.frames.len(),
            failed = run.failures.len(),
            abandoned = run.abandoned,
            "render run finished"
        );
        Ok(run)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frames/scheduler.rs"]
mod tests;
