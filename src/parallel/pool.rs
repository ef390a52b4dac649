//! Rayon thread-pool sizing for Monte Carlo workloads.
//!
//! Use [TrialPool::install] to run a parallel batch with a fixed worker
//! count (the CLI's `--workers`), or rely on Rayon's default of all cores.

use rayon::ThreadPoolBuilder;

#[derive(Debug, Clone, Copy)]
pub struct TrialPool {
    /// Worker threads. 0 means the global Rayon pool (all CPU cores).
    pub workers: usize,
}

impl Default for TrialPool {
    fn default() -> Self {
        Self { workers: 0 }
    }
}

impl TrialPool {
    pub fn with_workers(workers: usize) -> Self {
        Self { workers }
    }

    /// Run `f` on a pool with this worker count. A zero count uses the
    /// global pool; otherwise a temporary pool is built for the call.
    pub fn install<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        if self.workers == 0 {
            f()
        } else {
            let pool = ThreadPoolBuilder::new()
                .num_threads(self.workers)
                .build()
                .expect("Rayon thread pool");
            pool.install(f)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_workers_runs_on_the_calling_pool() {
        let result = TrialPool::default().install(|| 40 + 2);
        assert_eq!(result, 42);
    }

    #[test]
    fn fixed_worker_pool_runs_the_closure() {
        let result = TrialPool::with_workers(2).install(|| rayon::current_num_threads());
        assert_eq!(result, 2);
    }
}
