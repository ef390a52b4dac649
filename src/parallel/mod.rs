pub mod batch;
pub mod pool;

pub use batch::trial_ranges;
pub use pool::TrialPool;
