//! Engine plumbing that is not simulation-specific: hot-path access macros,
//! the xorshift random stream, console logging and the worker pool.

#[macro_use]
pub mod utils;
pub mod logging;
pub mod worker_pool;

pub use worker_pool::WorkerPool;
