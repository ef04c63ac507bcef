//! WorkerPool - persistent spin-waiting worker threads
//!
//! Each worker owns one task slot. The caller fills slots with `set_task`,
//! flags all of them with `dispatch_all`, and blocks in `wait_all` until every
//! worker has run the shared task function once on its slot.
//!
//! Workers spin on an atomic flag, yielding the CPU between polls, instead of
//! parking. Idle workers burn CPU until `terminate`.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

use crate::error::{EngineError, Result};

type TaskFn<T> = dyn Fn(&mut T, usize) + Send + Sync + 'static;

struct Slot<T> {
    has_task: AtomicBool,
    data: Mutex<T>,
}

impl<T> Slot<T> {
    fn lock(&self) -> MutexGuard<'_, T> {
        // A panicking task is caught in the worker loop, so poisoning only
        // means the slot holds whatever the task left behind.
        self.data.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

struct Shared<T> {
    slots: Vec<Slot<T>>,
    task: Box<TaskFn<T>>,
    shutdown: AtomicBool,
    completed: AtomicUsize,
}

/// Fixed set of persistent workers executing one shared function.
pub struct WorkerPool<T: Send + Default + 'static> {
    shared: Option<Arc<Shared<T>>>,
    threads: Vec<JoinHandle<()>>,
    dispatched: usize,
}

impl<T: Send + Default + 'static> WorkerPool<T> {
    /// An idle pool with no threads. `terminate` and `wait_all` are valid on it.
    pub fn new() -> Self {
        Self {
            shared: None,
            threads: Vec::new(),
            dispatched: 0,
        }
    }

    /// Spawn `count` workers running `task`. Restarts the pool if already running.
    pub fn start<F>(&mut self, count: usize, task: F) -> Result<()>
    where
        F: Fn(&mut T, usize) + Send + Sync + 'static,
    {
        if count == 0 {
            return Err(EngineError::NoWorkers);
        }
        self.terminate();

        let shared = Arc::new(Shared {
            slots: (0..count)
                .map(|_| Slot {
                    has_task: AtomicBool::new(false),
                    data: Mutex::new(T::default()),
                })
                .collect(),
            task: Box::new(task),
            shutdown: AtomicBool::new(false),
            completed: AtomicUsize::new(0),
        });

        // Publish before spawning so a failed spawn still gets cleaned up.
        self.shared = Some(Arc::clone(&shared));
        for index in 0..count {
            let worker_shared = Arc::clone(&shared);
            let spawned = thread::Builder::new()
                .name(format!("grainfall-worker-{index}"))
                .spawn(move || worker_loop(&worker_shared, index));
            match spawned {
                Ok(handle) => self.threads.push(handle),
                Err(err) => {
                    self.terminate();
                    return Err(EngineError::Spawn(err));
                }
            }
        }

        log::debug!("worker pool started with {count} threads");
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.shared.is_some()
    }

    pub fn thread_count(&self) -> usize {
        self.shared.as_ref().map_or(0, |shared| shared.slots.len())
    }

    /// Replace the task data of one worker. Out-of-range indices are ignored.
    /// Only meaningful while the worker is idle (after `wait_all`).
    pub fn set_task(&self, index: usize, data: T) {
        if let Some(slot) = self.shared.as_ref().and_then(|shared| shared.slots.get(index)) {
            *slot.lock() = data;
        }
    }

    /// Hand out `data` to workers in order; extra items are dropped.
    pub fn set_all_tasks<I: IntoIterator<Item = T>>(&self, data: I) {
        for (index, item) in data.into_iter().take(self.thread_count()).enumerate() {
            self.set_task(index, item);
        }
    }

    /// Move a worker's slot out, leaving `T::default()` behind.
    pub fn take_task(&self, index: usize) -> Option<T> {
        let shared = self.shared.as_ref()?;
        let slot = shared.slots.get(index)?;
        Some(std::mem::take(&mut *slot.lock()))
    }

    /// Flag every slot and return immediately.
    pub fn dispatch_all(&mut self) {
        let Some(shared) = self.shared.as_ref() else {
            return;
        };
        shared.completed.store(0, Ordering::Release);
        for slot in &shared.slots {
            slot.has_task.store(true, Ordering::Release);
        }
        self.dispatched = shared.slots.len();
    }

    /// Block until every worker flagged by the last dispatch has finished.
    /// Returns immediately when nothing is outstanding.
    pub fn wait_all(&mut self) {
        if self.dispatched == 0 {
            return;
        }
        if let Some(shared) = self.shared.as_ref() {
            while shared.completed.load(Ordering::Acquire) < self.dispatched {
                thread::yield_now();
            }
        }
        self.dispatched = 0;
    }

    pub fn dispatch_and_wait(&mut self) {
        self.dispatch_all();
        self.wait_all();
    }

    /// Workers that finished since the last dispatch.
    pub fn completed_count(&self) -> usize {
        self.shared
            .as_ref()
            .map_or(0, |shared| shared.completed.load(Ordering::Acquire))
    }

    pub fn is_complete(&self) -> bool {
        self.completed_count() >= self.dispatched
    }

    /// Signal shutdown and join all workers. Idempotent.
    pub fn terminate(&mut self) {
        let Some(shared) = self.shared.take() else {
            return;
        };
        shared.shutdown.store(true, Ordering::Release);
        for handle in self.threads.drain(..) {
            if handle.join().is_err() {
                log::error!("worker thread panicked outside its task");
            }
        }
        self.dispatched = 0;
        log::debug!("worker pool terminated");
    }
}

impl<T: Send + Default + 'static> Default for WorkerPool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + Default + 'static> Drop for WorkerPool<T> {
    fn drop(&mut self) {
        self.terminate();
    }
}

fn worker_loop<T>(shared: &Shared<T>, index: usize) {
    let slot = &shared.slots[index];
    loop {
        while !slot.has_task.load(Ordering::Acquire) && !shared.shutdown.load(Ordering::Acquire) {
            thread::yield_now();
        }
        if shared.shutdown.load(Ordering::Acquire) {
            break;
        }
        if slot.has_task.swap(false, Ordering::AcqRel) {
            {
                let mut data = slot.lock();
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| (shared.task)(&mut *data, index)));
                if outcome.is_err() {
                    log::error!("worker {index} task panicked");
                }
            }
            // Count even a panicked task, otherwise wait_all would spin forever.
            shared.completed.fetch_add(1, Ordering::AcqRel);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU64;

    #[derive(Default)]
    struct Job {
        input: u64,
        output: u64,
        runs: u32,
        worker: usize,
    }

    fn square_pool(count: usize) -> WorkerPool<Job> {
        let mut pool = WorkerPool::new();
        pool.start(count, |job: &mut Job, worker| {
            job.output = job.input * job.input;
            job.runs += 1;
            job.worker = worker;
        })
        .expect("pool starts");
        pool
    }

    #[test]
    fn dispatch_and_wait_runs_each_worker_once_on_its_data() {
        let mut pool = square_pool(4);
        pool.set_all_tasks((1..=4).map(|input| Job { input, ..Job::default() }));
        pool.dispatch_and_wait();

        for index in 0..4 {
            let job = pool.take_task(index).expect("slot exists");
            assert_eq!(job.runs, 1);
            assert_eq!(job.worker, index);
            assert_eq!(job.output, (index as u64 + 1).pow(2));
        }
    }

    #[test]
    fn repeated_dispatches_see_fresh_data() {
        let mut pool = square_pool(2);
        for round in 0..50u64 {
            pool.set_task(0, Job { input: round, ..Job::default() });
            pool.set_task(1, Job { input: round + 1, ..Job::default() });
            pool.dispatch_and_wait();
            assert_eq!(pool.take_task(0).map(|job| (job.output, job.runs)), Some((round * round, 1)));
            assert_eq!(
                pool.take_task(1).map(|job| (job.output, job.runs)),
                Some(((round + 1) * (round + 1), 1))
            );
        }
    }

    #[test]
    fn async_dispatch_then_wait() {
        let counter = Arc::new(AtomicU64::new(0));
        let seen = Arc::clone(&counter);
        let mut pool: WorkerPool<u64> = WorkerPool::new();
        pool.start(3, move |value: &mut u64, _| {
            seen.fetch_add(*value, Ordering::SeqCst);
        })
        .expect("pool starts");

        pool.set_all_tasks([1, 10, 100]);
        pool.dispatch_all();
        pool.wait_all();
        assert_eq!(counter.load(Ordering::SeqCst), 111);
        assert!(pool.is_complete());
    }

    #[test]
    fn wait_without_dispatch_returns_immediately() {
        let mut pool = square_pool(2);
        pool.wait_all();

        let mut idle: WorkerPool<Job> = WorkerPool::new();
        idle.wait_all();
        idle.dispatch_and_wait();
        assert_eq!(idle.thread_count(), 0);
    }

    #[test]
    fn terminate_is_idempotent() {
        let mut never_started: WorkerPool<Job> = WorkerPool::new();
        never_started.terminate();
        never_started.terminate();

        let mut pool = square_pool(2);
        assert!(pool.is_running());
        pool.terminate();
        pool.terminate();
        assert!(!pool.is_running());
        assert_eq!(pool.thread_count(), 0);
    }

    #[test]
    fn zero_workers_is_rejected() {
        let mut pool: WorkerPool<Job> = WorkerPool::new();
        assert!(matches!(pool.start(0, |_: &mut Job, _| {}), Err(EngineError::NoWorkers)));
    }

    #[test]
    fn panicking_task_does_not_hang_wait() {
        let mut pool: WorkerPool<u32> = WorkerPool::new();
        pool.start(2, |value: &mut u32, _| {
            if *value == 13 {
                panic!("unlucky");
            }
            *value += 1;
        })
        .expect("pool starts");

        pool.set_all_tasks([13, 1]);
        pool.dispatch_and_wait();
        assert_eq!(pool.take_task(1), Some(2));
    }
}
