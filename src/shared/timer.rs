//! Usage: Injectable delayed-task scheduling (tokio timers in production, a virtual clock in tests).

use crate::shared::mutex_ext::MutexExt;
use std::sync::Mutex;
use std::time::Duration;

pub type ScheduledTask = Box<dyn FnOnce() + Send + 'static>;

/// Runs a task once after `delay` has elapsed.
///
/// Implementations must not run the task synchronously inside `schedule`; callers may be holding
/// state they expect to release before the task observes it.
pub trait Scheduler: Send + Sync {
    fn schedule(&self, delay: Duration, task: ScheduledTask);
}

#[derive(Debug, Clone)]
pub struct TokioScheduler {
    handle: tokio::runtime::Handle,
}

impl TokioScheduler {
    pub fn new(handle: tokio::runtime::Handle) -> Self {
        Self { handle }
    }

    pub fn current() -> Result<Self, String> {
        tokio::runtime::Handle::try_current()
            .map(Self::new)
            .map_err(|e| format!("SCHEDULER_NO_RUNTIME: {e}"))
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: ScheduledTask) {
        self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        });
    }
}

struct PendingTask {
    due: Duration,
    seq: u64,
    task: ScheduledTask,
}

#[derive(Default)]
struct ManualClock {
    now: Duration,
    next_seq: u64,
    pending: Vec<PendingTask>,
}

/// Virtual clock: time only moves on [`ManualScheduler::advance`].
#[derive(Default)]
pub struct ManualScheduler {
    clock: Mutex<ManualClock>,
}

impl std::fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let clock = self.clock.lock_or_recover();
        f.debug_struct("ManualScheduler")
            .field("now", &clock.now)
            .field("pending", &clock.pending.len())
            .finish()
    }
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.clock.lock_or_recover().now
    }

    pub fn pending(&self) -> usize {
        self.clock.lock_or_recover().pending.len()
    }

    /// Moves the clock forward and runs every task that became due, earliest first.
    /// Tasks scheduled by a running task are honored within the same advance if they fall due.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.clock.lock_or_recover().now.saturating_add(by);
        let mut fired = 0;

        loop {
            let next = {
                let mut clock = self.clock.lock_or_recover();
                let idx = clock
                    .pending
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| p.due <= target)
                    .min_by_key(|(_, p)| (p.due, p.seq))
                    .map(|(idx, _)| idx);
                match idx {
                    Some(idx) => {
                        let task = clock.pending.swap_remove(idx);
                        if task.due > clock.now {
                            clock.now = task.due;
                        }
                        Some(task)
                    }
                    None => {
                        clock.now = target;
                        None
                    }
                }
            };

            // Run outside the lock: the task may schedule follow-ups.
            let Some(next) = next else {
                break;
            };
            (next.task)();
            fired += 1;
        }

        fired
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: ScheduledTask) {
        let mut clock = self.clock.lock_or_recover();
        let due = clock.now.saturating_add(delay);
        let seq = clock.next_seq;
        clock.next_seq += 1;
        clock.pending.push(PendingTask { due, seq, task });
    }
}
