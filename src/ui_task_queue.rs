/*
 * A FIFO of work deferred to a later turn of the UI loop.
 *
 * Widgets post tasks while handling an event and the event loop drains the
 * queue once the event is done, like a command queue the platform layer
 * empties after each dispatched event. A drain only runs the tasks that were
 * pending when it started; anything posted while draining waits for the next
 * drain, so a task that reposts itself cannot spin the loop.
 */

use std::collections::VecDeque;

#[derive(Debug)]
pub struct UiTaskQueue<T> {
    pending: VecDeque<T>,
}

impl<T> Default for UiTaskQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> UiTaskQueue<T> {
    pub fn new() -> Self {
        Self {
            pending: VecDeque::new(),
        }
    }

    pub fn post(&mut self, task: T) {
        self.pending.push_back(task);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn try_dequeue(&mut self) -> Option<T> {
        self.pending.pop_front()
    }

    /// Runs every task pending at the time of the call, in posting order. Returns how many ran.
    pub fn drain(&mut self, mut run: impl FnMut(T, &mut UiTaskQueue<T>)) -> usize {
        let batch = std::mem::take(&mut self.pending);
        let count = batch.len();
        for task in batch {
            run(task, self);
        }
        if count > 0 {
            log::trace!("UiTaskQueue: ran {count} deferred tasks, {} pending", self.len());
        }
        count
    }
}
