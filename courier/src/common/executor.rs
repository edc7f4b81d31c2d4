/*
 * Copyright (c) 2024. Govcraft
 *
 * Licensed under either of
 *   * Apache License, Version 2.0 (the "License");
 *     you may not use this file except in compliance with the License.
 *     You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0
 *   * MIT license: http://opensource.org/licenses/MIT
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the applicable License for the specific language governing permissions and
 * limitations under that License.
 */

use std::fmt;
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::Semaphore;
use tokio_util::task::TaskTracker;
use tracing::trace;

use crate::common::config::CONFIG;
use crate::common::Task;
use crate::message::MessagingError;
use crate::traits::TaskExecutor;

/// A [`TaskExecutor`] that spawns tasks onto a Tokio runtime.
///
/// Spawned tasks are tracked so that an owner can [`close`](Self::close) the executor and
/// [`wait`](Self::wait) for outstanding work. When a concurrency limit is set, a task
/// submitted while every slot is busy is refused and handed back to the caller, which is
/// expected to run it itself.
///
/// Clones share the same tracker and limit.
#[derive(Clone)]
pub struct TokioTaskExecutor {
    handle: Handle,
    tracker: TaskTracker,
    /// Free execution slots, `None` when unlimited.
    slots: Option<Arc<Semaphore>>,
}

impl fmt::Debug for TokioTaskExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokioTaskExecutor")
            .field("tracked", &self.tracker.len())
            .field("closed", &self.tracker.is_closed())
            .field(
                "available_slots",
                &self.slots.as_ref().map(|slots| slots.available_permits()),
            )
            .finish_non_exhaustive()
    }
}

impl TokioTaskExecutor {
    /// Creates an executor on `handle`, limited to `max_concurrent` running tasks when given.
    #[must_use]
    pub fn new(handle: Handle, max_concurrent: Option<usize>) -> Self {
        Self {
            handle,
            tracker: TaskTracker::new(),
            slots: max_concurrent.map(|limit| Arc::new(Semaphore::new(limit))),
        }
    }

    /// Creates an executor on the current runtime, using the configured concurrency limit.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingError::Configuration`] when called outside a Tokio runtime.
    pub fn current() -> Result<Self, MessagingError> {
        let handle = Handle::try_current()
            .map_err(|e| MessagingError::Configuration(format!("no tokio runtime: {e}")))?;
        Ok(Self::new(handle, CONFIG.max_concurrent_tasks()))
    }

    /// Stops accepting new tasks. Already spawned tasks keep running.
    pub fn close(&self) {
        self.tracker.close();
    }

    /// Whether the executor has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.tracker.is_closed()
    }

    /// Waits until the executor is closed and every spawned task has finished.
    pub async fn wait(&self) {
        self.tracker.wait().await;
    }
}

impl TaskExecutor for TokioTaskExecutor {
    fn execute(&self, task: Task) -> Result<(), Task> {
        if self.tracker.is_closed() {
            trace!("executor closed, refusing task");
            return Err(task);
        }
        match &self.slots {
            None => {
                self.tracker.spawn_on(task, &self.handle);
            }
            Some(slots) => {
                let Ok(permit) = Arc::clone(slots).try_acquire_owned() else {
                    trace!("executor saturated, refusing task");
                    return Err(task);
                };
                self.tracker.spawn_on(
                    async move {
                        task.await;
                        drop(permit);
                    },
                    &self.handle,
                );
            }
        }
        Ok(())
    }
}
