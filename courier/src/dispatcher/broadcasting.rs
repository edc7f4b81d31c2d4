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

use async_trait::async_trait;
use tracing::{debug, instrument, trace, warn};

use crate::common::config::CONFIG;
use crate::common::{HandlerRef, Task};
use crate::dispatcher::handler_set::HandlerSet;
use crate::message::{Message, MessageBuilder, MessagingError};
use crate::traits::{MessageDispatcher, TaskExecutor};

/// Delivers every message to every registered handler.
///
/// With an executor, each delivery is submitted as a separate task and the dispatch
/// returns as soon as all tasks are submitted; failures inside those tasks are logged and
/// never reach the caller. A task the executor refuses runs inline on the caller.
/// Without an executor, handlers run inline in registration order and the first failure
/// other than a rejection is returned.
///
/// When `apply_sequence` is set, each handler receives its own copy stamped with
/// `correlationId` (the original message id), `sequenceNumber` (1-based, in
/// registration order) and `sequenceSize` (the number of handlers at dispatch time).
pub struct BroadcastingDispatcher {
    handlers: HandlerSet,
    executor: Option<Arc<dyn TaskExecutor>>,
    apply_sequence: bool,
}

impl fmt::Debug for BroadcastingDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BroadcastingDispatcher")
            .field("handlers", &self.handlers.len())
            .field("executor", &self.executor)
            .field("apply_sequence", &self.apply_sequence)
            .finish()
    }
}

impl Default for BroadcastingDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl BroadcastingDispatcher {
    /// Creates a dispatcher without an executor, using the configured `apply_sequence`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: HandlerSet::default(),
            executor: None,
            apply_sequence: CONFIG.dispatch.apply_sequence,
        }
    }

    /// Offloads each delivery to `executor`.
    #[must_use]
    pub fn with_executor(mut self, executor: Arc<dyn TaskExecutor>) -> Self {
        self.executor = Some(executor);
        self
    }

    /// Enables or disables sequence stamping.
    #[must_use]
    pub const fn with_apply_sequence(mut self, apply_sequence: bool) -> Self {
        self.apply_sequence = apply_sequence;
        self
    }

    /// Whether copies are stamped with sequence headers.
    #[must_use]
    pub const fn apply_sequence(&self) -> bool {
        self.apply_sequence
    }

    fn copy_for(&self, message: &Message, index: usize, size: usize) -> Message {
        if !self.apply_sequence {
            return message.clone();
        }
        MessageBuilder::from_message(message)
            .set_correlation_id(message.id())
            .set_sequence_number(index + 1)
            .set_sequence_size(size)
            .build()
    }
}

#[async_trait]
impl MessageDispatcher for BroadcastingDispatcher {
    fn add_handler(&self, handler: HandlerRef) -> bool {
        self.handlers.add(handler)
    }

    fn remove_handler(&self, handler: &HandlerRef) -> bool {
        self.handlers.remove(handler)
    }

    fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Always reports `true` unless an inline handler fails.
    ///
    /// # Errors
    ///
    /// Without an executor, the first handler error that is not a rejection.
    #[instrument(skip_all, fields(message_id = %message.id(), handlers = self.handlers.len()))]
    async fn dispatch(&self, message: Message) -> Result<bool, MessagingError> {
        let handlers = self.handlers.snapshot();
        let size = handlers.len();
        trace!(size, "broadcasting message");

        for (index, handler) in handlers.iter().enumerate() {
            let copy = self.copy_for(&message, index, size);
            let Some(executor) = &self.executor else {
                match handler.handle(copy).await {
                    Err(error) if error.is_rejection() => {
                        debug!(?handler, %error, "handler rejected broadcast copy");
                    }
                    other => other?,
                }
                continue;
            };

            let handler = Arc::clone(handler);
            let task: Task = Box::pin(async move {
                if let Err(error) = handler.handle(copy).await {
                    warn!(?handler, %error, "broadcast delivery failed");
                }
            });
            if let Err(task) = executor.execute(task) {
                trace!("executor refused delivery, running on caller");
                task.await;
            }
        }
        Ok(true)
    }
}
