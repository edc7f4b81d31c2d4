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
use std::fmt::Debug;

use async_trait::async_trait;

use crate::common::{HandlerRef, Task};
use crate::message::{Message, MessagingError};

/// A strategy for delivering one message to one or many handlers of a set.
///
/// Dispatchers keep no state between calls other than their handler set, which
/// iterates in registration order and may be edited while dispatches are in flight.
#[async_trait]
pub trait MessageDispatcher: Send + Sync + Debug {
    /// Adds `handler`. Returns `true` when the set changed (handlers are unique by
    /// identity, so adding the same `Arc` twice returns `false`).
    fn add_handler(&self, handler: HandlerRef) -> bool;

    /// Removes `handler`. Returns `true` when the set changed.
    fn remove_handler(&self, handler: &HandlerRef) -> bool;

    /// Number of registered handlers.
    fn handler_count(&self) -> usize;

    /// Delivers `message` according to the strategy.
    ///
    /// # Errors
    ///
    /// Strategy specific; see the implementations.
    async fn dispatch(&self, message: Message) -> Result<bool, MessagingError>;
}

/// Runs units of work on behalf of a dispatcher.
///
/// The executor is owned outside the dispatcher and shared between users; the
/// dispatcher only ever calls [`execute`](TaskExecutor::execute).
pub trait TaskExecutor: Send + Sync + Debug {
    /// Submits `task` for execution.
    ///
    /// # Errors
    ///
    /// Returns the task back when the executor refuses it (for example after shutdown),
    /// leaving the caller to decide what to do with it.
    fn execute(&self, task: Task) -> Result<(), Task>;
}
