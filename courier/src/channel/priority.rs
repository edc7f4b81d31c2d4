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

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::channel::queue::{drain_rejected, validate_capacity, MessageStore, QueueChannel};
use crate::common::config::CONFIG;
use crate::common::{InterceptorRef, MessageComparator, Timeout};
use crate::message::{Message, MessagingError};
use crate::traits::{MessageChannel, MessageSelector, PayloadType, PollableChannel};

/// Orders by the `priority` header, highest first. Messages without one rank as
/// [`MessagePriority::Normal`](crate::message::MessagePriority::Normal).
#[must_use]
pub fn priority_header_comparator() -> MessageComparator {
    Arc::new(|a: &Message, b: &Message| {
        let rank = |m: &Message| m.headers().priority().unwrap_or_default();
        rank(b).cmp(&rank(a))
    })
}

/// Keeps the buffer sorted by the comparator. Equal messages keep their arrival order.
struct PriorityStore {
    items: VecDeque<Message>,
    comparator: MessageComparator,
}

impl fmt::Debug for PriorityStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriorityStore")
            .field("items", &self.items)
            .finish_non_exhaustive()
    }
}

impl MessageStore for PriorityStore {
    fn push(&mut self, message: Message) {
        let at = self
            .items
            .partition_point(|queued| (self.comparator)(queued, &message) != Ordering::Greater);
        self.items.insert(at, message);
    }

    fn pop(&mut self) -> Option<Message> {
        self.items.pop_front()
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn drain_all(&mut self) -> Vec<Message> {
        self.items.drain(..).collect()
    }

    fn drain_rejected(&mut self, keep: &dyn Fn(&Message) -> bool) -> Vec<Message> {
        drain_rejected(&mut self.items, keep)
    }
}

/// A [`QueueChannel`] that hands messages to receivers in comparator order rather than
/// send order.
///
/// Maintenance operations forward to the underlying [`QueueChannel`] and see the
/// buffer in priority order.
#[derive(Debug)]
pub struct PriorityChannel {
    inner: QueueChannel,
}

impl Default for PriorityChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl PriorityChannel {
    /// Creates a channel ordered by the `priority` header, with the configured capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_comparator(priority_header_comparator())
    }

    /// Creates a channel ordered by `comparator`, with the configured capacity.
    #[must_use]
    pub fn with_comparator(comparator: MessageComparator) -> Self {
        Self::build(comparator, CONFIG.queue_capacity())
    }

    /// Creates a bounded channel. `comparator` defaults to the `priority` header order.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingError::Configuration`] when `capacity` is zero.
    pub fn with_capacity(
        capacity: usize,
        comparator: Option<MessageComparator>,
    ) -> Result<Self, MessagingError> {
        let capacity = validate_capacity(capacity)?;
        Ok(Self::build(
            comparator.unwrap_or_else(priority_header_comparator),
            Some(capacity),
        ))
    }

    /// Creates an unbounded channel ordered by `comparator`.
    #[must_use]
    pub fn unbounded(comparator: MessageComparator) -> Self {
        Self::build(comparator, None)
    }

    fn build(comparator: MessageComparator, capacity: Option<usize>) -> Self {
        let store = PriorityStore {
            items: VecDeque::new(),
            comparator,
        };
        Self {
            inner: QueueChannel::from_store(Box::new(store), capacity),
        }
    }

    /// Sets the channel name.
    #[must_use]
    pub fn named(self, name: impl Into<String>) -> Self {
        Self {
            inner: self.inner.named(name),
        }
    }

    /// Restricts accepted payloads to the given types.
    #[must_use]
    pub fn with_datatypes(self, datatypes: Vec<PayloadType>) -> Self {
        Self {
            inner: self.inner.with_datatypes(datatypes),
        }
    }

    /// Appends an interceptor.
    #[must_use]
    pub fn with_interceptor(self, interceptor: InterceptorRef) -> Self {
        Self {
            inner: self.inner.with_interceptor(interceptor),
        }
    }
}

impl PriorityChannel {
    /// The queue backing this channel.
    #[must_use]
    pub const fn queue(&self) -> &QueueChannel {
        &self.inner
    }

    /// Appends an interceptor to a channel that may already be in use.
    pub fn add_interceptor(&self, interceptor: InterceptorRef) {
        self.inner.add_interceptor(interceptor);
    }

    /// Replaces the interceptor chain.
    pub fn set_interceptors(&self, interceptors: Vec<InterceptorRef>) {
        self.inner.set_interceptors(interceptors);
    }

    /// The current interceptor chain, in order.
    #[must_use]
    pub fn interceptors(&self) -> Vec<InterceptorRef> {
        self.inner.interceptors()
    }

    /// Declared payload types; empty when any payload is accepted.
    #[must_use]
    pub fn datatypes(&self) -> &[PayloadType] {
        self.inner.datatypes()
    }

    /// Removes and returns every buffered message, highest rank first.
    pub fn clear(&self) -> Vec<Message> {
        self.inner.clear()
    }

    /// Removes and returns the buffered messages `selector` does not accept.
    pub fn purge(&self, selector: &dyn MessageSelector) -> Vec<Message> {
        self.inner.purge(selector)
    }

    /// Number of buffered messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Free slots left, `None` when unbounded.
    #[must_use]
    pub fn remaining_capacity(&self) -> Option<usize> {
        self.inner.remaining_capacity()
    }
}

#[async_trait]
impl MessageChannel for PriorityChannel {
    fn name(&self) -> Option<&str> {
        self.inner.name()
    }

    async fn send_timeout(&self, message: Message, timeout: Timeout) -> Result<bool, MessagingError> {
        self.inner.send_timeout(message, timeout).await
    }
}

#[async_trait]
impl PollableChannel for PriorityChannel {
    async fn receive_timeout(&self, timeout: Timeout) -> Option<Message> {
        self.inner.receive_timeout(timeout).await
    }
}
