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

use std::collections::VecDeque;
use std::fmt::Debug;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Notify;
use tokio::time::timeout_at;
use tracing::{instrument, trace};

use crate::channel::base::ChannelCore;
use crate::common::config::CONFIG;
use crate::common::{InterceptorRef, Timeout};
use crate::message::{Message, MessagingError};
use crate::traits::{MessageChannel, MessageSelector, PayloadType, PollableChannel};

/// Ordering policy of a queue's buffer.
pub(crate) trait MessageStore: Send + Debug {
    fn push(&mut self, message: Message);
    fn pop(&mut self) -> Option<Message>;
    fn len(&self) -> usize;
    fn drain_all(&mut self) -> Vec<Message>;
    /// Removes and returns every message `keep` rejects, preserving the order of the rest.
    fn drain_rejected(&mut self, keep: &dyn Fn(&Message) -> bool) -> Vec<Message>;
}

/// First-in, first-out buffer.
#[derive(Debug, Default)]
pub(crate) struct FifoStore(VecDeque<Message>);

impl MessageStore for FifoStore {
    fn push(&mut self, message: Message) {
        self.0.push_back(message);
    }

    fn pop(&mut self) -> Option<Message> {
        self.0.pop_front()
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    fn drain_all(&mut self) -> Vec<Message> {
        self.0.drain(..).collect()
    }

    fn drain_rejected(&mut self, keep: &dyn Fn(&Message) -> bool) -> Vec<Message> {
        drain_rejected(&mut self.0, keep)
    }
}

pub(crate) fn drain_rejected(
    items: &mut VecDeque<Message>,
    keep: &dyn Fn(&Message) -> bool,
) -> Vec<Message> {
    let (kept, removed): (VecDeque<_>, VecDeque<_>) = items.drain(..).partition(|m| keep(m));
    *items = kept;
    removed.into()
}

/// A buffer with an optional capacity bound whose `offer` and `poll` wait with a timeout.
#[derive(Debug)]
struct BlockingQueue {
    store: Mutex<Box<dyn MessageStore>>,
    capacity: Option<usize>,
    not_empty: Notify,
    not_full: Notify,
}

impl BlockingQueue {
    fn new(store: Box<dyn MessageStore>, capacity: Option<usize>) -> Self {
        Self {
            store: Mutex::new(store),
            capacity,
            not_empty: Notify::new(),
            not_full: Notify::new(),
        }
    }

    /// Waits for `notified` according to `timeout`. Returns `false` once the wait is over.
    async fn wait(
        notified: std::pin::Pin<&mut tokio::sync::futures::Notified<'_>>,
        timeout: Timeout,
        deadline: Option<tokio::time::Instant>,
    ) -> bool {
        match (timeout, deadline) {
            (Timeout::Immediate, _) => false,
            (_, Some(deadline)) => timeout_at(deadline, notified).await.is_ok(),
            (_, None) => {
                notified.await;
                true
            }
        }
    }

    async fn offer(&self, message: Message, timeout: Timeout) -> bool {
        let deadline = timeout.deadline();
        loop {
            let notified = self.not_full.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();
            {
                let mut store = self.store.lock();
                if self.capacity.map_or(true, |capacity| store.len() < capacity) {
                    store.push(message);
                    drop(store);
                    self.not_empty.notify_one();
                    return true;
                }
            }
            if !Self::wait(notified, timeout, deadline).await {
                return false;
            }
        }
    }

    async fn poll(&self, timeout: Timeout) -> Option<Message> {
        let deadline = timeout.deadline();
        loop {
            let notified = self.not_empty.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();
            {
                let mut store = self.store.lock();
                if let Some(message) = store.pop() {
                    drop(store);
                    self.not_full.notify_one();
                    return Some(message);
                }
            }
            if !Self::wait(notified, timeout, deadline).await {
                return None;
            }
        }
    }

    fn len(&self) -> usize {
        self.store.lock().len()
    }

    fn drain(&self, keep: Option<&dyn Fn(&Message) -> bool>) -> Vec<Message> {
        let removed = {
            let mut store = self.store.lock();
            match keep {
                Some(keep) => store.drain_rejected(keep),
                None => store.drain_all(),
            }
        };
        if !removed.is_empty() {
            self.not_full.notify_waiters();
        }
        removed
    }
}

/// A pollable channel buffering messages in a queue.
///
/// Senders wait for room when the queue is bounded and full; receivers wait for a
/// message when it is empty. Both give up when their [`Timeout`] expires and report it
/// through the return value.
///
/// ```rust,ignore
/// let channel = QueueChannel::with_capacity(10)?.named("orders");
/// channel.send(Message::new("hello".to_string())).await?;
/// let received = channel.receive_timeout(Timeout::Immediate).await;
/// ```
#[derive(Debug)]
pub struct QueueChannel {
    core: ChannelCore,
    queue: BlockingQueue,
}

impl Default for QueueChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl QueueChannel {
    /// Creates a channel with the configured default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::from_store(Box::<FifoStore>::default(), CONFIG.queue_capacity())
    }

    /// Creates a channel that never blocks senders.
    #[must_use]
    pub fn unbounded() -> Self {
        Self::from_store(Box::<FifoStore>::default(), None)
    }

    /// Creates a channel holding at most `capacity` messages.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingError::Configuration`] when `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Result<Self, MessagingError> {
        Ok(Self::from_store(
            Box::<FifoStore>::default(),
            Some(validate_capacity(capacity)?),
        ))
    }

    pub(crate) fn from_store(store: Box<dyn MessageStore>, capacity: Option<usize>) -> Self {
        Self {
            core: ChannelCore::default(),
            queue: BlockingQueue::new(store, capacity),
        }
    }

    /// Sets the channel name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.core.set_name(name.into());
        self
    }

    /// Restricts accepted payloads to the given types.
    #[must_use]
    pub fn with_datatypes(mut self, datatypes: Vec<PayloadType>) -> Self {
        self.core.set_datatypes(datatypes);
        self
    }

    /// Appends an interceptor.
    #[must_use]
    pub fn with_interceptor(self, interceptor: InterceptorRef) -> Self {
        self.core.add_interceptor(interceptor);
        self
    }

    /// Appends an interceptor to a channel that may already be in use.
    pub fn add_interceptor(&self, interceptor: InterceptorRef) {
        self.core.add_interceptor(interceptor);
    }

    /// Replaces the interceptor chain.
    pub fn set_interceptors(&self, interceptors: Vec<InterceptorRef>) {
        self.core.set_interceptors(interceptors);
    }

    /// The current interceptor chain, in order.
    #[must_use]
    pub fn interceptors(&self) -> Vec<InterceptorRef> {
        self.core.interceptors()
    }

    /// Declared payload types; empty when any payload is accepted.
    #[must_use]
    pub fn datatypes(&self) -> &[PayloadType] {
        self.core.datatypes()
    }

    /// Removes and returns every buffered message.
    pub fn clear(&self) -> Vec<Message> {
        self.queue.drain(None)
    }

    /// Removes and returns the buffered messages `selector` does not accept.
    pub fn purge(&self, selector: &dyn MessageSelector) -> Vec<Message> {
        let keep = |message: &Message| selector.accept(message);
        self.queue.drain(Some(&keep as &dyn Fn(&Message) -> bool))
    }

    /// Number of buffered messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether the buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Free slots left, `None` when unbounded.
    #[must_use]
    pub fn remaining_capacity(&self) -> Option<usize> {
        self.queue
            .capacity
            .map(|capacity| capacity.saturating_sub(self.len()))
    }
}

pub(crate) fn validate_capacity(capacity: usize) -> Result<usize, MessagingError> {
    if capacity == 0 {
        return Err(MessagingError::Configuration(
            "queue capacity must be greater than zero".into(),
        ));
    }
    Ok(capacity)
}

#[async_trait]
impl MessageChannel for QueueChannel {
    fn name(&self) -> Option<&str> {
        self.core.name()
    }

    #[instrument(skip_all, fields(channel = ?self.core.name(), message_id = %message.id()))]
    async fn send_timeout(&self, message: Message, timeout: Timeout) -> Result<bool, MessagingError> {
        self.core
            .send_with(self, message, |message| async move {
                Ok(self.queue.offer(message, timeout).await)
            })
            .await
    }
}

#[async_trait]
impl PollableChannel for QueueChannel {
    async fn receive_timeout(&self, timeout: Timeout) -> Option<Message> {
        if !self.core.pre_receive(self) {
            trace!(channel = ?self.core.name(), "receive vetoed by interceptor");
            return None;
        }
        let message = self.queue.poll(timeout).await;
        self.core.post_receive(message, self)
    }
}
