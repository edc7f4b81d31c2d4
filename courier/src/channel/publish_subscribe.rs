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

use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use crate::channel::base::ChannelCore;
use crate::common::{HandlerRef, InterceptorRef, Timeout};
use crate::dispatcher::BroadcastingDispatcher;
use crate::message::{Message, MessagingError};
use crate::traits::{
    MessageChannel, MessageDispatcher, PayloadType, SubscribableChannel, TaskExecutor,
};

/// A subscribable channel that broadcasts every message to all subscribers.
///
/// Backed by a [`BroadcastingDispatcher`] unless another dispatcher is supplied.
#[derive(Debug)]
pub struct PublishSubscribeChannel {
    core: ChannelCore,
    dispatcher: Arc<dyn MessageDispatcher>,
}

impl Default for PublishSubscribeChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl PublishSubscribeChannel {
    /// Creates a channel delivering inline on the sender's task.
    #[must_use]
    pub fn new() -> Self {
        Self::with_dispatcher(Arc::new(BroadcastingDispatcher::new()))
    }

    /// Creates a channel delivering each copy through `executor`.
    #[must_use]
    pub fn with_executor(executor: Arc<dyn TaskExecutor>) -> Self {
        Self::with_dispatcher(Arc::new(BroadcastingDispatcher::new().with_executor(executor)))
    }

    /// Creates a channel backed by `dispatcher`.
    #[must_use]
    pub fn with_dispatcher(dispatcher: Arc<dyn MessageDispatcher>) -> Self {
        Self {
            core: ChannelCore::default(),
            dispatcher,
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

    /// Number of current subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.dispatcher.handler_count()
    }
}

#[async_trait]
impl MessageChannel for PublishSubscribeChannel {
    fn name(&self) -> Option<&str> {
        self.core.name()
    }

    #[instrument(skip_all, fields(channel = ?self.core.name(), message_id = %message.id()))]
    async fn send_timeout(&self, message: Message, _timeout: Timeout) -> Result<bool, MessagingError> {
        self.core
            .send_with(self, message, |message| self.dispatcher.dispatch(message))
            .await
    }
}

impl SubscribableChannel for PublishSubscribeChannel {
    fn subscribe(&self, handler: HandlerRef) -> bool {
        self.dispatcher.add_handler(handler)
    }

    fn unsubscribe(&self, handler: &HandlerRef) -> bool {
        self.dispatcher.remove_handler(handler)
    }
}
