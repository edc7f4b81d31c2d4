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
use tracing::{instrument, trace};

use crate::channel::base::ChannelCore;
use crate::common::{HandlerRef, InterceptorRef, Timeout};
use crate::dispatcher::SimpleDispatcher;
use crate::message::{DeliveryFailure, Message, MessagingError};
use crate::traits::{MessageChannel, MessageDispatcher, PayloadType, SubscribableChannel};

/// A subscribable channel that hands each message to a handler on the sender's task.
///
/// By default the channel uses a [`SimpleDispatcher`], so a message goes to the first
/// subscriber that accepts it. "Nobody subscribed" and "everybody rejected" are reported
/// as a `false` send result unless [`surface_failures`](Self::surface_failures) is set,
/// in which case they are returned as errors. Handler failures always propagate.
#[derive(Debug)]
pub struct DirectChannel {
    core: ChannelCore,
    dispatcher: Arc<dyn MessageDispatcher>,
    surface_failures: bool,
}

impl Default for DirectChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectChannel {
    /// Creates an anonymous channel backed by a [`SimpleDispatcher`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_dispatcher(Arc::new(SimpleDispatcher::new()))
    }

    /// Creates a channel backed by `dispatcher`.
    #[must_use]
    pub fn with_dispatcher(dispatcher: Arc<dyn MessageDispatcher>) -> Self {
        Self {
            core: ChannelCore::default(),
            dispatcher,
            surface_failures: false,
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

    /// Returns "no subscribers" and "all rejected" as errors instead of `false`.
    #[must_use]
    pub const fn surface_failures(mut self, surface: bool) -> Self {
        self.surface_failures = surface;
        self
    }

    /// Appends an interceptor to a channel that may already be in use.
    pub fn add_interceptor(&self, interceptor: InterceptorRef) {
        self.core.add_interceptor(interceptor);
    }

    /// The dispatcher delivering this channel's messages.
    #[must_use]
    pub fn dispatcher(&self) -> &Arc<dyn MessageDispatcher> {
        &self.dispatcher
    }

    fn is_quiet_failure(error: &MessagingError) -> bool {
        error.is_rejection()
            || matches!(
                error,
                MessagingError::Delivery {
                    reason: DeliveryFailure::NoSubscribers,
                    ..
                }
            )
    }
}

#[async_trait]
impl MessageChannel for DirectChannel {
    fn name(&self) -> Option<&str> {
        self.core.name()
    }

    /// The timeout is ignored: delivery happens on the sender's task.
    #[instrument(skip_all, fields(channel = ?self.core.name(), message_id = %message.id()))]
    async fn send_timeout(&self, message: Message, _timeout: Timeout) -> Result<bool, MessagingError> {
        self.core
            .send_with(self, message, |message| async move {
                match self.dispatcher.dispatch(message).await {
                    Err(error) if !self.surface_failures && Self::is_quiet_failure(&error) => {
                        trace!(%error, "direct delivery did not complete");
                        Ok(false)
                    }
                    other => other,
                }
            })
            .await
    }
}

impl SubscribableChannel for DirectChannel {
    fn subscribe(&self, handler: HandlerRef) -> bool {
        self.dispatcher.add_handler(handler)
    }

    fn unsubscribe(&self, handler: &HandlerRef) -> bool {
        self.dispatcher.remove_handler(handler)
    }
}
