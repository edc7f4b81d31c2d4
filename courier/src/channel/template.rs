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

use tracing::{instrument, trace};

use crate::channel::QueueChannel;
use crate::common::config::CONFIG;
use crate::common::{ChannelRef, Timeout};
use crate::message::{Message, MessageBuilder, MessagingError};
use crate::traits::{MessageChannel, PollableChannel};

/// Sends and receives with preset timeouts, and performs request/reply exchanges.
#[derive(Debug, Clone)]
pub struct ChannelTemplate {
    send_timeout: Timeout,
    receive_timeout: Timeout,
    default_channel: Option<ChannelRef>,
}

impl Default for ChannelTemplate {
    fn default() -> Self {
        Self::new()
    }
}

impl ChannelTemplate {
    /// Creates a template using the configured timeouts.
    #[must_use]
    pub fn new() -> Self {
        Self {
            send_timeout: CONFIG.send_timeout(),
            receive_timeout: CONFIG.receive_timeout(),
            default_channel: None,
        }
    }

    /// Sets the send timeout.
    #[must_use]
    pub const fn with_send_timeout(mut self, timeout: Timeout) -> Self {
        self.send_timeout = timeout;
        self
    }

    /// Sets the receive timeout, also used while waiting for replies.
    #[must_use]
    pub const fn with_receive_timeout(mut self, timeout: Timeout) -> Self {
        self.receive_timeout = timeout;
        self
    }

    /// Sets the channel used by [`send`](Self::send).
    #[must_use]
    pub fn with_default_channel(mut self, channel: ChannelRef) -> Self {
        self.default_channel = Some(channel);
        self
    }

    /// Sends `message` to the default channel.
    ///
    /// # Errors
    ///
    /// [`MessagingError::Configuration`] without a default channel, otherwise whatever the
    /// channel reports.
    pub async fn send(&self, message: Message) -> Result<bool, MessagingError> {
        let channel = self.default_channel.as_ref().ok_or_else(|| {
            MessagingError::Configuration("template has no default channel".into())
        })?;
        self.send_to(channel.as_ref(), message).await
    }

    /// Sends `message` to `channel` with the template's send timeout.
    ///
    /// # Errors
    ///
    /// Whatever the channel reports.
    pub async fn send_to(
        &self,
        channel: &dyn MessageChannel,
        message: Message,
    ) -> Result<bool, MessagingError> {
        channel.send_timeout(message, self.send_timeout).await
    }

    /// Receives from `channel` with the template's receive timeout.
    pub async fn receive_from(&self, channel: &dyn PollableChannel) -> Option<Message> {
        channel.receive_timeout(self.receive_timeout).await
    }

    /// Sends `request` with a temporary reply channel in its `replyChannel` header and
    /// waits for the first reply.
    ///
    /// Returns `None` when the request was not sent or no reply arrived in time.
    ///
    /// # Errors
    ///
    /// Whatever the target channel reports for the send.
    #[instrument(skip_all, fields(channel = ?channel.name(), message_id = %request.id()))]
    pub async fn send_and_receive(
        &self,
        channel: &dyn MessageChannel,
        request: Message,
    ) -> Result<Option<Message>, MessagingError> {
        let reply_channel = Arc::new(QueueChannel::unbounded());
        let request = MessageBuilder::from_message(&request)
            .set_reply_channel(reply_channel.clone())
            .build();
        if !self.send_to(channel, request).await? {
            trace!("request was not sent");
            return Ok(None);
        }
        Ok(reply_channel.receive_timeout(self.receive_timeout).await)
    }
}
