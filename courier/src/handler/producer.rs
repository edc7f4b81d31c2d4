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
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{instrument, trace};

use crate::common::config::CONFIG;
use crate::common::{ChannelRef, ChannelResolver, Timeout};
use crate::handler::ReplyMessageHolder;
use crate::message::{DeliveryFailure, Message, MessagingError};
use crate::traits::MessageHandler;

/// The processing step of a [`ReplyProducingHandler`].
///
/// Filters, splitters and transformers implement this to turn one request into zero or
/// more replies. Returning [`MessagingError::Rejected`] declines the request.
pub trait ReplyProducer: Send + Sync + Debug {
    /// Adds the replies for `message` to `replies`.
    ///
    /// # Errors
    ///
    /// Any failure of the processing step; nothing is sent in that case.
    fn produce_replies(
        &self,
        message: &Message,
        replies: &mut ReplyMessageHolder,
    ) -> Result<(), MessagingError>;
}

/// A handler that runs a [`ReplyProducer`] and sends the resulting replies onward.
///
/// Replies go to the first of:
/// 1. the configured output channel,
/// 2. the configured output channel name, looked up through the resolver,
/// 3. the request's `replyChannel` header, holding either a channel or a channel name.
///
/// ```rust,ignore
/// let handler = ReplyProducingHandler::new(MessageFilter::new(selector))
///     .with_output_channel(accepted.clone());
/// input.subscribe(Arc::new(handler));
/// ```
#[derive(Debug)]
pub struct ReplyProducingHandler<P> {
    producer: P,
    output_channel: Option<ChannelRef>,
    output_channel_name: Option<String>,
    resolver: Option<Arc<dyn ChannelResolver>>,
    send_timeout: Timeout,
    requires_reply: bool,
}

impl<P: ReplyProducer> ReplyProducingHandler<P> {
    /// Wraps `producer`, using the configured send timeout.
    pub fn new(producer: P) -> Self {
        Self {
            producer,
            output_channel: None,
            output_channel_name: None,
            resolver: None,
            send_timeout: CONFIG.send_timeout(),
            requires_reply: false,
        }
    }

    /// Sends replies to `channel`.
    #[must_use]
    pub fn with_output_channel(mut self, channel: ChannelRef) -> Self {
        self.output_channel = Some(channel);
        self
    }

    /// Sends replies to the channel the resolver knows as `name`.
    #[must_use]
    pub fn with_output_channel_name(mut self, name: impl Into<String>) -> Self {
        self.output_channel_name = Some(name.into());
        self
    }

    /// Resolves channel names, both configured and from `replyChannel` headers.
    #[must_use]
    pub fn with_channel_resolver(mut self, resolver: Arc<dyn ChannelResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Sets the timeout for each reply send.
    #[must_use]
    pub const fn with_send_timeout(mut self, timeout: Timeout) -> Self {
        self.send_timeout = timeout;
        self
    }

    /// Makes a request that produces no reply an error.
    #[must_use]
    pub const fn with_requires_reply(mut self, requires_reply: bool) -> Self {
        self.requires_reply = requires_reply;
        self
    }

    /// The wrapped producer.
    pub const fn producer(&self) -> &P {
        &self.producer
    }

    fn resolve(&self, name: &str) -> Result<ChannelRef, MessagingError> {
        let resolver = self.resolver.as_ref().ok_or_else(|| {
            MessagingError::ChannelResolution(format!(
                "cannot resolve channel '{name}' without a channel resolver"
            ))
        })?;
        resolver.resolve(name)
    }

    fn output_channel_for(&self, request: &Message) -> Result<ChannelRef, MessagingError> {
        if let Some(channel) = &self.output_channel {
            return Ok(Arc::clone(channel));
        }
        if let Some(name) = &self.output_channel_name {
            return self.resolve(name);
        }
        if let Some(reply_channel) = request.headers().reply_channel() {
            if let Some(channel) = reply_channel.downcast_ref::<ChannelRef>() {
                return Ok(Arc::clone(channel));
            }
            if let Some(name) = reply_channel.downcast_ref::<String>() {
                return self.resolve(name);
            }
            trace!(found = reply_channel.type_name(), "unusable replyChannel header");
        }
        Err(MessagingError::delivery(
            request.clone(),
            DeliveryFailure::NoReplyChannel,
        ))
    }
}

#[async_trait]
impl<P: ReplyProducer> MessageHandler for ReplyProducingHandler<P> {
    #[instrument(skip_all, fields(message_id = %message.id()))]
    async fn handle(&self, message: Message) -> Result<(), MessagingError> {
        let mut holder = ReplyMessageHolder::new();
        self.producer.produce_replies(&message, &mut holder)?;
        if holder.is_empty() {
            if self.requires_reply {
                return Err(MessagingError::handling(
                    message,
                    "handler requires a reply but produced none",
                ));
            }
            trace!("no reply produced");
            return Ok(());
        }

        let channel = self.output_channel_for(&message)?;
        let replies = holder.finish(&message);
        trace!(replies = replies.len(), channel = ?channel.name(), "sending replies");
        for reply in replies {
            if !channel.send_timeout(reply.clone(), self.send_timeout).await? {
                let channel = channel.name().unwrap_or("<anonymous>").to_owned();
                return Err(MessagingError::delivery(
                    reply,
                    DeliveryFailure::SendTimedOut { channel },
                ));
            }
        }
        Ok(())
    }
}
