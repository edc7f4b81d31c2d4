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

use crate::common::SharedPayload;
use crate::handler::{ReplyCandidate, ReplyMessageHolder, ReplyProducer, ReplyProducingHandler};
use crate::message::{HeaderValue, Message, MessagingError};
use crate::traits::Payload;

/// One part of a split message.
#[derive(Debug, Clone)]
pub enum SplitItem {
    /// A payload; its reply inherits the original message's headers.
    Payload(SharedPayload),
    /// A complete message.
    Message(Message),
}

impl SplitItem {
    /// Wraps a payload value.
    pub fn payload<T: Payload>(payload: T) -> Self {
        Self::Payload(std::sync::Arc::new(payload))
    }
}

/// The outcome of splitting one message.
#[derive(Debug, Clone)]
pub enum Split {
    /// No parts: nothing is sent.
    Nothing,
    /// A single value: sent as one reply numbered 1 of 1.
    Single(SplitItem),
    /// An ordered collection: one reply per element, correlated to the original message.
    Many(Vec<SplitItem>),
}

/// Splits one message into parts.
pub trait MessageSplitter: Send + Sync + Debug {
    /// Splits `message`.
    ///
    /// # Errors
    ///
    /// Any failure of the split; nothing is sent in that case.
    fn split(&self, message: &Message) -> Result<Split, MessagingError>;
}

/// Runs a [`MessageSplitter`] and stamps sequence headers on its parts.
///
/// For [`Split::Many`], every part gets `correlationId` set to the original message id,
/// a 1-based `sequenceNumber` and `sequenceSize` equal to the number of parts.
#[derive(Debug, Clone)]
pub struct SplittingProducer<S> {
    splitter: S,
}

impl<S: MessageSplitter> SplittingProducer<S> {
    /// Wraps `splitter`.
    pub const fn new(splitter: S) -> Self {
        Self { splitter }
    }

    /// Wraps `splitter` in a handler ready to be subscribed.
    pub fn handler(splitter: S) -> ReplyProducingHandler<Self> {
        ReplyProducingHandler::new(Self::new(splitter))
    }

    /// The wrapped splitter.
    pub const fn splitter(&self) -> &S {
        &self.splitter
    }
}

fn add_item(replies: &mut ReplyMessageHolder, item: SplitItem) -> &mut ReplyCandidate {
    match item {
        SplitItem::Payload(payload) => replies.add_shared_payload(payload),
        SplitItem::Message(message) => replies.add_message(message),
    }
}

impl<S: MessageSplitter> ReplyProducer for SplittingProducer<S> {
    fn produce_replies(
        &self,
        message: &Message,
        replies: &mut ReplyMessageHolder,
    ) -> Result<(), MessagingError> {
        match self.splitter.split(message)? {
            Split::Nothing => {}
            Split::Single(item) => {
                add_item(replies, item)
                    .set_sequence_number(1)
                    .set_sequence_size(1);
            }
            Split::Many(items) => {
                let size = items.len();
                let correlation_id = HeaderValue::new(message.id());
                for (index, item) in items.into_iter().enumerate() {
                    add_item(replies, item)
                        .set_correlation_id(correlation_id.clone())
                        .set_sequence_number(index + 1)
                        .set_sequence_size(size);
                }
            }
        }
        Ok(())
    }
}
