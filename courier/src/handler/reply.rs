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

use crate::common::SharedPayload;
use crate::message::{keys, HeaderValue, Message, MessageBuilder};
use crate::traits::Payload;

/// What a reply is built from.
#[derive(Debug, Clone)]
pub enum ReplyContent {
    /// A bare payload; the reply inherits the request's headers.
    Payload(SharedPayload),
    /// A complete message, sent as is unless annotations override its headers.
    Message(Message),
}

/// One reply waiting to be sent, with optional header annotations.
#[derive(Debug, Clone)]
pub struct ReplyCandidate {
    content: ReplyContent,
    correlation_id: Option<HeaderValue>,
    sequence_number: Option<usize>,
    sequence_size: Option<usize>,
}

impl ReplyCandidate {
    fn new(content: ReplyContent) -> Self {
        Self {
            content,
            correlation_id: None,
            sequence_number: None,
            sequence_size: None,
        }
    }

    /// Stamps the reply's `correlationId`.
    pub fn set_correlation_id(&mut self, correlation_id: HeaderValue) -> &mut Self {
        self.correlation_id = Some(correlation_id);
        self
    }

    /// Stamps the reply's `sequenceNumber`.
    pub fn set_sequence_number(&mut self, sequence_number: usize) -> &mut Self {
        self.sequence_number = Some(sequence_number);
        self
    }

    /// Stamps the reply's `sequenceSize`.
    pub fn set_sequence_size(&mut self, sequence_size: usize) -> &mut Self {
        self.sequence_size = Some(sequence_size);
        self
    }

    /// The reply content.
    #[must_use]
    pub const fn content(&self) -> &ReplyContent {
        &self.content
    }

    /// The `correlationId` annotation, if any.
    #[must_use]
    pub const fn correlation_id(&self) -> Option<&HeaderValue> {
        self.correlation_id.as_ref()
    }

    /// The `sequenceNumber` annotation, if any.
    #[must_use]
    pub const fn sequence_number(&self) -> Option<usize> {
        self.sequence_number
    }

    /// The `sequenceSize` annotation, if any.
    #[must_use]
    pub const fn sequence_size(&self) -> Option<usize> {
        self.sequence_size
    }

    fn into_message(self, request: &Message) -> Message {
        let mut builder = match self.content {
            ReplyContent::Payload(payload) => MessageBuilder::with_shared_payload(payload)
                .copy_headers_if_absent(request.headers().iter()),
            ReplyContent::Message(message) => MessageBuilder::from_message(&message),
        };
        if let Some(correlation_id) = self.correlation_id {
            builder = builder.set_header_value(keys::CORRELATION_ID, correlation_id);
        }
        if let Some(sequence_number) = self.sequence_number {
            builder = builder.set_sequence_number(sequence_number);
        }
        if let Some(sequence_size) = self.sequence_size {
            builder = builder.set_sequence_size(sequence_size);
        }
        builder.build()
    }
}

/// Collects the replies a handler produces for one request.
///
/// Producers fill the holder without knowing where replies go; the enclosing
/// [`ReplyProducingHandler`](crate::handler::ReplyProducingHandler) turns the
/// candidates into messages with [`finish`](Self::finish) and sends them.
#[derive(Debug, Default, Clone)]
pub struct ReplyMessageHolder {
    replies: Vec<ReplyCandidate>,
}

impl ReplyMessageHolder {
    /// Creates an empty holder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a payload reply.
    pub fn add_payload<T: Payload>(&mut self, payload: T) -> &mut ReplyCandidate {
        self.add_shared_payload(std::sync::Arc::new(payload))
    }

    /// Adds a reply carrying an already shared payload.
    pub fn add_shared_payload(&mut self, payload: SharedPayload) -> &mut ReplyCandidate {
        self.push(ReplyContent::Payload(payload))
    }

    /// Adds a complete message as a reply.
    pub fn add_message(&mut self, message: Message) -> &mut ReplyCandidate {
        self.push(ReplyContent::Message(message))
    }

    fn push(&mut self, content: ReplyContent) -> &mut ReplyCandidate {
        let index = self.replies.len();
        self.replies.push(ReplyCandidate::new(content));
        &mut self.replies[index]
    }

    /// Number of collected replies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.replies.len()
    }

    /// Whether nothing was collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.replies.is_empty()
    }

    /// The collected candidates, in order.
    pub fn iter(&self) -> impl Iterator<Item = &ReplyCandidate> {
        self.replies.iter()
    }

    /// Builds the reply messages for `request`.
    ///
    /// Payload replies copy the request headers they do not already carry. Annotations
    /// override the corresponding headers.
    #[must_use]
    pub fn finish(self, request: &Message) -> Vec<Message> {
        self.replies
            .into_iter()
            .map(|candidate| candidate.into_message(request))
            .collect()
    }
}
