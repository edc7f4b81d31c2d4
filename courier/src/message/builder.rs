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
use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::common::{ChannelRef, SharedPayload};
use crate::message::{keys, HeaderValue, Message, MessagePriority};
use crate::traits::Payload;

/// Builds new [`Message`]s, either from scratch or derived from an existing one.
///
/// A builder created with [`MessageBuilder::from_message`] that is never modified
/// returns the original message from [`build`](Self::build), keeping its `id`. Any
/// header or payload change produces a new message with a new `id` and `timestamp`.
///
/// ```rust,ignore
/// let reply = MessageBuilder::from_message(&request)
///     .set_priority(MessagePriority::High)
///     .build();
/// ```
#[derive(Debug)]
pub struct MessageBuilder {
    payload: SharedPayload,
    headers: HashMap<String, HeaderValue>,
    original: Option<Message>,
}

impl MessageBuilder {
    /// Starts a message carrying `payload`.
    pub fn with_payload<T: Payload>(payload: T) -> Self {
        Self::with_shared_payload(Arc::new(payload))
    }

    /// Starts a message carrying an already shared payload.
    #[must_use]
    pub fn with_shared_payload(payload: SharedPayload) -> Self {
        Self {
            payload,
            headers: HashMap::new(),
            original: None,
        }
    }

    /// Starts from `message`: same payload and a copy of its headers.
    #[must_use]
    pub fn from_message(message: &Message) -> Self {
        Self {
            payload: message.shared_payload(),
            headers: message.headers().to_map(),
            original: Some(message.clone()),
        }
    }

    fn touch(&mut self) {
        self.original = None;
    }

    /// Sets `key` to `value`, replacing any previous value.
    ///
    /// `id` and `timestamp` may be set but are always regenerated by [`build`](Self::build).
    #[must_use]
    pub fn set_header<T: Payload>(self, key: &str, value: T) -> Self {
        self.set_header_value(key, HeaderValue::new(value))
    }

    /// Sets `key` to an existing [`HeaderValue`].
    #[must_use]
    pub fn set_header_value(mut self, key: &str, value: HeaderValue) -> Self {
        self.touch();
        self.headers.insert(key.to_string(), value);
        self
    }

    /// Sets `key` to `value` only when `key` is absent.
    #[must_use]
    pub fn set_header_if_absent<T: Payload>(mut self, key: &str, value: T) -> Self {
        if !self.headers.contains_key(key) {
            self.touch();
            self.headers.insert(key.to_string(), HeaderValue::new(value));
        }
        self
    }

    /// Removes `key`.
    #[must_use]
    pub fn remove_header(mut self, key: &str) -> Self {
        if self.headers.remove(key).is_some() {
            self.touch();
        }
        self
    }

    /// Copies every entry of `headers`, replacing existing values.
    #[must_use]
    pub fn copy_headers<'a>(
        mut self,
        headers: impl IntoIterator<Item = (&'a str, &'a HeaderValue)>,
    ) -> Self {
        for (key, value) in headers {
            self.touch();
            self.headers.insert(key.to_string(), value.clone());
        }
        self
    }

    /// Copies the entries of `headers` whose keys are not yet present.
    #[must_use]
    pub fn copy_headers_if_absent<'a>(
        mut self,
        headers: impl IntoIterator<Item = (&'a str, &'a HeaderValue)>,
    ) -> Self {
        for (key, value) in headers {
            if !self.headers.contains_key(key) {
                self.touch();
                self.headers.insert(key.to_string(), value.clone());
            }
        }
        self
    }

    /// Sets the `correlationId` header.
    #[must_use]
    pub fn set_correlation_id<T: Payload>(self, correlation_id: T) -> Self {
        self.set_header(keys::CORRELATION_ID, correlation_id)
    }

    /// Sets the `replyChannel` header to a channel reference.
    #[must_use]
    pub fn set_reply_channel(self, channel: ChannelRef) -> Self {
        self.set_header(keys::REPLY_CHANNEL, channel)
    }

    /// Sets the `replyChannel` header to a channel name, resolved when the reply is sent.
    #[must_use]
    pub fn set_reply_channel_name(self, name: impl Into<String>) -> Self {
        self.set_header(keys::REPLY_CHANNEL, name.into())
    }

    /// Sets the `errorChannel` header to a channel reference.
    #[must_use]
    pub fn set_error_channel(self, channel: ChannelRef) -> Self {
        self.set_header(keys::ERROR_CHANNEL, channel)
    }

    /// Sets the `errorChannel` header to a channel name.
    #[must_use]
    pub fn set_error_channel_name(self, name: impl Into<String>) -> Self {
        self.set_header(keys::ERROR_CHANNEL, name.into())
    }

    /// Sets the `expirationDate` header.
    #[must_use]
    pub fn set_expiration_date(self, expiration: DateTime<Utc>) -> Self {
        self.set_header(keys::EXPIRATION_DATE, expiration)
    }

    /// Sets the `sequenceNumber` header.
    #[must_use]
    pub fn set_sequence_number(self, sequence_number: usize) -> Self {
        self.set_header(keys::SEQUENCE_NUMBER, sequence_number)
    }

    /// Sets the `sequenceSize` header.
    #[must_use]
    pub fn set_sequence_size(self, sequence_size: usize) -> Self {
        self.set_header(keys::SEQUENCE_SIZE, sequence_size)
    }

    /// Sets the `priority` header.
    #[must_use]
    pub fn set_priority(self, priority: MessagePriority) -> Self {
        self.set_header(keys::PRIORITY, priority)
    }

    /// Builds the message.
    #[must_use]
    pub fn build(self) -> Message {
        match self.original {
            Some(original) => original,
            None => Message::from_parts(self.payload, self.headers),
        }
    }
}
