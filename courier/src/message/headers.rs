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

//! Immutable message headers and the well-known header keys.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::trace;
use uuid::Uuid;

use crate::common::SharedPayload;
use crate::message::{MessagePriority, MessagingError};
use crate::traits::Payload;

/// Names of the headers the framework reads or manages.
pub mod keys {
    /// Unique message identifier. Always generated, never caller supplied.
    pub const ID: &str = "id";
    /// Creation time. Always generated, never caller supplied.
    pub const TIMESTAMP: &str = "timestamp";
    /// Groups related messages, e.g. the parts produced by a splitter.
    pub const CORRELATION_ID: &str = "correlationId";
    /// Where a reply-producing handler sends its output when it has no output channel.
    pub const REPLY_CHANNEL: &str = "replyChannel";
    /// Where failures concerning the message may be reported.
    pub const ERROR_CHANNEL: &str = "errorChannel";
    /// Instant after which the message is considered expired.
    pub const EXPIRATION_DATE: &str = "expirationDate";
    /// 1-based position of the message within its sequence.
    pub const SEQUENCE_NUMBER: &str = "sequenceNumber";
    /// Number of messages in the sequence.
    pub const SEQUENCE_SIZE: &str = "sequenceSize";
    /// [`MessagePriority`](crate::message::MessagePriority) used by priority channels.
    pub const PRIORITY: &str = "priority";
}

/// A dynamically typed header value.
///
/// Any [`Payload`] can be stored. Typed reads go through [`HeaderValue::downcast_ref`].
#[derive(Clone, Debug)]
pub struct HeaderValue(SharedPayload);

impl HeaderValue {
    /// Wraps `value`.
    ///
    /// To store an already shared value without adding a layer, use
    /// [`HeaderValue::from_shared`].
    pub fn new<T: Payload>(value: T) -> Self {
        Self(Arc::new(value))
    }

    /// Wraps an already shared value.
    #[must_use]
    pub fn from_shared(value: SharedPayload) -> Self {
        Self(value)
    }

    /// Returns the value as `T` if that is its concrete type.
    #[must_use]
    pub fn downcast_ref<T: Payload>(&self) -> Option<&T> {
        self.0.as_ref().as_any().downcast_ref::<T>()
    }

    /// Returns `true` when the value's concrete type is `T`.
    #[must_use]
    pub fn is<T: Payload>(&self) -> bool {
        self.downcast_ref::<T>().is_some()
    }

    /// The concrete type name of the value.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.0.as_ref().type_name()
    }

    /// Returns the shared value.
    #[must_use]
    pub fn shared(&self) -> SharedPayload {
        Arc::clone(&self.0)
    }
}

/// The read-only header map of a [`Message`](crate::message::Message).
///
/// `MessageHeaders` always contains [`keys::ID`] and [`keys::TIMESTAMP`]. Both are
/// generated when the map is constructed and overwrite any caller supplied values, so
/// message identity cannot be forged. After construction the map cannot change:
/// [`insert`](Self::insert), [`extend`](Self::extend), [`remove`](Self::remove) and
/// [`clear`](Self::clear) exist only to report [`MessagingError::UnsupportedOperation`].
/// Use a [`MessageBuilder`](crate::message::MessageBuilder) to derive a changed message.
///
/// Cloning is cheap; the entries are shared.
#[derive(Clone, Debug)]
pub struct MessageHeaders {
    id: Uuid,
    timestamp: DateTime<Utc>,
    entries: Arc<HashMap<String, HeaderValue>>,
}

impl Default for MessageHeaders {
    fn default() -> Self {
        Self::new(HashMap::new())
    }
}

impl MessageHeaders {
    /// Creates headers from `entries`, generating a fresh `id` and `timestamp`.
    pub fn new(mut entries: HashMap<String, HeaderValue>) -> Self {
        let id = Uuid::new_v4();
        let timestamp = Utc::now();
        if entries.contains_key(keys::ID) || entries.contains_key(keys::TIMESTAMP) {
            trace!(%id, "Discarding caller supplied id/timestamp headers");
        }
        entries.insert(keys::ID.to_string(), HeaderValue::new(id));
        entries.insert(keys::TIMESTAMP.to_string(), HeaderValue::new(timestamp));
        Self {
            id,
            timestamp,
            entries: Arc::new(entries),
        }
    }

    /// The unique message identifier.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// When these headers were created.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns the value stored under `key`, or `None` when absent.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&HeaderValue> {
        self.entries.get(key)
    }

    /// Returns the value stored under `key` as a `T`.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingError::TypeMismatch`] when the value exists but is not a `T`.
    pub fn get_as<T: Payload>(&self, key: &str) -> Result<Option<&T>, MessagingError> {
        match self.entries.get(key) {
            None => Ok(None),
            Some(value) => value.downcast_ref::<T>().map(Some).ok_or_else(|| {
                MessagingError::type_mismatch(
                    format!("header '{key}'"),
                    std::any::type_name::<T>(),
                    value.type_name(),
                )
            }),
        }
    }

    /// Returns `true` when `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of entries, including `id` and `timestamp`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`: `id` and `timestamp` are always present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the header names.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterates over the entries.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &HeaderValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Copies the entries into a new, mutable map.
    #[must_use]
    pub fn to_map(&self) -> HashMap<String, HeaderValue> {
        HashMap::clone(&self.entries)
    }

    /// The `correlationId` header.
    #[must_use]
    pub fn correlation_id(&self) -> Option<&HeaderValue> {
        self.get(keys::CORRELATION_ID)
    }

    /// The `replyChannel` header: a channel reference or a channel name.
    #[must_use]
    pub fn reply_channel(&self) -> Option<&HeaderValue> {
        self.get(keys::REPLY_CHANNEL)
    }

    /// The `errorChannel` header: a channel reference or a channel name.
    #[must_use]
    pub fn error_channel(&self) -> Option<&HeaderValue> {
        self.get(keys::ERROR_CHANNEL)
    }

    /// The `expirationDate` header, if present and a `DateTime<Utc>`.
    #[must_use]
    pub fn expiration_date(&self) -> Option<DateTime<Utc>> {
        self.typed(keys::EXPIRATION_DATE)
    }

    /// The `sequenceNumber` header, if present and a `usize`.
    #[must_use]
    pub fn sequence_number(&self) -> Option<usize> {
        self.typed(keys::SEQUENCE_NUMBER)
    }

    /// The `sequenceSize` header, if present and a `usize`.
    #[must_use]
    pub fn sequence_size(&self) -> Option<usize> {
        self.typed(keys::SEQUENCE_SIZE)
    }

    /// The `priority` header, if present and a [`MessagePriority`].
    #[must_use]
    pub fn priority(&self) -> Option<MessagePriority> {
        self.typed(keys::PRIORITY)
    }

    fn typed<T: Payload + Copy>(&self, key: &str) -> Option<T> {
        self.get(key).and_then(HeaderValue::downcast_ref::<T>).copied()
    }

    /// Headers are immutable.
    ///
    /// # Errors
    ///
    /// Always returns [`MessagingError::UnsupportedOperation`].
    pub fn insert(&self, key: &str, _value: HeaderValue) -> Result<(), MessagingError> {
        Err(Self::immutable(format!("insert '{key}'")))
    }

    /// Headers are immutable.
    ///
    /// # Errors
    ///
    /// Always returns [`MessagingError::UnsupportedOperation`].
    pub fn extend(
        &self,
        _entries: HashMap<String, HeaderValue>,
    ) -> Result<(), MessagingError> {
        Err(Self::immutable("extend".to_string()))
    }

    /// Headers are immutable.
    ///
    /// # Errors
    ///
    /// Always returns [`MessagingError::UnsupportedOperation`].
    pub fn remove(&self, key: &str) -> Result<Option<HeaderValue>, MessagingError> {
        Err(Self::immutable(format!("remove '{key}'")))
    }

    /// Headers are immutable.
    ///
    /// # Errors
    ///
    /// Always returns [`MessagingError::UnsupportedOperation`].
    pub fn clear(&self) -> Result<(), MessagingError> {
        Err(Self::immutable("clear".to_string()))
    }

    fn immutable(operation: String) -> MessagingError {
        MessagingError::UnsupportedOperation(format!("MessageHeaders are immutable ({operation})"))
    }
}
