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
use static_assertions::assert_impl_all;
use uuid::Uuid;

use crate::common::SharedPayload;
use crate::message::{HeaderValue, MessageHeaders, MessagingError};
use crate::traits::Payload;

/// An immutable envelope pairing a payload with its [`MessageHeaders`].
///
/// Once built, neither the payload nor the headers can change. Deriving a "changed"
/// message always produces a new `Message` (with a new `id`) through a
/// [`MessageBuilder`](crate::message::MessageBuilder).
///
/// Cloning is cheap: the payload and header entries are reference counted, and a clone
/// keeps the original `id`.
#[derive(Clone, Debug)]
pub struct Message {
    headers: MessageHeaders,
    payload: SharedPayload,
}

impl Message {
    /// Creates a message carrying `payload` and only the generated headers.
    pub fn new<T: Payload>(payload: T) -> Self {
        Self::from_parts(Arc::new(payload), HashMap::new())
    }

    /// Creates a message around an already shared payload.
    #[must_use]
    pub fn from_shared_payload(payload: SharedPayload) -> Self {
        Self::from_parts(payload, HashMap::new())
    }

    pub(crate) fn from_parts(payload: SharedPayload, headers: HashMap<String, HeaderValue>) -> Self {
        Self {
            headers: MessageHeaders::new(headers),
            payload,
        }
    }

    /// The unique identifier of this message.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.headers.id()
    }

    /// When this message was created.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.headers.timestamp()
    }

    /// The message headers.
    #[must_use]
    pub const fn headers(&self) -> &MessageHeaders {
        &self.headers
    }

    /// Returns the payload as `T` if that is its concrete type.
    #[must_use]
    pub fn payload<T: Payload>(&self) -> Option<&T> {
        self.payload.as_ref().as_any().downcast_ref::<T>()
    }

    /// Returns the payload as `T`.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingError::TypeMismatch`] when the payload is not a `T`.
    pub fn payload_as<T: Payload>(&self) -> Result<&T, MessagingError> {
        self.payload::<T>().ok_or_else(|| {
            MessagingError::type_mismatch(
                "payload",
                std::any::type_name::<T>(),
                self.payload_type_name(),
            )
        })
    }

    /// The payload as a trait object.
    #[must_use]
    pub fn payload_value(&self) -> &dyn Payload {
        self.payload.as_ref()
    }

    /// A shared handle to the payload, for building derived messages without copying it.
    #[must_use]
    pub fn shared_payload(&self) -> SharedPayload {
        Arc::clone(&self.payload)
    }

    /// The concrete type name of the payload.
    #[must_use]
    pub fn payload_type_name(&self) -> &'static str {
        self.payload.as_ref().type_name()
    }
}

assert_impl_all!(Message: Send, Sync, Clone);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_downcasts_to_its_type_only() {
        let message = Message::new(String::from("order-17"));
        assert_eq!(message.payload::<String>().map(String::as_str), Some("order-17"));
        assert!(message.payload::<u32>().is_none());
        assert!(matches!(
            message.payload_as::<u32>(),
            Err(MessagingError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn clones_share_identity() {
        let message = Message::new(5_u64);
        let copy = message.clone();
        assert_eq!(message.id(), copy.id());
        assert_ne!(message.id(), Message::new(5_u64).id());
    }

    #[test]
    fn shared_payload_is_not_wrapped_again() {
        let original = Message::new(vec![1_u8, 2, 3]);
        let derived = Message::from_shared_payload(original.shared_payload());
        assert_eq!(derived.payload::<Vec<u8>>(), Some(&vec![1, 2, 3]));
    }
}
