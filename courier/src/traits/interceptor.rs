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

use crate::message::{Message, MessagingError};
use crate::traits::MessageChannel;

/// Hooks a channel runs around every send and receive.
///
/// Interceptors run in registration order for every hook, including the `post_*`
/// hooks. All methods have pass-through defaults, so implementors override only what
/// they need.
pub trait ChannelInterceptor: Send + Sync + Debug {
    /// Called before a send. May replace the message (`Ok(Some(other))`), quietly
    /// cancel the send (`Ok(None)`, the send then reports `false`), or veto it with an
    /// error.
    ///
    /// # Errors
    ///
    /// Any error aborts the send and is returned to the sender.
    fn pre_send(
        &self,
        message: Message,
        _channel: &dyn MessageChannel,
    ) -> Result<Option<Message>, MessagingError> {
        Ok(Some(message))
    }

    /// Called after a send attempt with its outcome.
    fn post_send(&self, _message: &Message, _channel: &dyn MessageChannel, _sent: bool) {}

    /// Called before a receive. Returning `false` makes the receive yield `None`
    /// without touching the buffer.
    fn pre_receive(&self, _channel: &dyn MessageChannel) -> bool {
        true
    }

    /// Called with each received message. May replace it, or return `None` to drop it.
    fn post_receive(&self, message: Message, _channel: &dyn MessageChannel) -> Option<Message> {
        Some(message)
    }
}
