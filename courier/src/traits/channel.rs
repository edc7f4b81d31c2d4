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

use async_trait::async_trait;

use crate::common::{HandlerRef, Timeout};
use crate::message::{Message, MessagingError};

/// The capability every channel offers: accepting messages.
///
/// # Return values
///
/// `Ok(true)` means the channel accepted the message. `Ok(false)` is the "did not
/// complete" outcome: the send timed out, an interceptor declined it, or (for a
/// [`DirectChannel`](crate::channel::DirectChannel)) no handler took it. Errors are
/// reserved for exceptional conditions such as a payload type the channel does not
/// accept or a handler failure.
#[async_trait]
pub trait MessageChannel: Send + Sync + Debug {
    /// The channel's name, if it has one.
    fn name(&self) -> Option<&str>;

    /// Sends `message`, waiting as long as necessary.
    ///
    /// # Errors
    ///
    /// See [`MessageChannel::send_timeout`].
    async fn send(&self, message: Message) -> Result<bool, MessagingError> {
        self.send_timeout(message, Timeout::Infinite).await
    }

    /// Sends `message`, waiting at most `timeout` for capacity.
    ///
    /// # Errors
    ///
    /// [`MessagingError::Delivery`] when the payload type is not accepted or an
    /// interceptor vetoes the send, and whatever a synchronously invoked handler raises.
    async fn send_timeout(&self, message: Message, timeout: Timeout)
        -> Result<bool, MessagingError>;
}

/// A channel that buffers messages until a consumer asks for them.
#[async_trait]
pub trait PollableChannel: MessageChannel {
    /// Receives the next message, waiting as long as necessary.
    async fn receive(&self) -> Option<Message> {
        self.receive_timeout(Timeout::Infinite).await
    }

    /// Receives the next message, waiting at most `timeout`.
    ///
    /// Returns `None` when no message arrived in time or an interceptor declined the
    /// receive.
    async fn receive_timeout(&self, timeout: Timeout) -> Option<Message>;
}

/// A channel that pushes messages to subscribed handlers.
pub trait SubscribableChannel: MessageChannel {
    /// Registers `handler`. Returns `true` when it was not already subscribed.
    fn subscribe(&self, handler: HandlerRef) -> bool;

    /// Removes `handler`. Returns `true` when it was subscribed.
    fn unsubscribe(&self, handler: &HandlerRef) -> bool;
}
