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

use async_trait::async_trait;
use tracing::trace;

use crate::common::Timeout;
use crate::message::{Message, MessagingError};
use crate::traits::{MessageChannel, PollableChannel};

/// A channel that accepts and discards every message and never yields one.
#[derive(Debug, Default, Clone)]
pub struct NullChannel {
    name: Option<String>,
}

impl NullChannel {
    /// Creates an anonymous null channel.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a null channel called `name`.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}

#[async_trait]
impl MessageChannel for NullChannel {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    async fn send_timeout(&self, message: Message, _timeout: Timeout) -> Result<bool, MessagingError> {
        trace!(message_id = %message.id(), "discarding message");
        Ok(true)
    }
}

#[async_trait]
impl PollableChannel for NullChannel {
    async fn receive_timeout(&self, _timeout: Timeout) -> Option<Message> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn swallows_everything() -> anyhow::Result<()> {
        let channel = NullChannel::named("void");
        assert!(channel.send(Message::new("gone".to_string())).await?);
        assert!(channel.receive().await.is_none());
        assert_eq!(channel.name(), Some("void"));
        Ok(())
    }
}
