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

use tracing::debug;

use crate::common::SelectorRef;
use crate::message::{DeliveryFailure, Message, MessagingError};
use crate::traits::{ChannelInterceptor, MessageChannel};

/// Vetoes any send that one of its selectors does not accept.
///
/// ```rust,ignore
/// let guard = MessageSelectingInterceptor::new(vec![Arc::new(UnexpiredMessageSelector)]);
/// let channel = QueueChannel::new().with_interceptor(Arc::new(guard));
/// ```
#[derive(Debug, Clone)]
pub struct MessageSelectingInterceptor {
    selectors: Vec<SelectorRef>,
}

impl MessageSelectingInterceptor {
    /// Creates an interceptor requiring every selector in `selectors` to accept.
    #[must_use]
    pub fn new(selectors: Vec<SelectorRef>) -> Self {
        Self { selectors }
    }
}

impl ChannelInterceptor for MessageSelectingInterceptor {
    fn pre_send(
        &self,
        message: Message,
        channel: &dyn MessageChannel,
    ) -> Result<Option<Message>, MessagingError> {
        if let Some(selector) = self
            .selectors
            .iter()
            .find(|selector| !selector.accept(&message))
        {
            debug!(channel = ?channel.name(), ?selector, "send vetoed by selector");
            let reason = format!("selector {selector:?} rejected the message");
            return Err(MessagingError::delivery(message, DeliveryFailure::Vetoed(reason)));
        }
        Ok(Some(message))
    }
}
