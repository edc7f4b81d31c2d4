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

use tracing::trace;

use crate::common::SelectorRef;
use crate::handler::{ReplyMessageHolder, ReplyProducer};
use crate::message::{Message, MessagingError};

/// Passes accepted messages through unchanged and drops the rest.
///
/// With [`raise_on_rejection`](Self::raise_on_rejection), a rejected message fails with
/// [`MessagingError::Rejected`] instead of disappearing.
#[derive(Debug, Clone)]
pub struct MessageFilter {
    selector: SelectorRef,
    raise_on_rejection: bool,
}

impl MessageFilter {
    /// Creates a filter that silently drops what `selector` rejects.
    #[must_use]
    pub fn new(selector: SelectorRef) -> Self {
        Self {
            selector,
            raise_on_rejection: false,
        }
    }

    /// Chooses between dropping (`false`) and failing (`true`) on rejection.
    #[must_use]
    pub const fn raise_on_rejection(mut self, raise: bool) -> Self {
        self.raise_on_rejection = raise;
        self
    }
}

impl ReplyProducer for MessageFilter {
    fn produce_replies(
        &self,
        message: &Message,
        replies: &mut ReplyMessageHolder,
    ) -> Result<(), MessagingError> {
        if self.selector.accept(message) {
            replies.add_message(message.clone());
            return Ok(());
        }
        if self.raise_on_rejection {
            return Err(MessagingError::rejected(
                message.clone(),
                "message filter rejected the message",
            ));
        }
        trace!(message_id = %message.id(), "message filtered out");
        Ok(())
    }
}
