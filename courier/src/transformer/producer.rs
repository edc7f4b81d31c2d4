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

use tracing::trace;

use crate::handler::{ReplyMessageHolder, ReplyProducer, ReplyProducingHandler};
use crate::message::{Message, MessagingError};

/// Turns one message into exactly one message.
pub trait Transformer: Send + Sync + Debug {
    /// Transforms `message`.
    ///
    /// # Errors
    ///
    /// Any failure; callers report it as [`MessagingError::Transformation`].
    fn transform(&self, message: &Message) -> Result<Message, MessagingError>;
}

/// Plugs a [`Transformer`] into a [`ReplyProducingHandler`].
///
/// Every failure reaches the caller as a [`MessagingError::Transformation`] carrying the
/// original message; a failure that already is one is not wrapped again.
#[derive(Debug, Clone)]
pub struct TransformingProducer<T> {
    transformer: T,
}

impl<T: Transformer> TransformingProducer<T> {
    /// Wraps `transformer`.
    pub const fn new(transformer: T) -> Self {
        Self { transformer }
    }

    /// Wraps `transformer` in a handler ready to be subscribed.
    pub fn handler(transformer: T) -> ReplyProducingHandler<Self> {
        ReplyProducingHandler::new(Self::new(transformer))
    }

    /// The wrapped transformer.
    pub const fn transformer(&self) -> &T {
        &self.transformer
    }
}

impl<T: Transformer> ReplyProducer for TransformingProducer<T> {
    fn produce_replies(
        &self,
        message: &Message,
        replies: &mut ReplyMessageHolder,
    ) -> Result<(), MessagingError> {
        let transformed = self
            .transformer
            .transform(message)
            .map_err(|error| error.into_transformation(message))?;
        trace!(from = %message.id(), to = %transformed.id(), "message transformed");
        replies.add_message(transformed);
        Ok(())
    }
}
