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
use tracing::{debug, instrument, trace};

use crate::common::HandlerRef;
use crate::dispatcher::handler_set::HandlerSet;
use crate::message::{DeliveryFailure, Message, MessagingError};
use crate::traits::MessageDispatcher;

/// Delivers each message to exactly one handler: the first, in registration order, that
/// does not reject it.
///
/// Handlers run inline on the caller's task, so the outcome of every attempt is known
/// before the next handler is tried.
#[derive(Debug, Default)]
pub struct SimpleDispatcher {
    handlers: HandlerSet,
}

impl SimpleDispatcher {
    /// Creates a dispatcher with no handlers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageDispatcher for SimpleDispatcher {
    fn add_handler(&self, handler: HandlerRef) -> bool {
        self.handlers.add(handler)
    }

    fn remove_handler(&self, handler: &HandlerRef) -> bool {
        self.handlers.remove(handler)
    }

    fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// # Errors
    ///
    /// * [`DeliveryFailure::NoSubscribers`] when no handler is registered.
    /// * [`MessagingError::Rejected`] when every handler rejects the message.
    /// * Any other handler error, unmodified.
    #[instrument(skip_all, fields(message_id = %message.id()))]
    async fn dispatch(&self, message: Message) -> Result<bool, MessagingError> {
        let handlers = self.handlers.snapshot();
        if handlers.is_empty() {
            return Err(MessagingError::delivery(message, DeliveryFailure::NoSubscribers));
        }
        for handler in handlers.iter() {
            match handler.handle(message.clone()).await {
                Ok(()) => {
                    trace!(?handler, "message accepted");
                    return Ok(true);
                }
                Err(error) if error.is_rejection() => {
                    debug!(?handler, %error, "handler rejected message, trying next");
                }
                Err(error) => return Err(error),
            }
        }
        let reason = format!("all {} handlers rejected the message", handlers.len());
        Err(MessagingError::rejected(message, reason))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::traits::FnHandler;

    fn counting(counter: &Arc<AtomicUsize>, reject: bool) -> HandlerRef {
        let counter = counter.clone();
        Arc::new(FnHandler::new("counting", move |message: Message| {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                if reject {
                    Err(MessagingError::rejected(message, "not mine"))
                } else {
                    Ok(())
                }
            }
        }))
    }

    #[tokio::test]
    async fn stops_at_first_acceptor() -> anyhow::Result<()> {
        let dispatcher = SimpleDispatcher::new();
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        dispatcher.add_handler(counting(&first, false));
        dispatcher.add_handler(counting(&second, false));

        assert!(dispatcher.dispatch(Message::new(1_u8)).await?);
        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 0);
        Ok(())
    }

    #[tokio::test]
    async fn handler_failures_propagate_without_trying_others() {
        let dispatcher = SimpleDispatcher::new();
        let later = Arc::new(AtomicUsize::new(0));
        dispatcher.add_handler(Arc::new(FnHandler::new("broken", |message: Message| async move {
            Err(MessagingError::handling(message, "boom"))
        })));
        dispatcher.add_handler(counting(&later, false));

        let result = dispatcher.dispatch(Message::new(1_u8)).await;
        assert!(matches!(result, Err(MessagingError::Handling { .. })));
        assert_eq!(later.load(Ordering::SeqCst), 0);
    }
}
