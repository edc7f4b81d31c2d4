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
use std::fmt::{self, Debug};
use std::future::Future;

use async_trait::async_trait;

use crate::message::{Message, MessagingError};

/// The unit of work every processing stage and custom endpoint implements.
///
/// A handler receives each message delivered to it by a dispatcher. Returning
/// [`MessagingError::Rejected`] declines the message: a
/// [`SimpleDispatcher`](crate::dispatcher::SimpleDispatcher) then offers it to the next
/// handler. Any other error propagates to the sender unmodified.
#[async_trait]
pub trait MessageHandler: Send + Sync + Debug {
    /// Processes `message`.
    ///
    /// # Errors
    ///
    /// [`MessagingError::Rejected`] to decline the message, or any other variant to
    /// report a failure.
    async fn handle(&self, message: Message) -> Result<(), MessagingError>;
}

/// Adapts an async closure into a [`MessageHandler`].
///
/// ```rust,ignore
/// let handler = FnHandler::new("audit", |message: Message| async move {
///     tracing::info!(id = %message.id(), "audited");
///     Ok(())
/// });
/// ```
pub struct FnHandler<F> {
    name: String,
    func: F,
}

impl<F> FnHandler<F> {
    /// Wraps `func`; `name` identifies the handler in logs.
    pub fn new<Fut>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(Message) -> Fut + Send + Sync,
        Fut: Future<Output = Result<(), MessagingError>> + Send,
    {
        Self {
            name: name.into(),
            func,
        }
    }
}

impl<F> Debug for FnHandler<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnHandler").field("name", &self.name).finish()
    }
}

#[async_trait]
impl<F, Fut> MessageHandler for FnHandler<F>
where
    F: Fn(Message) -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), MessagingError>> + Send,
{
    async fn handle(&self, message: Message) -> Result<(), MessagingError> {
        (self.func)(message).await
    }
}
