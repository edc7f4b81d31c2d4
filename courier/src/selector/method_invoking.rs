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

use std::sync::Arc;

use tracing::warn;

use crate::common::FnInvoker;
use crate::message::{Message, MessagingError};
use crate::traits::{MessageSelector, MethodInvoker, Payload, PayloadType};

/// Adapts a boolean-returning invoker into a selector.
///
/// [`accept`](MessageSelector::accept) treats an invocation failure or a missing result
/// as a rejection and logs it; [`try_accept`](Self::try_accept) reports it instead.
#[derive(Debug, Clone)]
pub struct MethodInvokingSelector {
    invoker: Arc<dyn MethodInvoker>,
}

impl MethodInvokingSelector {
    /// Wraps `invoker`.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingError::Configuration`] when the invoker does not return `bool`.
    pub fn new(invoker: Arc<dyn MethodInvoker>) -> Result<Self, MessagingError> {
        let return_type = invoker.return_type();
        if return_type != PayloadType::of::<bool>() {
            return Err(MessagingError::Configuration(format!(
                "selector method must return bool, not {}",
                return_type.name()
            )));
        }
        Ok(Self { invoker })
    }

    /// Creates a selector from a predicate over the message.
    pub fn from_fn<F>(predicate: F) -> Self
    where
        F: Fn(&Message) -> bool + Send + Sync + 'static,
    {
        Self {
            invoker: Arc::new(FnInvoker::for_message(move |message: &Message| {
                Ok(predicate(message))
            })),
        }
    }

    /// Creates a selector from a predicate over the payload. Payloads of another type
    /// are rejected.
    pub fn from_payload_fn<P, F>(predicate: F) -> Self
    where
        P: Payload,
        F: Fn(&P) -> bool + Send + Sync + 'static,
    {
        Self {
            invoker: Arc::new(FnInvoker::for_payload(move |payload: &P| Ok(predicate(payload)))),
        }
    }

    /// Evaluates the invoker against `message`.
    ///
    /// # Errors
    ///
    /// The invocation's own error, or [`MessagingError::TypeMismatch`] when it produced
    /// no value or a value that is not a `bool`.
    pub fn try_accept(&self, message: &Message) -> Result<bool, MessagingError> {
        let result = self.invoker.invoke(message)?.ok_or_else(|| {
            MessagingError::type_mismatch("selector result", "bool", "no value")
        })?;
        result
            .as_ref()
            .as_any()
            .downcast_ref::<bool>()
            .copied()
            .ok_or_else(|| {
                MessagingError::type_mismatch("selector result", "bool", result.as_ref().type_name())
            })
    }
}

impl MessageSelector for MethodInvokingSelector {
    fn accept(&self, message: &Message) -> bool {
        self.try_accept(message).unwrap_or_else(|error| {
            warn!(message_id = %message.id(), %error, "selector invocation failed, rejecting");
            false
        })
    }
}
