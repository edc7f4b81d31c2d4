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

use crate::common::FnInvoker;
use crate::message::{Message, MessagingError};
use crate::traits::{MethodInvoker, Payload};
use crate::transformer::Transformer;

/// Transforms with a bound invoker.
///
/// A [`Message`] result replaces the message; any other result becomes the payload of a
/// message with the original headers. An invocation that produces no value fails.
#[derive(Debug, Clone)]
pub struct MethodInvokingTransformer {
    invoker: Arc<dyn MethodInvoker>,
}

impl MethodInvokingTransformer {
    /// Wraps `invoker`.
    #[must_use]
    pub fn new(invoker: Arc<dyn MethodInvoker>) -> Self {
        Self { invoker }
    }

    /// Transforms payloads of type `P` with `func`.
    pub fn from_payload_fn<P, R, F>(func: F) -> Self
    where
        P: Payload,
        R: Payload,
        F: Fn(&P) -> R + Send + Sync + 'static,
    {
        Self::new(Arc::new(FnInvoker::for_payload(move |payload: &P| Ok(func(payload)))))
    }
}

impl Transformer for MethodInvokingTransformer {
    fn transform(&self, message: &Message) -> Result<Message, MessagingError> {
        let result = self
            .invoker
            .invoke(message)
            .map_err(|error| error.into_transformation(message))?
            .ok_or_else(|| {
                MessagingError::transformation(message, "transformer method produced no value")
            })?;
        if let Some(replacement) = result.as_ref().as_any().downcast_ref::<Message>() {
            return Ok(replacement.clone());
        }
        Ok(Message::from_parts(result, message.headers().to_map()))
    }
}
