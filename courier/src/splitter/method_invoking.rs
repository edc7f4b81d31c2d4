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

use crate::common::{FnInvoker, SharedPayload};
use crate::message::{Message, MessagingError};
use crate::splitter::{MessageSplitter, Split, SplitItem};
use crate::traits::{MethodInvoker, Payload};

/// Splits with a bound invoker.
///
/// The invoker's result decides the parts: a [`Split`] is used as is; a `Vec<Message>`,
/// `Vec<SharedPayload>` or `Vec<String>` yields one part per element; a [`Message`] or
/// any other value is a single part; no value means nothing is sent.
#[derive(Debug, Clone)]
pub struct MethodInvokingSplitter {
    invoker: Arc<dyn MethodInvoker>,
}

impl MethodInvokingSplitter {
    /// Wraps `invoker`.
    #[must_use]
    pub fn new(invoker: Arc<dyn MethodInvoker>) -> Self {
        Self { invoker }
    }

    /// Splits payloads of type `P` with `func`. Payloads of another type fail the split.
    pub fn from_payload_fn<P, R, F>(func: F) -> Self
    where
        P: Payload,
        R: Payload,
        F: Fn(&P) -> R + Send + Sync + 'static,
    {
        Self::new(Arc::new(FnInvoker::for_payload(move |payload: &P| Ok(func(payload)))))
    }

    fn interpret(result: SharedPayload) -> Split {
        let value = result.as_ref().as_any();
        if let Some(split) = value.downcast_ref::<Split>() {
            return split.clone();
        }
        if let Some(messages) = value.downcast_ref::<Vec<Message>>() {
            return Split::Many(messages.iter().cloned().map(SplitItem::Message).collect());
        }
        if let Some(payloads) = value.downcast_ref::<Vec<SharedPayload>>() {
            return Split::Many(payloads.iter().cloned().map(SplitItem::Payload).collect());
        }
        if let Some(texts) = value.downcast_ref::<Vec<String>>() {
            return Split::Many(texts.iter().cloned().map(SplitItem::payload).collect());
        }
        if let Some(message) = value.downcast_ref::<Message>() {
            return Split::Single(SplitItem::Message(message.clone()));
        }
        Split::Single(SplitItem::Payload(result))
    }
}

impl MessageSplitter for MethodInvokingSplitter {
    fn split(&self, message: &Message) -> Result<Split, MessagingError> {
        Ok(self
            .invoker
            .invoke(message)?
            .map_or(Split::Nothing, Self::interpret))
    }
}
