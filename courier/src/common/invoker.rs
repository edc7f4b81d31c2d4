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

use std::fmt;
use std::sync::Arc;

use crate::common::SharedPayload;
use crate::message::{Message, MessagingError};
use crate::traits::{MethodInvoker, Payload, PayloadType};

type InvokeFn = dyn Fn(&Message) -> Result<Option<SharedPayload>, MessagingError> + Send + Sync;

/// A [`MethodInvoker`] over a closure.
///
/// The closure takes either the whole message or its payload, downcast to a concrete
/// type. A message whose payload is of another type fails the invocation with
/// [`MessagingError::TypeMismatch`].
///
/// ```rust,ignore
/// let longer_than_three = FnInvoker::for_payload(|text: &String| Ok(text.len() > 3));
/// let selector = MethodInvokingSelector::new(Arc::new(longer_than_three))?;
/// ```
#[derive(Clone)]
pub struct FnInvoker {
    return_type: PayloadType,
    func: Arc<InvokeFn>,
}

impl fmt::Debug for FnInvoker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnInvoker")
            .field("return_type", &self.return_type)
            .finish_non_exhaustive()
    }
}

impl FnInvoker {
    /// Binds a closure over the message that always produces a value.
    pub fn for_message<R, F>(func: F) -> Self
    where
        R: Payload,
        F: Fn(&Message) -> Result<R, MessagingError> + Send + Sync + 'static,
    {
        Self::for_message_opt(move |message: &Message| func(message).map(Some))
    }

    /// Binds a closure over the message that may produce no value.
    pub fn for_message_opt<R, F>(func: F) -> Self
    where
        R: Payload,
        F: Fn(&Message) -> Result<Option<R>, MessagingError> + Send + Sync + 'static,
    {
        Self {
            return_type: PayloadType::of::<R>(),
            func: Arc::new(move |message: &Message| {
                Ok(func(message)?.map(|value| Arc::new(value) as SharedPayload))
            }),
        }
    }

    /// Binds a closure over the payload that always produces a value.
    pub fn for_payload<P, R, F>(func: F) -> Self
    where
        P: Payload,
        R: Payload,
        F: Fn(&P) -> Result<R, MessagingError> + Send + Sync + 'static,
    {
        Self::for_message(move |message: &Message| func(message.payload_as::<P>()?))
    }

    /// Binds a closure over the payload that may produce no value.
    pub fn for_payload_opt<P, R, F>(func: F) -> Self
    where
        P: Payload,
        R: Payload,
        F: Fn(&P) -> Result<Option<R>, MessagingError> + Send + Sync + 'static,
    {
        Self::for_message_opt(move |message: &Message| func(message.payload_as::<P>()?))
    }
}

impl MethodInvoker for FnInvoker {
    fn return_type(&self) -> PayloadType {
        self.return_type
    }

    fn invoke(&self, message: &Message) -> Result<Option<SharedPayload>, MessagingError> {
        (self.func)(message)
    }
}
