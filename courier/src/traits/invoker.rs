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

use crate::common::SharedPayload;
use crate::message::{Message, MessagingError};
use crate::traits::PayloadType;

/// A bound, dynamically typed operation over a message.
///
/// Method-invoking selectors, transformers and splitters are built on top of an invoker.
/// The invoker declares its result type up front so that a binding with the wrong
/// shape fails when the component is constructed rather than when the first message
/// arrives.
pub trait MethodInvoker: Send + Sync + Debug {
    /// The type of value produced by [`invoke`](MethodInvoker::invoke) when it returns
    /// `Some`.
    fn return_type(&self) -> PayloadType;

    /// Invokes the operation with `message`, resolving its argument from the message
    /// or its payload.
    ///
    /// `Ok(None)` is the "no result" outcome.
    ///
    /// # Errors
    ///
    /// [`MessagingError::TypeMismatch`] when the argument cannot be resolved from the
    /// message, or whatever the operation itself reports.
    fn invoke(&self, message: &Message) -> Result<Option<SharedPayload>, MessagingError>;
}
