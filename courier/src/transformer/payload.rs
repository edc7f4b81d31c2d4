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
use std::marker::PhantomData;
use std::sync::Arc;

use crate::common::BoxError;
use crate::message::{Message, MessagingError};
use crate::traits::Payload;
use crate::transformer::Transformer;

/// A [`Transformer`] that maps a payload of type `P` to a new payload of type `R`,
/// keeping the original headers.
///
/// A message whose payload is not a `P` fails with a type mismatch, wrapped as a
/// transformation error.
///
/// ```rust,ignore
/// let upper = PayloadTransformer::new(|text: &String| Ok::<_, BoxError>(text.to_uppercase()));
/// ```
pub struct PayloadTransformer<P, R, F> {
    func: F,
    _types: PhantomData<fn(&P) -> R>,
}

impl<P, R, F> fmt::Debug for PayloadTransformer<P, R, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PayloadTransformer")
            .field("from", &std::any::type_name::<P>())
            .field("to", &std::any::type_name::<R>())
            .finish_non_exhaustive()
    }
}

impl<P, R, F, E> PayloadTransformer<P, R, F>
where
    P: Payload,
    R: Payload,
    F: Fn(&P) -> Result<R, E> + Send + Sync,
    E: Into<BoxError>,
{
    /// Wraps `func`.
    pub const fn new(func: F) -> Self {
        Self {
            func,
            _types: PhantomData,
        }
    }
}

impl<P, R, F, E> Transformer for PayloadTransformer<P, R, F>
where
    P: Payload,
    R: Payload,
    F: Fn(&P) -> Result<R, E> + Send + Sync,
    E: Into<BoxError>,
{
    fn transform(&self, message: &Message) -> Result<Message, MessagingError> {
        let payload = message
            .payload_as::<P>()
            .map_err(|error| error.into_transformation(message))?;
        let transformed =
            (self.func)(payload).map_err(|error| MessagingError::transformation(message, error))?;
        Ok(Message::from_parts(
            Arc::new(transformed),
            message.headers().to_map(),
        ))
    }
}
