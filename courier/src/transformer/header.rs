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

use std::collections::HashMap;
use std::fmt::Debug;

use crate::common::BoxError;
use crate::message::{HeaderValue, Message, MessagingError};
use crate::traits::Payload;
use crate::transformer::Transformer;

/// Edits a copy of a message's headers.
pub trait HeaderMutator: Send + Sync + Debug {
    /// Changes `headers` in place. Changes to `id` and `timestamp` have no effect.
    ///
    /// # Errors
    ///
    /// Any failure; the transformation then fails.
    fn mutate(&self, headers: &mut HashMap<String, HeaderValue>) -> Result<(), BoxError>;
}

fn rebuild_with_headers(
    mutator: &dyn HeaderMutator,
    message: &Message,
) -> Result<Message, MessagingError> {
    let mut headers = message.headers().to_map();
    mutator
        .mutate(&mut headers)
        .map_err(|error| MessagingError::transformation(message, error))?;
    Ok(Message::from_parts(message.shared_payload(), headers))
}

/// A [`Transformer`] that keeps the payload and lets a [`HeaderMutator`] rewrite the
/// headers.
#[derive(Debug, Clone)]
pub struct HeaderTransformer<H> {
    mutator: H,
}

impl<H: HeaderMutator> HeaderTransformer<H> {
    /// Wraps `mutator`.
    pub const fn new(mutator: H) -> Self {
        Self { mutator }
    }
}

impl<H: HeaderMutator> Transformer for HeaderTransformer<H> {
    fn transform(&self, message: &Message) -> Result<Message, MessagingError> {
        rebuild_with_headers(&self.mutator, message)
    }
}

/// Adds a fixed set of headers.
///
/// Existing headers are kept unless [`overwrite`](Self::overwrite) is set.
///
/// ```rust,ignore
/// let enricher = HeaderEnricher::new()
///     .with_header("tenant", "acme".to_string())
///     .overwrite(true);
/// ```
#[derive(Debug, Clone, Default)]
pub struct HeaderEnricher {
    headers: HashMap<String, HeaderValue>,
    overwrite: bool,
}

impl HeaderEnricher {
    /// Creates an enricher adding nothing yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an enricher adding `headers`.
    #[must_use]
    pub fn from_headers(headers: HashMap<String, HeaderValue>) -> Self {
        Self {
            headers,
            overwrite: false,
        }
    }

    /// Adds `key` with `value` to the headers to set.
    #[must_use]
    pub fn with_header<T: Payload>(mut self, key: impl Into<String>, value: T) -> Self {
        self.headers.insert(key.into(), HeaderValue::new(value));
        self
    }

    /// Whether existing headers are replaced.
    #[must_use]
    pub const fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }
}

impl HeaderMutator for HeaderEnricher {
    fn mutate(&self, headers: &mut HashMap<String, HeaderValue>) -> Result<(), BoxError> {
        for (key, value) in &self.headers {
            if self.overwrite || !headers.contains_key(key) {
                headers.insert(key.clone(), value.clone());
            }
        }
        Ok(())
    }
}

impl Transformer for HeaderEnricher {
    fn transform(&self, message: &Message) -> Result<Message, MessagingError> {
        rebuild_with_headers(self, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::MessageBuilder;

    fn tenant(message: &Message) -> Option<String> {
        message
            .headers()
            .get("tenant")
            .and_then(HeaderValue::downcast_ref::<String>)
            .cloned()
    }

    #[test]
    fn enricher_keeps_existing_values_by_default() -> anyhow::Result<()> {
        let message = MessageBuilder::with_payload(1_u8)
            .set_header("tenant", "original".to_string())
            .build();
        let enricher = HeaderEnricher::new()
            .with_header("tenant", "enriched".to_string())
            .with_header("region", "eu".to_string());

        let kept = enricher.clone().transform(&message)?;
        assert_eq!(tenant(&kept).as_deref(), Some("original"));
        assert!(kept.headers().contains_key("region"));

        let replaced = enricher.overwrite(true).transform(&message)?;
        assert_eq!(tenant(&replaced).as_deref(), Some("enriched"));
        assert_eq!(replaced.payload::<u8>(), Some(&1));
        Ok(())
    }

    #[derive(Debug)]
    struct Failing;

    impl HeaderMutator for Failing {
        fn mutate(&self, _headers: &mut HashMap<String, HeaderValue>) -> Result<(), BoxError> {
            Err("cannot rewrite".into())
        }
    }

    #[test]
    fn mutator_failures_are_transformation_errors() {
        let message = Message::new(1_u8);
        let result = HeaderTransformer::new(Failing).transform(&message);
        assert!(matches!(
            result,
            Err(MessagingError::Transformation { message: failed, .. }) if failed.id() == message.id()
        ));
    }
}
