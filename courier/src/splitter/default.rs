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

use crate::common::SharedPayload;
use crate::message::{Message, MessagingError};
use crate::splitter::{MessageSplitter, Split, SplitItem};

/// Splits collection payloads into their elements and text payloads into tokens.
///
/// * A `Vec<String>` or `Vec<SharedPayload>` payload yields one part per element.
/// * A `String` payload is tokenized when delimiters are configured: every character of
///   the delimiter string separates tokens, and empty tokens are skipped.
/// * Anything else, including text without delimiters, is passed on unsplit.
#[derive(Debug, Clone, Default)]
pub struct DefaultMessageSplitter {
    delimiters: Option<String>,
}

impl DefaultMessageSplitter {
    /// Creates a splitter without delimiters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokenizes text payloads on any character of `delimiters`.
    #[must_use]
    pub fn with_delimiters(mut self, delimiters: impl Into<String>) -> Self {
        self.delimiters = Some(delimiters.into()).filter(|d: &String| !d.is_empty());
        self
    }

    fn tokenize(text: &str, delimiters: &str) -> Vec<SplitItem> {
        text.split(|c: char| delimiters.contains(c))
            .filter(|token| !token.is_empty())
            .map(|token| SplitItem::payload(token.to_owned()))
            .collect()
    }
}

impl MessageSplitter for DefaultMessageSplitter {
    fn split(&self, message: &Message) -> Result<Split, MessagingError> {
        if let Some(items) = message.payload::<Vec<String>>() {
            return Ok(Split::Many(
                items.iter().cloned().map(SplitItem::payload).collect(),
            ));
        }
        if let Some(items) = message.payload::<Vec<SharedPayload>>() {
            return Ok(Split::Many(
                items.iter().cloned().map(SplitItem::Payload).collect(),
            ));
        }
        if let (Some(delimiters), Some(text)) = (&self.delimiters, message.payload::<String>()) {
            return Ok(Split::Many(Self::tokenize(text, delimiters)));
        }
        Ok(Split::Single(SplitItem::Message(message.clone())))
    }
}
