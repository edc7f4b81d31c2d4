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

use crate::message::{Message, MessagingError};
use crate::traits::{MessageSelector, Payload, PayloadType};

/// Accepts messages whose payload is one of the configured types.
#[derive(Debug, Clone)]
pub struct PayloadTypeSelector {
    types: Vec<PayloadType>,
}

impl PayloadTypeSelector {
    /// Creates a selector accepting any of `types`.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingError::Configuration`] when `types` is empty.
    pub fn new(types: Vec<PayloadType>) -> Result<Self, MessagingError> {
        if types.is_empty() {
            return Err(MessagingError::Configuration(
                "payload type selector needs at least one type".into(),
            ));
        }
        Ok(Self { types })
    }

    /// Creates a selector accepting payloads of type `T` only.
    #[must_use]
    pub fn of<T: Payload>() -> Self {
        Self {
            types: vec![PayloadType::of::<T>()],
        }
    }

    /// The accepted types.
    #[must_use]
    pub fn types(&self) -> &[PayloadType] {
        &self.types
    }
}

impl MessageSelector for PayloadTypeSelector {
    fn accept(&self, message: &Message) -> bool {
        let payload = message.payload_value();
        self.types.iter().any(|payload_type| payload_type.matches(payload))
    }
}
