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
#![allow(dead_code)]

use std::sync::Arc;

use courier::prelude::*;
use parking_lot::Mutex;
use tracing::trace;

/// Records every message it is given.
#[derive(Debug, Default)]
pub struct Recorder {
    seen: Mutex<Vec<Message>>,
}

impl Recorder {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn messages(&self) -> Vec<Message> {
        self.seen.lock().clone()
    }

    pub fn count(&self) -> usize {
        self.seen.lock().len()
    }

    /// The `String` payloads seen so far, in order.
    pub fn texts(&self) -> Vec<String> {
        self.seen
            .lock()
            .iter()
            .filter_map(|message| message.payload::<String>().cloned())
            .collect()
    }
}

#[async_trait]
impl MessageHandler for Recorder {
    async fn handle(&self, message: Message) -> Result<(), MessagingError> {
        trace!(id = %message.id(), "recorded");
        self.seen.lock().push(message);
        Ok(())
    }
}

/// Rejects everything, counting the attempts.
#[derive(Debug, Default)]
pub struct Rejecter {
    attempts: Mutex<usize>,
}

impl Rejecter {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn attempts(&self) -> usize {
        *self.attempts.lock()
    }
}

#[async_trait]
impl MessageHandler for Rejecter {
    async fn handle(&self, message: Message) -> Result<(), MessagingError> {
        *self.attempts.lock() += 1;
        Err(MessagingError::rejected(message, "rejecter declines everything"))
    }
}
