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

use std::time::Duration;

use tokio::time::Instant;

/// How long a channel operation may wait for room (send) or for a message (receive).
///
/// Expiry is never an error: the operation reports "did not complete" through its
/// return value (`Ok(false)` for sends, `None` for receives).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Timeout {
    /// Make a single attempt without waiting.
    Immediate,
    /// Wait at most the given duration.
    After(Duration),
    /// Wait until the operation completes.
    #[default]
    Infinite,
}

impl Timeout {
    /// Interprets signed milliseconds: negative waits forever, zero does not wait.
    #[must_use]
    pub fn from_millis(millis: i64) -> Self {
        match u64::try_from(millis) {
            Err(_) => Self::Infinite,
            Ok(0) => Self::Immediate,
            Ok(ms) => Self::After(Duration::from_millis(ms)),
        }
    }

    /// The instant at which an operation started now must give up, if any.
    ///
    /// A duration too large to represent as an instant has no deadline and waits like
    /// [`Timeout::Infinite`].
    pub(crate) fn deadline(self) -> Option<Instant> {
        match self {
            Self::After(duration) => Instant::now().checked_add(duration),
            Self::Immediate | Self::Infinite => None,
        }
    }
}

impl From<Duration> for Timeout {
    fn from(duration: Duration) -> Self {
        if duration.is_zero() {
            Self::Immediate
        } else {
            Self::After(duration)
        }
    }
}
