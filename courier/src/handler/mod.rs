//! Reply-producing handlers and the message filter.
//!
//! A [`ReplyProducingHandler`] runs a [`ReplyProducer`] (a filter, splitter or
//! transformer) and sends what it produces to an output channel. The producer only fills
//! a [`ReplyMessageHolder`], so it can be tested without any channel.

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

// --- Public Re-exports ---
pub use filter::MessageFilter;
pub use producer::{ReplyProducer, ReplyProducingHandler};
pub use reply::{ReplyCandidate, ReplyContent, ReplyMessageHolder};

// --- Submodules ---

/// Defines [`MessageFilter`].
mod filter;
/// Defines [`ReplyProducer`] and [`ReplyProducingHandler`].
mod producer;
/// Defines [`ReplyMessageHolder`] and its reply candidates.
mod reply;
