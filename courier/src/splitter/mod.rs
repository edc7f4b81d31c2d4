//! Splitters: stages that turn one message into an ordered sequence of parts.
//!
//! A [`MessageSplitter`] decides the parts; a [`SplittingProducer`] stamps the
//! correlation and sequence headers and plugs the splitter into a
//! [`ReplyProducingHandler`](crate::handler::ReplyProducingHandler).

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
pub use default::DefaultMessageSplitter;
pub use method_invoking::MethodInvokingSplitter;
pub use producer::{MessageSplitter, Split, SplitItem, SplittingProducer};

// --- Submodules ---

/// Defines [`DefaultMessageSplitter`].
mod default;
/// Defines [`MethodInvokingSplitter`].
mod method_invoking;
/// Defines [`MessageSplitter`], [`Split`] and [`SplittingProducer`].
mod producer;
