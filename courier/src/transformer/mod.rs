//! Transformers: stages that turn each message into exactly one new message.
//!
//! *   [`HeaderTransformer`] and [`HeaderEnricher`]: rewrite headers, keep the payload.
//! *   [`PayloadTransformer`]: map the payload, keep the headers.
//! *   [`MethodInvokingTransformer`]: delegate to a bound invoker.
//!
//! [`TransformingProducer`] plugs any of them into a
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
pub use header::{HeaderEnricher, HeaderMutator, HeaderTransformer};
pub use method_invoking::MethodInvokingTransformer;
pub use payload::PayloadTransformer;
pub use producer::{Transformer, TransformingProducer};

// --- Submodules ---

/// Defines the header transformers and [`HeaderEnricher`].
mod header;
/// Defines [`MethodInvokingTransformer`].
mod method_invoking;
/// Defines [`PayloadTransformer`].
mod payload;
/// Defines [`Transformer`] and [`TransformingProducer`].
mod producer;
