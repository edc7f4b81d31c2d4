//! Channel implementations.
//!
//! *   [`QueueChannel`] and [`PriorityChannel`]: pollable, buffered channels.
//! *   [`DirectChannel`]: hands each message to one subscriber on the sender's task.
//! *   [`PublishSubscribeChannel`]: broadcasts each message to all subscribers.
//! *   [`NullChannel`]: discards everything.
//!
//! Every channel runs its interceptor chain around send and receive. [`ChannelTemplate`]
//! adds preset timeouts and request/reply on top of any channel.

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
pub use direct::DirectChannel;
pub use interceptor::MessageSelectingInterceptor;
pub use null::NullChannel;
pub use priority::{priority_header_comparator, PriorityChannel};
pub use publish_subscribe::PublishSubscribeChannel;
pub use queue::QueueChannel;
pub use template::ChannelTemplate;

// --- Submodules ---

/// Send and receive plumbing shared by all channels.
mod base;
/// Defines [`DirectChannel`].
mod direct;
/// Defines [`MessageSelectingInterceptor`].
mod interceptor;
/// Defines [`NullChannel`].
mod null;
/// Defines [`PriorityChannel`].
mod priority;
/// Defines [`PublishSubscribeChannel`].
mod publish_subscribe;
/// Defines [`QueueChannel`] and its blocking buffer.
mod queue;
/// Defines [`ChannelTemplate`].
mod template;
