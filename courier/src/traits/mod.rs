//! Defines the capability traits the messaging core is assembled from.
//!
//! These traits sit at the seams between components: channels own dispatchers,
//! dispatchers drive handlers, and processing stages are built from selectors and
//! invokers.
//!
//! # Key Traits
//!
//! *   [`Payload`]: Marker trait for payloads and header values.
//! *   [`MessageChannel`], [`PollableChannel`], [`SubscribableChannel`]: Channel capabilities.
//! *   [`MessageHandler`]: The unit every stage and endpoint implements.
//! *   [`MessageDispatcher`] and [`TaskExecutor`]: Delivery strategy and the pool it may use.
//! *   [`ChannelInterceptor`]: Hooks around send and receive.
//! *   [`MessageSelector`]: Boolean predicate over a message.
//! *   [`MethodInvoker`]: Adapter binding user code to the message contract.

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
pub use channel::{MessageChannel, PollableChannel, SubscribableChannel};
pub use dispatcher::{MessageDispatcher, TaskExecutor};
pub use handler::{FnHandler, MessageHandler};
pub use interceptor::ChannelInterceptor;
pub use invoker::MethodInvoker;
pub use payload::{Payload, PayloadType};
pub use selector::MessageSelector;

// --- Submodules ---

/// Defines the channel capability traits.
mod channel;
/// Defines [`MessageDispatcher`] and [`TaskExecutor`].
mod dispatcher;
/// Defines [`MessageHandler`].
mod handler;
/// Defines [`ChannelInterceptor`].
mod interceptor;
/// Defines [`MethodInvoker`].
mod invoker;
/// Defines the [`Payload`] marker trait.
mod payload;
/// Defines [`MessageSelector`].
mod selector;
