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

//! Defines common type aliases shared across `courier`.
//!
//! Centralizing these keeps the signatures of handlers, executors and comparators
//! readable where they are used.

use std::cmp::Ordering;
use std::sync::Arc;

use futures::future::BoxFuture;

use crate::message::Message;
use crate::traits::{
    ChannelInterceptor, MessageChannel, MessageHandler, MessageSelector, Payload,
};

/// A boxed, thread-safe error used as the cause of handling and transformation failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A unit of work submitted to a [`TaskExecutor`](crate::traits::TaskExecutor).
pub type Task = BoxFuture<'static, ()>;

/// A shared, dynamically typed value (payload or header value).
pub type SharedPayload = Arc<dyn Payload>;

/// A shared reference to any channel.
pub type ChannelRef = Arc<dyn MessageChannel>;

/// A shared reference to a handler registered with a dispatcher or channel.
pub type HandlerRef = Arc<dyn MessageHandler>;

/// A shared reference to a selector.
pub type SelectorRef = Arc<dyn MessageSelector>;

/// A shared reference to a channel interceptor.
pub type InterceptorRef = Arc<dyn ChannelInterceptor>;

/// Orders messages in a [`PriorityChannel`](crate::channel::PriorityChannel).
///
/// `Ordering::Less` means the first message is received before the second.
pub type MessageComparator = Arc<dyn Fn(&Message, &Message) -> Ordering + Send + Sync>;
